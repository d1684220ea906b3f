use drydock_build::BuildConfig;
use drydock_build::secret::malformed_entries;
use rand::Rng;
use rand::distributions::Alphanumeric;

const TEMP_TAG_LEN: usize = 16;

/// ランダムな一時タグを生成（小文字英数字 16 文字）
pub fn generate_temp_tag() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMP_TAG_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// 捨てられるシークレット指定を警告
///
/// コマンドの組み立ては止めない。
pub fn warn_malformed_secrets(config: &BuildConfig) {
    for (setting, entries) in [
        ("secret_envs", &config.secret_envs),
        ("secret_files", &config.secret_files),
    ] {
        for entry in malformed_entries(entries) {
            tracing::warn!(
                "Ignoring malformed {} entry {:?} (expected id=value)",
                setting,
                entry
            );
        }
    }
}
