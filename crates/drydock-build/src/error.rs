use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid build configuration: {0}")]
    InvalidConfig(String),

    #[error("Settings file not found: {0}")]
    SettingsNotFound(PathBuf),

    #[error("Failed to parse settings file {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// ユーザー向けの分かりやすいエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            BuildError::InvalidConfig(msg) => {
                format!(
                    "ビルド設定が不正です: {}\n\
                     \n\
                     解決方法:\n\
                     1. PLUGIN_DOCKERFILE / PLUGIN_CONTEXT を確認してください\n\
                     2. 設定ファイルを使う場合は --config で指定してください",
                    msg
                )
            }
            BuildError::SettingsNotFound(path) => {
                format!(
                    "設定ファイルが見つかりません: {}\n\
                     \n\
                     --config (PLUGIN_CONFIG) のパスを確認してください。",
                    path.display()
                )
            }
            BuildError::SettingsParse { path, source } => {
                format!(
                    "設定ファイルを読み込めません: {}\n理由: {}\n\
                     \n\
                     フィールド名は dockerfile, context, secret_envs などの snake_case です。",
                    path.display(),
                    source
                )
            }
            _ => format!("{}", self),
        }
    }
}

pub type BuildResult<T> = std::result::Result<T, BuildError>;
