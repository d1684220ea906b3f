//! BuildKit シークレット指定のパース
//!
//! `id=value` 形式の文字列を `--secret` フラグに変換します。

/// シークレットの取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    /// 環境変数から取得 (`env=`)
    Env,
    /// ファイルから取得 (`src=`)
    File,
}

impl SecretSource {
    fn as_key(&self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::File => "src",
        }
    }
}

/// パース済みのシークレット指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSpec<'a> {
    pub id: &'a str,
    pub value: &'a str,
}

impl<'a> SecretSpec<'a> {
    /// `id=value` をパース
    ///
    /// 最初の `=` で分割する。id または value が空の場合、`=` がない場合は `None`。
    pub fn parse(entry: &'a str) -> Option<Self> {
        let (id, value) = entry.split_once('=')?;
        if id.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self { id, value })
    }

    /// 単一トークンの `--secret id=<id>,<env|src>=<value>` を生成
    pub fn to_arg(&self, source: SecretSource) -> String {
        format!("--secret id={},{}={}", self.id, source.as_key(), self.value)
    }
}

/// 有効なエントリだけを `--secret` トークンに変換する
///
/// 不正なエントリは黙って捨てる。入力順は維持される。
pub fn secret_args<'a, I>(entries: I, source: SecretSource) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = &'a String>,
{
    entries.into_iter().filter_map(move |entry| {
        let spec = SecretSpec::parse(entry);
        if spec.is_none() {
            tracing::debug!("Skipping malformed secret entry: {:?}", entry);
        }
        spec.map(|s| s.to_arg(source))
    })
}

/// 不正なシークレット指定を列挙（CLIの警告表示用）
pub fn malformed_entries(entries: &[String]) -> Vec<&str> {
    entries
        .iter()
        .map(String::as_str)
        .filter(|entry| SecretSpec::parse(entry).is_none())
        .collect()
}
