//! ビルド設定
//!
//! プラグイン設定から組み立てられ、`command_build` に一度だけ渡される値。

use crate::error::{BuildError, BuildResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// docker build の入力となる設定
///
/// 真偽値とリストはデフォルトで無効（false / 空）。空文字列のフィールドは未設定として扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// 最終的なイメージ名（例: "plugins/drone-docker:latest"）
    pub name: String,
    /// ビルド中だけ付与する一時タグ
    pub temp_tag: String,
    /// Dockerfileのパス
    pub dockerfile: String,
    /// ビルドコンテキストのパス
    pub context: String,
    /// 環境変数から読むシークレット (`id=ENV_VAR_NAME`)
    pub secret_envs: Vec<String>,
    /// ファイルから読むシークレット (`id=/path`)
    pub secret_files: Vec<String>,
    /// ターゲットプラットフォーム（例: "linux/arm64"）
    pub platform: String,
    /// SSHキー (`key_name=/path/to/key`)
    pub ssh_key_path: String,

    pub squash: bool,
    pub compress: bool,
    pub pull: bool,
    pub no_cache: bool,
    /// `--cache-from` に渡すイメージ
    pub cache_from: Vec<String>,
    /// `--build-arg` に渡す `KEY=VALUE`
    pub args: Vec<String>,
    /// 環境変数からビルド引数にコピーする変数名
    pub args_env: Vec<String>,
    /// `--add-host` に渡す `host:ip`
    pub add_host: Vec<String>,
    /// `--label` に渡す `key=value`
    pub labels: Vec<String>,
    /// `--secret` にそのまま渡す値
    pub secret: String,
    /// マルチステージビルドのターゲット
    pub target: String,
    pub quiet: bool,
}

impl BuildConfig {
    /// 最低限のフィールドを指定して作成
    pub fn new(
        temp_tag: impl Into<String>,
        dockerfile: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            temp_tag: temp_tag.into(),
            dockerfile: dockerfile.into(),
            context: context.into(),
            ..Default::default()
        }
    }

    /// YAML の設定ファイルを読み込む
    pub fn from_yaml_file(path: &Path) -> BuildResult<Self> {
        if !path.exists() {
            return Err(BuildError::SettingsNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content).map_err(|source| BuildError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Loaded build settings from {}", path.display());
        Ok(config)
    }

    /// YAML 文字列からパース
    ///
    /// 空のドキュメントはデフォルト値として扱う。
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// コマンド組み立て前の検証
    ///
    /// コマンドビルダー自体は失敗しないため、この検証は呼び出し側（CLI）だけが行う。
    /// 不正なシークレット指定はエラーにしない。
    pub fn validate(&self) -> BuildResult<()> {
        if self.dockerfile.is_empty() {
            return Err(BuildError::InvalidConfig(
                "dockerfile must not be empty".to_string(),
            ));
        }
        if self.context.is_empty() {
            return Err(BuildError::InvalidConfig(
                "context must not be empty".to_string(),
            ));
        }
        if self.temp_tag.is_empty() {
            return Err(BuildError::InvalidConfig(
                "temp_tag must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
