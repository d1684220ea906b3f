use crate::utils;
use clap::{ArgAction, Args, ValueEnum};
use colored::Colorize;
use drydock_build::{BuildConfig, ProxyResolver, command_build};
use std::path::PathBuf;

/// コマンドの出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `+ docker build ...` の 1 行
    Trace,
    /// 1 行 1 トークン
    Tokens,
    /// JSON
    Json,
}

/// プラグイン設定
///
/// 優先順位: コマンドライン > PLUGIN_* 環境変数 > 設定ファイル > デフォルト
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// 設定ファイル (YAML)
    #[arg(short, long, env = "PLUGIN_CONFIG")]
    pub config: Option<PathBuf>,
    /// イメージ名
    #[arg(long, env = "PLUGIN_REPO")]
    pub name: Option<String>,
    /// ビルド中に付与する一時タグ（省略時はランダム生成）
    #[arg(long, env = "PLUGIN_TEMP_TAG")]
    pub temp_tag: Option<String>,
    /// Dockerfileのパス
    #[arg(short = 'f', long, env = "PLUGIN_DOCKERFILE")]
    pub dockerfile: Option<String>,
    /// ビルドコンテキスト
    #[arg(long, env = "PLUGIN_CONTEXT")]
    pub context: Option<String>,
    /// 環境変数から読むシークレット (id=ENV_VAR)
    #[arg(long = "secret-env", env = "PLUGIN_SECRETS_FROM_ENV", value_delimiter = ',')]
    pub secret_envs: Vec<String>,
    /// ファイルから読むシークレット (id=/path)
    #[arg(long = "secret-file", env = "PLUGIN_SECRETS_FROM_FILE", value_delimiter = ',')]
    pub secret_files: Vec<String>,
    /// ターゲットプラットフォーム
    #[arg(long, env = "PLUGIN_PLATFORM")]
    pub platform: Option<String>,
    /// SSHキー (key_name=/path/to/key)
    #[arg(long = "ssh", env = "PLUGIN_SSH_KEY_PATH")]
    pub ssh_key_path: Option<String>,
    #[arg(long, env = "PLUGIN_SQUASH", num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub squash: Option<bool>,
    #[arg(long, env = "PLUGIN_COMPRESS", num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub compress: Option<bool>,
    /// ベースイメージを常にpullする
    #[arg(long, env = "PLUGIN_PULL_IMAGE", num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub pull: Option<bool>,
    #[arg(long, env = "PLUGIN_NO_CACHE", num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub no_cache: Option<bool>,
    #[arg(long, env = "PLUGIN_CACHE_FROM", value_delimiter = ',')]
    pub cache_from: Vec<String>,
    /// ビルド引数 (KEY=VALUE)
    #[arg(long = "build-arg", env = "PLUGIN_BUILD_ARGS", value_delimiter = ',')]
    pub args: Vec<String>,
    /// 環境変数からビルド引数にコピーする変数名
    #[arg(long = "build-arg-from-env", env = "PLUGIN_BUILD_ARGS_FROM_ENV", value_delimiter = ',')]
    pub args_env: Vec<String>,
    #[arg(long, env = "PLUGIN_ADD_HOST", value_delimiter = ',')]
    pub add_host: Vec<String>,
    #[arg(long = "label", env = "PLUGIN_CUSTOM_LABELS", value_delimiter = ',')]
    pub labels: Vec<String>,
    /// `--secret` にそのまま渡す値
    #[arg(long, env = "PLUGIN_SECRET")]
    pub secret: Option<String>,
    /// マルチステージビルドのターゲット
    #[arg(long, env = "PLUGIN_TARGET")]
    pub target: Option<String>,
    #[arg(short, long, env = "PLUGIN_QUIET", num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub quiet: Option<bool>,
    /// プロキシ変数をビルド引数に引き継がない
    #[arg(long)]
    pub no_proxy_build_args: bool,
}

impl BuildArgs {
    /// 設定ファイルとフラグをマージして BuildConfig を作る
    pub fn load_config(&self) -> anyhow::Result<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::from_yaml_file(path)?,
            None => BuildConfig::default(),
        };

        if config.dockerfile.is_empty() {
            config.dockerfile = "Dockerfile".to_string();
        }
        if config.context.is_empty() {
            config.context = ".".to_string();
        }

        overlay(&mut config.name, &self.name);
        overlay(&mut config.temp_tag, &self.temp_tag);
        overlay(&mut config.dockerfile, &self.dockerfile);
        overlay(&mut config.context, &self.context);
        overlay(&mut config.platform, &self.platform);
        overlay(&mut config.ssh_key_path, &self.ssh_key_path);
        overlay(&mut config.secret, &self.secret);
        overlay(&mut config.target, &self.target);

        overlay_list(&mut config.secret_envs, &self.secret_envs);
        overlay_list(&mut config.secret_files, &self.secret_files);
        overlay_list(&mut config.cache_from, &self.cache_from);
        overlay_list(&mut config.args, &self.args);
        overlay_list(&mut config.args_env, &self.args_env);
        overlay_list(&mut config.add_host, &self.add_host);
        overlay_list(&mut config.labels, &self.labels);

        overlay_flag(&mut config.squash, self.squash);
        overlay_flag(&mut config.compress, self.compress);
        overlay_flag(&mut config.pull, self.pull);
        overlay_flag(&mut config.no_cache, self.no_cache);
        overlay_flag(&mut config.quiet, self.quiet);

        if config.temp_tag.is_empty() {
            config.temp_tag = utils::generate_temp_tag();
            tracing::debug!("Generated temp tag: {}", config.temp_tag);
        }

        config.validate()?;
        Ok(config)
    }
}

fn overlay(target: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        target.clone_from(v);
    }
}

/// 明示的に指定された場合だけ上書き（`false` も含む）
fn overlay_flag(target: &mut bool, value: Option<bool>) {
    if let Some(v) = value {
        *target = v;
    }
}

fn overlay_list(target: &mut Vec<String>, values: &[String]) {
    if !values.is_empty() {
        *target = values.to_vec();
    }
}

/// ビルドコマンドを処理
pub fn handle_build_command(args: &BuildArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut config = args.load_config()?;
    utils::warn_malformed_secrets(&config);

    let resolver = ProxyResolver::from_process_env();
    if !args.no_proxy_build_args {
        resolver.add_proxy_build_args(&mut config);
    }
    resolver.add_args_env(&mut config);

    let command = command_build(&config);

    match format {
        OutputFormat::Trace => {
            println!("{} {}", "+".cyan(), command);
        }
        OutputFormat::Tokens => {
            for token in command.tokens() {
                println!("{}", token);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&command)?);
        }
    }

    Ok(())
}
