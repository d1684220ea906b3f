use crate::config::BuildConfig;
use crate::secret::{SecretSource, secret_args};
use serde::Serialize;
use std::fmt;
use std::process::Command;

/// 外部ビルドツールの実行ファイル名
pub const DOCKER_EXE: &str = "docker";

/// 組み立て済みの docker build コマンド
///
/// 実行はしない。起動・出力の監視・終了コードの扱いは呼び出し側の責務。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildCommand {
    program: String,
    args: Vec<String>,
}

impl BuildCommand {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// 実行ファイル名を先頭にした全トークン
    pub fn tokens(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// 起動前の `std::process::Command` に変換
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// ビルド設定から docker build コマンドを組み立てる
///
/// 出力順序:
/// 1. 固定部分: `build --rm=true -f <dockerfile> -t <temp_tag> <context>`
/// 2. squash / compress / pull / no-cache / cache-from
/// 3. build-arg / add-host / label / 生の secret
/// 4. 環境変数シークレット、ファイルシークレット（それぞれ入力順）
/// 5. target / quiet / platform
/// 6. ssh（常に最後）
///
/// 不正なシークレット指定はフラグを生成しないだけで、失敗はしない。
pub fn command_build(build: &BuildConfig) -> BuildCommand {
    let mut args = vec![
        "build".to_string(),
        "--rm=true".to_string(),
        "-f".to_string(),
        build.dockerfile.clone(),
        "-t".to_string(),
        build.temp_tag.clone(),
        build.context.clone(),
    ];

    if build.squash {
        args.push("--squash".to_string());
    }
    if build.compress {
        args.push("--compress".to_string());
    }
    if build.pull {
        args.push("--pull=true".to_string());
    }
    if build.no_cache {
        args.push("--no-cache".to_string());
    }
    for image in &build.cache_from {
        args.push("--cache-from".to_string());
        args.push(image.clone());
    }
    for arg in &build.args {
        args.push("--build-arg".to_string());
        args.push(arg.clone());
    }
    for host in &build.add_host {
        args.push("--add-host".to_string());
        args.push(host.clone());
    }
    for label in &build.labels {
        args.push("--label".to_string());
        args.push(label.clone());
    }
    if !build.secret.is_empty() {
        args.push("--secret".to_string());
        args.push(build.secret.clone());
    }

    args.extend(secret_args(&build.secret_envs, SecretSource::Env));
    args.extend(secret_args(&build.secret_files, SecretSource::File));

    if !build.target.is_empty() {
        args.push("--target".to_string());
        args.push(build.target.clone());
    }
    if build.quiet {
        args.push("--quiet".to_string());
    }
    if !build.platform.is_empty() {
        args.push("--platform".to_string());
        args.push(build.platform.clone());
    }
    // --ssh はフラグと値を 1 トークンにまとめる（--platform とは異なる）
    if !build.ssh_key_path.is_empty() {
        args.push(format!("--ssh {}", build.ssh_key_path));
    }

    let command = BuildCommand {
        program: DOCKER_EXE.to_string(),
        args,
    };
    tracing::debug!("Build command: {}", command);
    command
}
