use crate::build::BuildArgs;
use colored::Colorize;
use drydock_build::secret::malformed_entries;

pub fn handle(args: &BuildArgs) -> anyhow::Result<()> {
    println!("{}", "設定を検証中...".blue());

    let config = args.load_config()?;

    println!("{}", "✓ 設定は正常です！".green().bold());
    println!();
    println!("サマリー:");
    if !config.name.is_empty() {
        println!("  イメージ: {}", config.name.cyan());
    }
    println!("  Dockerfile: {}", config.dockerfile.cyan());
    println!("  コンテキスト: {}", config.context.cyan());
    if !config.platform.is_empty() {
        println!("  プラットフォーム: {}", config.platform.cyan());
    }

    let valid_envs = config.secret_envs.len() - malformed_entries(&config.secret_envs).len();
    let valid_files = config.secret_files.len() - malformed_entries(&config.secret_files).len();
    println!(
        "  シークレット: 環境変数 {}個, ファイル {}個",
        valid_envs, valid_files
    );

    for entry in malformed_entries(&config.secret_envs)
        .into_iter()
        .chain(malformed_entries(&config.secret_files))
    {
        println!(
            "  {} 不正なシークレット指定は無視されます: {:?}",
            "⚠".yellow(),
            entry
        );
    }

    if !config.ssh_key_path.is_empty() {
        println!("  SSH: {}", config.ssh_key_path.cyan());
    }

    Ok(())
}
