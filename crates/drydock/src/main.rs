mod build;
mod commands;
mod utils;

use build::{BuildArgs, OutputFormat};
use clap::{Parser, Subcommand};
use colored::Colorize;
use drydock_build::BuildError;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "drydock")]
#[command(about = "CI plugin: build settings into a docker build invocation", long_about = None)]
struct Cli {
    /// デバッグログを表示
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// docker build コマンドを組み立てて表示
    Build {
        #[command(flatten)]
        args: BuildArgs,
        /// 出力形式
        #[arg(long, value_enum, default_value = "trace")]
        format: OutputFormat,
    },
    /// 設定を検証
    Validate {
        #[command(flatten)]
        args: BuildArgs,
    },
    /// プロキシ変数の解決結果を表示
    Proxy {
        /// 解決するキー（省略時は http_proxy, https_proxy, no_proxy）
        keys: Vec<String>,
    },
    /// バージョン情報を表示
    Version,
}

fn main() {
    let cli = Cli::parse();

    // ログは stderr に出力（stdout はコマンド出力専用）
    let filter = EnvFilter::try_from_env("DRYDOCK_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("drydock=debug,drydock_build=debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(cli.command) {
        let message = match e.downcast_ref::<BuildError>() {
            Some(build_error) => build_error.user_message(),
            None => format!("{:#}", e),
        };
        eprintln!("{} {}", "Error:".red().bold(), message);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Build { args, format } => build::handle_build_command(&args, format),
        Commands::Validate { args } => commands::validate::handle(&args),
        Commands::Proxy { keys } => commands::proxy::handle(&keys),
        Commands::Version => {
            println!("drydock {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
