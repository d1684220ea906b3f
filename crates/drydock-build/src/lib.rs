//! drydock の docker build コマンド組み立て
//!
//! このクレートは CI プラグインの設定から `docker build` の引数列を組み立て、
//! プロキシ関連の環境変数を解決します。コマンドの実行は行いません。

pub mod builder;
pub mod config;
pub mod env;
pub mod error;
pub mod proxy;
pub mod secret;

pub use builder::{BuildCommand, DOCKER_EXE, command_build};
pub use config::BuildConfig;
pub use env::{EnvLookup, ProcessEnv};
pub use error::{BuildError, BuildResult};
pub use proxy::{PROXY_KEYS, ProxyResolver, get_proxy_value};
pub use secret::{SecretSource, SecretSpec};
