//! プロキシ設定の解決
//!
//! 同じ論理キーを 3 種類の変数名で探す:
//! 1. 小文字 (`http_proxy`)
//! 2. 大文字 (`HTTP_PROXY`)
//! 3. ホスティング環境が注入するプレフィックス付き (`HARNESS_HTTP_PROXY`)
//!
//! 標準の変数名が常に優先される。

use crate::config::BuildConfig;
use crate::env::{EnvLookup, ProcessEnv};

/// ホスティング環境が注入する変数のプレフィックス
pub const HARNESS_PREFIX: &str = "HARNESS_";

/// ビルド引数として引き継ぐプロキシ変数
pub const PROXY_KEYS: [&str; 3] = ["http_proxy", "https_proxy", "no_proxy"];

/// プロキシ変数を解決する
#[derive(Debug, Clone, Default)]
pub struct ProxyResolver<E> {
    env: E,
}

impl ProxyResolver<ProcessEnv> {
    /// プロセス環境を参照する ProxyResolver を作成
    pub fn from_process_env() -> Self {
        Self { env: ProcessEnv }
    }
}

impl<E: EnvLookup> ProxyResolver<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// キーの値を解決
    ///
    /// 値が空の変数は未定義と同じ扱いで、次の候補を参照する。
    /// どれも見つからなければ空文字列。
    pub fn resolve(&self, key: &str) -> String {
        let upper = key.to_uppercase();
        let candidates = [key.to_string(), upper.clone(), format!("{HARNESS_PREFIX}{upper}")];

        for name in &candidates {
            if let Some(value) = self.env.get(name)
                && !value.is_empty()
            {
                tracing::debug!("Resolved {} from {}", key, name);
                return value;
            }
        }

        String::new()
    }

    /// ビルド引数にプロキシ変数を追加
    ///
    /// 値が解決でき、かつ利用者が同じキーのビルド引数を指定していない場合に限り
    /// `key=value` と `KEY=value` の両方を追加する。
    pub fn add_proxy_build_args(&self, config: &mut BuildConfig) {
        for key in PROXY_KEYS {
            self.add_proxy_value(config, key);
        }
    }

    fn add_proxy_value(&self, config: &mut BuildConfig, key: &str) {
        let value = self.resolve(key);
        if value.is_empty() || has_proxy_build_arg(config, key) {
            return;
        }

        config.args.push(format!("{}={}", key, value));
        config.args.push(format!("{}={}", key.to_uppercase(), value));
    }

    /// `args_env` に挙げられた変数をビルド引数にコピー
    ///
    /// 定義されていない変数は無視する。プロキシ変数はプロキシ解決の規則に従う。
    pub fn add_args_env(&self, config: &mut BuildConfig) {
        let names = config.args_env.clone();
        for name in &names {
            let lower = name.to_lowercase();
            if PROXY_KEYS.contains(&lower.as_str()) {
                self.add_proxy_value(config, &lower);
                continue;
            }

            let Some(value) = self.env.get(name) else {
                tracing::debug!("args_env variable {} is not set", name);
                continue;
            };

            let prefix = format!("{}=", name);
            if config.args.iter().any(|arg| arg.starts_with(&prefix)) {
                continue;
            }
            config.args.push(format!("{}={}", name, value));
        }
    }
}

/// プロセス環境からプロキシ変数を解決
pub fn get_proxy_value(key: &str) -> String {
    ProxyResolver::from_process_env().resolve(key)
}

/// 利用者がすでに同じプロキシのビルド引数を指定しているか
fn has_proxy_build_arg(config: &BuildConfig, key: &str) -> bool {
    let upper = key.to_uppercase();
    config
        .args
        .iter()
        .any(|arg| arg.starts_with(key) || arg.starts_with(&upper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_lowercase() {
        let resolver = ProxyResolver::new(env(&[("http_proxy", "http://proxy:8080")]));
        assert_eq!(resolver.resolve("http_proxy"), "http://proxy:8080");
    }

    #[test]
    fn test_resolve_uppercase() {
        let resolver = ProxyResolver::new(env(&[("HTTP_PROXY", "http://proxy:8080")]));
        assert_eq!(resolver.resolve("http_proxy"), "http://proxy:8080");
    }

    #[test]
    fn test_resolve_harness_prefixed() {
        let resolver =
            ProxyResolver::new(env(&[("HARNESS_HTTP_PROXY", "http://harness-proxy:8080")]));
        assert_eq!(resolver.resolve("http_proxy"), "http://harness-proxy:8080");
    }

    #[test]
    fn test_standard_takes_precedence_over_harness() {
        let resolver = ProxyResolver::new(env(&[
            ("HTTP_PROXY", "http://standard:8080"),
            ("HARNESS_HTTP_PROXY", "http://harness:8080"),
        ]));
        assert_eq!(resolver.resolve("http_proxy"), "http://standard:8080");
    }

    #[test]
    fn test_lowercase_takes_precedence_over_uppercase() {
        let resolver = ProxyResolver::new(env(&[
            ("no_proxy", "localhost,127.0.0.1"),
            ("NO_PROXY", "*.example.com"),
            ("HARNESS_NO_PROXY", "*.local"),
        ]));
        assert_eq!(resolver.resolve("no_proxy"), "localhost,127.0.0.1");
    }

    #[test]
    fn test_lowercase_takes_precedence_over_harness() {
        let resolver = ProxyResolver::new(env(&[
            ("https_proxy", "https://standard:8080"),
            ("HARNESS_HTTPS_PROXY", "https://harness:8080"),
        ]));
        assert_eq!(resolver.resolve("https_proxy"), "https://standard:8080");
    }

    #[test]
    fn test_resolve_with_borrowed_env() {
        let vars = env(&[("HARNESS_HTTPS_PROXY", "https://harness:8443")]);
        let resolver = ProxyResolver::new(&vars);
        assert_eq!(resolver.resolve("https_proxy"), "https://harness:8443");
        // 借用元はそのまま使える
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_resolve_nothing_set() {
        let resolver = ProxyResolver::new(HashMap::new());
        assert_eq!(resolver.resolve("http_proxy"), "");
    }

    #[test]
    fn test_empty_value_falls_through() {
        let resolver = ProxyResolver::new(env(&[
            ("http_proxy", ""),
            ("HTTP_PROXY", "http://upper:8080"),
        ]));
        assert_eq!(resolver.resolve("http_proxy"), "http://upper:8080");
    }

    #[test]
    fn test_get_proxy_value_reads_process_env() {
        temp_env::with_vars(
            [
                ("http_proxy", None),
                ("HTTP_PROXY", None),
                ("HARNESS_HTTP_PROXY", Some("http://harness:8080")),
            ],
            || {
                assert_eq!(get_proxy_value("http_proxy"), "http://harness:8080");
            },
        );
        temp_env::with_vars(
            [
                ("http_proxy", Some("http://lower:8080")),
                ("HTTP_PROXY", Some("http://upper:8080")),
                ("HARNESS_HTTP_PROXY", None),
            ],
            || {
                assert_eq!(get_proxy_value("http_proxy"), "http://lower:8080");
            },
        );
    }

    #[test]
    fn test_add_proxy_build_args() {
        let resolver = ProxyResolver::new(env(&[
            ("HTTP_PROXY", "http://proxy:8080"),
            ("HARNESS_NO_PROXY", "*.local"),
        ]));
        let mut config = BuildConfig::new("tag", "Dockerfile", ".");
        resolver.add_proxy_build_args(&mut config);

        assert_eq!(
            config.args,
            vec![
                "http_proxy=http://proxy:8080",
                "HTTP_PROXY=http://proxy:8080",
                "no_proxy=*.local",
                "NO_PROXY=*.local",
            ]
        );
    }

    #[test]
    fn test_add_proxy_build_args_keeps_user_value() {
        let resolver = ProxyResolver::new(env(&[("http_proxy", "http://proxy:8080")]));
        let mut config = BuildConfig::new("tag", "Dockerfile", ".");
        config.args = vec!["HTTP_PROXY=http://mine:3128".to_string()];
        resolver.add_proxy_build_args(&mut config);

        assert_eq!(config.args, vec!["HTTP_PROXY=http://mine:3128"]);
    }

    #[test]
    fn test_add_args_env() {
        let resolver = ProxyResolver::new(env(&[
            ("GIT_SHA", "abc123"),
            ("HTTPS_PROXY", "https://proxy:8443"),
        ]));
        let mut config = BuildConfig::new("tag", "Dockerfile", ".");
        config.args = vec!["VERSION=1.0".to_string()];
        config.args_env = vec![
            "GIT_SHA".to_string(),
            "MISSING".to_string(),
            "https_proxy".to_string(),
        ];
        resolver.add_args_env(&mut config);

        assert_eq!(
            config.args,
            vec![
                "VERSION=1.0",
                "GIT_SHA=abc123",
                "https_proxy=https://proxy:8443",
                "HTTPS_PROXY=https://proxy:8443",
            ]
        );
    }

    #[test]
    fn test_add_args_env_does_not_duplicate() {
        let resolver = ProxyResolver::new(env(&[("GIT_SHA", "abc123")]));
        let mut config = BuildConfig::new("tag", "Dockerfile", ".");
        config.args = vec!["GIT_SHA=pinned".to_string()];
        config.args_env = vec!["GIT_SHA".to_string()];
        resolver.add_args_env(&mut config);

        assert_eq!(config.args, vec!["GIT_SHA=pinned"]);
    }
}
