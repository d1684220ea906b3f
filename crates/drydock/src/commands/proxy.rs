use drydock_build::{EnvLookup, PROXY_KEYS, ProxyResolver};

/// プロキシ変数の解決結果を `key=value` で表示
///
/// キー未指定時は http_proxy / https_proxy / no_proxy。
pub fn handle(keys: &[String]) -> anyhow::Result<()> {
    let resolver = ProxyResolver::from_process_env();
    for line in render(&resolver, keys) {
        println!("{}", line);
    }
    Ok(())
}

fn render<E: EnvLookup>(resolver: &ProxyResolver<E>, keys: &[String]) -> Vec<String> {
    let keys: Vec<String> = if keys.is_empty() {
        PROXY_KEYS.iter().map(|k| k.to_string()).collect()
    } else {
        keys.iter().map(|k| k.to_lowercase()).collect()
    };

    keys.iter()
        .map(|key| format!("{}={}", key, resolver.resolve(key)))
        .collect()
}
