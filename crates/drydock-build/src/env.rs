//! 環境変数の参照
//!
//! プロキシ解決とビルド引数の補完は、プロセス環境を直接読まずにこのトレイト経由で参照する。

use std::collections::HashMap;

/// キーから値を引く読み取り専用の環境
pub trait EnvLookup {
    /// 変数が定義されていれば値を返す
    fn get(&self, key: &str) -> Option<String>;
}

/// 実際のプロセス環境
///
/// キャッシュしないため、呼び出し間の環境変更は次の呼び出しで反映される。
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<T: EnvLookup + ?Sized> EnvLookup for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}
