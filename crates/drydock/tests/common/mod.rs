use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_settings(&self, content: &str) -> PathBuf {
        let path = self.root.path().join("drydock.yml");
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }
}

/// 周囲の PLUGIN_* やプロキシ変数の影響を受けない drydock コマンド
#[allow(deprecated)]
pub fn drydock() -> Command {
    let mut cmd = Command::cargo_bin("drydock").unwrap();
    cmd.env_clear().env("NO_COLOR", "1");
    cmd
}
