#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;
use url::Url;

/// Origin the CLI scopes sessions to unless told otherwise.
pub const ORIGIN: &str = "http://localhost:4200";

/// An isolated HOME plus a file-backed user directory.
pub struct Sandbox {
    _temp: TempDir,
    pub home: PathBuf,
    pub api_dir: PathBuf,
    pub api_url: String,
}

impl Sandbox {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let api_dir = temp.path().join("api");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(&api_dir).unwrap();

        let api_url = Url::from_directory_path(&api_dir)
            .expect("Failed to convert path to file URL")
            .to_string();

        Self {
            _temp: temp,
            home,
            api_dir,
            api_url,
        }
    }

    /// Directory holding the persisted session keys for `origin`'s default.
    pub fn session_dir(&self) -> PathBuf {
        self.home
            .join("data")
            .join("tollgate")
            .join("origins")
            .join("http_localhost_4200")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        run_cli_with_env(args, &self.home, &self.api_url)
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let stdout = self.run_success(args);
        serde_json::from_str(stdout.trim()).unwrap_or_else(|e| {
            panic!("expected JSON from {:?}: {}\nstdout: {}", args, e, stdout)
        })
    }

    pub fn register(&self, username: &str, password: &str) {
        self.run_success(&["register", username, "--password", password]);
    }

    pub fn login(&self, username: &str, password: &str) {
        self.run_success(&["login", "--username", username, "--password", password]);
    }
}

/// Run the CLI with a custom HOME directory for isolated session storage.
pub fn run_cli_with_env(args: &[&str], home: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tollgate"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("TOLLGATE_ORIGIN");
    cmd.env_remove("TOLLGATE_CONFIG");
    cmd.env_remove("RUST_LOG");
    for proxy in ["HTTP_PROXY", "HTTPS_PROXY", "ALL_PROXY", "http_proxy", "https_proxy", "all_proxy"] {
        cmd.env_remove(proxy);
    }
    if !args.contains(&"--api") {
        cmd.env("TOLLGATE_API", api_url);
    }
    cmd.output().expect("Failed to execute CLI")
}
