use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

/// Get a Command for frm
pub fn frm() -> Command {
    cargo_bin_cmd!("frm")
}

/// A temp config dir holding `config.toml`, the ledger and one vdir per
/// account
pub struct Fixture {
    root: TempDir,
    accounts: Vec<String>,
}

impl Fixture {
    /// Config with the named vdir accounts, in priority order
    pub fn with_accounts(names: &[&str]) -> Self {
        let root = TempDir::new().unwrap();
        let mut services = toml::value::Array::new();
        for name in names {
            let dir = root.path().join(name);
            fs::create_dir_all(&dir).unwrap();

            let mut service = toml::Table::new();
            service.insert("type".into(), "vdir".into());
            service.insert("name".into(), (*name).into());
            service.insert("path".into(), dir.display().to_string().into());
            services.push(toml::Value::Table(service));
        }

        let mut config = toml::Table::new();
        config.insert("timeout_seconds".into(), toml::Value::Integer(10));
        config.insert("services".into(), toml::Value::Array(services));
        fs::write(
            root.path().join("config.toml"),
            toml::to_string(&config).unwrap(),
        )
        .unwrap();

        Self {
            root,
            accounts: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Single account named `personal`
    pub fn new() -> Self {
        Self::with_accounts(&["personal"])
    }

    pub fn config_dir(&self) -> &Path {
        self.root.path()
    }

    pub fn account_dir(&self, account: &str) -> PathBuf {
        assert!(self.accounts.iter().any(|a| a == account), "unknown account {account}");
        self.root.path().join(account)
    }

    /// Write a vCard with `FN:name` plus the given raw property lines
    pub fn card(&self, account: &str, file: &str, name: &str, extra: &[&str]) -> &Self {
        let mut text = format!("BEGIN:VCARD\r\nVERSION:3.0\r\nFN:{name}\r\n");
        for line in extra {
            text.push_str(line);
            text.push_str("\r\n");
        }
        text.push_str("END:VCARD\r\n");
        fs::write(self.account_dir(account).join(file), text).unwrap();
        self
    }

    pub fn read_card(&self, account: &str, file: &str) -> String {
        fs::read_to_string(self.account_dir(account).join(file)).unwrap()
    }

    pub fn ledger(&self) -> String {
        fs::read_to_string(self.root.path().join("log.jsonl")).unwrap_or_default()
    }

    /// `frm` pointed at this fixture's config dir
    pub fn cmd(&self) -> Command {
        let mut cmd = frm();
        cmd.env("FRM_CONFIG_DIR", self.root.path());
        cmd
    }
}

/// Parse stdout as JSON
#[allow(dead_code)]
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}
