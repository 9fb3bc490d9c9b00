//! Shared fixtures for the CLI integration tests.
//!
//! `Fixture` writes request and card files into a temporary directory that
//! is removed on drop; `EnvGuard` sets environment variables and restores
//! the previous values on drop. Tests touching the environment must be
//! `#[serial]`.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// 40 card deck: 3 copies of `X`, 3 of `fiend`, 2 of `imp`, 32 fillers.
pub fn deck_json() -> String {
    let mut ids: Vec<String> = (0..32).map(|i| format!("\"filler{}\"", i)).collect();
    ids.extend(["\"X\""; 3].map(String::from));
    ids.extend(["\"fiend\""; 3].map(String::from));
    ids.extend(["\"imp\""; 2].map(String::from));
    format!("[{}]", ids.join(", "))
}

pub fn starter_request() -> String {
    format!(
        r#"{{
  "deck": {},
  "targets": [
    {{ "name": "X", "conditions": [ {{ "group": [{{ "id": "X" }}], "op": ">=", "count": 1 }} ] }},
    {{ "name": "dark", "conditions": [
        {{ "group": [{{ "filterByAttribute": "DARK" }}], "op": ">=", "count": 1 }}
    ] }}
  ]
}}"#,
        deck_json()
    )
}

pub const CARDS: &str = r#"[
  { "id": "fiend", "attribute": "DARK", "type": "Monster", "level": 4, "atk": 1800 },
  { "id": "imp", "attribute": "DARK", "type": "Monster", "level": 2, "atk": 600 }
]"#;

pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> String {
        let path = self.path(name);
        std::fs::write(&path, content).expect("write fixture");
        path_str(&path)
    }
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Run the CLI in-process and capture exit code, stdout and stderr.
pub fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut argv = vec!["handsim"];
    argv.extend_from_slice(args);
    let code = handsim_cli::run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).expect("utf8 stdout"),
        String::from_utf8(err).expect("utf8 stderr"),
    )
}

pub struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for (key, value) in pairs {
            let previous = std::env::var(key).ok();
            unsafe {
                std::env::set_var(key, value);
            }
            restores.push((key.to_string(), previous));
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            unsafe {
                match previous {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
