use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Answers the drush calls the tool makes from files in $FAKE_DRUSH_STATE.
const FAKE_DRUSH: &str = r#"#!/bin/sh
state="$FAKE_DRUSH_STATE"
echo "$*" >> "$state/log"
pwd >> "$state/cwd"
case "$1" in
  status)
    [ -f "$state/bootstrapped" ] && echo "Successful" ;;
  pm:list)
    name="${3#--filter=name=}"
    if grep -qx "$name" "$state/enabled"; then echo "Enabled"; else echo "Disabled"; fi ;;
  pm:uninstall|theme:uninstall)
    grep -vx "$2" "$state/enabled" > "$state/enabled.tmp"
    mv "$state/enabled.tmp" "$state/enabled" ;;
  config:get)
    printf '{"system.theme:admin": "%s"}\n' "$(cat "$state/admin_theme" 2>/dev/null)" ;;
  config:set)
    echo "$4" > "$state/admin_theme" ;;
  cache:rebuild)
    echo "[success] Cache rebuild complete." ;;
  php:eval)
    cat "$state/post_updates" 2>/dev/null || echo "[]" ;;
esac
exit 0
"#;

pub struct Site {
    _tmp: TempDir,
    pub root: PathBuf,
    state: PathBuf,
    drush: PathBuf,
}

impl Site {
    /// A project root with a fake drush reporting a live site
    pub fn new(constraint: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("project");
        let state = tmp.path().join("state");
        fs::create_dir_all(&root).expect("create project root");
        fs::create_dir_all(&state).expect("create drush state");

        fs::write(
            root.join("composer.openfed.json"),
            format!(r#"{{"require": {{"openfed/openfed": "{}"}}}}"#, constraint),
        )
        .expect("write metadata");
        fs::write(state.join("bootstrapped"), "").expect("mark bootstrapped");
        fs::write(state.join("enabled"), "").expect("write enabled list");
        fs::write(state.join("admin_theme"), "claro").expect("write admin theme");

        let drush = tmp.path().join("drush");
        fs::write(&drush, FAKE_DRUSH).expect("write fake drush");
        fs::set_permissions(&drush, fs::Permissions::from_mode(0o755)).expect("chmod fake drush");

        Self {
            _tmp: tmp,
            root,
            state,
            drush,
        }
    }

    pub fn not_bootstrapped(self) -> Self {
        fs::remove_file(self.state.join("bootstrapped")).expect("unmark bootstrapped");
        self
    }

    pub fn enable(self, names: &[&str]) -> Self {
        let mut list = names.join("\n");
        list.push('\n');
        fs::write(self.state.join("enabled"), list).expect("write enabled list");
        self
    }

    pub fn admin_theme(self, theme: &str) -> Self {
        fs::write(self.state.join("admin_theme"), theme).expect("write admin theme");
        self
    }

    pub fn post_updates(self, json: &str) -> Self {
        fs::write(self.state.join("post_updates"), json).expect("write post updates");
        self
    }

    pub fn template(self, rel: &str, content: &str) -> Self {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().expect("template parent")).expect("create template dir");
        fs::write(path, content).expect("write template");
        self
    }

    pub fn file(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn enabled(&self) -> Vec<String> {
        read_lines(&self.state.join("enabled"))
    }

    /// drush invocations, one per line
    pub fn drush_log(&self) -> Vec<String> {
        read_lines(&self.state.join("log"))
    }

    /// Working directory of each drush invocation
    pub fn drush_cwds(&self) -> Vec<String> {
        read_lines(&self.state.join("cwd"))
    }

    /// Path of the fake drush relative to the project root
    pub fn drush_relative_to_root(&self) -> &'static str {
        "../drush"
    }

    pub fn current_admin_theme(&self) -> String {
        fs::read_to_string(self.state.join("admin_theme"))
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = self.cmd_without_drush();
        cmd.arg("--drush").arg(&self.drush);
        cmd
    }

    /// Leaves the drush location to the config file
    pub fn cmd_without_drush(&self) -> Command {
        let mut cmd = Command::cargo_bin("openfed-validate").expect("binary built");
        cmd.env("FAKE_DRUSH_STATE", &self.state)
            .env_remove("RUST_LOG")
            .arg("--root")
            .arg(&self.root);
        cmd
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}
