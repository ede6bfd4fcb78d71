//! Scratch project and data directories for driving the `pathreg` binary,
//! isolated from the caller's own configuration and environment.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small registry: an absolute root, a relative child, a grandchild, and
/// a read-only entry.
pub const BASIC_CONFIG: &str = r"
paths:
  - name: data
    path: /srv/app
  - name: logs
    path: log
    relative_to: data
  - name: archive
    path: old
    relative_to: logs
  - name: app.home
    path: /opt/app
    read_only: true
";

/// Test environment with isolated project and data directories.
pub struct TestEnv {
    /// Owns both directories; dropping it removes them.
    _root: TempDir,
    /// Project directory the binary runs in
    pub project_dir: PathBuf,
    /// Directory standing in for `~/.pathreg`
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Empty project and data directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create scratch dir");
        let [project_dir, data_dir] =
            ["project", "pathreg-data"].map(|name| root.path().join(name));
        for dir in [&project_dir, &data_dir] {
            std::fs::create_dir_all(dir).expect("create scratch subdir");
        }
        Self {
            _root: root,
            project_dir,
            data_dir,
        }
    }

    /// Create an environment whose project holds `pathreg.yaml` with `contents`.
    pub fn with_project_config(contents: &str) -> Self {
        let env = Self::new();
        env.write_file("pathreg.yaml", contents);
        env
    }

    /// The binary run from the project directory, with every `PATHREG_*`
    /// variable removed and no `--data-dir`.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("pathreg").expect("Failed to find pathreg binary");
        for var in [
            "PATHREG_CONFIG",
            "PATHREG_DATA_DIR",
            "PATHREG_CACHE_RESOLVED",
            "PATHREG_SYSTEM_PATHS",
            "PATHREG_LOG_MODE",
            "PATHREG_OUTPUT_FORMAT",
        ] {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.project_dir);
        cmd
    }

    /// [`Self::command_bare`] pointed at the scratch data directory.
    pub fn command(&self) -> Command {
        let mut bare = self.command_bare();
        bare.arg("--data-dir").arg(&self.data_dir);
        bare
    }

    /// Write a file into the project directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.project_dir.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Run a command and return its trimmed stdout, asserting success.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run pathreg");
        if !output.status.success() {
            panic!(
                "pathreg {args:?} exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }
}
