//! Fake adb executable for integration tests.
//!
//! The script records each argument it receives on its own line in `argv`,
//! prints the contents of `stdout` and `stderr`, then exits with a fixed code.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;

pub struct FakeAdb {
    pub dir: TempDir,
    root: PathBuf,
}

impl FakeAdb {
    pub fn new(stdout: &str, stderr: &str, exit_code: i32) -> Self {
        Self::in_subdir("", stdout, stderr, exit_code)
    }

    /// Fake placed under `subdir` of a fresh temp dir, e.g. a name with spaces.
    pub fn in_subdir(subdir: &str, stdout: &str, stderr: &str, exit_code: i32) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().join(subdir);
        fs::create_dir_all(&root).expect("Failed to create fake adb dir");
        fs::write(root.join("stdout"), stdout).expect("Failed to write stdout");
        fs::write(root.join("stderr"), stderr).expect("Failed to write stderr");

        let shown = root.display();
        let script = format!(
            "#!/bin/sh\n\
             printf '%s\\n' \"$@\" > \"{shown}/argv\"\n\
             cat \"{shown}/stdout\"\n\
             cat \"{shown}/stderr\" >&2\n\
             exit {exit_code}\n"
        );
        let path = root.join("adb");
        fs::write(&path, script).expect("Failed to write fake adb");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake adb executable");

        FakeAdb { dir, root }
    }

    pub fn binary(&self) -> String {
        self.path().display().to_string()
    }

    pub fn path(&self) -> PathBuf {
        self.root.join("adb")
    }

    /// Directory holding the `adb` script, for putting it on `PATH`.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.clone()
    }

    /// Arguments the fake received on its last run.
    pub fn argv(&self) -> Vec<String> {
        fs::read_to_string(self.root.join("argv"))
            .expect("fake adb was never run")
            .lines()
            .map(str::to_string)
            .collect()
    }
}
