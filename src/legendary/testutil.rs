//! Helpers shared by the unit tests in this module tree.

#[cfg(target_family = "unix")]
use std::path::{Path, PathBuf};

/// Stand-in for the real tool: a shell script dropped into a scratch
/// directory.
#[cfg(target_family = "unix")]
pub(crate) fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("legendary");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).unwrap();
    path
}
