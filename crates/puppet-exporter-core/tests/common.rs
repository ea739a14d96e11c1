//! Fixture helpers shared by integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub fn vector(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/vectors").join(name);
    fs::read(&path).unwrap_or_else(|e| panic!("read vector {}: {e}", path.display()))
}

/// Copy a vector into `dir` under `file_name`, returning the new path.
pub fn install(dir: &Path, name: &str, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, vector(name)).unwrap();
    path
}

pub fn write(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).unwrap();
    path
}
