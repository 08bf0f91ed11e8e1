//! Test fixture helpers for creating build trees and fake tools
//!
//! The fake `file` and `size` scripts read the first line of each fixture
//! file, `KIND text data bss`, and answer like the real tools would:
//!
//! - `EXEC`: ELF executable, measured normally
//! - `ARCHIVE`: not an executable, but admitted by its `.a` extension
//! - `UNSUPPORTED`: `size` exits with code 3
//! - `FAIL`: `size` exits with code 1
//! - `GARBAGE`: `size` succeeds with unparseable output
//! - `HANG`: `size` never finishes
//! - anything else: plain text, rejected by the classifier

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

const FAKE_FILE: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo "file-5.45 (fake)"; exit 0; fi
kind=""
read -r kind rest < "$2"
case "$kind" in
  EXEC|UNSUPPORTED|FAIL|GARBAGE|HANG)
    echo "ELF 64-bit LSB executable, x86-64, version 1 (SYSV), dynamically linked" ;;
  ARCHIVE)
    echo "current ar archive" ;;
  *)
    echo "ASCII text" ;;
esac
"#;

const FAKE_SIZE: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo "GNU size (fake) 2.42"; exit 0; fi
if [ -n "$SIZE_ARGS_LOG" ]; then echo "$@" >> "$SIZE_ARGS_LOG"; fi
for last; do :; done
kind=""
read -r kind text data bss < "$last"
case "$kind" in
  UNSUPPORTED) echo "size: $last: file format not recognized" >&2; exit 3 ;;
  FAIL) echo "size: $last: internal error" >&2; exit 1 ;;
  GARBAGE) echo "not berkeley output"; exit 0 ;;
  HANG) exec sleep 30 ;;
esac
dec=$((text + data + bss))
printf '   text\t   data\t    bss\t    dec\t    hex\tfilename\n'
printf '%7d\t%7d\t%7d\t%7d\t%7x\t%s\n' "$text" "$data" "$bss" "$dec" "$dec" "$last"
"#;

/// Temporary directory holding the fake tools and any number of build trees
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    /// Create a workspace with executable `tools/file` and `tools/size`
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let tools = temp_dir.path().join("tools");
        fs::create_dir(&tools)?;
        write_script(&tools.join("file"), FAKE_FILE)?;
        write_script(&tools.join("size"), FAKE_SIZE)?;
        Ok(Self { temp_dir })
    }

    /// Workspace root, used as the working directory of the binary
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the fake `file` tool
    pub fn file_tool(&self) -> PathBuf {
        self.path().join("tools").join("file")
    }

    /// Path of the fake `size` tool
    pub fn size_tool(&self) -> PathBuf {
        self.path().join("tools").join("size")
    }

    /// Create an empty build tree directory named `name`
    pub fn tree(&self, name: &str) -> anyhow::Result<BuildTree> {
        let root = self.path().join(name);
        fs::create_dir_all(&root)?;
        Ok(BuildTree { root })
    }
}

/// One build output directory
pub struct BuildTree {
    root: PathBuf,
}

impl BuildTree {
    /// Build root
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Add an ELF executable with the given section sizes
    pub fn executable(&self, rel: &str, text: u64, data: u64, bss: u64) -> anyhow::Result<&Self> {
        self.entry(rel, &format!("EXEC {} {} {}", text, data, bss))
    }

    /// Add a static archive (the name should end in `.a`)
    pub fn archive(&self, rel: &str, text: u64) -> anyhow::Result<&Self> {
        self.entry(rel, &format!("ARCHIVE {} 0 0", text))
    }

    /// Add a file whose first line is `content`
    pub fn entry(&self, rel: &str, content: &str) -> anyhow::Result<&Self> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, format!("{}\n", content))?;
        Ok(self)
    }
}

fn write_script(path: &Path, body: &str) -> anyhow::Result<()> {
    fs::write(path, body)?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}
