//! Shared helpers for the astgen integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// The grammar used throughout the scenarios.
pub const EXPR_LINES: &[&str] = &[
    "Binary   : Expr left, Token operator, Expr right",
    "Grouping : Expr expression",
    "Literal  : Object value",
    "Unary    : Token operator, Expr right",
];

/// A fresh directory under the system temp dir, removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "astgen-test-{}-{name}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of every entry in the directory, sorted.
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.path)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Returns the text of the `impl <name> { ... }` block of a generated Rust file.
pub fn impl_block<'a>(text: &'a str, name: &str) -> &'a str {
    let open = format!("\nimpl {name} {{\n");
    let start = text.find(&open).unwrap_or_else(|| panic!("no impl block for {name}"));
    let rest = &text[start + 1..];
    let end = rest.find("\n}\n").unwrap();
    &rest[..end + 3]
}

/// Reads the `(name, type)` parameters back out of a generated `new` signature.
pub fn initializer_params(text: &str, variant: &str) -> Vec<(String, String)> {
    let block = impl_block(text, variant);
    let start = block.find("pub fn new(").unwrap() + "pub fn new(".len();
    let end = block[start..].find(") -> Self").unwrap() + start;
    let params = &block[start..end];
    if params.is_empty() {
        return Vec::new();
    }
    params
        .split(", ")
        .map(|param| {
            let (name, ty) = param.split_once(": ").unwrap();
            (name.trim_start_matches("r#").to_string(), ty.to_string())
        })
        .collect()
}
