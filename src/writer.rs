//! Output writer: persists an [`EmittedUnit`] atomically.
//!
//! Text goes to a uniquely named temporary file in the output directory, is synced,
//! and is then renamed over `<outputDirectory>/<rootName>.<extension>`. A reader sees
//! either the previous file or the complete new one. The temporary file is removed on
//! any failure.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::emit::EmittedUnit;
use crate::errors::AstGenError;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes `unit` into `output_directory` and returns the final path.
pub fn write_unit(unit: &EmittedUnit, output_directory: &Path) -> Result<PathBuf, AstGenError> {
    ensure_directory(output_directory)?;

    let target = unit.target_path(output_directory);
    let temp = temp_path(output_directory, &unit.file_name());

    if let Err(err) = write_synced(&temp, unit.text()) {
        let _ = fs::remove_file(&temp);
        return Err(AstGenError::output_directory(
            output_directory,
            "is not writable",
            Some(err),
        ));
    }
    if let Err(err) = fs::rename(&temp, &target) {
        let _ = fs::remove_file(&temp);
        return Err(AstGenError::output_directory(
            output_directory,
            format!("could not receive `{}`", unit.file_name()),
            Some(err),
        ));
    }

    Ok(target)
}

/// Fails with `OutputDirectory` unless `path` is an existing directory.
pub fn ensure_directory(path: &Path) -> Result<(), AstGenError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(AstGenError::output_directory(path, "is not a directory", None)),
        Err(err) => Err(AstGenError::output_directory(path, "does not exist", Some(err))),
    }
}

fn temp_path(dir: &Path, file_name: &str) -> PathBuf {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    dir.join(format!(".{file_name}.{}.{n}.tmp", process::id()))
}

fn write_synced(path: &Path, text: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::{emit, GeneratorOptions};
    use crate::grammar::GrammarModel;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("astgen-writer-{}-{name}", process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn unit() -> EmittedUnit {
        let model = GrammarModel::build("Expr", &["Literal : Object value"]).unwrap();
        emit(&model, &GeneratorOptions::default())
    }

    #[test]
    fn test_writes_and_replaces() {
        let dir = scratch_dir("replace");
        fs::write(dir.join("Expr.rs"), "stale").unwrap();

        let unit = unit();
        let path = write_unit(&unit, &dir).unwrap();
        assert_eq!(path, dir.join("Expr.rs"));
        assert_eq!(fs::read_to_string(&path).unwrap(), unit.text());

        let leftovers: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory() {
        let dir = std::env::temp_dir().join(format!("astgen-writer-{}-missing", process::id()));
        let _ = fs::remove_dir_all(&dir);
        let err = write_unit(&unit(), &dir).unwrap_err();
        assert!(matches!(err, AstGenError::OutputDirectory { .. }));
        assert!(!dir.exists());
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = scratch_dir("not-a-dir");
        let file = dir.join("plain.txt");
        fs::write(&file, "x").unwrap();
        let err = write_unit(&unit(), &file).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rename_failure_cleans_up() {
        let dir = scratch_dir("rename");
        // A directory squatting on the target path makes the rename fail.
        fs::create_dir(dir.join("Expr.rs")).unwrap();
        fs::write(dir.join("Expr.rs").join("keep"), "x").unwrap();

        let err = write_unit(&unit(), &dir).unwrap_err();
        assert!(matches!(err, AstGenError::OutputDirectory { .. }));
        let names: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["Expr.rs"]);
        fs::remove_dir_all(&dir).unwrap();
    }
}
