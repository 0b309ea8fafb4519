use crate::InvertedIndex;
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub fn save_index<P: AsRef<Path>>(path: P, index: &InvertedIndex) -> Result<()> {
    let path = path.as_ref();
    let f = File::create(path).with_context(|| format!("cannot open {} for writing", path.display()))?;
    index
        .write_to(BufWriter::new(f))
        .with_context(|| format!("cannot write index to {}", path.display()))?;
    tracing::debug!(path = %path.display(), words = index.len(), "index saved");
    Ok(())
}

pub fn load_index<P: AsRef<Path>>(path: P) -> Result<InvertedIndex> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("cannot open {} for reading", path.display()))?;
    let index = InvertedIndex::read_from(BufReader::new(f))
        .with_context(|| format!("cannot load index from {}", path.display()))?;
    tracing::debug!(path = %path.display(), words = index.len(), "index loaded");
    Ok(index)
}

/// Fail early if `path` cannot be written, before any work is done to fill it.
pub fn check_writable<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("cannot open {} for writing", path.display()))?;
    Ok(())
}

pub fn check_readable<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    File::open(path).with_context(|| format!("cannot open {} for reading", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.txt");

        let mut index = InvertedIndex::new();
        index.insert("kernel");
        index.increment("kernel", 2).unwrap();
        index.increment("kernel", 5).unwrap();
        save_index(&path, &index).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kernel 2 1 5 1\n");
        assert_eq!(load_index(&path).unwrap(), index);
    }

    #[test]
    fn load_reports_path() {
        let dir = tempdir().unwrap();
        let err = load_index(dir.path().join("nope")).unwrap_err();
        assert!(format!("{err:#}").contains("nope"));
    }

    #[test]
    fn readable_and_writable_checks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out");
        assert!(check_readable(&path).is_err());
        check_writable(&path).unwrap();
        check_readable(&path).unwrap();
        assert!(check_writable(dir.path().join("missing/out")).is_err());
    }
}
