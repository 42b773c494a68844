use std::io::Write as _;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    pub check: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Printed,
    Written(PathBuf),
    Unchanged(PathBuf),
}

/// Send `content` to stdout, or to `output` when set.
pub fn emit(
    content: &str,
    output: Option<&Path>,
    opts: WriteOptions,
) -> anyhow::Result<WriteOutcome> {
    let Some(path) = output else {
        if opts.check {
            anyhow::bail!("--check requires an output file");
        }
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| anyhow::anyhow!("failed to write stdout: {e}"))?;
        return Ok(WriteOutcome::Printed);
    };

    let existing = std::fs::read_to_string(path).ok();
    let changed = existing.as_deref() != Some(content);

    if opts.check {
        if changed {
            anyhow::bail!("generated file is out of date: {}", path.display());
        }
        return Ok(WriteOutcome::Unchanged(path.to_path_buf()));
    }

    if !changed {
        tracing::debug!(path = %path.display(), "output unchanged");
        return Ok(WriteOutcome::Unchanged(path.to_path_buf()));
    }

    write_atomic(path, content)?;
    println!("wrote {}", path.display());
    Ok(WriteOutcome::Written(path.to_path_buf()))
}

fn write_atomic(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("failed to create directory {}: {e}", parent.display()))?;
    }

    let tmp = tmp_path(path);
    std::fs::write(&tmp, content)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", tmp.display()))?;
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        anyhow::anyhow!(
            "failed to rename {} -> {}: {e}",
            tmp.display(),
            path.display()
        )
    })?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => path.with_extension(format!("{ext}.tmp")),
        None => path.with_extension("tmp"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pgconsts-write-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn tmp_path_keeps_extension() {
        assert_eq!(tmp_path(Path::new("a/b.rs")), PathBuf::from("a/b.rs.tmp"));
        assert_eq!(tmp_path(Path::new("a/b")), PathBuf::from("a/b.tmp"));
    }

    #[test]
    fn writes_file_and_creates_parents() {
        let dir = scratch_dir("create");
        let path = dir.join("nested/out.rs");

        let outcome = emit(
            "pub mod models {}\n",
            Some(path.as_path()),
            WriteOptions::default(),
        )
        .unwrap();
        assert_eq!(outcome, WriteOutcome::Written(path.clone()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "pub mod models {}\n");
        assert!(!tmp_path(&path).exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unchanged_file_is_not_rewritten() {
        let dir = scratch_dir("unchanged");
        let path = dir.join("out.rs");
        emit("same\n", Some(path.as_path()), WriteOptions::default()).unwrap();

        let outcome = emit("same\n", Some(path.as_path()), WriteOptions::default()).unwrap();
        assert_eq!(outcome, WriteOutcome::Unchanged(path.clone()));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn check_mode_never_writes() {
        let dir = scratch_dir("check");
        let path = dir.join("out.rs");
        let check = WriteOptions { check: true };

        let err = emit("new\n", Some(path.as_path()), check).unwrap_err();
        assert!(err.to_string().contains("out of date"), "{err}");
        assert!(!path.exists());

        emit("new\n", Some(path.as_path()), WriteOptions::default()).unwrap();
        assert_eq!(
            emit("new\n", Some(path.as_path()), check).unwrap(),
            WriteOutcome::Unchanged(path.clone())
        );
        assert!(emit("newer\n", Some(path.as_path()), check).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn check_mode_needs_a_file() {
        assert!(emit("x", None, WriteOptions { check: true }).is_err());
    }
}
