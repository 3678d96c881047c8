//! File-based slide source.
//!
//! Reads the whole file on each call. Executable files are sanitized before
//! their text is handed to the parser: a leading shebang line is removed and
//! the remainder goes through [`preprocess`](super::preprocess) (in that order).

use super::preprocess;
use super::WatchedFile;
use crate::model::error::InputError;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Slide file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a FileSource for the given path.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the path does not exist and
    /// `InputError::IsDirectory` if it names a directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref().to_path_buf();
        check_readable(&path)?;
        Ok(Self { path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, applying executable-file sanitization.
    ///
    /// # Errors
    ///
    /// Same as [`FileSource::new`], plus `InputError::Io` for read failures.
    pub fn read(&self) -> Result<String, InputError> {
        let meta = check_readable(&self.path)?;
        let content = fs::read_to_string(&self.path)?;

        if is_executable(&meta) {
            debug!(path = %self.path.display(), "Sanitizing executable slide file");
            return Ok(preprocess::run(strip_shebang(&content)));
        }

        Ok(content)
    }
}

impl WatchedFile for FileSource {
    fn modified(&self) -> io::Result<SystemTime> {
        fs::metadata(&self.path)?.modified()
    }

    fn read(&self) -> Result<String, InputError> {
        FileSource::read(self)
    }
}

fn check_readable(path: &Path) -> Result<Metadata, InputError> {
    let meta = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => InputError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Io(e),
    })?;

    if meta.is_dir() {
        return Err(InputError::IsDirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(meta)
}

/// Remove exactly one leading `#!` line, if present.
pub fn strip_shebang(content: &str) -> &str {
    if !content.starts_with("#!") {
        return content;
    }
    match content.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    }
}

#[cfg(unix)]
fn is_executable(meta: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &Metadata) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_opens_existing_file() {
        let test_file = std::env::temp_dir().join("slides_test_new_opens_existing_file.md");
        fs::write(&test_file, "# Hello\n").unwrap();

        let result = FileSource::new(&test_file);

        let _ = fs::remove_file(&test_file);
        assert!(result.is_ok());
    }

    #[test]
    fn new_returns_file_not_found_for_missing_file() {
        let missing = std::env::temp_dir().join("slides_nonexistent_file_12345.md");

        let result = FileSource::new(&missing);

        assert!(matches!(result, Err(InputError::FileNotFound { .. })));
    }

    #[test]
    fn new_rejects_directory() {
        let result = FileSource::new(std::env::temp_dir());
        assert!(matches!(result, Err(InputError::IsDirectory { .. })));
    }

    #[test]
    fn read_returns_full_content() {
        let test_file = std::env::temp_dir().join("slides_test_read_full_content.md");
        fs::write(&test_file, "# One\n---\n# Two\n").unwrap();

        let source = FileSource::new(&test_file).unwrap();
        let content = source.read();

        let _ = fs::remove_file(&test_file);
        assert_eq!(content.unwrap(), "# One\n---\n# Two\n");
    }

    #[test]
    fn read_after_delete_reports_not_found() {
        let test_file = std::env::temp_dir().join("slides_test_read_after_delete.md");
        fs::write(&test_file, "# One\n").unwrap();
        let source = FileSource::new(&test_file).unwrap();

        fs::remove_file(&test_file).unwrap();

        assert!(matches!(
            source.read(),
            Err(InputError::FileNotFound { .. })
        ));
    }

    #[test]
    fn strip_shebang_removes_first_line_only() {
        assert_eq!(
            strip_shebang("#!/usr/bin/env slides\n# Title\n#!not this"),
            "# Title\n#!not this"
        );
    }

    #[test]
    fn strip_shebang_without_shebang_is_identity() {
        assert_eq!(strip_shebang("# Title\nbody"), "# Title\nbody");
    }

    #[test]
    fn strip_shebang_of_lone_shebang_is_empty() {
        assert_eq!(strip_shebang("#!/bin/sh"), "");
    }

    #[cfg(unix)]
    #[test]
    fn read_strips_shebang_from_executable_file() {
        use std::os::unix::fs::PermissionsExt;

        let test_file = std::env::temp_dir().join("slides_test_executable_shebang.md");
        fs::write(&test_file, "#!/usr/bin/env slides\n# One\n---\n# Two").unwrap();
        fs::set_permissions(&test_file, fs::Permissions::from_mode(0o755)).unwrap();

        let content = FileSource::new(&test_file).unwrap().read();

        let _ = fs::remove_file(&test_file);
        assert_eq!(content.unwrap(), "# One\n---\n# Two");
    }

    #[cfg(unix)]
    #[test]
    fn read_keeps_shebang_in_non_executable_file() {
        use std::os::unix::fs::PermissionsExt;

        let test_file = std::env::temp_dir().join("slides_test_plain_shebang.md");
        fs::write(&test_file, "#!/usr/bin/env slides\n# One").unwrap();
        fs::set_permissions(&test_file, fs::Permissions::from_mode(0o644)).unwrap();

        let content = FileSource::new(&test_file).unwrap().read();

        let _ = fs::remove_file(&test_file);
        assert_eq!(content.unwrap(), "#!/usr/bin/env slides\n# One");
    }

    #[cfg(unix)]
    #[test]
    fn read_preprocesses_executable_file_after_stripping() {
        use std::os::unix::fs::PermissionsExt;

        let test_file = std::env::temp_dir().join("slides_test_executable_preprocess.md");
        fs::write(&test_file, "#!/usr/bin/env slides\n# Demo\n~~~cat\nfrom stdin\n~~~\n").unwrap();
        fs::set_permissions(&test_file, fs::Permissions::from_mode(0o755)).unwrap();

        let content = FileSource::new(&test_file).unwrap().read();

        let _ = fs::remove_file(&test_file);
        assert_eq!(content.unwrap(), "# Demo\nfrom stdin\n");
    }

    #[test]
    fn modified_reports_timestamp_for_existing_file() {
        let test_file = std::env::temp_dir().join("slides_test_modified_timestamp.md");
        fs::write(&test_file, "# One\n").unwrap();
        let source = FileSource::new(&test_file).unwrap();

        let modified = WatchedFile::modified(&source);

        let _ = fs::remove_file(&test_file);
        assert!(modified.is_ok());
    }
}
