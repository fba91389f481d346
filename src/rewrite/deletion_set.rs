use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Error;

const FILE_PREFIX: &str = ".commits_to_delete-";

/// Hashes slated for removal, persisted where the re-entrant editor process can read
/// them. The file lives exactly as long as this value.
#[derive(Debug)]
pub struct DeletionSetFile {
    file: NamedTempFile,
}

impl DeletionSetFile {
    /// Write `hashes` as a JSON array to a fresh file under `dir`.
    ///
    /// # Errors
    /// Returns an error when the directory or file cannot be created or written.
    pub fn create(dir: &Path, hashes: &[String]) -> Result<Self, Error> {
        let io_err = |source: std::io::Error| Error::DeletionSetIo {
            path: dir.to_path_buf(),
            source,
        };
        let dir = std::path::absolute(dir).map_err(io_err)?;
        std::fs::create_dir_all(&dir).map_err(io_err)?;
        let mut file = tempfile::Builder::new()
            .prefix(FILE_PREFIX)
            .suffix(".json")
            .tempfile_in(&dir)
            .map_err(io_err)?;

        let path = file.path().to_path_buf();
        serde_json::to_writer(file.as_file_mut(), hashes).map_err(|source| {
            Error::DeletionSetFormat {
                path: path.clone(),
                source,
            }
        })?;
        file.as_file_mut()
            .flush()
            .map_err(|source| Error::DeletionSetIo { path, source })?;
        Ok(Self { file })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now rather than on drop, surfacing any error.
    ///
    /// # Errors
    /// Returns an error when the file cannot be removed.
    pub fn remove(self) -> Result<(), Error> {
        let path = self.file.path().to_path_buf();
        self.file
            .close()
            .map_err(|source| Error::DeletionSetIo { path, source })
    }
}

/// Read a deletion set written by [`DeletionSetFile::create`].
///
/// # Errors
/// Returns an error when the file cannot be read or is not a JSON array of strings.
pub fn read_deletion_set(path: &Path) -> Result<Vec<String>, Error> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::DeletionSetIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::DeletionSetFormat {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_and_removes() {
        let temp = tempdir().expect("tempdir");
        let hashes = vec!["abc123".to_string(), "def4".to_string()];
        let set = DeletionSetFile::create(&temp.path().join("nested"), &hashes).expect("create");
        let path = set.path().to_path_buf();
        assert!(path.is_absolute());
        assert!(
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(FILE_PREFIX))
        );
        assert_eq!(read_deletion_set(&path).expect("read"), hashes);

        set.remove().expect("remove");
        assert!(!path.exists());
    }

    #[test]
    fn dropping_also_removes() {
        let temp = tempdir().expect("tempdir");
        let set = DeletionSetFile::create(temp.path(), &["abc".to_string()]).expect("create");
        let path = set.path().to_path_buf();
        drop(set);
        assert!(!path.exists());
    }

    #[test]
    fn rejects_non_list_payload() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("set.json");
        std::fs::write(&path, r#"{"hashes": ["abc"]}"#).expect("write");
        let err = read_deletion_set(&path).expect_err("object payload");
        assert!(matches!(err, Error::DeletionSetFormat { .. }));
    }
}
