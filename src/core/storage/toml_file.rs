//! File-backed repository: one TOML document per user

use super::repository::{upsert, RecordRepository};
use super::{SemesterRecord, UserId};
use crate::core::error::StorageError;
use crate::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// On-disk shape of a user's document
#[derive(Debug, Default, Serialize, Deserialize)]
struct UserDocument {
    /// Identity the document belongs to, kept for humans reading the file
    #[serde(default)]
    user: String,
    #[serde(default)]
    semesters: Vec<SemesterRecord>,
}

/// Stores each user's semesters in `<data_dir>/<encoded user>.toml`.
///
/// ```toml
/// user = "student@uni.edu"
///
/// [[semesters]]
/// name = "Fall"
/// gpa = 7.428571428571429
///
/// [[semesters.subjects]]
/// name = "Math"
/// credits = 3
/// grade = "A"
/// ```
pub struct TomlFileRepository {
    data_dir: PathBuf,
}

impl TomlFileRepository {
    /// Create a repository rooted at `data_dir`. The directory is created on first write.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory holding the user documents
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the document for `user`
    #[must_use]
    pub fn document_path(&self, user: &UserId) -> PathBuf {
        self.data_dir.join(format!("{}.toml", user.file_stem()))
    }

    fn read_document(&self, user: &UserId) -> Result<UserDocument, StorageError> {
        let path = self.document_path(user);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No record file for {user} at {}", path.display());
                return Ok(UserDocument::default());
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        toml::from_str(&content).map_err(|source| StorageError::Parse { path, source })
    }

    /// Serialize and replace the user's document.
    ///
    /// Writes to a sibling temp file and renames it over the target. A failed
    /// write never truncates the previous document.
    fn write_document(&self, user: &UserId, semesters: &[SemesterRecord]) -> Result<(), StorageError> {
        let path = self.document_path(user);
        fs::create_dir_all(&self.data_dir).map_err(|source| StorageError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let document = UserDocument {
            user: user.as_str().to_string(),
            semesters: semesters.to_vec(),
        };
        let content = toml::to_string_pretty(&document)?;

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content).map_err(|source| StorageError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            "Saved {} semester(s) for {user} to {}",
            semesters.len(),
            path.display()
        );
        Ok(())
    }
}

impl RecordRepository for TomlFileRepository {
    fn load(&self, user: &UserId) -> Result<Vec<SemesterRecord>, StorageError> {
        Ok(self.read_document(user)?.semesters)
    }

    fn save_semester(&self, user: &UserId, semester: &SemesterRecord) -> Result<(), StorageError> {
        let mut semesters = self.read_document(user)?.semesters;
        upsert(&mut semesters, semester);
        self.write_document(user, &semesters)
    }

    fn save_all(&self, user: &UserId, semesters: &[SemesterRecord]) -> Result<(), StorageError> {
        self.write_document(user, semesters)
    }

    fn delete(&self, user: &UserId, semester_name: &str) -> Result<(), StorageError> {
        let mut semesters = self.read_document(user)?.semesters;
        let before = semesters.len();
        semesters.retain(|s| s.name != semester_name);
        if semesters.len() == before {
            debug!("Delete of '{semester_name}' for {user}: nothing stored");
            return Ok(());
        }
        self.write_document(user, &semesters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::SubjectRecord;
    use tempfile::TempDir;

    fn fall() -> SemesterRecord {
        SemesterRecord {
            name: "Fall".to_string(),
            gpa: 8.0,
            subjects: vec![SubjectRecord {
                name: "Math".to_string(),
                credits: 3,
                grade: "A".to_string(),
            }],
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let repo = TomlFileRepository::new(dir.path());
        let user = UserId::new("nobody@uni.edu").unwrap();
        assert!(repo.load(&user).unwrap().is_empty());
    }

    #[test]
    fn test_document_lands_under_encoded_name() {
        let dir = TempDir::new().unwrap();
        let repo = TomlFileRepository::new(dir.path());
        let user = UserId::new("a/b@uni.edu").unwrap();
        repo.save_semester(&user, &fall()).unwrap();

        let expected = dir.path().join("a%2Fb@uni.edu.toml");
        assert_eq!(repo.document_path(&user), expected);
        assert!(expected.exists());
        assert!(!dir.path().join("a%2Fb@uni.edu.toml.tmp").exists());
    }

    #[test]
    fn test_corrupt_document_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let repo = TomlFileRepository::new(dir.path());
        let user = UserId::new("x@uni.edu").unwrap();
        fs::write(repo.document_path(&user), "semesters = 42").unwrap();
        assert!(matches!(
            repo.load(&user),
            Err(StorageError::Parse { .. })
        ));
    }
}
