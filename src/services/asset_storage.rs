use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::errors::internal::StorageError;

/// Extensions accepted for uploaded assets
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pdf"];

/// The asset categories, each with its own subdirectory under the
/// upload root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    EmployeePhoto,
    EmployeeSignature,
    ApprovalSignature,
    IdCard,
}

impl AssetKind {
    pub fn subdir(&self) -> &'static str {
        match self {
            AssetKind::EmployeePhoto => "employee_photos",
            AssetKind::EmployeeSignature => "employee_signatures",
            AssetKind::ApprovalSignature => "approval_signatures",
            AssetKind::IdCard => "idcards",
        }
    }
}

/// Stores uploaded blobs on disk and hands back relative paths.
///
/// Database rows never hold raw bytes; they reference files under the
/// upload root by relative path, so the root can move between
/// deployments without rewriting rows.
pub struct AssetStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl AssetStorage {
    pub fn new(root: PathBuf, max_bytes: usize) -> Self {
        Self { root, max_bytes }
    }

    /// Create the upload root and all category subdirectories
    pub fn init_dirs(&self) -> Result<(), StorageError> {
        for kind in [
            AssetKind::EmployeePhoto,
            AssetKind::EmployeeSignature,
            AssetKind::ApprovalSignature,
            AssetKind::IdCard,
        ] {
            fs::create_dir_all(self.root.join(kind.subdir()))?;
        }
        Ok(())
    }

    /// Persist uploaded bytes under the category subdirectory.
    ///
    /// The stored name is a fresh UUID plus the original extension, so
    /// uploads can never collide or traverse out of the root.
    pub fn save(
        &self,
        kind: AssetKind,
        original_filename: &str,
        data: &[u8],
    ) -> Result<String, StorageError> {
        if data.len() > self.max_bytes {
            return Err(StorageError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let extension = sanitized_extension(original_filename)?;
        let relative = format!("{}/{}.{}", kind.subdir(), Uuid::new_v4(), extension);
        fs::write(self.root.join(&relative), data)?;
        Ok(relative)
    }

    /// Absolute path for a stored relative path
    pub fn absolute(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Whether the stored file still exists on disk
    pub fn exists(&self, relative: &str) -> bool {
        self.absolute(relative).is_file()
    }

    /// Read a stored file back
    pub fn read(&self, relative: &str) -> Result<Vec<u8>, StorageError> {
        Ok(fs::read(self.absolute(relative))?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn sanitized_extension(filename: &str) -> Result<String, StorageError> {
    let name = filename.trim();
    if name.is_empty() {
        return Err(StorageError::MissingFilename);
    }

    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| StorageError::UnsupportedExtension(name.to_string()))?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(StorageError::UnsupportedExtension(extension));
    }
    Ok(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> (tempfile::TempDir, AssetStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = AssetStorage::new(dir.path().to_path_buf(), 1024);
        storage.init_dirs().unwrap();
        (dir, storage)
    }

    #[test]
    fn save_places_file_under_the_category_subdir() {
        let (_dir, storage) = storage();
        let path = storage
            .save(AssetKind::EmployeePhoto, "portrait.JPG", b"fake-bytes")
            .unwrap();

        assert!(path.starts_with("employee_photos/"));
        assert!(path.ends_with(".jpg"));
        assert_eq!(storage.read(&path).unwrap(), b"fake-bytes");
    }

    #[test]
    fn oversized_upload_is_refused() {
        let (_dir, storage) = storage();
        let big = vec![0u8; 2048];
        assert!(matches!(
            storage.save(AssetKind::EmployeeSignature, "sig.png", &big),
            Err(StorageError::TooLarge { .. })
        ));
    }

    #[test]
    fn disallowed_extension_is_refused() {
        let (_dir, storage) = storage();
        assert!(matches!(
            storage.save(AssetKind::EmployeePhoto, "script.exe", b"x"),
            Err(StorageError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            storage.save(AssetKind::EmployeePhoto, "noextension", b"x"),
            Err(StorageError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn empty_filename_is_refused() {
        let (_dir, storage) = storage();
        assert!(matches!(
            storage.save(AssetKind::EmployeePhoto, "  ", b"x"),
            Err(StorageError::MissingFilename)
        ));
    }
}
