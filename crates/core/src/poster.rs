//! Poster file storage on the local filesystem.
//!
//! Every poster lives directly inside one directory under the exact name it
//! was uploaded with. Writes use exclusive creation, so two uploads racing
//! for the same name cannot both succeed and an existing poster is never
//! overwritten.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::CoreError;

#[derive(Debug, Clone)]
pub struct PosterStore {
    dir: PathBuf,
}

impl PosterStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of `file_name` inside the poster directory.
    pub fn path_for(&self, file_name: &str) -> Result<PathBuf, CoreError> {
        validate_file_name(file_name)?;
        Ok(self.dir.join(file_name))
    }

    pub async fn exists(&self, file_name: &str) -> Result<bool, CoreError> {
        let path = self.path_for(file_name)?;
        fs::try_exists(&path)
            .await
            .map_err(|e| storage_error("check", &path, e))
    }

    /// Write `bytes` under `file_name` and return the stored name.
    ///
    /// Fails with [`CoreError::DuplicateFile`] if the name is already taken.
    /// A partially written file is removed before the error is returned.
    pub async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, CoreError> {
        let path = self.path_for(file_name)?;
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| storage_error("create directory", &self.dir, e))?;

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(duplicate(file_name));
            }
            Err(e) => return Err(storage_error("create", &path, e)),
        };

        let written = async {
            file.write_all(bytes).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&path).await {
                tracing::warn!(path = %path.display(), error = %cleanup, "Failed to remove partial poster");
            }
            return Err(storage_error("write", &path, e));
        }

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Poster stored");
        Ok(file_name.to_string())
    }

    /// Remove `file_name` if present. Returns `true` if a file was removed.
    pub async fn delete(&self, file_name: &str) -> Result<bool, CoreError> {
        let path = self.path_for(file_name)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Poster deleted");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(storage_error("delete", &path, e)),
        }
    }
}

/// The message clients see when a poster name is already taken.
pub fn duplicate(file_name: &str) -> CoreError {
    CoreError::DuplicateFile(format!(
        "File '{file_name}' already exists! Please enter another file name!"
    ))
}

/// Reject names that are empty or could resolve outside the poster directory.
pub fn validate_file_name(file_name: &str) -> Result<(), CoreError> {
    let invalid = file_name.trim().is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\', '\0'])
        || file_name.contains("..");
    if invalid {
        return Err(CoreError::Validation(format!(
            "Invalid poster file name '{file_name}'"
        )));
    }
    Ok(())
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> CoreError {
    CoreError::Storage(format!("Failed to {action} '{}': {err}", path.display()))
}
