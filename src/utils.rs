use crate::error::Error;
use crate::manifest::MANIFEST_FILE;
use crate::result::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Find the project root: the given path (or current directory) and its
/// ancestors are searched for `reload.toml`, then for a `.git` folder
pub fn find_project_root(path: Option<&Path>) -> Result<PathBuf> {
    let base_path = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !base_path.is_dir() {
        return Err(Error::ManifestNotFound(base_path.display().to_string()));
    }

    for marker in [MANIFEST_FILE, ".git"] {
        if let Some(root) = base_path.ancestors().find(|dir| dir.join(marker).exists()) {
            return Ok(root.to_path_buf());
        }
    }

    Ok(base_path)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Copy a single file, creating the destination folder
pub fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    if !source.is_file() {
        return Err(Error::Custom(format!(
            "File not found at {}",
            source.display()
        )));
    }
    if let Some(parent) = destination.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(source, destination)?;
    Ok(())
}

/// Remove a file or directory tree; a missing path is not an error
pub fn remove_path(path: &Path) -> Result<bool> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}
