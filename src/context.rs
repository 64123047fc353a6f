use crate::manifest::MANIFEST_FILE;
use std::path::PathBuf;

/// Context passed throughout the application containing global configuration
#[derive(Debug, Clone)]
pub struct Context {
    /// Enable verbose output (show command execution details)
    pub verbose: bool,

    /// Path to the optional `reload.toml`
    pub manifest_path: PathBuf,

    /// Project root, every command runs from here
    pub base_dir: PathBuf,
}

impl Context {
    pub fn new(base_dir: PathBuf, verbose: bool) -> Self {
        let manifest_path = base_dir.join(MANIFEST_FILE);

        Self {
            verbose,
            manifest_path,
            base_dir,
        }
    }
}
