use std::path::{Path, PathBuf};

use anyhow::Result;

pub trait FsExt: AsRef<Path> {
    /// Resolves the path against the current working directory. Absolute
    /// paths come back unchanged.
    fn relative_to_cwd(&self) -> Result<PathBuf> {
        let cwd_dir = std::env::current_dir()?;

        Ok(cwd_dir.join(self.as_ref()))
    }
}

impl<T: AsRef<Path>> FsExt for T {}
