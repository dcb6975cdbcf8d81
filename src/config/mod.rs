use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, SiteError};

/// Source and destination of one build.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub content: PathBuf,
    pub destination: PathBuf,
}

impl SitePaths {
    pub fn new(content: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            content: content.into(),
            destination: destination.into(),
        }
    }

    /// Check the paths before anything is written: the content directory
    /// must exist and neither directory may contain the other, since the
    /// destination is emptied before copying.
    pub fn validate(&self) -> Result<()> {
        if !self.content.is_dir() {
            return Err(SiteError::ContentNotFound {
                path: self.content.clone(),
            });
        }

        let content = normalize(&self.content)?;
        let destination = normalize(&self.destination)?;
        if destination.starts_with(&content) || content.starts_with(&destination) {
            return Err(SiteError::OverlappingPaths {
                content: self.content.clone(),
                destination: self.destination.clone(),
            });
        }
        Ok(())
    }
}

/// Absolute, symlink-resolved form of `path`. A missing path is resolved
/// through its parent when that exists.
fn normalize(path: &Path) -> io::Result<PathBuf> {
    if path.exists() {
        return path.canonicalize();
    }
    let absolute = std::path::absolute(path)?;
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) if parent.exists() => Ok(parent.canonicalize()?.join(name)),
        _ => Ok(absolute),
    }
}
