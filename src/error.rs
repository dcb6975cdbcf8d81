use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("Content directory not found: {path}")]
    ContentNotFound { path: PathBuf },

    #[error("Destination {destination} overlaps content directory {content}")]
    OverlappingPaths {
        content: PathBuf,
        destination: PathBuf,
    },

    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template file with a non-UTF-8 name: {path}")]
    InvalidStoryName { path: PathBuf },

    #[error("Property file error in {path} at line {line}: {message}")]
    Properties {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Failed to render {path}")]
    Render {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to render index fragment for topic '{topic}', story '{story}'")]
    IndexFragment {
        topic: String,
        story: String,
        #[source]
        source: tera::Error,
    },

    #[error("Copy error: {0}")]
    Copy(#[from] fs_extra::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SiteError>;
