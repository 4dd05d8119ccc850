//! Error types for site snapshots

use std::path::PathBuf;

/// Errors loading or querying a site snapshot
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid TOML
    #[error("invalid toml snapshot: {0}")]
    Toml(#[from] toml::de::Error),

    /// Snapshot is not valid JSON
    #[error("invalid json snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot is not valid YAML
    #[error("invalid yaml snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension names no known format
    #[error("unsupported snapshot format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// No user with this name in the snapshot
    #[error("unknown viewer: '{username}'")]
    UnknownViewer { username: String },
}

impl SiteError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create unknown viewer error
    pub fn unknown_viewer(username: impl Into<String>) -> Self {
        Self::UnknownViewer {
            username: username.into(),
        }
    }
}

/// Result type alias for snapshot operations
pub type SiteResult<T> = Result<T, SiteError>;
