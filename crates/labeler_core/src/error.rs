use std::path::PathBuf;

/// Errors raised by scanning, label persistence and configuration.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("Path does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("No images found in {}", .0.display())]
    NoImages(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: malformed record {content:?} ({reason})", path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl LabelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = LabelError> = std::result::Result<T, E>;
