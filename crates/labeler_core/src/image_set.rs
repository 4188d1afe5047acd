use crate::error::{LabelError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// An image discovered by the folder scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub filename: String,
    pub path: PathBuf,
}

/// Options controlling which files the folder scan picks up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Accepted extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// When false, `PNG` matches `png`.
    pub case_sensitive: bool,
    /// Sort by file name instead of keeping directory-listing order.
    pub sort_by_name: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
            case_sensitive: true,
            sort_by_name: false,
        }
    }
}

impl ScanOptions {
    fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|want| {
            if self.case_sensitive {
                want == ext
            } else {
                want.eq_ignore_ascii_case(ext)
            }
        })
    }
}

/// Result of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    AtEnd,
    AtStart,
    /// Navigation refused while a label prompt is open.
    Blocked,
}

/// Ordered images of one folder plus a cursor.
#[derive(Debug, Clone)]
pub struct ImageSet {
    root: PathBuf,
    entries: Vec<ImageEntry>,
    index: usize,
}

impl ImageSet {
    /// Scan `root` (non-recursively) for images. An empty result is an error:
    /// the session needs a current image to start.
    pub fn scan(root: impl AsRef<Path>, opts: &ScanOptions) -> Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(LabelError::MissingDirectory(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(LabelError::NotADirectory(root.to_path_buf()));
        }

        let mut walker = WalkDir::new(root).min_depth(1).max_depth(1);
        if opts.sort_by_name {
            walker = walker.sort_by_file_name();
        }

        let mut entries = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("walkdir error: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !opts.accepts(path) {
                continue;
            }
            entries.push(ImageEntry {
                filename: entry.file_name().to_string_lossy().into_owned(),
                path: path.to_path_buf(),
            });
        }

        if entries.is_empty() {
            return Err(LabelError::NoImages(root.to_path_buf()));
        }
        tracing::info!("found {} images in {}", entries.len(), root.display());
        Ok(Self {
            root: root.to_path_buf(),
            entries,
            index: 0,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn list(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn current(&self) -> &ImageEntry {
        &self.entries[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn advance(&mut self) -> Step {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
            Step::Moved
        } else {
            Step::AtEnd
        }
    }

    pub fn retreat(&mut self) -> Step {
        if self.index > 0 {
            self.index -= 1;
            Step::Moved
        } else {
            Step::AtStart
        }
    }
}
