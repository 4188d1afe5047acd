use crate::error::{LabelError, Result};
use crate::image_set::ScanOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings read from `boxlabel.toml`. Every field has a default, so an empty
/// file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Where label files are written. Relative paths resolve against the
    /// working directory.
    pub labels_dir: PathBuf,
    pub extensions: Vec<String>,
    pub case_sensitive: bool,
    pub sort_by_name: bool,
    pub overlay: OverlayStyle,
}

/// How committed boxes and the draft are outlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub color: [u8; 3],
    pub stroke_width: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            stroke_width: 1.0,
        }
    }
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        let scan = ScanOptions::default();
        Self {
            labels_dir: PathBuf::from("labels"),
            extensions: scan.extensions,
            case_sensitive: scan.case_sensitive,
            sort_by_name: scan.sort_by_name,
            overlay: OverlayStyle::default(),
        }
    }
}

impl AnnotatorConfig {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            extensions: self.extensions.clone(),
            case_sensitive: self.case_sensitive,
            sort_by_name: self.sort_by_name,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LabelError::io(path, e))?;
        toml::from_str(&content).map_err(|source| LabelError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads the first candidate that exists. Falls back to defaults when none
    /// exists or the one found cannot be used.
    pub fn load_or_default<P: AsRef<Path>>(candidates: &[P]) -> Self {
        let mut found: Option<&Path> = None;
        for candidate in candidates {
            let candidate: &Path = candidate.as_ref();
            if candidate.is_file() {
                found = Some(candidate);
                break;
            }
        }
        let Some(path) = found else {
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(cfg) => {
                tracing::info!("loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!("{e}. Using defaults.");
                Self::default()
            }
        }
    }
}
