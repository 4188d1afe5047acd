use crate::error::{LabelError, Result};
use crate::record::BoundingBoxRecord;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Append-only store of per-image label files inside one directory.
#[derive(Debug, Clone)]
pub struct LabelStore {
    dir: PathBuf,
}

impl LabelStore {
    /// Opens the store, creating `dir` if it does not exist yet.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| LabelError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<image name without its last extension>.txt`
    pub fn path_for(&self, image_name: &str) -> PathBuf {
        let stem = Path::new(image_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| image_name.to_string());
        self.dir.join(format!("{stem}.txt"))
    }

    /// Reads every record stored for `image_name`, in file order. A missing
    /// file yields no records; a single bad row fails the whole load.
    pub fn records_for(&self, image_name: &str) -> Result<Vec<BoundingBoxRecord>> {
        let path = self.path_for(image_name);
        let file = match fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LabelError::io(&path, e)),
        };

        let mut records = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| LabelError::io(&path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let record = line
                .parse::<BoundingBoxRecord>()
                .map_err(|e| LabelError::MalformedLine {
                    path: path.clone(),
                    line: idx + 1,
                    content: line.clone(),
                    reason: e.to_string(),
                })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Appends one row for `image_name`, creating the file on first use.
    /// A failed write leaves the file at its previous length.
    pub fn append(&self, image_name: &str, record: &BoundingBoxRecord) -> Result<PathBuf> {
        let path = self.path_for(image_name);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LabelError::io(&path, e))?;
        let len = file
            .metadata()
            .map_err(|e| LabelError::io(&path, e))?
            .len();
        let row = format!("{record}\n");
        write_row(&mut file, row.as_bytes(), |f| f.set_len(len))
            .map_err(|e| LabelError::io(&path, e))?;
        tracing::info!("appended `{}` to {}", record, path.display());
        Ok(path)
    }
}

/// Writes `row` in one go. On failure `rollback` gets a chance to drop any
/// bytes that did land, so a retry never continues a torn row.
fn write_row<W: Write>(
    out: &mut W,
    row: &[u8],
    rollback: impl FnOnce(&mut W) -> io::Result<()>,
) -> io::Result<()> {
    if let Err(e) = out.write_all(row).and_then(|()| out.flush()) {
        if let Err(undo) = rollback(out) {
            tracing::warn!("could not roll back partial row: {undo}");
        }
        return Err(e);
    }
    Ok(())
}
