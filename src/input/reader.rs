use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::input::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Tsv,
}

impl SheetFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            SheetFormat::Csv => b',',
            SheetFormat::Tsv => b'\t',
        }
    }
}

pub fn is_gz(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Detects the sheet format from the file name, looking through a `.gz` suffix.
pub fn detect_format(path: &Path) -> Result<SheetFormat, InputError> {
    let inner = if is_gz(path) {
        path.file_stem().map(Path::new).unwrap_or(path)
    } else {
        path
    };
    let ext = inner
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => Ok(SheetFormat::Csv),
        Some("tsv") | Some("txt") => Ok(SheetFormat::Tsv),
        _ => Err(InputError::UnsupportedFormat(path.display().to_string())),
    }
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if is_gz(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
