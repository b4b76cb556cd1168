//! Loading CSDL documents from disk.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::error::CsdlError;
use super::{CsdlDocument, ReadOptions, read_json, read_xml};

/// File extensions read as CSDL XML.
pub const XML_EXTENSIONS: &[&str] = &["xml", "csdl", "edmx"];
/// File extensions read as CSDL JSON.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Schema formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Xml,
    Json,
}

impl SchemaFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if XML_EXTENSIONS.contains(&ext.as_str()) {
            Some(SchemaFormat::Xml)
        } else if JSON_EXTENSIONS.contains(&ext.as_str()) {
            Some(SchemaFormat::Json)
        } else {
            None
        }
    }
}

/// Load and parse one schema file, picking the reader by extension.
///
/// The document is named after the path unless `options` already names it.
pub fn load_file(path: impl AsRef<Path>, options: &ReadOptions) -> Result<CsdlDocument, CsdlError> {
    let path = path.as_ref();
    let format = SchemaFormat::from_path(path)
        .ok_or_else(|| CsdlError::UnsupportedFormat(path.display().to_string()))?;
    let bytes = std::fs::read(path)?;

    let mut options = options.clone();
    if options.document_name.is_none() {
        options.document_name = Some(path.display().to_string());
    }

    debug!(path = %path.display(), ?format, "loading schema file");
    match format {
        SchemaFormat::Xml => read_xml(&bytes, &options),
        SchemaFormat::Json => read_json(&bytes, &options),
    }
}

/// Collect schema file paths under `dir`, sorted for deterministic loading.
pub fn collect_schema_paths(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, CsdlError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
        let entry = entry.map_err(|e| CsdlError::Io(std::io::Error::other(e.to_string())))?;
        if entry.file_type().is_file() && SchemaFormat::from_path(entry.path()).is_some() {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load every schema file under `dir`.
///
/// All files are attempted; failures are reported together.
pub fn load_directory(
    dir: impl AsRef<Path>,
    options: &ReadOptions,
) -> Result<Vec<CsdlDocument>, CsdlError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(CsdlError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Directory not found: {}", dir.display()),
        )));
    }

    let mut documents = Vec::new();
    let mut errors = Vec::new();
    for path in collect_schema_paths(dir)? {
        // Each file is named after its own path.
        let file_options = ReadOptions {
            document_name: None,
            ..options.clone()
        };
        match load_file(&path, &file_options) {
            Ok(doc) => documents.push(doc),
            Err(e) => errors.push(format!("{}: {}", path.display(), e)),
        }
    }

    if errors.is_empty() {
        Ok(documents)
    } else {
        Err(CsdlError::Batch(errors))
    }
}
