use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::game::Game;
use super::schema::{self, SchemaViolation, Violation};
use super::Catalog;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    DocumentFormat(#[source] serde_json::Error),
    #[error("schema violation: {0}")]
    Schema(#[from] SchemaViolation),
}

/// Writing or renaming the output failed. The destination was left as it was.
#[derive(Debug, Error)]
#[error("failed to save catalog to {}: {source}", .path.display())]
pub struct PersistenceError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

/// Read and fully decode the catalog at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Catalog, LoadError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse(&raw)?;
    info!(
        path = %path.display(),
        games = catalog.games.len(),
        assets = catalog.asset_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

pub fn parse(raw: &str) -> Result<Catalog, LoadError> {
    let document: Value = serde_json::from_str(raw).map_err(LoadError::DocumentFormat)?;
    decode_document(document)
}

pub fn from_reader<R: Read>(reader: R) -> Result<Catalog, LoadError> {
    let document: Value = serde_json::from_reader(reader).map_err(LoadError::DocumentFormat)?;
    decode_document(document)
}

fn decode_document(document: Value) -> Result<Catalog, LoadError> {
    let Value::Array(records) = document else {
        return Err(SchemaViolation::new("Catalog", "$", Violation::NotAnArray).into());
    };

    let mut games = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let path = format!("$[{index}]");
        schema::check_record(&record, &schema::GAME, &path)?;
        let game: Game = serde_json::from_value(record).map_err(|err| {
            SchemaViolation::new(schema::GAME.kind, path, Violation::InvalidValue(err.to_string()))
        })?;
        games.push(game);
    }
    Ok(Catalog { games })
}

pub fn to_string(catalog: &Catalog, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(catalog),
        OutputFormat::Compact => serde_json::to_string(catalog),
    }
}

pub fn write_document(
    catalog: &Catalog,
    out: &mut dyn Write,
    format: OutputFormat,
) -> io::Result<()> {
    let written = match format {
        OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, catalog),
        OutputFormat::Compact => serde_json::to_writer(&mut *out, catalog),
    };
    written.map_err(io::Error::other)
}

/// Serialize `catalog` to `destination`, replacing it only once the whole
/// document is on disk.
pub fn save(
    catalog: &Catalog,
    destination: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<(), PersistenceError> {
    let destination = destination.as_ref();
    write_atomically(destination, |out| write_document(catalog, out, format))?;
    info!(path = %destination.display(), games = catalog.games.len(), "catalog saved");
    Ok(())
}

/// Sibling temporary file used while writing `destination`.
pub fn temp_path_for(destination: &Path) -> PathBuf {
    match destination.file_name() {
        Some(name) => {
            let mut temp_name = OsString::from(name);
            temp_name.push(".tmp");
            destination.with_file_name(temp_name)
        }
        None => destination.with_extension("tmp"),
    }
}

/// Run `write` against a temporary sibling of `destination`, then rename it
/// into place. On failure the temporary file is removed and `destination` is
/// untouched.
pub fn write_atomically<F>(destination: &Path, write: F) -> Result<(), PersistenceError>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let temp = temp_path_for(destination);
    debug!(temp = %temp.display(), "writing temporary catalog");

    if let Err(source) = write_then_rename(&temp, destination, write) {
        if temp.exists() {
            if let Err(err) = fs::remove_file(&temp) {
                warn!(temp = %temp.display(), %err, "could not remove temporary file");
            }
        }
        return Err(PersistenceError {
            path: destination.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn write_then_rename<F>(temp: &Path, destination: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let mut out = BufWriter::new(File::create(temp)?);
    write(&mut out)?;
    let file = out.into_inner().map_err(|err| err.into_error())?;
    file.sync_all()?;
    drop(file);
    fs::rename(temp, destination)
}
