//! Persisting rendered source units.

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::debug;
use tempfile::NamedTempFile;

use crate::{
    error::EmitError,
    render::{SourceUnit, is_valid_identifier},
};

/// Destination for generated source units.
///
/// An emitter either persists the whole unit or returns an error; the run loop
/// records the error and moves on to the next unit.
pub trait ArtifactEmitter {
    fn emit(&mut self, unit: &SourceUnit) -> Result<(), EmitError>;
}

impl<E: ArtifactEmitter + ?Sized> ArtifactEmitter for &mut E {
    fn emit(&mut self, unit: &SourceUnit) -> Result<(), EmitError> {
        (**self).emit(unit)
    }
}

/// Relative location of a unit below an output root: one directory per
/// package segment, with a leading `crate` segment dropped.
///
/// `crate::models` + `person_mapper.rs` -> `models/person_mapper.rs`
pub fn relative_path(unit: &SourceUnit) -> Result<PathBuf, EmitError> {
    let invalid = || EmitError::InvalidPackage {
        artifact: unit.name.clone(),
        package: unit.package.clone(),
    };

    let mut path = PathBuf::new();
    let package = unit.package.trim_start_matches("::");
    if !package.is_empty() {
        for (index, segment) in package.split("::").enumerate() {
            if index == 0 && segment == "crate" {
                continue;
            }
            if !is_valid_identifier(segment) {
                return Err(invalid());
            }
            path.push(segment.trim_start_matches("r#"));
        }
    }
    path.push(&unit.file_name);
    Ok(path)
}

/// Writes each unit to `<out_dir>/<package dirs>/<file name>`.
///
/// The body goes to a temporary file next to the target, which is then renamed
/// into place. A failed write leaves any previous file untouched.
#[derive(Debug, Clone)]
pub struct FileEmitter {
    out_dir: PathBuf,
}

impl FileEmitter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Where `unit` would be written.
    pub fn path_for(&self, unit: &SourceUnit) -> Result<PathBuf, EmitError> {
        Ok(self.out_dir.join(relative_path(unit)?))
    }
}

impl ArtifactEmitter for FileEmitter {
    fn emit(&mut self, unit: &SourceUnit) -> Result<(), EmitError> {
        let path = self.path_for(unit)?;
        let io_error = |source: std::io::Error| EmitError::Io {
            artifact: unit.name.clone(),
            path: path.clone(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(io_error)?;

        let mut staged = NamedTempFile::new_in(dir).map_err(io_error)?;
        staged.write_all(unit.body.as_bytes()).map_err(io_error)?;
        staged.as_file().sync_all().map_err(io_error)?;
        staged.persist(&path).map_err(|err| io_error(err.error))?;
        debug!("Wrote {} to {}", unit, path.display());
        Ok(())
    }
}

/// Keeps units in memory, keyed by their qualified name.
#[derive(Debug, Clone, Default)]
pub struct MemoryEmitter {
    units: BTreeMap<String, SourceUnit>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a unit up by qualified name (`crate::models::PersonMapper`).
    pub fn get(&self, name: &str) -> Option<&SourceUnit> {
        self.units.get(name)
    }

    pub fn units(&self) -> impl Iterator<Item = &SourceUnit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn into_units(self) -> BTreeMap<String, SourceUnit> {
        self.units
    }
}

impl ArtifactEmitter for MemoryEmitter {
    fn emit(&mut self, unit: &SourceUnit) -> Result<(), EmitError> {
        self.units.insert(unit.to_string(), unit.clone());
        Ok(())
    }
}
