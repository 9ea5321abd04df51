//! JSON File Store

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{
    orders::Order,
    store::{OrderStore, StoreError},
};

/// Stores the order collection as a JSON array in a single file.
///
/// A missing or blank file reads as an empty collection. Saves write a sibling
/// temporary file and rename it over the original, keeping the original's permissions.
/// A symlinked path is followed and the file it points at is replaced.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// The file a save replaces: the backing file, or the file it links to.
    fn target(&self) -> Result<PathBuf, StoreError> {
        match fs::canonicalize(&self.path) {
            Ok(target) => Ok(target),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(self.path.clone()),
            Err(error) => Err(self.io_error(error)),
        }
    }

    /// Copy the permissions of an existing `target` onto the replacement file.
    fn keep_permissions(&self, target: &Path, file: &NamedTempFile) -> Result<(), StoreError> {
        match fs::metadata(target) {
            Ok(metadata) => file
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|error| self.io_error(error)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(self.io_error(error)),
        }
    }
}

fn directory_of(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

impl OrderStore for JsonFileStore {
    #[tracing::instrument(
        name = "orders.store.load_all",
        skip(self),
        fields(path = %self.path.display()),
        err
    )]
    fn load_all(&self) -> Result<Vec<Order>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("order file missing, starting empty");

                return Ok(Vec::new());
            }
            Err(error) => return Err(self.io_error(error)),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let orders: Option<Vec<Order>> =
            serde_json::from_str(&contents).map_err(|source| StoreError::Decode {
                path: self.path.clone(),
                source,
            })?;

        let orders = orders.unwrap_or_default();

        debug!(count = orders.len(), "loaded orders");

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.store.save_all",
        skip(self, orders),
        fields(path = %self.path.display(), count = orders.len()),
        err
    )]
    fn save_all(&self, orders: &[Order]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(orders).map_err(StoreError::Encode)?;

        let target = self.target()?;
        let directory = directory_of(&target);

        fs::create_dir_all(directory).map_err(|error| self.io_error(error))?;

        let mut file = NamedTempFile::new_in(directory).map_err(|error| self.io_error(error))?;

        file.write_all(&json)
            .and_then(|()| file.as_file().sync_all())
            .map_err(|error| self.io_error(error))?;

        self.keep_permissions(&target, &file)?;

        file.persist(&target)?;

        Ok(())
    }
}
