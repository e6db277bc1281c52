//! Map sources
//!
//! A [`MapSource`] resolves a map identifier (the map's abbreviation, e.g.
//! `"USA"`) to a decoded [`MapCollection`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use electionmap_core::{Error, Result};

use crate::collection::{MapCollection, MapIdentity};

/// Resolves map identifiers to collections.
pub trait MapSource {
    /// Loads and decodes the map named `identifier`.
    ///
    /// Fails with [`Error::MapNotFound`] when no map is known under that
    /// identifier and with a decode error when the data is corrupt.
    fn load(&self, identifier: &str) -> Result<MapCollection>;

    /// Whether `identifier` names a map this source can load.
    fn contains(&self, identifier: &str) -> bool;
}

/// Reads `<directory>/<identifier>.shp`.
#[derive(Debug, Clone)]
pub struct DirectoryMapSource {
    directory: PathBuf,
    names: HashMap<String, String>,
}

impl DirectoryMapSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            names: HashMap::new(),
        }
    }

    /// Registers a display name for a map identifier.
    pub fn with_name(mut self, identifier: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(identifier.into(), name.into());
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path the map named `identifier` would be read from.
    pub fn path_for(&self, identifier: &str) -> Option<PathBuf> {
        let valid = !identifier.is_empty()
            && !identifier.contains(['/', '\\'])
            && identifier != "."
            && identifier != "..";
        valid.then(|| self.directory.join(format!("{identifier}.shp")))
    }

    fn identity_for(&self, identifier: &str) -> MapIdentity {
        match self.names.get(identifier) {
            Some(name) => MapIdentity::new(name.clone(), identifier),
            None => MapIdentity::from_identifier(identifier),
        }
    }
}

impl MapSource for DirectoryMapSource {
    fn load(&self, identifier: &str) -> Result<MapCollection> {
        let path = self
            .path_for(identifier)
            .filter(|p| p.is_file())
            .ok_or_else(|| Error::MapNotFound {
                identifier: identifier.to_string(),
            })?;
        MapCollection::load(self.identity_for(identifier), path)
    }

    fn contains(&self, identifier: &str) -> bool {
        self.path_for(identifier).is_some_and(|p| p.is_file())
    }
}

/// Serves maps from in-memory `.shp` images.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMapSource {
    maps: HashMap<String, (MapIdentity, Vec<u8>)>,
}

impl InMemoryMapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a map under its abbreviation.
    pub fn insert(&mut self, identity: MapIdentity, bytes: Vec<u8>) {
        self.maps
            .insert(identity.abbreviation.clone(), (identity, bytes));
    }

    pub fn with_map(mut self, identity: MapIdentity, bytes: Vec<u8>) -> Self {
        self.insert(identity, bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl MapSource for InMemoryMapSource {
    fn load(&self, identifier: &str) -> Result<MapCollection> {
        let (identity, bytes) = self.maps.get(identifier).ok_or_else(|| Error::MapNotFound {
            identifier: identifier.to_string(),
        })?;
        Ok(MapCollection::decode(identity.clone(), bytes)?)
    }

    fn contains(&self, identifier: &str) -> bool {
        self.maps.contains_key(identifier)
    }
}
