//! Common test utilities for cfgtree integration tests
//!
//! Provides an in-memory fake store and shared fixtures.

#![allow(dead_code)]

use cfgtree::{ConfigStore, Error, Result, XmlConfiguration};
use std::collections::BTreeMap;

// =============================================================================
// Fake Store
// =============================================================================

/// Flat map store: keys are full dotted paths, parents exist implicitly.
///
/// Counts every mutation so tests can prove that failed calls never wrote.
#[derive(Debug, Default, Clone)]
pub struct MapStore {
    pub values: BTreeMap<String, String>,
    pub writes: usize,
}

impl MapStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn raw(&self, path: &str) -> Result<&str> {
        self.values
            .get(path)
            .map(String::as_str)
            .ok_or_else(|| Error::MissingKey(path.to_string()))
    }

    fn invalid(path: &str, kind: &str, value: &str) -> Error {
        Error::InvalidValue {
            path: path.to_string(),
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }
}

impl ConfigStore for MapStore {
    fn has(&self, path: &str) -> bool {
        let prefix = format!("{path}.");
        self.values
            .keys()
            .any(|key| key == path || key.starts_with(&prefix))
    }

    fn get_string(&self, path: &str) -> Result<String> {
        self.raw(path).map(str::to_string)
    }

    fn get_u64(&self, path: &str) -> Result<u64> {
        let raw = self.raw(path)?;
        raw.parse().map_err(|_| Self::invalid(path, "UInt64", raw))
    }

    fn get_i64(&self, path: &str) -> Result<i64> {
        let raw = self.raw(path)?;
        raw.parse().map_err(|_| Self::invalid(path, "Int64", raw))
    }

    fn get_f64(&self, path: &str) -> Result<f64> {
        let raw = self.raw(path)?;
        raw.parse().map_err(|_| Self::invalid(path, "Float64", raw))
    }

    fn set_string(&mut self, path: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.values.insert(path.to_string(), value.to_string());
        Ok(())
    }

    fn set_u64(&mut self, path: &str, value: u64) -> Result<()> {
        self.set_string(path, &value.to_string())
    }

    fn set_i64(&mut self, path: &str, value: i64) -> Result<()> {
        self.set_string(path, &value.to_string())
    }

    fn set_f64(&mut self, path: &str, value: f64) -> Result<()> {
        self.set_string(path, &value.to_string())
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        self.writes += 1;
        let prefix = format!("{path}.");
        self.values
            .retain(|key, _| key != path && !key.starts_with(&prefix));
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Install a test logger once; honours `RUST_LOG`
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Empty XML tree with the root used across tests
pub fn xml_tree() -> XmlConfiguration {
    init_logging();
    XmlConfiguration::new("named_collection")
}

/// One of each store implementation, boxed behind the trait
pub fn all_stores() -> Vec<(&'static str, Box<dyn ConfigStore>)> {
    init_logging();
    let xml: Box<dyn ConfigStore> = Box::new(XmlConfiguration::new("root"));
    let map: Box<dyn ConfigStore> = Box::new(MapStore::new());
    vec![("xml", xml), ("map", map)]
}
