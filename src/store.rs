//! Hierarchical store trait
//!
//! The accessor layer never touches a document directly. It talks to a
//! [`ConfigStore`], which allows swapping the in-memory XML tree for any other
//! path-addressed backend (or a fake in tests).

use crate::error::Result;

/// Primitive operations of a path-addressed configuration store.
///
/// Getters fail with [`Error::MissingKey`](crate::Error::MissingKey) when the
/// path is absent and with [`Error::InvalidValue`](crate::Error::InvalidValue)
/// when the stored text cannot be converted. Setters create the path if needed
/// and overwrite any existing value. `remove` on a missing path is a no-op.
pub trait ConfigStore {
    /// Whether a value (or an intermediate node) exists at `path`
    fn has(&self, path: &str) -> bool;

    fn get_string(&self, path: &str) -> Result<String>;

    fn get_u64(&self, path: &str) -> Result<u64>;

    fn get_i64(&self, path: &str) -> Result<i64>;

    fn get_f64(&self, path: &str) -> Result<f64>;

    fn set_string(&mut self, path: &str, value: &str) -> Result<()>;

    fn set_u64(&mut self, path: &str, value: u64) -> Result<()>;

    fn set_i64(&mut self, path: &str, value: i64) -> Result<()>;

    fn set_f64(&mut self, path: &str, value: f64) -> Result<()>;

    /// Remove the node at `path` together with everything below it
    fn remove(&mut self, path: &str) -> Result<()>;
}
