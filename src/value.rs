//! Scalar kinds and setting values
//!
//! - [`ConfigScalar`] - compile-time dispatch to the store's typed primitives
//! - [`ScalarKind`] - runtime tag for the four supported kinds
//! - [`SettingValue`] - loosely typed value used in settings lists

use crate::error::{Error, Result};
use crate::store::ConfigStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four scalar kinds a configuration tree can hold natively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    String,
    UInt64,
    Int64,
    Float64,
}

impl ScalarKind {
    /// All supported kinds
    pub const ALL: [ScalarKind; 4] = [
        ScalarKind::String,
        ScalarKind::UInt64,
        ScalarKind::Int64,
        ScalarKind::Float64,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "String",
            ScalarKind::UInt64 => "UInt64",
            ScalarKind::Int64 => "Int64",
            ScalarKind::Float64 => "Float64",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarKind {
    type Err = Error;

    /// Parse a type name (`String`, `UInt64`, `Int64`, `Float64`, or the Rust
    /// spellings `str`, `u64`, `i64`, `f64`), ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(ScalarKind::String),
            "uint64" | "u64" => Ok(ScalarKind::UInt64),
            "int64" | "i64" => Ok(ScalarKind::Int64),
            "float64" | "f64" => Ok(ScalarKind::Float64),
            _ => Err(Error::unsupported("ScalarKind::from_str", s)),
        }
    }
}

// =============================================================================
// Compile-time dispatch
// =============================================================================

/// A Rust type that maps onto one of the store's typed primitives.
///
/// Implemented for [`String`], [`u64`], [`i64`] and [`f64`]. Using any other
/// type with the generic accessors is rejected by the compiler.
pub trait ConfigScalar: Sized + Clone {
    /// Runtime tag of this type
    const KIND: ScalarKind;

    /// Read a value with the store's getter for this kind
    fn read<S: ConfigStore + ?Sized>(store: &S, path: &str) -> Result<Self>;

    /// Write a value with the store's setter for this kind
    fn write<S: ConfigStore + ?Sized>(&self, store: &mut S, path: &str) -> Result<()>;

    /// Wrap into the loosely typed [`SettingValue`]
    fn into_setting_value(self) -> SettingValue;
}

impl ConfigScalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn read<S: ConfigStore + ?Sized>(store: &S, path: &str) -> Result<Self> {
        store.get_string(path)
    }

    fn write<S: ConfigStore + ?Sized>(&self, store: &mut S, path: &str) -> Result<()> {
        store.set_string(path, self)
    }

    fn into_setting_value(self) -> SettingValue {
        SettingValue::String(self)
    }
}

impl ConfigScalar for u64 {
    const KIND: ScalarKind = ScalarKind::UInt64;

    fn read<S: ConfigStore + ?Sized>(store: &S, path: &str) -> Result<Self> {
        store.get_u64(path)
    }

    fn write<S: ConfigStore + ?Sized>(&self, store: &mut S, path: &str) -> Result<()> {
        store.set_u64(path, *self)
    }

    fn into_setting_value(self) -> SettingValue {
        SettingValue::UInt64(self)
    }
}

impl ConfigScalar for i64 {
    const KIND: ScalarKind = ScalarKind::Int64;

    fn read<S: ConfigStore + ?Sized>(store: &S, path: &str) -> Result<Self> {
        store.get_i64(path)
    }

    fn write<S: ConfigStore + ?Sized>(&self, store: &mut S, path: &str) -> Result<()> {
        store.set_i64(path, *self)
    }

    fn into_setting_value(self) -> SettingValue {
        SettingValue::Int64(self)
    }
}

impl ConfigScalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float64;

    fn read<S: ConfigStore + ?Sized>(store: &S, path: &str) -> Result<Self> {
        store.get_f64(path)
    }

    fn write<S: ConfigStore + ?Sized>(&self, store: &mut S, path: &str) -> Result<()> {
        store.set_f64(path, *self)
    }

    fn into_setting_value(self) -> SettingValue {
        SettingValue::Float64(self)
    }
}

// =============================================================================
// Setting values
// =============================================================================

/// A loosely typed setting value.
///
/// Settings lists may carry kinds the tree cannot store natively (`Bool`,
/// `Null`). Every value has a canonical text form via [`Display`](fmt::Display):
/// strings verbatim, numbers in decimal, floats in shortest round-trip form,
/// booleans as `true`/`false` and null as `NULL`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Null,
    Bool(bool),
    UInt64(u64),
    Int64(i64),
    Float64(f64),
    String(String),
}

impl SettingValue {
    /// Scalar kind the tree can store this value as, if any
    pub fn kind(&self) -> Option<ScalarKind> {
        match self {
            SettingValue::UInt64(_) => Some(ScalarKind::UInt64),
            SettingValue::Int64(_) => Some(ScalarKind::Int64),
            SettingValue::Float64(_) => Some(ScalarKind::Float64),
            SettingValue::String(_) => Some(ScalarKind::String),
            SettingValue::Null | SettingValue::Bool(_) => None,
        }
    }

    /// Name of the value's type, including kinds the tree cannot store
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Null => "Null",
            SettingValue::Bool(_) => "Bool",
            other => other.kind().map_or("Null", |kind| kind.as_str()),
        }
    }

    /// Borrow the inner string, if this is a `String`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Null => f.write_str("NULL"),
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::UInt64(v) => write!(f, "{v}"),
            SettingValue::Int64(v) => write!(f, "{v}"),
            SettingValue::Float64(v) => write!(f, "{v}"),
            SettingValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<u64> for SettingValue {
    fn from(value: u64) -> Self {
        SettingValue::UInt64(value)
    }
}

impl From<u32> for SettingValue {
    fn from(value: u32) -> Self {
        SettingValue::UInt64(u64::from(value))
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int64(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        SettingValue::Int64(i64::from(value))
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float64(value)
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl<T: Into<SettingValue>> From<Option<T>> for SettingValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SettingValue::Null, Into::into)
    }
}
