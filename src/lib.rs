//! # cfgtree - typed access to hierarchical configuration trees
//!
//! A small, synchronous layer for reading, writing, copying and removing
//! scalar values in a path-addressed configuration tree, plus helpers for
//! building a fresh tree from a flat list of settings.
//!
//! ## Features
//!
//! - **Typed Accessors**: `String`, `u64`, `i64` and `f64` checked at compile time
//! - **Overwrite Protection**: plain inserts and copies never replace existing keys
//! - **Defaults**: optional fallback values for missing keys
//! - **Pluggable Store**: everything runs against the [`ConfigStore`] trait
//! - **XML-like Tree**: [`XmlConfiguration`] with `name[n]` and `name[@attr]` paths
//! - **Settings Lists**: build trees from `settings! { ... }` or flattened JSON (`json` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use cfgtree::{
//!     copy_config_value, create_configuration, get_config_value_or_default,
//!     remove_config_value, set_config_value, settings, ConfigStore,
//! };
//!
//! let mut config = create_configuration("s3_collection", &settings! {
//!     "url" => "https://bucket.s3.amazonaws.com",
//!     "max_connections" => 16u64,
//! })?;
//!
//! // Typed reads convert the stored text
//! let max: u64 = get_config_value_or_default(&config, "max_connections", None)?;
//! let retries: u64 = get_config_value_or_default(&config, "retries", Some(&3))?;
//! assert_eq!((max, retries), (16, 3));
//!
//! // Writes refuse to overwrite unless `update` is set
//! assert!(set_config_value(&mut config, "url", &"other".to_string(), false).is_err());
//! set_config_value(&mut config, "url", &"other".to_string(), true)?;
//!
//! // Copy between trees, then remove
//! let mut backup = cfgtree::create_empty_configuration("backup");
//! copy_config_value::<String, _, _>(&config, "url", &mut backup, "url")?;
//! remove_config_value(&mut config, "url")?;
//! assert!(!config.has("url") && backup.has("url"));
//! # Ok::<(), cfgtree::Error>(())
//! ```
//!
//! ## Error Model
//!
//! Every failure is returned immediately as an [`Error`] naming the path:
//!
//! - [`Error::MissingKey`] - the operation needed an existing path
//! - [`Error::KeyAlreadyExists`] - the destination had to be absent
//! - [`Error::UnsupportedType`] - a runtime-selected kind outside the four scalars
//!
//! Preconditions are always checked before the tree is touched, so failed
//! calls never leave partial writes behind.
//!
//! ## Threading
//!
//! Accessors borrow the tree for the duration of one call and never lock.
//! Share a tree across threads through [`SharedConfiguration`].

// Core modules
mod accessor;
mod builder;
mod error;
mod sync;
mod value;

pub mod store;
pub mod xml;

pub use accessor::{
    copy_config_value, copy_config_value_as, copy_config_value_within, get_config_value,
    get_config_value_as, get_config_value_or_default, remove_config_value, set_config_value,
    set_config_value_dyn,
};
pub use builder::{
    create_configuration, create_empty_configuration, SettingChange, SettingsChanges,
};
pub use error::{Error, Result};
pub use store::ConfigStore;
pub use sync::{RwLockExt, SharedConfiguration};
pub use value::{ConfigScalar, ScalarKind, SettingValue};
pub use xml::{XmlConfiguration, XmlConfigurationBuilder};
