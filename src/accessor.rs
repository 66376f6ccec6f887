//! Typed accessors over a [`ConfigStore`]
//!
//! Every operation checks its existence preconditions first and only then
//! touches the store, so a failed call never leaves a partial write behind.
//!
//! ```rust
//! use cfgtree::{XmlConfiguration, get_config_value, set_config_value};
//!
//! let mut config = XmlConfiguration::new("root");
//! set_config_value(&mut config, "limits.max_size", &10u64, false)?;
//!
//! let max_size: u64 = get_config_value(&config, "limits.max_size")?;
//! assert_eq!(max_size, 10);
//!
//! // Plain inserts never overwrite
//! assert!(set_config_value(&mut config, "limits.max_size", &20u64, false).is_err());
//! # Ok::<(), cfgtree::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::store::ConfigStore;
use crate::value::{ConfigScalar, ScalarKind, SettingValue};
use log::{debug, trace};

// =============================================================================
// Value Reader
// =============================================================================

/// Read the value at `path` as `T`.
///
/// # Errors
///
/// - [`Error::MissingKey`] if the path does not exist
/// - [`Error::InvalidValue`] if the stored text is not a valid `T`
pub fn get_config_value<T, S>(config: &S, path: &str) -> Result<T>
where
    T: ConfigScalar,
    S: ConfigStore + ?Sized,
{
    get_config_value_or_default(config, path, None)
}

/// Read the value at `path` as `T`, falling back to `default` when the path
/// does not exist.
///
/// # Errors
///
/// - [`Error::MissingKey`] if the path does not exist and no default is given
/// - [`Error::InvalidValue`] if the stored text is not a valid `T`
pub fn get_config_value_or_default<T, S>(config: &S, path: &str, default: Option<&T>) -> Result<T>
where
    T: ConfigScalar,
    S: ConfigStore + ?Sized,
{
    if !config.has(path) {
        return match default {
            Some(value) => {
                trace!("Key {path} not found, using default");
                Ok(value.clone())
            }
            None => Err(Error::MissingKey(path.to_string())),
        };
    }

    trace!("Reading {path} as {}", T::KIND);
    T::read(config, path)
}

/// Read the value at `path` as the runtime-selected `kind`.
///
/// # Errors
///
/// Same as [`get_config_value`].
pub fn get_config_value_as<S>(config: &S, path: &str, kind: ScalarKind) -> Result<SettingValue>
where
    S: ConfigStore + ?Sized,
{
    Ok(match kind {
        ScalarKind::String => get_config_value::<String, _>(config, path)?.into_setting_value(),
        ScalarKind::UInt64 => get_config_value::<u64, _>(config, path)?.into_setting_value(),
        ScalarKind::Int64 => get_config_value::<i64, _>(config, path)?.into_setting_value(),
        ScalarKind::Float64 => get_config_value::<f64, _>(config, path)?.into_setting_value(),
    })
}

// =============================================================================
// Value Writer
// =============================================================================

/// Store `value` at `path`.
///
/// With `update == false` the path must not exist yet; with `update == true`
/// it is created or overwritten unconditionally.
///
/// # Errors
///
/// - [`Error::KeyAlreadyExists`] if `update` is false and the path exists
/// - [`Error::InvalidPath`] if the store cannot create the path
pub fn set_config_value<T, S>(config: &mut S, path: &str, value: &T, update: bool) -> Result<()>
where
    T: ConfigScalar,
    S: ConfigStore + ?Sized,
{
    if !update && config.has(path) {
        return Err(Error::KeyAlreadyExists(path.to_string()));
    }

    debug!("Setting {path} ({}, update: {update})", T::KIND);
    value.write(config, path)
}

/// Store a loosely typed value at `path` using the store primitive for its kind.
///
/// # Errors
///
/// - [`Error::KeyAlreadyExists`] if `update` is false and the path exists
/// - [`Error::UnsupportedType`] for `Bool` and `Null` values
pub fn set_config_value_dyn<S>(
    config: &mut S,
    path: &str,
    value: &SettingValue,
    update: bool,
) -> Result<()>
where
    S: ConfigStore + ?Sized,
{
    if !update && config.has(path) {
        return Err(Error::KeyAlreadyExists(path.to_string()));
    }

    match value {
        SettingValue::String(v) => set_config_value(config, path, v, true),
        SettingValue::UInt64(v) => set_config_value(config, path, v, true),
        SettingValue::Int64(v) => set_config_value(config, path, v, true),
        SettingValue::Float64(v) => set_config_value(config, path, v, true),
        other => Err(Error::unsupported("set_config_value", other.type_name())),
    }
}

// =============================================================================
// Value Copier
// =============================================================================

fn check_copy<F, D>(from: &F, from_path: &str, to: &D, to_path: &str) -> Result<()>
where
    F: ConfigStore + ?Sized,
    D: ConfigStore + ?Sized,
{
    if !from.has(from_path) {
        return Err(Error::MissingKey(from_path.to_string()));
    }
    if to.has(to_path) {
        return Err(Error::KeyAlreadyExists(to_path.to_string()));
    }
    Ok(())
}

/// Copy the `T` value at `from_path` in `from` to `to_path` in `to`.
///
/// The source tree is left untouched. Use [`copy_config_value_within`] when
/// source and destination are the same tree.
///
/// # Errors
///
/// - [`Error::MissingKey`] if `from_path` does not exist
/// - [`Error::KeyAlreadyExists`] if `to_path` already exists
/// - [`Error::InvalidValue`] if the source text is not a valid `T`
pub fn copy_config_value<T, F, D>(from: &F, from_path: &str, to: &mut D, to_path: &str) -> Result<()>
where
    T: ConfigScalar,
    F: ConfigStore + ?Sized,
    D: ConfigStore + ?Sized,
{
    check_copy(from, from_path, &*to, to_path)?;

    let value = T::read(from, from_path)?;
    debug!("Copying {from_path} to {to_path} ({})", T::KIND);
    value.write(to, to_path)
}

/// Copy the `T` value at `from_path` to `to_path` inside one tree.
///
/// # Errors
///
/// Same as [`copy_config_value`].
pub fn copy_config_value_within<T, S>(config: &mut S, from_path: &str, to_path: &str) -> Result<()>
where
    T: ConfigScalar,
    S: ConfigStore + ?Sized,
{
    check_copy(&*config, from_path, &*config, to_path)?;

    let value = T::read(&*config, from_path)?;
    debug!("Copying {from_path} to {to_path} ({})", T::KIND);
    value.write(config, to_path)
}

/// Copy a value between trees using the runtime-selected `kind`.
///
/// # Errors
///
/// Same as [`copy_config_value`].
pub fn copy_config_value_as<F, D>(
    from: &F,
    from_path: &str,
    to: &mut D,
    to_path: &str,
    kind: ScalarKind,
) -> Result<()>
where
    F: ConfigStore + ?Sized,
    D: ConfigStore + ?Sized,
{
    match kind {
        ScalarKind::String => copy_config_value::<String, _, _>(from, from_path, to, to_path),
        ScalarKind::UInt64 => copy_config_value::<u64, _, _>(from, from_path, to, to_path),
        ScalarKind::Int64 => copy_config_value::<i64, _, _>(from, from_path, to, to_path),
        ScalarKind::Float64 => copy_config_value::<f64, _, _>(from, from_path, to, to_path),
    }
}

// =============================================================================
// Value Remover
// =============================================================================

/// Remove the entry at `path` together with everything below it.
///
/// # Errors
///
/// - [`Error::MissingKey`] if the path does not exist
pub fn remove_config_value<S>(config: &mut S, path: &str) -> Result<()>
where
    S: ConfigStore + ?Sized,
{
    if !config.has(path) {
        return Err(Error::MissingKey(path.to_string()));
    }

    debug!("Removing {path}");
    config.remove(path)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlConfiguration;

    fn tree() -> XmlConfiguration {
        XmlConfiguration::new("root")
    }

    #[test]
    fn test_round_trip_all_kinds() {
        let mut config = tree();
        set_config_value(&mut config, "s", &"text".to_string(), true).unwrap();
        set_config_value(&mut config, "u", &u64::MAX, true).unwrap();
        set_config_value(&mut config, "i", &-42i64, true).unwrap();
        set_config_value(&mut config, "f", &3.25f64, true).unwrap();

        assert_eq!(get_config_value::<String, _>(&config, "s").unwrap(), "text");
        assert_eq!(get_config_value::<u64, _>(&config, "u").unwrap(), u64::MAX);
        assert_eq!(get_config_value::<i64, _>(&config, "i").unwrap(), -42);
        assert_eq!(get_config_value::<f64, _>(&config, "f").unwrap(), 3.25);
    }

    #[test]
    fn test_insert_protection() {
        let mut config = tree();
        set_config_value(&mut config, "p", &1u64, false).unwrap();

        let err = set_config_value(&mut config, "p", &2u64, false).unwrap_err();
        assert_eq!(err, Error::KeyAlreadyExists("p".into()));
        assert_eq!(get_config_value::<u64, _>(&config, "p").unwrap(), 1);
    }

    #[test]
    fn test_update_overwrites() {
        let mut config = tree();
        set_config_value(&mut config, "p", &1i64, true).unwrap();
        set_config_value(&mut config, "p", &2i64, true).unwrap();
        assert_eq!(get_config_value::<i64, _>(&config, "p").unwrap(), 2);
    }

    #[test]
    fn test_default_fallback() {
        let config = tree();
        let value = get_config_value_or_default(&config, "missing", Some(&7u64)).unwrap();
        assert_eq!(value, 7);

        let err = get_config_value_or_default::<u64, _>(&config, "missing", None).unwrap_err();
        assert_eq!(err, Error::MissingKey("missing".into()));
        assert!(get_config_value::<u64, _>(&config, "missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_default_ignored_when_present() {
        let mut config = tree();
        set_config_value(&mut config, "name", &"real".to_string(), false).unwrap();
        let value =
            get_config_value_or_default(&config, "name", Some(&"fallback".to_string())).unwrap();
        assert_eq!(value, "real");
    }

    #[test]
    fn test_copy_between_trees() {
        let mut src = tree();
        let mut dst = tree();
        set_config_value(&mut src, "a", &1.5f64, false).unwrap();

        copy_config_value::<f64, _, _>(&src, "a", &mut dst, "b.c").unwrap();
        assert_eq!(get_config_value::<f64, _>(&src, "a").unwrap(), 1.5);
        assert_eq!(get_config_value::<f64, _>(&dst, "b.c").unwrap(), 1.5);

        let err = copy_config_value::<f64, _, _>(&src, "a", &mut dst, "b.c").unwrap_err();
        assert_eq!(err, Error::KeyAlreadyExists("b.c".into()));
    }

    #[test]
    fn test_copy_missing_source() {
        let src = tree();
        let mut dst = tree();
        let err = copy_config_value::<String, _, _>(&src, "nope", &mut dst, "x").unwrap_err();
        assert_eq!(err, Error::MissingKey("nope".into()));
        assert!(dst.is_empty());
    }

    #[test]
    fn test_copy_within_same_tree() {
        let mut config = tree();
        set_config_value(&mut config, "a", &"v".to_string(), false).unwrap();
        copy_config_value_within::<String, _>(&mut config, "a", "b").unwrap();

        assert_eq!(get_config_value::<String, _>(&config, "a").unwrap(), "v");
        assert_eq!(get_config_value::<String, _>(&config, "b").unwrap(), "v");
        assert!(copy_config_value_within::<String, _>(&mut config, "a", "b").is_err());
    }

    #[test]
    fn test_remove() {
        let mut config = tree();
        set_config_value(&mut config, "p", &1u64, false).unwrap();
        remove_config_value(&mut config, "p").unwrap();

        assert!(!config.has("p"));
        let err = remove_config_value(&mut config, "p").unwrap_err();
        assert_eq!(err, Error::MissingKey("p".into()));
    }

    #[test]
    fn test_dynamic_kinds() {
        let mut config = tree();
        set_config_value_dyn(&mut config, "n", &SettingValue::Int64(-1), false).unwrap();
        assert_eq!(
            get_config_value_as(&config, "n", ScalarKind::Int64).unwrap(),
            SettingValue::Int64(-1)
        );
        assert_eq!(
            get_config_value_as(&config, "n", ScalarKind::String).unwrap(),
            SettingValue::String("-1".into())
        );

        let mut other = tree();
        copy_config_value_as(&config, "n", &mut other, "m", ScalarKind::Float64).unwrap();
        assert_eq!(get_config_value::<f64, _>(&other, "m").unwrap(), -1.0);
    }

    #[test]
    fn test_dynamic_unsupported_kind() {
        let mut config = tree();
        let err = set_config_value_dyn(&mut config, "b", &SettingValue::Bool(true), false)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { ref kind, .. } if kind == "Bool"));
        assert!(!config.has("b"));

        // Overwrite protection is checked before the kind
        set_config_value_dyn(&mut config, "s", &SettingValue::from("x"), false).unwrap();
        let err = set_config_value_dyn(&mut config, "s", &SettingValue::Null, false).unwrap_err();
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut config = tree();
        let store: &mut dyn ConfigStore = &mut config;
        set_config_value(&mut *store, "x", &5u64, false).unwrap();
        assert_eq!(get_config_value::<u64, _>(&*store, "x").unwrap(), 5);
    }
}
