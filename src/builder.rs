//! Tree construction from settings lists
//!
//! [`create_configuration`] turns a flat list of `name => value` pairs into a
//! fresh tree. Every value is written as text, whatever its original kind:
//! readers convert on access, they never rely on the stored kind.
//!
//! ```rust
//! use cfgtree::{create_configuration, get_config_value, settings};
//!
//! let config = create_configuration("collection", &settings! {
//!     "max_size" => 10u64,
//!     "timeout" => "30",
//! })?;
//!
//! assert_eq!(get_config_value::<String, _>(&config, "max_size")?, "10");
//! assert_eq!(get_config_value::<u64, _>(&config, "timeout")?, 30);
//! # Ok::<(), cfgtree::Error>(())
//! ```

use crate::accessor::set_config_value;
use crate::error::Result;
use crate::value::SettingValue;
use crate::xml::XmlConfiguration;
use log::debug;
use serde::{Deserialize, Serialize};

/// A single named setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingChange {
    pub name: String,
    pub value: SettingValue,
}

impl SettingChange {
    pub fn new(name: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered list of settings used to seed a new tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsChanges(Vec<SettingChange>);

impl SettingsChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a setting (duplicates are kept; they fail at build time)
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<SettingValue>) {
        self.0.push(SettingChange::new(name, value));
    }

    /// First value recorded under `name`
    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.0.iter().find(|c| c.name == name).map(|c| &c.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SettingChange> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<SettingValue>> FromIterator<(K, V)> for SettingsChanges {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| SettingChange::new(name, value))
                .collect(),
        )
    }
}

impl IntoIterator for SettingsChanges {
    type Item = SettingChange;
    type IntoIter = std::vec::IntoIter<SettingChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SettingsChanges {
    type Item = &'a SettingChange;
    type IntoIter = std::slice::Iter<'a, SettingChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a [`SettingsChanges`] list from `name => value` pairs.
///
/// # Example
/// ```rust
/// use cfgtree::settings;
///
/// let list = settings! {
///     "max_size" => 10u64,
///     "endpoint" => "https://example.com",
///     "ratio" => 0.5,
/// };
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! settings {
    ($($name:expr => $value:expr),* $(,)?) => {{
        let mut list = $crate::SettingsChanges::new();
        $(
            list.push($name, $value);
        )*
        list
    }};
}

// =============================================================================
// JSON Flattening
// =============================================================================

#[cfg(feature = "json")]
impl SettingsChanges {
    /// Flatten a JSON object into dotted setting names.
    ///
    /// `{"a": {"b": 1}, "c": "x"}` becomes `a.b = 1`, `c = "x"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`](crate::Error::Parse) if the top level is not an
    /// object or if any value is an array.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        Self::from_json_with_separator(value, crate::xml::DEFAULT_SEPARATOR)
    }

    /// Like [`from_json`](Self::from_json) with a custom name separator
    pub fn from_json_with_separator(value: &serde_json::Value, separator: char) -> Result<Self> {
        let serde_json::Value::Object(map) = value else {
            return Err(crate::Error::Parse(
                "settings must be a JSON object".into(),
            ));
        };

        let mut list = Self::new();
        for (key, child) in map {
            flatten_json(key.clone(), child, separator, &mut list)?;
        }
        Ok(list)
    }

    /// Serialize `value` to JSON and flatten it (see [`from_json`](Self::from_json))
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value)?;
        Self::from_json(&json)
    }
}

#[cfg(feature = "json")]
fn flatten_json(
    name: String,
    value: &serde_json::Value,
    separator: char,
    out: &mut SettingsChanges,
) -> Result<()> {
    use serde_json::Value;

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_json(format!("{name}{separator}{key}"), child, separator, out)?;
            }
        }
        Value::Array(_) => {
            return Err(crate::Error::Parse(format!(
                "array value at `{name}` is not a scalar"
            )));
        }
        Value::Null => out.push(name, SettingValue::Null),
        Value::Bool(b) => out.push(name, *b),
        Value::Number(n) => {
            let value = if let Some(v) = n.as_u64() {
                SettingValue::UInt64(v)
            } else if let Some(v) = n.as_i64() {
                SettingValue::Int64(v)
            } else {
                SettingValue::Float64(n.as_f64().unwrap_or(f64::NAN))
            };
            out.push(name, value);
        }
        Value::String(s) => out.push(name, s.as_str()),
    }
    Ok(())
}

// =============================================================================
// Tree Builder
// =============================================================================

/// Create an empty tree whose root element is named `root_name`
pub fn create_empty_configuration(root_name: &str) -> XmlConfiguration {
    XmlConfiguration::new(root_name)
}

/// Create a tree holding every setting of `settings` as text.
///
/// Settings are inserted in order without overwriting; the first duplicate
/// name aborts the build.
///
/// # Errors
///
/// - [`Error::KeyAlreadyExists`](crate::Error::KeyAlreadyExists) on a duplicate name
/// - [`Error::InvalidPath`](crate::Error::InvalidPath) if a name is not a valid path
pub fn create_configuration(root_name: &str, settings: &SettingsChanges) -> Result<XmlConfiguration> {
    debug!(
        "Creating configuration `{root_name}` from {} setting(s)",
        settings.len()
    );

    let mut config = create_empty_configuration(root_name);
    for SettingChange { name, value } in settings {
        set_config_value(&mut config, name, &value.to_string(), false)?;
    }
    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================
