//! Shared configuration handle
//!
//! The accessors themselves never lock. When a tree has to be shared between
//! threads, wrap it in a [`SharedConfiguration`] and run each accessor call
//! under its guard.

use crate::error::Result;
use crate::value::ConfigScalar;
use crate::xml::XmlConfiguration;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Extension trait for RwLock with poison recovery
pub trait RwLockExt<T> {
    /// Acquire a read lock, recovering from poison errors
    fn read_recovered(&self) -> RwLockReadGuard<'_, T>;

    /// Acquire a write lock, recovering from poison errors
    fn write_recovered(&self) -> RwLockWriteGuard<'_, T>;
}

impl<T> RwLockExt<T> for RwLock<T> {
    fn read_recovered(&self) -> RwLockReadGuard<'_, T> {
        match self.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Configuration lock was poisoned (read), recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write_recovered(&self) -> RwLockWriteGuard<'_, T> {
        match self.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Configuration lock was poisoned (write), recovering");
                poisoned.into_inner()
            }
        }
    }
}

/// Reference-counted, lock-protected [`XmlConfiguration`].
///
/// Cloning the handle shares the underlying tree.
///
/// # Example
/// ```rust
/// use cfgtree::{SharedConfiguration, XmlConfiguration, get_config_value};
///
/// let shared = SharedConfiguration::new(XmlConfiguration::new("root"));
/// shared.set("workers", &4u64, false)?;
///
/// let reader = shared.clone();
/// let workers = std::thread::spawn(move || reader.get::<u64>("workers"))
///     .join()
///     .unwrap()?;
/// assert_eq!(workers, 4);
///
/// // Any accessor can run under an explicit guard
/// let threads: u64 = get_config_value(&*shared.read(), "workers")?;
/// assert_eq!(threads, 4);
/// # Ok::<(), cfgtree::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedConfiguration {
    inner: Arc<RwLock<XmlConfiguration>>,
}

impl SharedConfiguration {
    pub fn new(config: XmlConfiguration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Shared read access for one or more accessor calls
    pub fn read(&self) -> RwLockReadGuard<'_, XmlConfiguration> {
        self.inner.read_recovered()
    }

    /// Exclusive write access for one or more accessor calls
    pub fn write(&self) -> RwLockWriteGuard<'_, XmlConfiguration> {
        self.inner.write_recovered()
    }

    /// [`get_config_value`](crate::get_config_value) under a read lock
    pub fn get<T: ConfigScalar>(&self, path: &str) -> Result<T> {
        crate::accessor::get_config_value(&*self.read(), path)
    }

    /// [`set_config_value`](crate::set_config_value) under a write lock
    pub fn set<T: ConfigScalar>(&self, path: &str, value: &T, update: bool) -> Result<()> {
        crate::accessor::set_config_value(&mut *self.write(), path, value, update)
    }

    /// Copy of the current tree
    pub fn snapshot(&self) -> XmlConfiguration {
        self.read().clone()
    }

    /// Take the tree back if this is the last handle
    pub fn try_unwrap(self) -> std::result::Result<XmlConfiguration, Self> {
        Arc::try_unwrap(self.inner)
            .map(|lock| lock.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner()))
            .map_err(|inner| Self { inner })
    }
}

impl From<XmlConfiguration> for SharedConfiguration {
    fn from(config: XmlConfiguration) -> Self {
        Self::new(config)
    }
}
