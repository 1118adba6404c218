//! Local key-value storage seam.

use crate::error::Result;

/// Durable string-to-string store scoped to this device.
///
/// Mirrors the shape of a browser's local storage: reads never fail (missing
/// or unreadable data is simply absent), writes may.
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Writes several keys at once.
    ///
    /// The default applies them one by one; file-backed stores override this
    /// to issue a single write.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Removes several keys at once.
    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}
