//! Device identity: created once, then reused.

use gosta_core::device::DeviceId;
use gosta_core::storage::LocalStorage;

pub const KEY_DEVICE_ID: &str = "gosta_device_id";

/// Returns the persisted device identity, generating and storing one if
/// absent.
///
/// A failed write still returns the freshly generated id so the current run
/// can use history; the next run will simply generate another.
pub fn ensure_device_id(storage: &dyn LocalStorage) -> DeviceId {
    if let Some(existing) = storage.get(KEY_DEVICE_ID) {
        let id = DeviceId::from(existing);
        if !id.is_empty() {
            return id;
        }
    }

    let id = DeviceId::generate();
    match storage.set(KEY_DEVICE_ID, id.as_str()) {
        Ok(()) => tracing::info!("[DeviceIdentity] Created device identity {}", id),
        Err(e) => tracing::warn!("[DeviceIdentity] Failed to persist device identity: {}", e),
    }
    id
}
