//! Backing store contract for address inventory lookups

use crate::error::Result;
use crate::inventory::NetworkAddressInventory;

/// Authoritative, possibly slow, two-way address inventory lookup.
///
/// Implementations are shared across threads and called synchronously.
pub trait NetworkAddressInventoryCacheDao: Send + Sync {
    /// Resolve an address to its inventory ID, `NONE` if unregistered
    fn get_address_id(&self, network_address: &str) -> Result<i32>;

    /// Resolve an inventory ID to its record, `None` if unknown
    fn get(&self, address_id: i32) -> Result<Option<NetworkAddressInventory>>;
}
