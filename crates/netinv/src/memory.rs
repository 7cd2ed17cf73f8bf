//! In-memory inventory store
//!
//! Keeps both directions of the mapping in one index behind a single lock,
//! so a registration is visible to both lookups at once.

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::dao::NetworkAddressInventoryCacheDao;
use crate::error::{Error, Result};
use crate::inventory::{NetworkAddressInventory, NodeType, NONE};

#[derive(Default)]
struct Index {
    ids: AHashMap<String, i32>,
    records: AHashMap<i32, NetworkAddressInventory>,
}

/// Process-local address inventory
#[derive(Default)]
pub struct InMemoryInventoryStore {
    index: RwLock<Index>,
}

impl InMemoryInventoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an address, returning its ID
    ///
    /// Registering a known address returns the existing ID unchanged.
    ///
    /// # Arguments
    /// * `network_address` - Address text
    /// * `node_type` - Endpoint classification
    /// * `now` - Registration time, epoch millis
    pub fn register(&self, network_address: &str, node_type: NodeType, now: i64) -> Result<i32> {
        let mut index = self.index.write();
        if let Some(&id) = index.ids.get(network_address) {
            return Ok(id);
        }

        let id = i32::try_from(index.records.len() + 1)
            .map_err(|_| Error::Backend("address inventory is full".to_string()))?;

        let record = NetworkAddressInventory::new(id, network_address)
            .with_node_type(node_type)
            .with_register_time(now);
        index.ids.insert(NetworkAddressInventory::build_id(network_address), id);
        index.records.insert(id, record);

        Ok(id)
    }

    /// Number of registered addresses
    pub fn len(&self) -> usize {
        self.index.read().records.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.index.read().records.is_empty()
    }
}

impl NetworkAddressInventoryCacheDao for InMemoryInventoryStore {
    fn get_address_id(&self, network_address: &str) -> Result<i32> {
        let index = self.index.read();
        Ok(index.ids.get(network_address).copied().unwrap_or(NONE))
    }

    fn get(&self, address_id: i32) -> Result<Option<NetworkAddressInventory>> {
        Ok(self.index.read().records.get(&address_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let store = InMemoryInventoryStore::new();
        assert!(store.is_empty());

        let id = store.register("10.0.0.1:3306", NodeType::Database, 100).unwrap();
        assert_ne!(id, NONE);
        assert_eq!(store.get_address_id("10.0.0.1:3306").unwrap(), id);

        let record = store.get(id).unwrap().unwrap();
        assert_eq!(record.name, "10.0.0.1:3306");
        assert_eq!(record.node_type, NodeType::Database);
        assert_eq!(record.register_time, 100);
    }

    #[test]
    fn test_register_is_idempotent() {
        let store = InMemoryInventoryStore::new();
        let first = store.register("mq:5672", NodeType::Mq, 1).unwrap();
        let second = store.register("mq:5672", NodeType::Mq, 2).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(first).unwrap().unwrap().register_time, 1);
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = InMemoryInventoryStore::new();
        let a = store.register("a:1", NodeType::Http, 0).unwrap();
        let b = store.register("b:1", NodeType::Http, 0).unwrap();
        assert_eq!((a, b), (1, 2));
    }

    #[test]
    fn test_unknown_lookups() {
        let store = InMemoryInventoryStore::new();
        assert_eq!(store.get_address_id("nowhere:0").unwrap(), NONE);
        assert!(store.get(NONE).unwrap().is_none());
        assert!(store.get(42).unwrap().is_none());
    }
}
