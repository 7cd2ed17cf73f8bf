//! Network address inventory lookup cache
//!
//! Sits between callers and the storage module's
//! `NetworkAddressInventoryCacheDao`. Both lookups are best effort: failures
//! are logged and surface as `NONE` or `None`.

use std::sync::Arc;

use netinv::{
    ModuleManager, NetworkAddressInventory, NetworkAddressInventoryCacheDao, Result, NONE,
    STORAGE_MODULE,
};
use once_cell::sync::OnceCell;
use tracing::{debug, error};

use crate::bounded::BoundedCache;
use crate::config::CacheConfig;
use crate::stats::CacheStats;

type CacheDao = dyn NetworkAddressInventoryCacheDao;

/// Two-way address inventory cache
///
/// Addresses resolve to IDs through one table and IDs resolve to records
/// through another. Entries appear only as a side effect of lookups and
/// leave only by eviction.
pub struct NetworkAddressInventoryCache {
    module_manager: Arc<ModuleManager>,

    /// Resolved on first use from the storage module
    cache_dao: OnceCell<Arc<CacheDao>>,

    /// Address key -> inventory ID, never `NONE`
    address_ids: BoundedCache<String, i32>,

    /// Inventory ID -> record, never empty
    inventories: BoundedCache<i32, NetworkAddressInventory>,

    config: CacheConfig,
}

impl NetworkAddressInventoryCache {
    /// Create a cache with default sizing
    pub fn new(module_manager: Arc<ModuleManager>) -> Self {
        let config = CacheConfig::default();
        Self::build(module_manager, config)
    }

    /// Create a cache with custom sizing
    ///
    /// # Errors
    /// * `InvalidConfig` - sizing rejected by [`CacheConfig::validate`]
    pub fn with_config(module_manager: Arc<ModuleManager>, config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(module_manager, config))
    }

    fn build(module_manager: Arc<ModuleManager>, config: CacheConfig) -> Self {
        Self {
            module_manager,
            cache_dao: OnceCell::new(),
            address_ids: BoundedCache::with_validated(&config),
            inventories: BoundedCache::with_validated(&config),
            config,
        }
    }

    fn cache_dao(&self) -> Result<&Arc<CacheDao>> {
        self.cache_dao
            .get_or_try_init(|| self.module_manager.find_service::<CacheDao>(STORAGE_MODULE))
    }

    /// Resolve an address to its inventory ID
    ///
    /// Returns `NONE` when the address is unknown or the lookup failed.
    pub fn get_address_id(&self, network_address: &str) -> i32 {
        match self.try_get_address_id(network_address) {
            Ok(address_id) => address_id,
            Err(err) => {
                error!(network_address, error = %err, "failed to resolve network address id");
                NONE
            }
        }
    }

    fn try_get_address_id(&self, network_address: &str) -> Result<i32> {
        let key = NetworkAddressInventory::build_id(network_address);
        let cached = self.address_ids.get_or_try_load(key, || -> Result<_> {
            let address_id = self.cache_dao()?.get_address_id(network_address)?;
            Ok((address_id != NONE).then_some(address_id))
        })?;
        if let Some(address_id) = cached {
            return Ok(address_id);
        }

        let address_id = self.cache_dao()?.get_address_id(network_address)?;
        if address_id != NONE {
            debug!(network_address, address_id, "address id resolved on direct lookup");
            self.address_ids
                .put(NetworkAddressInventory::build_id(network_address), address_id);
        }
        Ok(address_id)
    }

    /// Resolve an inventory ID to its record
    ///
    /// Returns `None` when the ID is unknown or both lookups failed. A failed
    /// cached lookup still falls back to one direct store call.
    pub fn get(&self, address_id: i32) -> Option<NetworkAddressInventory> {
        let cached = self
            .inventories
            .get_or_try_load(address_id, || -> Result<_> {
                Ok(self.cache_dao()?.get(address_id)?.filter(|record| !record.is_empty()))
            })
            .unwrap_or_else(|err| {
                error!(address_id, error = %err, "failed to load network address inventory");
                None
            });
        if cached.is_some() {
            return cached;
        }

        match self.load_inventory(address_id) {
            Ok(inventory) => inventory,
            Err(err) => {
                error!(address_id, error = %err, "failed to fetch network address inventory");
                None
            }
        }
    }

    fn load_inventory(&self, address_id: i32) -> Result<Option<NetworkAddressInventory>> {
        let inventory = self
            .cache_dao()?
            .get(address_id)?
            .filter(|record| !record.is_empty());
        if let Some(record) = &inventory {
            debug!(address_id, "inventory resolved on direct lookup");
            self.inventories.put(address_id, record.clone());
        }
        Ok(inventory)
    }

    /// Live entries in the address -> ID table
    pub fn address_cache_len(&self) -> usize {
        self.address_ids.len()
    }

    /// Live entries in the ID -> record table
    pub fn inventory_cache_len(&self) -> usize {
        self.inventories.len()
    }

    /// Counters for the address -> ID table
    pub fn address_cache_stats(&self) -> &CacheStats {
        self.address_ids.stats()
    }

    /// Counters for the ID -> record table
    pub fn inventory_cache_stats(&self) -> &CacheStats {
        self.inventories.stats()
    }

    /// Sizing in effect
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netinv::{InMemoryInventoryStore, ModuleProvider, NodeType};

    fn cache_over(store: Arc<InMemoryInventoryStore>) -> NetworkAddressInventoryCache {
        let dao: Arc<CacheDao> = store;
        let manager = ModuleManager::new();
        manager.register(STORAGE_MODULE, ModuleProvider::new().with_service(dao));
        NetworkAddressInventoryCache::new(Arc::new(manager))
    }

    #[test]
    fn test_resolve_both_directions() {
        let store = Arc::new(InMemoryInventoryStore::new());
        let id = store.register("10.0.0.1:80", NodeType::Http, 5).unwrap();
        let cache = cache_over(Arc::clone(&store));

        assert_eq!(cache.get_address_id("10.0.0.1:80"), id);
        let record = cache.get(id).unwrap();
        assert_eq!(record.name, "10.0.0.1:80");
        assert_eq!(record.node_type, NodeType::Http);

        assert_eq!(cache.address_cache_len(), 1);
        assert_eq!(cache.inventory_cache_len(), 1);
    }

    #[test]
    fn test_unknown_address_not_cached() {
        let store = Arc::new(InMemoryInventoryStore::new());
        let cache = cache_over(Arc::clone(&store));

        assert_eq!(cache.get_address_id("nowhere:1"), NONE);
        assert_eq!(cache.address_cache_len(), 0);

        // Registered later; the next lookup sees it
        let id = store.register("nowhere:1", NodeType::Unknown, 0).unwrap();
        assert_eq!(cache.get_address_id("nowhere:1"), id);
        assert_eq!(cache.address_cache_len(), 1);
    }

    #[test]
    fn test_missing_storage_module() {
        let cache = NetworkAddressInventoryCache::new(Arc::new(ModuleManager::new()));

        assert_eq!(cache.get_address_id("10.0.0.1:80"), NONE);
        assert_eq!(cache.get(1), None);
        assert_eq!(cache.address_cache_stats().load_failures(), 1);
        assert_eq!(cache.inventory_cache_stats().load_failures(), 1);
    }

    #[test]
    fn test_storage_registered_after_failed_resolution() {
        let manager = Arc::new(ModuleManager::new());
        let cache = NetworkAddressInventoryCache::new(Arc::clone(&manager));
        assert_eq!(cache.get_address_id("db:3306"), NONE);

        let store = Arc::new(InMemoryInventoryStore::new());
        let id = store.register("db:3306", NodeType::Database, 0).unwrap();
        let dao: Arc<CacheDao> = store;
        manager.register(STORAGE_MODULE, ModuleProvider::new().with_service(dao));

        assert_eq!(cache.get_address_id("db:3306"), id);
    }

    #[test]
    fn test_with_config_rejects_zero_capacity() {
        let manager = Arc::new(ModuleManager::new());
        let config = CacheConfig::new().with_initial_capacity(0).with_max_capacity(0);
        assert!(NetworkAddressInventoryCache::with_config(manager, config).is_err());
    }

    #[test]
    fn test_cache_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NetworkAddressInventoryCache>();
    }
}
