//! Module registry used to locate services by module name
//!
//! Modules are registered once at startup. Consumers look up a module by
//! name and then ask it for a service by type, typically a trait object
//! such as `dyn NetworkAddressInventoryCacheDao`.

use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::error::{Error, Result};

/// Name of the module that provides storage DAOs
pub const STORAGE_MODULE: &str = "storage";

/// Services exported by a single module, keyed by service type
#[derive(Default)]
pub struct ModuleProvider {
    services: AHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ModuleProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `service` as the implementation of `S`, replacing any previous one
    pub fn register_service<S>(&mut self, service: Arc<S>)
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.services.insert(TypeId::of::<Arc<S>>(), Box::new(service));
    }

    /// Builder form of [`register_service`](Self::register_service)
    pub fn with_service<S>(mut self, service: Arc<S>) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.register_service(service);
        self
    }

    fn lookup<S>(&self) -> Option<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.services
            .get(&TypeId::of::<Arc<S>>())
            .and_then(|service| service.downcast_ref::<Arc<S>>())
            .cloned()
    }
}

/// Registry of named modules
#[derive(Default)]
pub struct ModuleManager {
    modules: RwLock<AHashMap<String, Arc<ModuleProvider>>>,
}

impl ModuleManager {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module, replacing any module with the same name
    pub fn register(&self, name: impl Into<String>, provider: ModuleProvider) {
        self.modules.write().insert(name.into(), Arc::new(provider));
    }

    /// Resolve service `S` from module `name`
    ///
    /// # Errors
    /// * `ModuleNotFound` - no module registered under `name`
    /// * `ServiceNotFound` - the module does not provide `S`
    pub fn find_service<S>(&self, name: &str) -> Result<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        let provider = self
            .modules
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ModuleNotFound(name.to_string()))?;

        provider.lookup::<S>().ok_or_else(|| Error::ServiceNotFound {
            module: name.to_string(),
            service: type_name::<S>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    struct Hello;

    impl Greeter for Hello {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    #[test]
    fn test_find_trait_object_service() {
        let manager = ModuleManager::new();
        let greeter: Arc<dyn Greeter> = Arc::new(Hello);
        manager.register("greeting", ModuleProvider::new().with_service(greeter));

        let found = manager.find_service::<dyn Greeter>("greeting").unwrap();
        assert_eq!(found.greet(), "hello");
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let manager = ModuleManager::new();
        let greeter: Arc<dyn Greeter> = Arc::new(Hello);
        manager.register("greeting", ModuleProvider::new().with_service(greeter));

        let first = manager.find_service::<dyn Greeter>("greeting").unwrap();
        let second = manager.find_service::<dyn Greeter>("greeting").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_module() {
        let manager = ModuleManager::new();
        let result = manager.find_service::<dyn Greeter>(STORAGE_MODULE);
        assert!(matches!(result, Err(Error::ModuleNotFound(name)) if name == "storage"));
    }

    #[test]
    fn test_missing_service() {
        let manager = ModuleManager::new();
        manager.register(STORAGE_MODULE, ModuleProvider::new());

        let result = manager.find_service::<dyn Greeter>(STORAGE_MODULE);
        assert!(matches!(result, Err(Error::ServiceNotFound { .. })));
    }
}
