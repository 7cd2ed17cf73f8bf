//! # netinv
//!
//! Network address inventory: the record type, the backing store contract
//! and the module registry used to locate a store at runtime.
//!
//! ## Contents
//! - **Inventory**: `NetworkAddressInventory` records keyed by `i32` IDs,
//!   with `NONE` reserved for "not found"
//! - **DAO**: `NetworkAddressInventoryCacheDao`, the authoritative two-way lookup
//! - **Modules**: `ModuleManager` resolves named modules to their services
//! - **Memory store**: an in-process DAO implementation

#![warn(missing_docs)]

mod dao;
mod error;
mod inventory;
mod memory;
mod module;

pub use dao::NetworkAddressInventoryCacheDao;
pub use error::{Error, Result};
pub use inventory::{NetworkAddressInventory, NodeType, NONE};
pub use memory::InMemoryInventoryStore;
pub use module::{ModuleManager, ModuleProvider, STORAGE_MODULE};
