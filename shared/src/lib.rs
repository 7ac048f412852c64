pub mod admin;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod inventory;
pub mod selector;
pub mod shared_wheel_game;
pub mod store;

pub use admin::{AdminError, AdminGate};
pub use catalog::{Catalog, Prize};
pub use config::RaffleConfig;
pub use inventory::{Inventory, InventoryDraft};
pub use shared_wheel_game::{RaffleWheel, SpinOutcome, SpinPhase, SpinPlan};
pub use store::{InventoryStore, KeyValueStore, MemoryStore, StoreError};
