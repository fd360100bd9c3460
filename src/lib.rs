pub mod config;
pub mod error;
pub mod model;
pub mod server;
pub mod storage;

pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use model::Medication;
pub use server::{router, serve, RegistryServer};
pub use storage::{create_store, MedicationStore, MemoryStore};
