use crate::error::{RegistryError, Result};
use crate::model::Medication;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Backing store for medication records keyed by name.
///
/// Each operation is atomic with respect to every other.
#[async_trait]
pub trait MedicationStore: Send + Sync {
    async fn add(&self, medication: Medication) -> Result<()>;
    async fn get(&self, name: &str) -> Result<Medication>;
    async fn list(&self) -> Result<Vec<Medication>>;
    async fn update_count(&self, name: &str, count: i64) -> Result<()>;
    async fn delete(&self, name: &str) -> Result<()>;
}

/// In-memory store guarded by a single mutex.
#[derive(Default)]
pub struct MemoryStore {
    medications: Mutex<HashMap<String, Medication>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.medications.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.medications.lock().await.is_empty()
    }
}

#[async_trait]
impl MedicationStore for MemoryStore {
    async fn add(&self, medication: Medication) -> Result<()> {
        let mut medications = self.medications.lock().await;
        if medications.contains_key(&medication.name) {
            return Err(RegistryError::AlreadyExists(medication.name));
        }
        medications.insert(medication.name.clone(), medication);
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Medication> {
        self.medications
            .lock()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    // Iteration order is whatever the map yields.
    async fn list(&self) -> Result<Vec<Medication>> {
        Ok(self.medications.lock().await.values().cloned().collect())
    }

    async fn update_count(&self, name: &str, count: i64) -> Result<()> {
        match self.medications.lock().await.get_mut(name) {
            Some(existing) => {
                existing.count = count;
                Ok(())
            }
            None => Err(RegistryError::NotFound(name.to_string())),
        }
    }

    async fn delete(&self, name: &str) -> Result<()> {
        self.medications
            .lock()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }
}

pub fn create_store() -> Arc<dyn MedicationStore> {
    Arc::new(MemoryStore::new())
}
