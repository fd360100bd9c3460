//! Wire and storage types for medication records.

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};

/// A medication record, identified by its `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub count: i64,
    pub dosage: String,
}

impl Medication {
    pub fn new(name: impl Into<String>, count: i64, dosage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count,
            dosage: dosage.into(),
        }
    }
}

/// Request body accepted by `/add` and `/update`.
///
/// Every field is optional on the wire; presence is checked by the
/// conversion that matches the endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct MedicationPayload {
    pub name: Option<String>,
    pub count: Option<i64>,
    pub dosage: Option<String>,
}

impl MedicationPayload {
    pub fn from_json(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Builds the record to insert. Absent `count` and `dosage` are zero-filled.
    pub fn into_new_medication(self) -> Result<Medication> {
        let name = required_name(self.name)?;
        Ok(Medication {
            name,
            count: self.count.unwrap_or_default(),
            dosage: self.dosage.unwrap_or_default(),
        })
    }

    /// Extracts `(name, count)` for a count update. An absent `count` is 0;
    /// `dosage` is ignored.
    pub fn into_count_update(self) -> Result<(String, i64)> {
        let name = required_name(self.name)?;
        Ok((name, self.count.unwrap_or_default()))
    }
}

/// Query string accepted by `/get` and `/delete`.
#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

impl NameQuery {
    pub fn into_name(self) -> Result<String> {
        required_name(self.name)
    }
}

fn required_name(name: Option<String>) -> Result<String> {
    match name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(RegistryError::MissingParameter("name")),
    }
}
