//! Physician directory entries.

use serde::{Deserialize, Serialize};

/// Stored physician.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Physician {
    pub id: i32,
    pub name: String,
    pub specialty: String,
}

/// Raised when a physician field is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("El campo {field} es obligatorio.")]
pub struct MissingField {
    pub field: &'static str,
}

/// Validated physician input; both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicianDraft {
    name: String,
    specialty: String,
}

impl PhysicianDraft {
    pub fn try_new(name: &str, specialty: &str) -> Result<Self, MissingField> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MissingField { field: "medico_name" });
        }
        let specialty = specialty.trim();
        if specialty.is_empty() {
            return Err(MissingField { field: "especialidad" });
        }
        Ok(Self {
            name: name.to_owned(),
            specialty: specialty.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }
}
