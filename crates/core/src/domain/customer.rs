use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl CustomerProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>, interests: Vec<String>) -> Self {
        Self { name: name.into(), email: email.into(), interests }
    }

    /// Rejects profiles whose required fields are blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidProfile { field: "name" });
        }
        if self.email.trim().is_empty() {
            return Err(DomainError::InvalidProfile { field: "email" });
        }
        Ok(())
    }
}
