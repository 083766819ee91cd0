//! Person name value object.

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// First and last name of a user; both parts are non-blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName {
    first_name: String,
    last_name: String,
}

impl UserName {
    /// Creates a name, trimming both parts
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` naming each blank part.
    pub fn new(first_name: &str, last_name: &str) -> DomainResult<Self> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();

        if first_name.is_empty() {
            return Err(DomainError::invalid_field(
                "first_name",
                "First name cannot be empty",
            ));
        }
        if last_name.is_empty() {
            return Err(DomainError::invalid_field(
                "last_name",
                "Last name cannot be empty",
            ));
        }

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_trims_parts() {
        let name = UserName::new("  Ada ", "Lovelace").unwrap();
        assert_eq!(name.first_name(), "Ada");
        assert_eq!(name.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_user_name_rejects_blank_parts() {
        assert!(matches!(
            UserName::new("   ", "Lovelace"),
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            UserName::new("Ada", ""),
            Err(DomainError::Validation { .. })
        ));
    }
}
