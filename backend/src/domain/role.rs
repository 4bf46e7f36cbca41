//! Permission levels granted through access codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role attached to a user account.
///
/// The stored spelling is Spanish (`paciente`); `patient` is accepted as an
/// alias when parsing.
///
/// # Examples
/// ```
/// use clinic_backend::domain::Role;
///
/// let role: Role = "medico".parse().unwrap();
/// assert_eq!(role, Role::Medico);
/// assert_eq!(Role::Patient.as_str(), "paciente");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    /// Full access including user and physician management.
    Admin,
    /// Clinician with access to patient records.
    Medico,
    /// Patient who may only view their own record.
    Patient,
}

impl Role {
    /// Canonical stored spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Medico => "medico",
            Self::Patient => "paciente",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a role string is outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Self::Admin),
            "medico" => Ok(Self::Medico),
            "paciente" | "patient" => Ok(Self::Patient),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("medico", Role::Medico)]
    #[case("paciente", Role::Patient)]
    #[case("patient", Role::Patient)]
    #[case(" medico ", Role::Medico)]
    fn parses_known_roles(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>(), Ok(expected));
    }

    #[rstest]
    #[case("Admin")]
    #[case("")]
    #[case("root")]
    fn rejects_unknown_roles(#[case] raw: &str) {
        assert!(raw.parse::<Role>().is_err());
    }

    #[test]
    fn serialises_as_stored_spelling() {
        let json = serde_json::to_string(&Role::Patient).expect("serialise role");
        assert_eq!(json, "\"paciente\"");
        let back: Role = serde_json::from_str("\"patient\"").expect("deserialise role");
        assert_eq!(back, Role::Patient);
    }
}
