//! Patient vital-sign records and the filters used to query them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of rows returned by the live search endpoint.
pub const LIVE_SEARCH_LIMIT: i64 = 10;

/// Store-assigned patient identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(i32);

impl PatientId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for PatientId {
    type Err = PatientValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_integer("id_paciente", s).map(Self)
    }
}

/// Stored patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "edad")]
    pub age: i32,
    #[serde(rename = "frecuencia_cardiaca")]
    pub heart_rate: i32,
}

/// Row returned by the live search: the record without its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSummary {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "edad")]
    pub age: i32,
    #[serde(rename = "frecuencia_cardiaca")]
    pub heart_rate: i32,
}

impl From<Patient> for PatientSummary {
    fn from(value: Patient) -> Self {
        Self {
            name: value.name,
            age: value.age,
            heart_rate: value.heart_rate,
        }
    }
}

/// Validation failures for patient input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatientValidationError {
    #[error("El campo {field} es obligatorio.")]
    MissingField { field: &'static str },
    #[error("El campo {field} debe ser un número entero; se recibió {value:?}.")]
    NotAnInteger { field: &'static str, value: String },
    #[error("El campo {field} debe ser texto.")]
    NotAText { field: &'static str },
    #[error("La edad no puede ser negativa; se recibió {age}.")]
    NegativeAge { age: i32 },
}

/// Validated values for creating or overwriting a patient.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `age` is non-negative.
/// - `heart_rate` is any integer; no physiological range is enforced.
///
/// # Examples
/// ```
/// use clinic_backend::domain::PatientDraft;
///
/// let draft = PatientDraft::from_form("Ana", "30", "72").unwrap();
/// assert_eq!(draft.age(), 30);
/// assert!(PatientDraft::from_form("Ana", "-1", "72").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDraft {
    name: String,
    age: i32,
    heart_rate: i32,
}

impl PatientDraft {
    pub fn try_new(name: &str, age: i32, heart_rate: i32) -> Result<Self, PatientValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PatientValidationError::MissingField { field: "nombre" });
        }
        if age < 0 {
            return Err(PatientValidationError::NegativeAge { age });
        }
        Ok(Self {
            name: name.to_owned(),
            age,
            heart_rate,
        })
    }

    /// Validate raw form strings.
    pub fn from_form(
        name: &str,
        age: &str,
        heart_rate: &str,
    ) -> Result<Self, PatientValidationError> {
        let age = parse_integer("edad", age)?;
        let heart_rate = parse_integer("frecuencia_cardiaca", heart_rate)?;
        Self::try_new(name, age, heart_rate)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn heart_rate(&self) -> i32 {
        self.heart_rate
    }

    /// Attach an identifier, producing the stored shape.
    pub fn with_id(self, id: PatientId) -> Patient {
        Patient {
            id,
            name: self.name,
            age: self.age,
            heart_rate: self.heart_rate,
        }
    }
}

pub(crate) fn parse_integer(field: &'static str, raw: &str) -> Result<i32, PatientValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PatientValidationError::MissingField { field });
    }
    trimmed
        .parse()
        .map_err(|_| PatientValidationError::NotAnInteger {
            field,
            value: trimmed.to_owned(),
        })
}

/// Row ordering for patient listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatientOrder {
    /// Ascending identifier, which matches insertion order.
    #[default]
    Insertion,
    /// Highest heart rate first; ties fall back to ascending identifier.
    HeartRateDescending,
}

/// Optional filters combined with AND. Absent filters match everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatientSearch {
    name_contains: Option<String>,
    age: Option<i32>,
}

impl PatientSearch {
    pub fn new(name_contains: Option<String>, age: Option<i32>) -> Self {
        Self {
            name_contains: name_contains.filter(|name| !name.is_empty()),
            age,
        }
    }

    /// Build filters from raw query strings; blank values impose no
    /// constraint.
    pub fn from_query(
        name: Option<&str>,
        age: Option<&str>,
    ) -> Result<Self, PatientValidationError> {
        let name = name.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned);
        let age = match age.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(parse_integer("edad", raw)?),
            None => None,
        };
        Ok(Self::new(name, age))
    }

    pub fn name_contains(&self) -> Option<&str> {
        self.name_contains.as_deref()
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }

    /// Whether `patient` satisfies every present filter. Containment is
    /// case-sensitive here; the database adapter follows its collation.
    pub fn matches(&self, patient: &Patient) -> bool {
        let name_ok = self
            .name_contains
            .as_deref()
            .is_none_or(|needle| patient.name.contains(needle));
        let age_ok = self.age.is_none_or(|age| patient.age == age);
        name_ok && age_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn patient(id: i32, name: &str, age: i32) -> Patient {
        PatientDraft::try_new(name, age, 70)
            .expect("valid draft")
            .with_id(PatientId::new(id))
    }

    #[rstest]
    #[case("", "30", "72", PatientValidationError::MissingField { field: "nombre" })]
    #[case("Ana", "", "72", PatientValidationError::MissingField { field: "edad" })]
    #[case("Ana", "treinta", "72", PatientValidationError::NotAnInteger { field: "edad", value: "treinta".into() })]
    #[case("Ana", "-4", "72", PatientValidationError::NegativeAge { age: -4 })]
    #[case("Ana", "30", "7.5", PatientValidationError::NotAnInteger { field: "frecuencia_cardiaca", value: "7.5".into() })]
    fn form_validation_failures(
        #[case] name: &str,
        #[case] age: &str,
        #[case] heart_rate: &str,
        #[case] expected: PatientValidationError,
    ) {
        assert_eq!(PatientDraft::from_form(name, age, heart_rate), Err(expected));
    }

    #[rstest]
    #[case(PatientValidationError::MissingField { field: "edad" }, "El campo edad es obligatorio.")]
    #[case(
        PatientValidationError::NotAnInteger { field: "edad", value: "x".into() },
        "El campo edad debe ser un número entero; se recibió \"x\"."
    )]
    #[case(PatientValidationError::NotAText { field: "nombre" }, "El campo nombre debe ser texto.")]
    #[case(PatientValidationError::NegativeAge { age: -2 }, "La edad no puede ser negativa; se recibió -2.")]
    fn validation_messages_are_spanish(
        #[case] error: PatientValidationError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn heart_rate_is_not_range_checked() {
        let draft = PatientDraft::from_form(" Ana ", " 0 ", "-20").expect("permissive heart rate");
        assert_eq!(draft.name(), "Ana");
        assert_eq!(draft.heart_rate(), -20);
    }

    #[test]
    fn blank_query_values_impose_no_constraint() {
        let search = PatientSearch::from_query(Some("  "), Some("")).expect("blank filters");
        assert_eq!(search, PatientSearch::default());
        assert!(search.matches(&patient(1, "Luis", 50)));
    }

    #[test]
    fn non_numeric_age_filter_is_rejected() {
        assert!(PatientSearch::from_query(None, Some("abc")).is_err());
    }

    #[rstest]
    #[case(Some("Ana"), None, &[1, 2])]
    #[case(Some("Ana"), Some(30), &[1])]
    #[case(None, Some(30), &[1, 3])]
    #[case(Some("ana"), None, &[])]
    fn filters_combine_with_and(
        #[case] name: Option<&str>,
        #[case] age: Option<i32>,
        #[case] expected: &[i32],
    ) {
        let rows = [
            patient(1, "Ana Ruiz", 30),
            patient(2, "Mariana", 41),
            patient(3, "Luis", 30),
        ];
        let search = PatientSearch::new(name.map(str::to_owned), age);
        let hits: Vec<i32> = rows
            .iter()
            .filter(|p| search.matches(p))
            .map(|p| p.id.get())
            .collect();
        assert_eq!(hits, expected);
    }

    #[test]
    fn patient_serialises_with_stored_column_names() {
        let value = serde_json::to_value(PatientSummary::from(patient(1, "Ana", 30)))
            .expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({ "nombre": "Ana", "edad": 30, "frecuencia_cardiaca": 70 })
        );
    }
}
