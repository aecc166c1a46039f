//! Canonical patient record types.
//!
//! Every field of the canonical shape is always present. Leaves are
//! wrapped in [`Lenient`] so a value of the wrong JSON type survives
//! normalization untouched instead of being coerced or dropped.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

// ═══════════════════════════════════════════════════════════
// Lenient field values
// ═══════════════════════════════════════════════════════════

/// A field that holds its expected type, or the raw JSON value the
/// client sent when it did not match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Typed(T),
    Raw(Value),
}

impl<T: DeserializeOwned> Lenient<T> {
    /// Interpret a JSON value as `T`, keeping it raw if it does not fit.
    pub fn from_json(value: Value) -> Self {
        match serde_json::from_value::<T>(value.clone()) {
            Ok(typed) => Lenient::Typed(typed),
            Err(_) => Lenient::Raw(value),
        }
    }
}

impl<T: Default> Default for Lenient<T> {
    fn default() -> Self {
        Lenient::Typed(T::default())
    }
}

impl From<&str> for Lenient<String> {
    fn from(s: &str) -> Self {
        Lenient::Typed(s.to_string())
    }
}

// ═══════════════════════════════════════════════════════════
// Canonical sections
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: Lenient<String>,
    pub address: Lenient<String>,
    pub dob: Lenient<String>,
    pub contact_number: Lenient<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalInfo {
    pub medications: Lenient<Vec<String>>,
    pub conditions: Lenient<String>,
    pub surgery_type: Lenient<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorInfo {
    pub contact: Lenient<String>,
    pub email: Lenient<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineInfo {
    pub sleep_schedule: Lenient<String>,
    pub diet_preferences: Lenient<String>,
    pub allergies: Lenient<String>,
}

/// Normalized intake form, before the server stamps it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientIntake {
    pub personal_info: PersonalInfo,
    /// Entries are opaque and passed through unvalidated.
    pub emergency_contacts: Lenient<Vec<Value>>,
    pub medical_info: MedicalInfo,
    pub doctor_info: DoctorInfo,
    pub routine_info: RoutineInfo,
}

/// A record ready for insertion. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(flatten)]
    pub intake: PatientIntake,
    pub created_at: DateTime<Utc>,
}

impl PatientRecord {
    /// Stamp an intake with the current server time.
    pub fn stamp(intake: PatientIntake) -> Self {
        Self::stamp_at(intake, Utc::now())
    }

    pub fn stamp_at(intake: PatientIntake, created_at: DateTime<Utc>) -> Self {
        Self { intake, created_at }
    }
}
