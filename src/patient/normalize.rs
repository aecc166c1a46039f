//! Maps an arbitrary JSON object onto the canonical intake shape.
//!
//! Lookup rules, applied to every canonical field:
//! - key absent or `null` → the field's default (`""` or `[]`)
//! - value of the expected type → kept
//! - value of another type → kept raw, no coercion
//!
//! A section (`personalInfo`, …) that is not an object counts as absent.
//! Keys outside the canonical shape are dropped, including any
//! client-supplied `createdAt`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::record::{
    DoctorInfo, Lenient, MedicalInfo, PatientIntake, PersonalInfo, RoutineInfo,
};

type Object = Map<String, Value>;

pub fn normalize(body: &Object) -> PatientIntake {
    let personal = section(body, "personalInfo");
    let medical = section(body, "medicalInfo");
    let doctor = section(body, "doctorInfo");
    let routine = section(body, "routineInfo");

    PatientIntake {
        personal_info: PersonalInfo {
            name: field(personal, "name"),
            address: field(personal, "address"),
            dob: field(personal, "dob"),
            contact_number: field(personal, "contactNumber"),
        },
        emergency_contacts: field(Some(body), "emergencyContacts"),
        medical_info: MedicalInfo {
            medications: field(medical, "medications"),
            conditions: field(medical, "conditions"),
            surgery_type: field(medical, "surgeryType"),
        },
        doctor_info: DoctorInfo {
            contact: field(doctor, "contact"),
            email: field(doctor, "email"),
        },
        routine_info: RoutineInfo {
            sleep_schedule: field(routine, "sleepSchedule"),
            diet_preferences: field(routine, "dietPreferences"),
            allergies: field(routine, "allergies"),
        },
    }
}

fn section<'a>(body: &'a Object, key: &str) -> Option<&'a Object> {
    body.get(key).and_then(Value::as_object)
}

fn field<T>(section: Option<&Object>, key: &str) -> Lenient<T>
where
    T: DeserializeOwned + Default,
{
    match section.and_then(|s| s.get(key)) {
        None | Some(Value::Null) => Lenient::default(),
        Some(value) => Lenient::from_json(value.clone()),
    }
}
