//! Patient intake records: the canonical shape and its normalizer.

pub mod normalize;
pub mod record;

pub use normalize::normalize;
pub use record::{
    DoctorInfo, Lenient, MedicalInfo, PatientIntake, PatientRecord, PersonalInfo, RoutineInfo,
};
