use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(UploaderType {
    Patient => "patient",
    Doctor => "doctor",
    Worker => "worker",
});

str_enum!(AppointmentStatus {
    Scheduled => "scheduled",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl Default for AppointmentStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

/// Specialization assigned when a doctor registers without one.
pub const DEFAULT_SPECIALIZATION: &str = "General";

/// Known specializations offered by the registration form. Registration
/// accepts free text; this list is informational.
pub const SPECIALIZATIONS: &[&str] = &[
    "General",
    "Cardiology",
    "Orthopedics",
    "Pediatrics",
    "Dermatology",
    "Neurology",
    "ENT",
    "Endocrinology",
    "Gastroenterology",
    "Nephrology",
    "Oncology",
    "Radiology",
    "Urology",
    "Hematology",
    "Dentistry",
    "Anesthesiology",
    "Psychiatry",
    "Pulmonology",
    "Rheumatology",
];

pub fn is_known_specialization(value: &str) -> bool {
    SPECIALIZATIONS.contains(&value)
}
