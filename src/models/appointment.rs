use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// `APT` + 6 digits.
    pub appointment_code: String,
    pub patient_aadhar: String,
    pub hospital: String,
    pub doctor_name: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}
