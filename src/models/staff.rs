use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// `DOC` + 4 digits, assigned at registration.
    pub doctor_id: String,
    pub name: String,
    pub specialization: String,
    pub hospital: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthWorker {
    /// `WRK` + 4 digits, assigned at registration.
    pub worker_id: String,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}
