use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered patient, keyed by the 12-digit national ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub aadhar: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}
