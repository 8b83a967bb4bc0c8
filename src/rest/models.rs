use serde::{Deserialize, Serialize};

use crate::storage::Capybara;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub storage: &'static str,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapybaraResponse {
    pub id: i64,
    pub name: String,
}

impl From<Capybara> for CapybaraResponse {
    fn from(capybara: Capybara) -> Self {
        Self {
            id: capybara.id,
            name: capybara.name,
        }
    }
}

/// Body accepted by create and update. `name` stays optional here so that a
/// missing field is reported as a validation error rather than a decode error.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CapybaraRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageErrorResponse {
    pub error: String,
}
