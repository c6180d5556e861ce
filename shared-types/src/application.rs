use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Declined,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Declined => "declined",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "declined" => Some(ApplicationStatus::Declined),
            _ => None,
        }
    }
}

/// A candidate's application to one job posting. `candidate_uid` and
/// `candidate_email` are opaque values from the external identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub candidate_uid: String,
    pub candidate_email: Option<String>,
    pub full_name: String,
    pub phone: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: i64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CreateApplicationRequest {
    pub job_id: i64,
    pub candidate_uid: String,
    pub candidate_email: Option<String>,
    pub full_name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ApplicationsResponse {
    pub applications: Vec<Application>,
}
