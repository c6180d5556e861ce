use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An open role on the job board. Inactive postings stay listable in the
/// back office but are hidden from candidates and from the chat context.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub event_date: Option<String>,
    pub pay_rate: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub event_date: Option<String>,
    pub pay_rate: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub event_date: Option<String>,
    pub pay_rate: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct JobsResponse {
    pub jobs: Vec<JobPosting>,
}
