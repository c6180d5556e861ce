use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Outreach status of a lead. Starts at `New` on creation and only changes
/// through an explicit admin action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LeadStatus {
    New,
    Contacted,
    Priority,
    Rejected,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Priority => "priority",
            LeadStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(LeadStatus::New),
            "contacted" => Some(LeadStatus::Contacted),
            "priority" => Some(LeadStatus::Priority),
            "rejected" => Some(LeadStatus::Rejected),
            _ => None,
        }
    }
}

/// A prospect/business contact record collected for outreach.
///
/// `uploaded_at` is an RFC 3339 timestamp shared by every lead created in
/// the same CSV import batch.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Lead {
    pub id: i64,
    pub title: String,
    pub phone: Option<String>,
    pub email1: Option<String>,
    pub email2: Option<String>,
    pub email3: Option<String>,
    pub email4: Option<String>,
    pub email5: Option<String>,
    pub website: Option<String>,
    pub url: Option<String>,
    pub instagram1: Option<String>,
    pub instagram2: Option<String>,
    pub facebook1: Option<String>,
    pub facebook2: Option<String>,
    pub linkedin1: Option<String>,
    pub linkedin2: Option<String>,
    pub youtube1: Option<String>,
    pub youtube2: Option<String>,
    pub tiktok1: Option<String>,
    pub tiktok2: Option<String>,
    pub twitter1: Option<String>,
    pub twitter2: Option<String>,
    pub city: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub status: LeadStatus,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct CreateLeadRequest {
    pub title: String,
    pub phone: Option<String>,
    pub email1: Option<String>,
    pub email2: Option<String>,
    pub website: Option<String>,
    pub url: Option<String>,
    pub instagram1: Option<String>,
    pub facebook1: Option<String>,
    pub linkedin1: Option<String>,
    pub city: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct UpdateLeadStatusRequest {
    pub status: LeadStatus,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct UpdateLeadNotesRequest {
    pub notes: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct DeleteLeadsRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct LeadsResponse {
    pub leads: Vec<Lead>,
}
