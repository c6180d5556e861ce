use crate::lead::Lead;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Import error types
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Export error: {0}")]
    ExportError(String),
}

/// A lead as mapped from one CSV row, before the store has assigned an id,
/// a status, or an upload timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeadDraft {
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
}

/// Why a row was not imported. Skips are counted outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SkipReason {
    MissingTitle,
    DuplicateOfExisting,
    DuplicateInFile,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SkippedRow {
    /// Zero-based position of the row in the uploaded file, header excluded.
    pub row: usize,
    pub reason: SkipReason,
}

/// Accept/reject decision list for one upload, in file order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImportPlan {
    pub accepted: Vec<LeadDraft>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct ImportLeadsRequest {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ImportLeadsResponse {
    pub message: String,
    pub added: usize,
    pub skipped: usize,
    pub leads: Vec<Lead>,
}
