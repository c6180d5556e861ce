use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct ChatRequest {
    pub message: String,
    /// Returned by the previous reply; a new one is issued when absent.
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ChatResponse {
    pub reply: String,
    pub session_id: String,
}
