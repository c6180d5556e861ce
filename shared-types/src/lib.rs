pub mod application;
pub mod chat;
pub mod import;
pub mod job;
pub mod lead;
pub mod settings;

pub use application::{
    Application, ApplicationStatus, ApplicationsResponse, CreateApplicationRequest,
    UpdateApplicationStatusRequest,
};
pub use chat::{ChatRequest, ChatResponse};
pub use import::{
    ImportError, ImportLeadsRequest, ImportLeadsResponse, ImportPlan, LeadDraft, SkipReason,
    SkippedRow,
};
pub use job::{CreateJobRequest, JobPosting, JobsResponse, UpdateJobRequest};
pub use lead::{
    CreateLeadRequest, DeleteLeadsRequest, Lead, LeadStatus, LeadsResponse,
    UpdateLeadNotesRequest, UpdateLeadStatusRequest,
};
pub use settings::{ApiKeyConfig, SettingsResponse, UpdateApiKeysRequest};
