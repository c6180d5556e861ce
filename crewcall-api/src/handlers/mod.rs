pub mod applications;
pub mod chat;
pub mod jobs;
pub mod leads;
pub mod settings;
