use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Lead types
    types.push(clean_type(Lead::export_to_string()?));
    types.push(clean_type(LeadStatus::export_to_string()?));
    types.push(clean_type(CreateLeadRequest::export_to_string()?));
    types.push(clean_type(UpdateLeadStatusRequest::export_to_string()?));
    types.push(clean_type(UpdateLeadNotesRequest::export_to_string()?));
    types.push(clean_type(DeleteLeadsRequest::export_to_string()?));
    types.push(clean_type(LeadsResponse::export_to_string()?));

    // Import types
    types.push(clean_type(LeadDraft::export_to_string()?));
    types.push(clean_type(SkipReason::export_to_string()?));
    types.push(clean_type(SkippedRow::export_to_string()?));
    types.push(clean_type(ImportPlan::export_to_string()?));
    types.push(clean_type(ImportLeadsRequest::export_to_string()?));
    types.push(clean_type(ImportLeadsResponse::export_to_string()?));

    // Job board types
    types.push(clean_type(JobPosting::export_to_string()?));
    types.push(clean_type(CreateJobRequest::export_to_string()?));
    types.push(clean_type(UpdateJobRequest::export_to_string()?));
    types.push(clean_type(JobsResponse::export_to_string()?));

    // Application types
    types.push(clean_type(Application::export_to_string()?));
    types.push(clean_type(ApplicationStatus::export_to_string()?));
    types.push(clean_type(CreateApplicationRequest::export_to_string()?));
    types.push(clean_type(UpdateApplicationStatusRequest::export_to_string()?));
    types.push(clean_type(ApplicationsResponse::export_to_string()?));

    // Chat types
    types.push(clean_type(ChatRequest::export_to_string()?));
    types.push(clean_type(ChatResponse::export_to_string()?));

    // Settings types
    types.push(clean_type(ApiKeyConfig::export_to_string()?));
    types.push(clean_type(SettingsResponse::export_to_string()?));
    types.push(clean_type(UpdateApiKeysRequest::export_to_string()?));

    let output_dir = Path::new("../gui/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let lines: Vec<&str> = type_def.lines().collect();
    let has_import = lines
        .iter()
        .any(|line| line.trim().starts_with("import type"));

    let filtered: Vec<&str> = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            // Keep import lines if they're part of a type definition (Lead imports LeadStatus)
            if trimmed.starts_with("import type") {
                return has_import;
            }
            !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .cloned()
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
