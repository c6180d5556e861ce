use csv::{QuoteStyle, WriterBuilder};
use shared_types::{ImportError, Lead};

const EXPORT_HEADERS: [&str; 11] = [
    "Title",
    "Phone",
    "Email1",
    "Email2",
    "City",
    "Website",
    "Instagram",
    "Facebook",
    "LinkedIn",
    "Status",
    "Notes",
];

/// Render leads as CSV text in a fixed column order. Every field is quoted,
/// with internal quotes doubled, whether or not it contains a comma.
pub fn export_csv(leads: &[Lead]) -> Result<String, ImportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|e| ImportError::ExportError(e.to_string()))?;

    for lead in leads {
        writer
            .write_record([
                lead.title.as_str(),
                lead.phone.as_deref().unwrap_or(""),
                lead.email1.as_deref().unwrap_or(""),
                lead.email2.as_deref().unwrap_or(""),
                lead.city.as_deref().unwrap_or(""),
                lead.website.as_deref().unwrap_or(""),
                lead.instagram1.as_deref().unwrap_or(""),
                lead.facebook1.as_deref().unwrap_or(""),
                lead.linkedin1.as_deref().unwrap_or(""),
                lead.status.as_str(),
                lead.notes.as_deref().unwrap_or(""),
            ])
            .map_err(|e| ImportError::ExportError(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::ExportError(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| ImportError::ExportError(e.to_string()))
}
