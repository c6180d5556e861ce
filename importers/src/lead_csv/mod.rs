mod csv_parser;
mod dedup;
mod export;
mod mapper;

pub use csv_parser::CsvRecordParser;
pub use dedup::{normalize, plan_rows, DedupIndex};
pub use export::export_csv;
pub use mapper::{map_record, UNNAMED_TITLE};

use shared_types::{ImportError, ImportPlan, Lead};

/// Uploads are rejected on filename alone before any parsing happens.
pub fn ensure_csv_filename(filename: &str) -> Result<(), ImportError> {
    if filename.to_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(ImportError::InvalidInput(format!(
            "{} is not a .csv file",
            filename
        )))
    }
}

/// Full planning pass for one upload: parse, map, deduplicate against the
/// given lead collection and within the file itself. Persisting the accepted
/// drafts is the caller's job; this function never writes anything.
///
/// A plan with no accepted and no skipped rows means the file had no data
/// rows at all.
pub fn plan_import(content: &[u8], existing: &[Lead]) -> Result<ImportPlan, ImportError> {
    let parser = CsvRecordParser::new();
    let records = parser.parse_to_records(content)?;

    let drafts: Vec<_> = records.iter().map(map_record).collect();
    let index = DedupIndex::from_leads(existing);

    Ok(plan_rows(drafts, &index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{LeadStatus, SkipReason};

    fn persist(plan: &shared_types::ImportPlan, next_id: i64) -> Vec<Lead> {
        plan.accepted
            .iter()
            .enumerate()
            .map(|(i, draft)| Lead {
                id: next_id + i as i64,
                title: draft.title.clone(),
                phone: draft.phone.clone(),
                email1: draft.email1.clone(),
                email2: draft.email2.clone(),
                email3: draft.email3.clone(),
                email4: draft.email4.clone(),
                email5: draft.email5.clone(),
                website: draft.website.clone(),
                url: draft.url.clone(),
                instagram1: draft.instagram1.clone(),
                instagram2: draft.instagram2.clone(),
                facebook1: draft.facebook1.clone(),
                facebook2: draft.facebook2.clone(),
                linkedin1: draft.linkedin1.clone(),
                linkedin2: draft.linkedin2.clone(),
                youtube1: draft.youtube1.clone(),
                youtube2: draft.youtube2.clone(),
                tiktok1: draft.tiktok1.clone(),
                tiktok2: draft.tiktok2.clone(),
                twitter1: draft.twitter1.clone(),
                twitter2: draft.twitter2.clone(),
                city: draft.city.clone(),
                image_url: draft.image_url.clone(),
                notes: draft.notes.clone(),
                status: LeadStatus::New,
                uploaded_at: "2026-01-01T00:00:00+00:00".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_filename_check() {
        assert!(ensure_csv_filename("leads.csv").is_ok());
        assert!(ensure_csv_filename("LEADS.CSV").is_ok());
        assert!(ensure_csv_filename("leads.xlsx").is_err());
        assert!(ensure_csv_filename("csv").is_err());
    }

    #[test]
    fn test_reimport_is_idempotent() {
        let csv = "title,phone,email\n\
                   Acme Events,0501234567,a@acme.com\n\
                   Bravo Catering,0507654321,hello@bravo.example\n";

        let first = plan_import(csv.as_bytes(), &[]).unwrap();
        assert_eq!(first.accepted.len(), 2);

        let persisted = persist(&first, 1);
        let second = plan_import(csv.as_bytes(), &persisted).unwrap();
        assert!(second.accepted.is_empty());
        assert_eq!(second.skipped.len(), 2);
        assert!(second
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::DuplicateOfExisting));
    }

    #[test]
    fn test_same_title_and_phone_in_one_file() {
        // Second row differs only in email; the composite key still catches it.
        let csv = "title,phone,email\n\
                   Acme Events,0501234567,a@acme.com\n\
                   Acme Events,0501234567,b@acme.com\n";

        let plan = plan_import(csv.as_bytes(), &[]).unwrap();
        assert_eq!(plan.accepted.len(), 1);
        assert_eq!(plan.accepted[0].email1.as_deref(), Some("a@acme.com"));
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].reason, SkipReason::DuplicateInFile);
    }

    #[test]
    fn test_export_then_import_accepts_nothing() {
        let csv = "title,phone,email,city\n\
                   Acme Events,0501234567,a@acme.com,Tel Aviv\n\
                   Bravo Catering,,hello@bravo.example,Haifa\n";

        let plan = plan_import(csv.as_bytes(), &[]).unwrap();
        let persisted = persist(&plan, 1);

        let exported = export_csv(&persisted).unwrap();
        let reimport = plan_import(exported.as_bytes(), &persisted).unwrap();

        assert!(reimport.accepted.is_empty());
        assert_eq!(reimport.skipped.len(), 2);
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let plan = plan_import(b"title,phone,email\n", &[]).unwrap();
        assert!(plan.accepted.is_empty());
        assert!(plan.skipped.is_empty());
    }
}
