use super::mapper::UNNAMED_TITLE;
use shared_types::{ImportPlan, Lead, LeadDraft, SkipReason, SkippedRow};
use std::collections::HashSet;

/// Comparison form of a field: lowercased, trimmed, internal whitespace runs
/// collapsed to a single space. Stored values are never mutated.
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lookup sets over the already-persisted lead collection, built once per
/// import before any row is processed.
pub struct DedupIndex {
    titles: HashSet<String>,
    phones: HashSet<String>,
    emails: HashSet<String>,
}

impl DedupIndex {
    pub fn from_leads(leads: &[Lead]) -> Self {
        let mut titles = HashSet::new();
        let mut phones = HashSet::new();
        let mut emails = HashSet::new();

        for lead in leads {
            // Titles keep empty entries; phones and emails only index
            // non-empty values so that two leads both missing a phone never
            // look related through it.
            titles.insert(normalize(&lead.title));

            if let Some(phone) = &lead.phone {
                let phone = normalize(phone);
                if !phone.is_empty() {
                    phones.insert(phone);
                }
            }

            if let Some(email) = &lead.email1 {
                let email = normalize(email);
                if !email.is_empty() {
                    emails.insert(email);
                }
            }
        }

        Self {
            titles,
            phones,
            emails,
        }
    }

    /// Two-of-three match against the existing set: title+phone, title+email
    /// or phone+email, each requiring the second field to be non-empty.
    /// Title alone is never enough.
    fn matches(&self, title: &str, phone: &str, email: &str) -> bool {
        let title_hit = self.titles.contains(title);
        let phone_hit = !phone.is_empty() && self.phones.contains(phone);
        let email_hit = !email.is_empty() && self.emails.contains(email);

        (title_hit && phone_hit) || (title_hit && email_hit) || (phone_hit && email_hit)
    }
}

/// Decide, in file order, which drafts are genuinely new. First occurrence
/// wins between in-file duplicates.
pub fn plan_rows(drafts: Vec<LeadDraft>, existing: &DedupIndex) -> ImportPlan {
    let mut seen_in_batch: HashSet<String> = HashSet::new();
    let mut accepted = Vec::new();
    let mut skipped = Vec::new();

    for (row, draft) in drafts.into_iter().enumerate() {
        let title = normalize(&draft.title);
        if title.is_empty() || draft.title == UNNAMED_TITLE {
            skipped.push(SkippedRow {
                row,
                reason: SkipReason::MissingTitle,
            });
            continue;
        }

        let phone = normalize(draft.phone.as_deref().unwrap_or(""));
        let email = normalize(draft.email1.as_deref().unwrap_or(""));

        if existing.matches(&title, &phone, &email) {
            skipped.push(SkippedRow {
                row,
                reason: SkipReason::DuplicateOfExisting,
            });
            continue;
        }

        // Composite key for in-file duplicates: phone preferred, email as
        // fallback. The degenerate "|" key never collides.
        let contact = if phone.is_empty() { &email } else { &phone };
        let batch_key = format!("{}|{}", title, contact);
        if batch_key != "|" && !seen_in_batch.insert(batch_key) {
            skipped.push(SkippedRow {
                row,
                reason: SkipReason::DuplicateInFile,
            });
            continue;
        }

        accepted.push(draft);
    }

    ImportPlan { accepted, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::LeadStatus;

    fn draft(title: &str, phone: Option<&str>, email: Option<&str>) -> LeadDraft {
        LeadDraft {
            title: title.to_string(),
            phone: phone.map(str::to_string),
            email1: email.map(str::to_string),
            email2: None,
            email3: None,
            email4: None,
            email5: None,
            website: None,
            url: None,
            instagram1: None,
            instagram2: None,
            facebook1: None,
            facebook2: None,
            linkedin1: None,
            linkedin2: None,
            youtube1: None,
            youtube2: None,
            tiktok1: None,
            tiktok2: None,
            twitter1: None,
            twitter2: None,
            city: None,
            image_url: None,
            notes: None,
        }
    }

    fn lead(id: i64, title: &str, phone: Option<&str>, email: Option<&str>) -> Lead {
        let d = draft(title, phone, email);
        Lead {
            id,
            title: d.title,
            phone: d.phone,
            email1: d.email1,
            email2: None,
            email3: None,
            email4: None,
            email5: None,
            website: None,
            url: None,
            instagram1: None,
            instagram2: None,
            facebook1: None,
            facebook2: None,
            linkedin1: None,
            linkedin2: None,
            youtube1: None,
            youtube2: None,
            tiktok1: None,
            tiktok2: None,
            twitter1: None,
            twitter2: None,
            city: None,
            image_url: None,
            notes: None,
            status: LeadStatus::New,
            uploaded_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Acme   Events "), "acme events");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_title_alone_is_not_a_duplicate() {
        let existing = DedupIndex::from_leads(&[lead(
            1,
            "Acme Events",
            Some("0501111111"),
            Some("a@acme.com"),
        )]);

        let plan = plan_rows(
            vec![draft("Acme Events", Some("0502222222"), Some("b@acme.com"))],
            &existing,
        );
        assert_eq!(plan.accepted.len(), 1);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn test_title_plus_phone_is_a_duplicate() {
        let existing =
            DedupIndex::from_leads(&[lead(1, "Acme Events", Some("0501111111"), None)]);

        let plan = plan_rows(
            vec![draft("acme  events", Some(" 0501111111"), None)],
            &existing,
        );
        assert!(plan.accepted.is_empty());
        assert_eq!(plan.skipped[0].reason, SkipReason::DuplicateOfExisting);
    }

    #[test]
    fn test_phone_plus_email_is_a_duplicate_across_titles() {
        let existing = DedupIndex::from_leads(&[lead(
            1,
            "Acme Events",
            Some("0501111111"),
            Some("a@acme.com"),
        )]);

        let plan = plan_rows(
            vec![draft("Totally Different", Some("0501111111"), Some("a@acme.com"))],
            &existing,
        );
        assert!(plan.accepted.is_empty());
    }

    #[test]
    fn test_missing_fields_do_not_collide() {
        // Same title, both rows without phone or email: the pair can coexist.
        let existing = DedupIndex::from_leads(&[lead(1, "Acme Events", None, None)]);

        let plan = plan_rows(vec![draft("Acme Events", None, None)], &existing);
        assert_eq!(plan.accepted.len(), 1);
    }

    #[test]
    fn test_unnamed_and_empty_titles_are_rejected() {
        let existing = DedupIndex::from_leads(&[]);

        let plan = plan_rows(
            vec![
                draft(UNNAMED_TITLE, Some("0501111111"), None),
                draft("   ", Some("0502222222"), None),
            ],
            &existing,
        );
        assert!(plan.accepted.is_empty());
        assert!(plan
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::MissingTitle));
    }

    #[test]
    fn test_first_occurrence_wins_in_file() {
        let existing = DedupIndex::from_leads(&[]);

        let plan = plan_rows(
            vec![
                draft("Acme Events", Some("0501234567"), Some("a@acme.com")),
                draft("Acme Events", Some("0501234567"), Some("b@acme.com")),
            ],
            &existing,
        );
        assert_eq!(plan.accepted.len(), 1);
        assert_eq!(plan.accepted[0].email1.as_deref(), Some("a@acme.com"));
        assert_eq!(plan.skipped[0].row, 1);
        assert_eq!(plan.skipped[0].reason, SkipReason::DuplicateInFile);
    }

    #[test]
    fn test_email_fallback_in_batch_key() {
        let existing = DedupIndex::from_leads(&[]);

        let plan = plan_rows(
            vec![
                draft("Acme Events", None, Some("a@acme.com")),
                draft("Acme Events", None, Some("a@acme.com")),
                draft("Acme Events", None, Some("b@acme.com")),
            ],
            &existing,
        );
        assert_eq!(plan.accepted.len(), 2);
        assert_eq!(plan.skipped[0].row, 1);
    }
}
