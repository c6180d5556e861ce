use shared_types::LeadDraft;
use std::collections::HashMap;

/// Sentinel title for rows where no title alias matched. Rows carrying it
/// are rejected downstream before any duplicate comparison.
pub const UNNAMED_TITLE: &str = "Unnamed";

// Ordered alias lists per target field; the first non-empty match wins.
// Headers arrive already lowercased, slash-stripped and trimmed.
const TITLE_ALIASES: &[&str] = &["title", "name", "business name", "company"];
const PHONE_ALIASES: &[&str] = &["phone", "phone number", "mobile", "telephone"];
const EMAIL1_ALIASES: &[&str] = &["email1", "email", "email address", "e-mail"];
const EMAIL2_ALIASES: &[&str] = &["email2"];
const EMAIL3_ALIASES: &[&str] = &["email3"];
const EMAIL4_ALIASES: &[&str] = &["email4"];
const EMAIL5_ALIASES: &[&str] = &["email5"];
const WEBSITE_ALIASES: &[&str] = &["website", "web", "site"];
const URL_ALIASES: &[&str] = &["url", "link", "maps url"];
const INSTAGRAM1_ALIASES: &[&str] = &["instagram1", "instagram", "ig"];
const INSTAGRAM2_ALIASES: &[&str] = &["instagram2"];
const FACEBOOK1_ALIASES: &[&str] = &["facebook1", "facebook", "fb"];
const FACEBOOK2_ALIASES: &[&str] = &["facebook2"];
const LINKEDIN1_ALIASES: &[&str] = &["linkedin1", "linkedin"];
const LINKEDIN2_ALIASES: &[&str] = &["linkedin2"];
const YOUTUBE1_ALIASES: &[&str] = &["youtube1", "youtube"];
const YOUTUBE2_ALIASES: &[&str] = &["youtube2"];
const TIKTOK1_ALIASES: &[&str] = &["tiktok1", "tiktok"];
const TIKTOK2_ALIASES: &[&str] = &["tiktok2"];
const TWITTER1_ALIASES: &[&str] = &["twitter1", "twitter", "x"];
const TWITTER2_ALIASES: &[&str] = &["twitter2"];
const CITY_ALIASES: &[&str] = &["city", "town", "location"];
const IMAGE_URL_ALIASES: &[&str] = &["imageurl", "image url", "image", "photo"];
const NOTES_ALIASES: &[&str] = &["notes", "note", "comments", "description"];

fn first_non_empty(record: &HashMap<String, String>, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| {
        record
            .get(*alias)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    })
}

/// Map one parsed record onto the canonical lead shape. The result is always
/// fully formed, even when every source value was empty.
pub fn map_record(record: &HashMap<String, String>) -> LeadDraft {
    LeadDraft {
        title: first_non_empty(record, TITLE_ALIASES)
            .unwrap_or_else(|| UNNAMED_TITLE.to_string()),
        phone: first_non_empty(record, PHONE_ALIASES),
        email1: first_non_empty(record, EMAIL1_ALIASES),
        email2: first_non_empty(record, EMAIL2_ALIASES),
        email3: first_non_empty(record, EMAIL3_ALIASES),
        email4: first_non_empty(record, EMAIL4_ALIASES),
        email5: first_non_empty(record, EMAIL5_ALIASES),
        website: first_non_empty(record, WEBSITE_ALIASES),
        url: first_non_empty(record, URL_ALIASES),
        instagram1: first_non_empty(record, INSTAGRAM1_ALIASES),
        instagram2: first_non_empty(record, INSTAGRAM2_ALIASES),
        facebook1: first_non_empty(record, FACEBOOK1_ALIASES),
        facebook2: first_non_empty(record, FACEBOOK2_ALIASES),
        linkedin1: first_non_empty(record, LINKEDIN1_ALIASES),
        linkedin2: first_non_empty(record, LINKEDIN2_ALIASES),
        youtube1: first_non_empty(record, YOUTUBE1_ALIASES),
        youtube2: first_non_empty(record, YOUTUBE2_ALIASES),
        tiktok1: first_non_empty(record, TIKTOK1_ALIASES),
        tiktok2: first_non_empty(record, TIKTOK2_ALIASES),
        twitter1: first_non_empty(record, TWITTER1_ALIASES),
        twitter2: first_non_empty(record, TWITTER2_ALIASES),
        city: first_non_empty(record, CITY_ALIASES),
        image_url: first_non_empty(record, IMAGE_URL_ALIASES),
        notes: first_non_empty(record, NOTES_ALIASES),
    }
}
