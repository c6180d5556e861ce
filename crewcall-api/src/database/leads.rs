use crate::database::AsyncDbConnection;
use anyhow::Result;
use rusqlite::{params, params_from_iter, Connection, Row};
use shared_types::{Lead, LeadDraft, LeadStatus};

const LEAD_COLUMNS: &str = "id, title, phone, email1, email2, email3, email4, email5, \
     website, url, instagram1, instagram2, facebook1, facebook2, linkedin1, linkedin2, \
     youtube1, youtube2, tiktok1, tiktok2, twitter1, twitter2, city, image_url, notes, \
     status, uploaded_at";

fn map_row_to_lead(row: &Row) -> rusqlite::Result<Lead> {
    let status: String = row.get(25)?;

    Ok(Lead {
        id: row.get(0)?,
        title: row.get(1)?,
        phone: row.get(2)?,
        email1: row.get(3)?,
        email2: row.get(4)?,
        email3: row.get(5)?,
        email4: row.get(6)?,
        email5: row.get(7)?,
        website: row.get(8)?,
        url: row.get(9)?,
        instagram1: row.get(10)?,
        instagram2: row.get(11)?,
        facebook1: row.get(12)?,
        facebook2: row.get(13)?,
        linkedin1: row.get(14)?,
        linkedin2: row.get(15)?,
        youtube1: row.get(16)?,
        youtube2: row.get(17)?,
        tiktok1: row.get(18)?,
        tiktok2: row.get(19)?,
        twitter1: row.get(20)?,
        twitter2: row.get(21)?,
        city: row.get(22)?,
        image_url: row.get(23)?,
        notes: row.get(24)?,
        status: LeadStatus::parse(&status).unwrap_or(LeadStatus::New),
        uploaded_at: row.get(26)?,
    })
}

fn insert_draft(conn: &Connection, draft: &LeadDraft, uploaded_at: &str) -> rusqlite::Result<i64> {
    conn.query_row(
        "INSERT INTO leads
         (title, phone, email1, email2, email3, email4, email5, website, url,
          instagram1, instagram2, facebook1, facebook2, linkedin1, linkedin2,
          youtube1, youtube2, tiktok1, tiktok2, twitter1, twitter2,
          city, image_url, notes, status, uploaded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                 ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26)
         RETURNING id",
        params![
            &draft.title,
            draft.phone.as_ref(),
            draft.email1.as_ref(),
            draft.email2.as_ref(),
            draft.email3.as_ref(),
            draft.email4.as_ref(),
            draft.email5.as_ref(),
            draft.website.as_ref(),
            draft.url.as_ref(),
            draft.instagram1.as_ref(),
            draft.instagram2.as_ref(),
            draft.facebook1.as_ref(),
            draft.facebook2.as_ref(),
            draft.linkedin1.as_ref(),
            draft.linkedin2.as_ref(),
            draft.youtube1.as_ref(),
            draft.youtube2.as_ref(),
            draft.tiktok1.as_ref(),
            draft.tiktok2.as_ref(),
            draft.twitter1.as_ref(),
            draft.twitter2.as_ref(),
            draft.city.as_ref(),
            draft.image_url.as_ref(),
            draft.notes.as_ref(),
            LeadStatus::New.as_str(),
            uploaded_at,
        ],
        |row| row.get(0),
    )
}

fn lead_from_draft(id: i64, draft: &LeadDraft, uploaded_at: &str) -> Lead {
    Lead {
        id,
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
        uploaded_at: uploaded_at.to_string(),
    }
}

/// Persist one import batch in a single transaction. Every lead gets the
/// same `uploaded_at` stamp; ids come back from the store. An empty batch
/// writes nothing at all, and a failing row rolls back the whole batch.
pub async fn insert_leads_batch(
    db_conn: AsyncDbConnection,
    drafts: &[LeadDraft],
    uploaded_at: &str,
) -> Result<Vec<Lead>> {
    if drafts.is_empty() {
        return Ok(Vec::new());
    }

    let mut conn = db_conn.lock().await;
    let tx = conn.transaction()?;

    let mut created = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let id = insert_draft(&tx, draft, uploaded_at)?;
        created.push(lead_from_draft(id, draft, uploaded_at));
    }

    tx.commit()?;

    Ok(created)
}

pub async fn insert_lead(
    db_conn: AsyncDbConnection,
    draft: &LeadDraft,
    uploaded_at: &str,
) -> Result<Lead> {
    let conn = db_conn.lock().await;
    let id = insert_draft(&conn, draft, uploaded_at)?;
    Ok(lead_from_draft(id, draft, uploaded_at))
}

/// Newest leads first, optionally filtered by status and a title substring.
pub async fn list_leads(
    db_conn: AsyncDbConnection,
    status: Option<LeadStatus>,
    search: Option<&str>,
) -> Result<Vec<Lead>> {
    let conn = db_conn.lock().await;

    let status_value = status.map(|s| s.as_str());
    let search_value = search.map(|s| format!("%{}%", s));

    let mut sql = format!("SELECT {} FROM leads WHERE 1=1", LEAD_COLUMNS);
    let mut bindings: Vec<&dyn rusqlite::ToSql> = Vec::new();

    if let Some(status) = &status_value {
        sql.push_str(" AND status = ?");
        bindings.push(status);
    }

    if let Some(pattern) = &search_value {
        sql.push_str(" AND title LIKE ?");
        bindings.push(pattern);
    }

    sql.push_str(" ORDER BY id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(bindings.as_slice(), map_row_to_lead)?;

    let mut leads = Vec::new();
    for row in rows {
        leads.push(row?);
    }

    Ok(leads)
}

pub async fn get_lead(db_conn: AsyncDbConnection, id: i64) -> Result<Lead> {
    let conn = db_conn.lock().await;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM leads WHERE id = ?1",
        LEAD_COLUMNS
    ))?;

    stmt.query_row(params![id], map_row_to_lead)
        .map_err(|e| anyhow::anyhow!("Failed to get lead {}: {}", id, e))
}

pub async fn update_lead_status(
    db_conn: AsyncDbConnection,
    id: i64,
    status: LeadStatus,
) -> Result<()> {
    let conn = db_conn.lock().await;

    let updated = conn.execute(
        "UPDATE leads SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;

    if updated == 0 {
        return Err(anyhow::anyhow!("Lead {} not found", id));
    }

    Ok(())
}

pub async fn update_lead_notes(db_conn: AsyncDbConnection, id: i64, notes: &str) -> Result<()> {
    let conn = db_conn.lock().await;

    let updated = conn.execute(
        "UPDATE leads SET notes = ?1 WHERE id = ?2",
        params![notes, id],
    )?;

    if updated == 0 {
        return Err(anyhow::anyhow!("Lead {} not found", id));
    }

    Ok(())
}

pub async fn delete_lead(db_conn: AsyncDbConnection, id: i64) -> Result<()> {
    let conn = db_conn.lock().await;

    let deleted = conn.execute("DELETE FROM leads WHERE id = ?1", params![id])?;

    if deleted == 0 {
        return Err(anyhow::anyhow!("Lead {} not found", id));
    }

    Ok(())
}

/// Bulk delete; returns how many rows actually went away.
pub async fn delete_leads(db_conn: AsyncDbConnection, ids: &[i64]) -> Result<usize> {
    if ids.is_empty() {
        return Ok(0);
    }

    let conn = db_conn.lock().await;

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("DELETE FROM leads WHERE id IN ({})", placeholders);

    let deleted = conn.execute(&sql, params_from_iter(ids.iter()))?;

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_database() -> (Arc<Database>, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("test.sqlite3")).unwrap();
        (Arc::new(db), dir)
    }

    fn draft(title: &str, phone: Option<&str>) -> LeadDraft {
        LeadDraft {
            title: title.to_string(),
            phone: phone.map(str::to_string),
            email1: None,
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

    #[tokio::test]
    async fn test_batch_insert_and_newest_first_listing() {
        let (db, _dir) = test_database();
        let conn = db.async_connection.clone();

        let created = insert_leads_batch(
            conn.clone(),
            &[draft("Acme Events", Some("050")), draft("Bravo", None)],
            "2026-02-01T10:00:00+00:00",
        )
        .await
        .unwrap();

        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|l| l.status == LeadStatus::New));
        assert!(created
            .iter()
            .all(|l| l.uploaded_at == "2026-02-01T10:00:00+00:00"));

        let listed = list_leads(conn, None, None).await.unwrap();
        assert_eq!(listed.len(), 2);
        // Later ids first
        assert_eq!(listed[0].title, "Bravo");
        assert_eq!(listed[1].title, "Acme Events");
    }

    #[tokio::test]
    async fn test_empty_batch_writes_nothing() {
        let (db, _dir) = test_database();
        let conn = db.async_connection.clone();

        let created = insert_leads_batch(conn.clone(), &[], "2026-02-01T10:00:00+00:00")
            .await
            .unwrap();
        assert!(created.is_empty());
        assert!(list_leads(conn, None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_batch_rolls_back_completely() {
        let (db, _dir) = test_database();
        let conn = db.async_connection.clone();

        insert_leads_batch(conn.clone(), &[draft("Kept", None)], "2026-02-01T09:00:00+00:00")
            .await
            .unwrap();
        let before = list_leads(conn.clone(), None, None).await.unwrap();

        // The empty title violates the table CHECK on the second row, after
        // the first row of the batch was already staged.
        let result = insert_leads_batch(
            conn.clone(),
            &[draft("Almost In", None), draft("", None)],
            "2026-02-01T10:00:00+00:00",
        )
        .await;
        assert!(result.is_err());

        let after = list_leads(conn, None, None).await.unwrap();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0].title, "Kept");
    }

    #[tokio::test]
    async fn test_status_and_notes_updates() {
        let (db, _dir) = test_database();
        let conn = db.async_connection.clone();

        let lead = insert_lead(conn.clone(), &draft("Acme", None), "2026-02-01T10:00:00+00:00")
            .await
            .unwrap();

        update_lead_status(conn.clone(), lead.id, LeadStatus::Priority)
            .await
            .unwrap();
        update_lead_notes(conn.clone(), lead.id, "call back friday")
            .await
            .unwrap();

        let fetched = get_lead(conn.clone(), lead.id).await.unwrap();
        assert_eq!(fetched.status, LeadStatus::Priority);
        assert_eq!(fetched.notes.as_deref(), Some("call back friday"));

        assert!(update_lead_status(conn, 9999, LeadStatus::Contacted)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_filters_and_bulk_delete() {
        let (db, _dir) = test_database();
        let conn = db.async_connection.clone();

        let created = insert_leads_batch(
            conn.clone(),
            &[
                draft("Acme Events", None),
                draft("Acme Catering", None),
                draft("Bravo", None),
            ],
            "2026-02-01T10:00:00+00:00",
        )
        .await
        .unwrap();

        update_lead_status(conn.clone(), created[0].id, LeadStatus::Contacted)
            .await
            .unwrap();

        let contacted = list_leads(conn.clone(), Some(LeadStatus::Contacted), None)
            .await
            .unwrap();
        assert_eq!(contacted.len(), 1);

        let acme = list_leads(conn.clone(), None, Some("Acme")).await.unwrap();
        assert_eq!(acme.len(), 2);

        let deleted = delete_leads(conn.clone(), &[created[0].id, created[2].id])
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(list_leads(conn, None, None).await.unwrap().len(), 1);
    }
}
