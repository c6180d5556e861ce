use crate::database::AsyncDbConnection;
use anyhow::Result;
use rusqlite::{params, Row};
use shared_types::{Application, ApplicationStatus, CreateApplicationRequest};

const APPLICATION_COLUMNS: &str =
    "id, job_id, candidate_uid, candidate_email, full_name, phone, status, applied_at";

fn map_row_to_application(row: &Row) -> rusqlite::Result<Application> {
    let status: String = row.get(6)?;

    Ok(Application {
        id: row.get(0)?,
        job_id: row.get(1)?,
        candidate_uid: row.get(2)?,
        candidate_email: row.get(3)?,
        full_name: row.get(4)?,
        phone: row.get(5)?,
        status: ApplicationStatus::parse(&status).unwrap_or(ApplicationStatus::Pending),
        applied_at: row.get(7)?,
    })
}

pub async fn insert_application(
    db_conn: AsyncDbConnection,
    request: &CreateApplicationRequest,
) -> Result<Application> {
    let conn = db_conn.lock().await;
    let now = chrono::Utc::now().timestamp();

    let id: i64 = conn.query_row(
        "INSERT INTO applications (job_id, candidate_uid, candidate_email, full_name, phone, status, applied_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         RETURNING id",
        params![
            request.job_id,
            &request.candidate_uid,
            request.candidate_email.as_ref(),
            &request.full_name,
            request.phone.as_ref(),
            ApplicationStatus::Pending.as_str(),
            now
        ],
        |row| row.get(0),
    )?;

    Ok(Application {
        id,
        job_id: request.job_id,
        candidate_uid: request.candidate_uid.clone(),
        candidate_email: request.candidate_email.clone(),
        full_name: request.full_name.clone(),
        phone: request.phone.clone(),
        status: ApplicationStatus::Pending,
        applied_at: now,
    })
}

pub async fn list_applications(
    db_conn: AsyncDbConnection,
    job_id: Option<i64>,
    candidate_uid: Option<&str>,
) -> Result<Vec<Application>> {
    let conn = db_conn.lock().await;

    let mut sql = format!(
        "SELECT {} FROM applications WHERE 1=1",
        APPLICATION_COLUMNS
    );
    let mut bindings: Vec<&dyn rusqlite::ToSql> = Vec::new();

    if let Some(job_id) = &job_id {
        sql.push_str(" AND job_id = ?");
        bindings.push(job_id);
    }

    if let Some(candidate_uid) = &candidate_uid {
        sql.push_str(" AND candidate_uid = ?");
        bindings.push(candidate_uid);
    }

    sql.push_str(" ORDER BY applied_at DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(bindings.as_slice(), map_row_to_application)?;

    let mut applications = Vec::new();
    for row in rows {
        applications.push(row?);
    }

    Ok(applications)
}

pub async fn get_application(db_conn: AsyncDbConnection, id: i64) -> Result<Application> {
    let conn = db_conn.lock().await;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM applications WHERE id = ?1",
        APPLICATION_COLUMNS
    ))?;

    stmt.query_row(params![id], map_row_to_application)
        .map_err(|e| anyhow::anyhow!("Failed to get application {}: {}", id, e))
}

pub async fn update_application_status(
    db_conn: AsyncDbConnection,
    id: i64,
    status: ApplicationStatus,
) -> Result<Application> {
    {
        let conn = db_conn.lock().await;

        let updated = conn.execute(
            "UPDATE applications SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;

        if updated == 0 {
            return Err(anyhow::anyhow!("Application {} not found", id));
        }
    }

    get_application(db_conn, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{jobs, Database};
    use shared_types::CreateJobRequest;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_database() -> (Arc<Database>, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("test.sqlite3")).unwrap();
        (Arc::new(db), dir)
    }

    #[tokio::test]
    async fn test_application_flow() {
        let (db, _dir) = test_database();
        let conn = db.async_connection.clone();

        let job = jobs::insert_job(
            conn.clone(),
            &CreateJobRequest {
                title: "Usher".to_string(),
                description: None,
                city: None,
                event_date: None,
                pay_rate: None,
            },
        )
        .await
        .unwrap();

        let application = insert_application(
            conn.clone(),
            &CreateApplicationRequest {
                job_id: job.id,
                candidate_uid: "uid-123".to_string(),
                candidate_email: Some("jane@example.com".to_string()),
                full_name: "Jane Doe".to_string(),
                phone: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(application.status, ApplicationStatus::Pending);

        let by_job = list_applications(conn.clone(), Some(job.id), None)
            .await
            .unwrap();
        assert_eq!(by_job.len(), 1);

        let by_candidate = list_applications(conn.clone(), None, Some("uid-123"))
            .await
            .unwrap();
        assert_eq!(by_candidate.len(), 1);

        let approved = update_application_status(conn, application.id, ApplicationStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.status, ApplicationStatus::Approved);
    }
}
