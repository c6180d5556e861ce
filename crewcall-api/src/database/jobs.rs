use crate::database::AsyncDbConnection;
use anyhow::Result;
use rusqlite::{params, Row};
use shared_types::{CreateJobRequest, JobPosting, UpdateJobRequest};

fn map_row_to_job(row: &Row) -> rusqlite::Result<JobPosting> {
    Ok(JobPosting {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        city: row.get(3)?,
        event_date: row.get(4)?,
        pay_rate: row.get(5)?,
        is_active: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

const JOB_COLUMNS: &str =
    "id, title, description, city, event_date, pay_rate, is_active, created_at, updated_at";

pub async fn insert_job(db_conn: AsyncDbConnection, request: &CreateJobRequest) -> Result<JobPosting> {
    let conn = db_conn.lock().await;
    let now = chrono::Utc::now().timestamp();

    let id: i64 = conn.query_row(
        "INSERT INTO jobs (title, description, city, event_date, pay_rate, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7)
         RETURNING id",
        params![
            &request.title,
            request.description.as_ref(),
            request.city.as_ref(),
            request.event_date.as_ref(),
            request.pay_rate.as_ref(),
            now,
            now
        ],
        |row| row.get(0),
    )?;

    Ok(JobPosting {
        id,
        title: request.title.clone(),
        description: request.description.clone(),
        city: request.city.clone(),
        event_date: request.event_date.clone(),
        pay_rate: request.pay_rate.clone(),
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

pub async fn list_jobs(db_conn: AsyncDbConnection, active_only: bool) -> Result<Vec<JobPosting>> {
    let conn = db_conn.lock().await;

    let sql = if active_only {
        format!(
            "SELECT {} FROM jobs WHERE is_active = 1 ORDER BY created_at DESC",
            JOB_COLUMNS
        )
    } else {
        format!("SELECT {} FROM jobs ORDER BY created_at DESC", JOB_COLUMNS)
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_row_to_job)?;

    let mut jobs = Vec::new();
    for row in rows {
        jobs.push(row?);
    }

    Ok(jobs)
}

pub async fn get_job(db_conn: AsyncDbConnection, id: i64) -> Result<JobPosting> {
    let conn = db_conn.lock().await;

    let mut stmt = conn.prepare(&format!("SELECT {} FROM jobs WHERE id = ?1", JOB_COLUMNS))?;

    stmt.query_row(params![id], map_row_to_job)
        .map_err(|e| anyhow::anyhow!("Failed to get job {}: {}", id, e))
}

pub async fn update_job(
    db_conn: AsyncDbConnection,
    id: i64,
    request: &UpdateJobRequest,
) -> Result<JobPosting> {
    let mut job = get_job(db_conn.clone(), id).await?;

    if let Some(title) = &request.title {
        job.title = title.clone();
    }
    if let Some(description) = &request.description {
        job.description = Some(description.clone());
    }
    if let Some(city) = &request.city {
        job.city = Some(city.clone());
    }
    if let Some(event_date) = &request.event_date {
        job.event_date = Some(event_date.clone());
    }
    if let Some(pay_rate) = &request.pay_rate {
        job.pay_rate = Some(pay_rate.clone());
    }
    if let Some(is_active) = request.is_active {
        job.is_active = is_active;
    }
    job.updated_at = chrono::Utc::now().timestamp();

    let conn = db_conn.lock().await;
    conn.execute(
        "UPDATE jobs SET title = ?1, description = ?2, city = ?3, event_date = ?4,
                pay_rate = ?5, is_active = ?6, updated_at = ?7
         WHERE id = ?8",
        params![
            &job.title,
            job.description.as_ref(),
            job.city.as_ref(),
            job.event_date.as_ref(),
            job.pay_rate.as_ref(),
            job.is_active,
            job.updated_at,
            id
        ],
    )?;

    Ok(job)
}

pub async fn delete_job(db_conn: AsyncDbConnection, id: i64) -> Result<()> {
    let conn = db_conn.lock().await;

    let deleted = conn.execute("DELETE FROM jobs WHERE id = ?1", params![id])?;

    if deleted == 0 {
        return Err(anyhow::anyhow!("Job {} not found", id));
    }

    Ok(())
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

    #[tokio::test]
    async fn test_job_lifecycle() {
        let (db, _dir) = test_database();
        let conn = db.async_connection.clone();

        let job = insert_job(
            conn.clone(),
            &CreateJobRequest {
                title: "Bartender".to_string(),
                description: Some("Corporate launch event".to_string()),
                city: Some("Tel Aviv".to_string()),
                event_date: Some("2026-09-12".to_string()),
                pay_rate: Some("70/hr".to_string()),
            },
        )
        .await
        .unwrap();
        assert!(job.is_active);

        let updated = update_job(
            conn.clone(),
            job.id,
            &UpdateJobRequest {
                title: None,
                description: None,
                city: None,
                event_date: None,
                pay_rate: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap();
        assert!(!updated.is_active);
        assert_eq!(updated.title, "Bartender");

        assert!(list_jobs(conn.clone(), true).await.unwrap().is_empty());
        assert_eq!(list_jobs(conn.clone(), false).await.unwrap().len(), 1);

        delete_job(conn.clone(), job.id).await.unwrap();
        assert!(get_job(conn, job.id).await.is_err());
    }
}
