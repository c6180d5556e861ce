use crate::database::{jobs as jobs_db, AsyncDbConnection};
use crate::helpers::clock::Clock;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use shared_types::JobPosting;
use std::sync::Arc;
use tokio::sync::Mutex;

struct CachedJobs {
    jobs: Vec<JobPosting>,
    fetched_at: DateTime<Utc>,
}

/// TTL cache over the active job listings used as chat context, so a burst
/// of chat traffic does not hit the database once per message. Job mutations
/// invalidate it explicitly.
pub struct JobListingCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    inner: Mutex<Option<CachedJobs>>,
}

impl JobListingCache {
    pub fn new(ttl_seconds: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl: Duration::seconds(ttl_seconds),
            clock,
            inner: Mutex::new(None),
        }
    }

    pub async fn get_or_refresh(&self, db_conn: AsyncDbConnection) -> Result<Vec<JobPosting>> {
        let now = self.clock.now();
        let mut inner = self.inner.lock().await;

        if let Some(cached) = inner.as_ref() {
            if now - cached.fetched_at < self.ttl {
                return Ok(cached.jobs.clone());
            }
        }

        let jobs = jobs_db::list_jobs(db_conn, true).await?;
        *inner = Some(CachedJobs {
            jobs: jobs.clone(),
            fetched_at: now,
        });

        Ok(jobs)
    }

    pub async fn invalidate(&self) {
        *self.inner.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::helpers::clock::ManualClock;
    use chrono::TimeZone;
    use shared_types::CreateJobRequest;

    fn job_request(title: &str) -> CreateJobRequest {
        CreateJobRequest {
            title: title.to_string(),
            description: None,
            city: None,
            event_date: None,
            pay_rate: None,
        }
    }

    #[tokio::test]
    async fn test_cache_serves_stale_until_ttl_then_refreshes() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("test.sqlite3")).unwrap();
        let conn = db.async_connection.clone();

        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
        ));
        let cache = JobListingCache::new(60, clock.clone());

        jobs_db::insert_job(conn.clone(), &job_request("Bartender"))
            .await
            .unwrap();

        let first = cache.get_or_refresh(conn.clone()).await.unwrap();
        assert_eq!(first.len(), 1);

        // A new posting is invisible while the cache is fresh...
        jobs_db::insert_job(conn.clone(), &job_request("Usher"))
            .await
            .unwrap();
        let cached = cache.get_or_refresh(conn.clone()).await.unwrap();
        assert_eq!(cached.len(), 1);

        // ...and picked up after the TTL passes.
        clock.advance(Duration::seconds(61));
        let refreshed = cache.get_or_refresh(conn.clone()).await.unwrap();
        assert_eq!(refreshed.len(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("test.sqlite3")).unwrap();
        let conn = db.async_connection.clone();

        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
        ));
        let cache = JobListingCache::new(3600, clock);

        assert!(cache.get_or_refresh(conn.clone()).await.unwrap().is_empty());

        jobs_db::insert_job(conn.clone(), &job_request("Bartender"))
            .await
            .unwrap();
        cache.invalidate().await;

        assert_eq!(cache.get_or_refresh(conn).await.unwrap().len(), 1);
    }
}
