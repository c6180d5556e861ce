use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    // Leads collected for outreach, imported from CSV or entered one by one
    conn.execute(
        "CREATE TABLE IF NOT EXISTS leads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title VARCHAR NOT NULL CHECK (title <> ''),
            phone VARCHAR,
            email1 VARCHAR,
            email2 VARCHAR,
            email3 VARCHAR,
            email4 VARCHAR,
            email5 VARCHAR,
            website VARCHAR,
            url VARCHAR,
            instagram1 VARCHAR,
            instagram2 VARCHAR,
            facebook1 VARCHAR,
            facebook2 VARCHAR,
            linkedin1 VARCHAR,
            linkedin2 VARCHAR,
            youtube1 VARCHAR,
            youtube2 VARCHAR,
            tiktok1 VARCHAR,
            tiktok2 VARCHAR,
            twitter1 VARCHAR,
            twitter2 VARCHAR,
            city VARCHAR,
            image_url VARCHAR,
            notes VARCHAR,
            status VARCHAR NOT NULL DEFAULT 'new' CHECK (status IN ('new', 'contacted', 'priority', 'rejected')),
            uploaded_at VARCHAR NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_leads_status ON leads(status)",
        [],
    )?;

    // Job-board postings
    conn.execute(
        "CREATE TABLE IF NOT EXISTS jobs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title VARCHAR NOT NULL,
            description VARCHAR,
            city VARCHAR,
            event_date VARCHAR,
            pay_rate VARCHAR,
            is_active BOOLEAN NOT NULL DEFAULT 1,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_jobs_active ON jobs(is_active)",
        [],
    )?;

    // Candidate applications against postings
    conn.execute(
        "CREATE TABLE IF NOT EXISTS applications (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id INTEGER NOT NULL,
            candidate_uid VARCHAR NOT NULL,
            candidate_email VARCHAR,
            full_name VARCHAR NOT NULL,
            phone VARCHAR,
            status VARCHAR NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'approved', 'declined')),
            applied_at BIGINT NOT NULL,
            FOREIGN KEY (job_id) REFERENCES jobs (id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_applications_job ON applications(job_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_applications_candidate ON applications(candidate_uid)",
        [],
    )?;

    Ok(())
}
