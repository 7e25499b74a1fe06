use chrono::{DateTime, Utc};
use mobc::{Manager, Pool};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error, info};

use crate::models::{EnrichmentData, Lead, LeadCandidate, LeadStatus, MessageSet, Result};

fn log_rusqlite_error(context: &str, err: &rusqlite::Error) {
    error!("SQLite error in {}: {:?}", context, err);
}

pub struct SqliteManager {
    db_path: String,
}

impl SqliteManager {
    pub fn new(db_path: String) -> Self {
        debug!("Creating SqliteManager for path: {}", db_path);
        Self { db_path }
    }
}

#[async_trait::async_trait]
impl Manager for SqliteManager {
    type Connection = Connection;
    type Error = rusqlite::Error;

    async fn connect(&self) -> std::result::Result<Self::Connection, Self::Error> {
        let conn = match Connection::open(&self.db_path) {
            Ok(c) => c,
            Err(e) => {
                log_rusqlite_error("Connection::open", &e);
                return Err(e);
            }
        };

        // Some PRAGMA statements return a row; query_row swallows it either way.
        conn.query_row("PRAGMA journal_mode=WAL", [], |_| Ok(()))?;
        conn.execute_batch("PRAGMA synchronous=NORMAL; PRAGMA temp_store=memory;")?;

        if let Err(e) = init_database(&conn) {
            log_rusqlite_error("init_database", &e);
            return Err(e);
        }

        Ok(conn)
    }

    async fn check(
        &self,
        conn: Self::Connection,
    ) -> std::result::Result<Self::Connection, Self::Error> {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(conn)
    }
}

fn init_database(conn: &Connection) -> SqliteResult<()> {
    create_leads_table(conn)?;
    create_indexes(conn)?;
    Ok(())
}

fn create_leads_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS leads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            company_name TEXT NOT NULL,
            role TEXT NOT NULL,
            industry TEXT NOT NULL,
            website TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            linkedin_url TEXT NOT NULL,
            country TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'NEW',
            enrichment_data TEXT,
            email_content_a TEXT,
            email_content_b TEXT,
            linkedin_content_a TEXT,
            linkedin_content_b TEXT,
            logs TEXT NOT NULL DEFAULT '',
            last_updated TEXT NOT NULL
        )
        "#,
        [],
    )?;
    Ok(())
}

fn create_indexes(conn: &Connection) -> SqliteResult<()> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_leads_status ON leads(status)",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_leads_email ON leads(email)",
    ];

    for index_sql in indexes.iter() {
        conn.execute(index_sql, [])?;
    }
    Ok(())
}

pub type DbPool = Pool<SqliteManager>;

pub async fn create_db_pool(db_path: &str) -> Result<DbPool> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let manager = SqliteManager::new(db_path.to_string());
    let pool = Pool::builder().max_open(10).max_idle(5).build(manager);

    info!("SQLite connection pool created: {}", db_path);
    Ok(pool)
}

fn log_line(message: &str) -> String {
    format!("\n[{}] {}", Utc::now().to_rfc3339(), message)
}

fn map_lead(row: &Row) -> rusqlite::Result<Lead> {
    let status_str: String = row.get(9)?;
    let status = LeadStatus::parse(&status_str).ok_or_else(|| {
        rusqlite::Error::InvalidColumnType(9, status_str.clone(), rusqlite::types::Type::Text)
    })?;

    let last_updated_str: String = row.get(16)?;
    let last_updated = DateTime::parse_from_rfc3339(&last_updated_str)
        .map_err(|_| {
            rusqlite::Error::InvalidColumnType(
                16,
                last_updated_str.clone(),
                rusqlite::types::Type::Text,
            )
        })?
        .with_timezone(&Utc);

    Ok(Lead {
        id: row.get(0)?,
        full_name: row.get(1)?,
        company_name: row.get(2)?,
        role: row.get(3)?,
        industry: row.get(4)?,
        website: row.get(5)?,
        email: row.get(6)?,
        linkedin_url: row.get(7)?,
        country: row.get(8)?,
        status,
        enrichment_data: row.get(10)?,
        email_content_a: row.get(11)?,
        email_content_b: row.get(12)?,
        linkedin_content_a: row.get(13)?,
        linkedin_content_b: row.get(14)?,
        logs: row.get(15)?,
        last_updated,
    })
}

const LEAD_COLUMNS: &str = "id, full_name, company_name, role, industry, website, email, \
     linkedin_url, country, status, enrichment_data, email_content_a, email_content_b, \
     linkedin_content_a, linkedin_content_b, logs, last_updated";

/// Inserts candidates as NEW leads. Duplicate emails are skipped silently
/// (UNIQUE index + INSERT OR IGNORE). Returns the number actually added.
pub async fn insert_candidates(pool: &DbPool, candidates: &[LeadCandidate]) -> Result<usize> {
    let conn = pool.get().await?;
    let now = Utc::now().to_rfc3339();
    let mut added = 0;

    for candidate in candidates {
        let changed = conn.execute(
            r#"
            INSERT OR IGNORE INTO leads (
                full_name, company_name, role, industry, website, email,
                linkedin_url, country, status, logs, last_updated
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'NEW', ?9, ?10)
            "#,
            params![
                candidate.full_name,
                candidate.company_name,
                candidate.role,
                candidate.industry,
                candidate.website,
                candidate.email,
                candidate.linkedin_url,
                candidate.country,
                format!("[{}] Created with status NEW", now),
                now,
            ],
        )?;
        added += changed;
    }

    debug!("Inserted {}/{} candidates", added, candidates.len());
    Ok(added)
}

/// Leads currently in `status`, oldest first, capped at `limit`.
pub async fn leads_by_status(
    pool: &DbPool,
    status: LeadStatus,
    limit: usize,
) -> Result<Vec<Lead>> {
    let conn = pool.get().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM leads WHERE status = ?1 ORDER BY id LIMIT ?2",
        LEAD_COLUMNS
    ))?;

    let lead_iter = stmt.query_map(params![status.as_str(), limit as i64], map_lead)?;

    let mut leads = Vec::new();
    for lead in lead_iter {
        leads.push(lead?);
    }
    Ok(leads)
}

/// Commits one enrichment result: payload, status ENRICHED, log entry and
/// last_updated in a single UPDATE.
pub async fn update_enrichment(pool: &DbPool, id: i64, data: &EnrichmentData) -> Result<()> {
    let conn = pool.get().await?;
    let payload = serde_json::to_string(data)?;
    let entry = log_line(&format!(
        "Enriched via {} (confidence {})",
        data.enrichment_source, data.confidence_score
    ));

    conn.execute(
        "UPDATE leads SET enrichment_data = ?1, status = 'ENRICHED', logs = logs || ?2, \
         last_updated = ?3 WHERE id = ?4",
        params![payload, entry, Utc::now().to_rfc3339(), id],
    )?;
    Ok(())
}

/// Commits the four drafted message variants and advances to MESSAGED.
pub async fn update_messages(pool: &DbPool, id: i64, msgs: &MessageSet) -> Result<()> {
    let conn = pool.get().await?;
    let entry = log_line("Drafted 4 message variants, status MESSAGED");

    conn.execute(
        "UPDATE leads SET email_content_a = ?1, email_content_b = ?2, \
         linkedin_content_a = ?3, linkedin_content_b = ?4, status = 'MESSAGED', \
         logs = logs || ?5, last_updated = ?6 WHERE id = ?7",
        params![
            msgs.email_a,
            msgs.email_b,
            msgs.linkedin_a,
            msgs.linkedin_b,
            entry,
            Utc::now().to_rfc3339(),
            id
        ],
    )?;
    Ok(())
}

/// Sets a terminal/next status with a log entry recording the cause.
pub async fn update_status(
    pool: &DbPool,
    id: i64,
    status: LeadStatus,
    message: &str,
) -> Result<()> {
    let conn = pool.get().await?;
    let entry = log_line(message);

    conn.execute(
        "UPDATE leads SET status = ?1, logs = logs || ?2, last_updated = ?3 WHERE id = ?4",
        params![status.as_str(), entry, Utc::now().to_rfc3339(), id],
    )?;
    Ok(())
}

/// Appends a log entry without touching status (per-attempt records).
pub async fn append_log(pool: &DbPool, id: i64, message: &str) -> Result<()> {
    let conn = pool.get().await?;
    let entry = log_line(message);

    conn.execute(
        "UPDATE leads SET logs = logs || ?1, last_updated = ?2 WHERE id = ?3",
        params![entry, Utc::now().to_rfc3339(), id],
    )?;
    Ok(())
}

pub async fn stats_by_status(pool: &DbPool) -> Result<HashMap<String, i64>> {
    let conn = pool.get().await?;

    let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM leads GROUP BY status")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut stats = HashMap::new();
    for row in rows {
        let (status, count) = row?;
        stats.insert(status, count);
    }
    Ok(stats)
}

/// Newest leads first, for read APIs and the UI-facing listing.
pub async fn recent_leads(pool: &DbPool, limit: usize) -> Result<Vec<Lead>> {
    let conn = pool.get().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM leads ORDER BY id DESC LIMIT ?1",
        LEAD_COLUMNS
    ))?;

    let lead_iter = stmt.query_map(params![limit as i64], map_lead)?;

    let mut leads = Vec::new();
    for lead in lead_iter {
        leads.push(lead?);
    }
    Ok(leads)
}

/// Every lead in the store, newest first (CSV export).
pub async fn all_leads(pool: &DbPool) -> Result<Vec<Lead>> {
    let conn = pool.get().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM leads ORDER BY id DESC",
        LEAD_COLUMNS
    ))?;

    let lead_iter = stmt.query_map([], map_lead)?;

    let mut leads = Vec::new();
    for lead in lead_iter {
        leads.push(lead?);
    }
    Ok(leads)
}
