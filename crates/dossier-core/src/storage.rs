use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use uuid::Uuid;

use crate::{hit::SearchHit, profile::Profile, Error, Result};

const INIT_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS search_records (
    id TEXT PRIMARY KEY,
    kind TEXT NOT NULL,
    query TEXT NOT NULL,
    payload TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_search_records_kind ON search_records(kind);
CREATE INDEX IF NOT EXISTS idx_search_records_recorded ON search_records(recorded_at);
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Person,
    Web,
}

impl RecordKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Web => "web",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "person" => Ok(Self::Person),
            "web" => Ok(Self::Web),
            _ => Err(Error::InvalidRecordKind(s.to_string())),
        }
    }
}

/// One audited query and what it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: Uuid,
    pub kind: RecordKind,
    pub query: String,
    pub payload: serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}

/// Write-only audit trail for completed queries.
#[async_trait::async_trait]
pub trait HistorySink: Send + Sync {
    async fn record(&self, query: &str, profile: &Profile, timestamp: DateTime<Utc>) -> Result<()>;
}

pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn open(path: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&format!("sqlite:{path}?mode=rwc"))
            .await?;

        sqlx::query(INIT_SQL).execute(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn open_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        sqlx::query(INIT_SQL).execute(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn insert_record(&self, record: &SearchRecord) -> Result<()> {
        let payload = serde_json::to_string(&record.payload)?;

        sqlx::query(
            r#"
            INSERT INTO search_records (id, kind, query, payload, recorded_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.kind.as_str())
        .bind(&record.query)
        .bind(payload)
        .bind(record.recorded_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn record_web_search(&self, query: &str, hits: &[SearchHit]) -> Result<SearchRecord> {
        let record = SearchRecord {
            id: Uuid::now_v7(),
            kind: RecordKind::Web,
            query: query.to_string(),
            payload: serde_json::to_value(hits)?,
            recorded_at: Utc::now(),
        };

        self.insert_record(&record).await?;
        Ok(record)
    }

    pub async fn get(&self, id: Uuid) -> Result<SearchRecord> {
        let row: (String, String, String, String, String) = sqlx::query_as(
            r#"
            SELECT id, kind, query, payload, recorded_at
            FROM search_records WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::RecordNotFound(id))?;

        parse_record_row(row)
    }

    /// Most recent records first.
    pub async fn recent(&self, limit: u32) -> Result<Vec<SearchRecord>> {
        let rows: Vec<(String, String, String, String, String)> = sqlx::query_as(
            r#"
            SELECT id, kind, query, payload, recorded_at
            FROM search_records
            ORDER BY recorded_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(parse_record_row).collect()
    }
}

#[async_trait::async_trait]
impl HistorySink for Storage {
    async fn record(&self, query: &str, profile: &Profile, timestamp: DateTime<Utc>) -> Result<()> {
        let record = SearchRecord {
            id: Uuid::now_v7(),
            kind: RecordKind::Person,
            query: query.to_string(),
            payload: serde_json::to_value(profile)?,
            recorded_at: timestamp,
        };

        self.insert_record(&record).await
    }
}

fn parse_record_row(row: (String, String, String, String, String)) -> Result<SearchRecord> {
    let (id, kind, query, payload, recorded_at) = row;

    let id: Uuid = id.parse().map_err(|_| Error::RecordNotFound(Uuid::nil()))?;

    Ok(SearchRecord {
        id,
        kind: kind.parse()?,
        query,
        payload: serde_json::from_str(&payload)?,
        recorded_at: DateTime::parse_from_rfc3339(&recorded_at)
            .map_err(|_| Error::RecordNotFound(id))?
            .with_timezone(&Utc),
    })
}
