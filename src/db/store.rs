use chrono::{Datelike, NaiveDate, Weekday};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::types::PriceObservation;

const DATE_FMT: &str = "%Y-%m-%d";

/// Append-only price history in a single-file SQLite database.
///
/// One writer per run, so the pool is capped at a single connection.
pub struct HistoryStore {
    pool: sqlx::SqlitePool,
}

impl HistoryStore {
    pub async fn open(path: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS all_prices (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                reference_name  TEXT NOT NULL,
                product_name    TEXT NOT NULL,
                product_id      TEXT NOT NULL,
                url             TEXT NOT NULL,
                price           REAL NOT NULL,
                percentage_drop INTEGER NOT NULL DEFAULT 0,
                date_scanned    TEXT NOT NULL DEFAULT (date('now', 'localtime'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Persist one observation, unless a row for the same product already
    /// exists within the same ISO (year, week) as the observation date.
    /// Returns whether a row was written. Existing rows are never updated.
    pub async fn record(&self, obs: &PriceObservation) -> Result<bool> {
        let (week_start, week_end) = iso_week_bounds(obs.date_scanned);
        let existing: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM all_prices \
             WHERE product_id = ?1 AND date_scanned BETWEEN ?2 AND ?3",
        )
        .bind(&obs.product_id)
        .bind(week_start.format(DATE_FMT).to_string())
        .bind(week_end.format(DATE_FMT).to_string())
        .fetch_one(&self.pool)
        .await?;

        if existing > 0 {
            debug!(
                "{} already recorded in week {}, skipping",
                obs.product_id,
                obs.date_scanned.iso_week().week()
            );
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO all_prices \
             (reference_name, product_name, product_id, url, price, percentage_drop, date_scanned) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&obs.reference_name)
        .bind(&obs.product_name)
        .bind(&obs.product_id)
        .bind(&obs.url)
        .bind(obs.price)
        .bind(obs.percentage_drop as i64)
        .bind(obs.date_scanned.format(DATE_FMT).to_string())
        .execute(&self.pool)
        .await?;
        Ok(true)
    }

    /// Administrative: drop a named table. Table names cannot be bound as
    /// parameters, so the identifier is validated before interpolation.
    pub async fn drop_table(&self, name: &str) -> Result<()> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(AppError::Config(format!("invalid table name {name:?}")));
        }
        sqlx::query(&format!("DROP TABLE IF EXISTS {name}"))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Monday and Sunday of the ISO week containing `date`. BETWEEN over
/// `YYYY-MM-DD` strings compares chronologically, including across a year
/// boundary.
fn iso_week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let week = date.iso_week();
    let start =
        NaiveDate::from_isoywd_opt(week.year(), week.week(), Weekday::Mon).unwrap_or(date);
    let end = NaiveDate::from_isoywd_opt(week.year(), week.week(), Weekday::Sun).unwrap_or(date);
    (start, end)
}
