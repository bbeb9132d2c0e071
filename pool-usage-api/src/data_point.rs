use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::{postgres::PgRow, Row};

/// One row of `pool_usage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataPoint {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub percentage: i64,
}

impl DataPoint {
    /// Decode a row shaped like `SELECT id, timestamp, percentage`.
    ///
    /// Integer columns may be any Postgres integer width. The timestamp may be
    /// `timestamptz` or a plain `timestamp`, which is taken to be UTC.
    pub fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        if row.len() != 3 {
            return Err(sqlx::Error::Decode(
                format!("expected 3 columns, got {}", row.len()).into(),
            ));
        }
        Ok(DataPoint {
            id: get_int(row, 0)?,
            timestamp: get_timestamp(row, 1)?,
            percentage: get_int(row, 2)?,
        })
    }
}

fn get_int(row: &PgRow, index: usize) -> Result<i64, sqlx::Error> {
    if let Ok(v) = row.try_get::<i64, _>(index) {
        return Ok(v);
    }
    if let Ok(v) = row.try_get::<i32, _>(index) {
        return Ok(v.into());
    }
    row.try_get::<i16, _>(index).map(i64::from)
}

fn get_timestamp(row: &PgRow, index: usize) -> Result<DateTime<Utc>, sqlx::Error> {
    match row.try_get::<DateTime<Utc>, _>(index) {
        Ok(ts) => Ok(ts),
        Err(_) => row
            .try_get::<NaiveDateTime, _>(index)
            .map(|naive| naive.and_utc()),
    }
}
