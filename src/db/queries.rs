use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{SubscribeStatus, Subscriber};

fn now() -> i64 {
    Utc::now().timestamp()
}

fn gen_id() -> String {
    Uuid::new_v4().to_string()
}

const SUBSCRIBER_COLS: &str = "id, email, subscribed_at, source";

fn subscriber_from_row(row: &rusqlite::Row) -> rusqlite::Result<Subscriber> {
    Ok(Subscriber {
        id: row.get(0)?,
        email: row.get(1)?,
        subscribed_at: row.get(2)?,
        source: row.get(3)?,
    })
}

/// Insert a subscriber, relying on the unique email index for idempotency.
/// A conflicting insert is reported as `AlreadySubscribed`, never an error.
pub fn create_subscriber(conn: &Connection, email: &str, source: &str) -> Result<SubscribeStatus> {
    let affected = conn.execute(
        "INSERT INTO newsletter_subscribers (id, email, subscribed_at, source)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(email) DO NOTHING",
        params![gen_id(), email, now(), source],
    )?;

    if affected == 0 {
        Ok(SubscribeStatus::AlreadySubscribed)
    } else {
        Ok(SubscribeStatus::Subscribed)
    }
}

pub fn get_subscriber_by_email(conn: &Connection, email: &str) -> Result<Option<Subscriber>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM newsletter_subscribers WHERE email = ?1",
            SUBSCRIBER_COLS
        ),
        params![email],
        subscriber_from_row,
    )
    .optional()
    .map_err(Into::into)
}

pub fn count_subscribers(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM newsletter_subscribers", [], |row| {
        row.get(0)
    })
    .map_err(Into::into)
}
