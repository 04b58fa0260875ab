use rusqlite::Connection;

/// Initialize the subscriber store schema.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        -- Newsletter subscribers. Uniqueness is enforced by the store so
        -- concurrent subscribes for the same email cannot both insert.
        CREATE TABLE IF NOT EXISTS newsletter_subscribers (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            subscribed_at INTEGER NOT NULL,
            source TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_newsletter_subscribers_email
            ON newsletter_subscribers(email);
        "#,
    )
}
