use diesel::connection::SimpleConnection;
use diesel::prelude::*;

mod executor;
mod helper;
pub mod models;
pub mod schema;
pub mod sync;

pub use executor::Executor;
pub use helper::{Error, Helper};

/// Create the tables this service needs, if they don't exist yet.
///
/// Ran by every new connection; there is no separate migration step.
pub fn ensure_schema(conn: &SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(
        "CREATE TABLE IF NOT EXISTS subscriptions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            site_id INTEGER,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        );
        CREATE TABLE IF NOT EXISTS subscription_categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subscription_id INTEGER NOT NULL REFERENCES subscriptions (id),
            category_id INTEGER NOT NULL,
            created_at TIMESTAMP NOT NULL,
            deleted_at TIMESTAMP
        );",
    )
}
