use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use structinsert::{insert_many, insert_one, Entity, ToValue, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub struct Timestamp(pub DateTime<Utc>);

impl ToValue for Timestamp {
    fn to_value(&self) -> Value {
        Value::Text(self.0.to_rfc3339())
    }
}

#[derive(Entity)]
struct Created {
    #[db(column = "created_at")]
    at: Timestamp,
    #[db(column = "created_by")]
    by: String,
}

#[derive(Entity)]
struct User {
    #[db(column = "name")]
    name: String,
    #[db(column = "email")]
    email: Option<String>,
    #[db(flatten)]
    created: Created,
    // kept in memory only
    #[allow(dead_code)]
    session: Option<String>,
}

fn user(name: &str, email: Option<&str>) -> User {
    User {
        name: name.to_owned(),
        email: email.map(str::to_owned),
        created: Created { at: Timestamp(Utc::now()), by: "example".to_owned() },
        session: None,
    }
}

fn database_path() -> PathBuf {
    std::env::var_os("STRUCTINSERT_DATABASE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("database.db"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut conn = Connection::open(database_path())?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            name TEXT NOT NULL,
            email TEXT,
            created_at TEXT NOT NULL,
            created_by TEXT NOT NULL
        )",
    )?;

    let tx = conn.transaction()?;

    let report = insert_many(&tx, "users", &[
        user("alice", Some("alice@example.com")),
        user("bob", None),
    ])?;
    info!(rows = report.rows_affected, "inserted batch");

    insert_one(&tx, "users", &user("carol", None))?;
    tx.commit()?;

    let total: i64 = conn.query_row("SELECT count(*) FROM users", [], |row| row.get(0))?;
    info!(total, "users in database");

    Ok(())
}
