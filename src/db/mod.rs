pub mod home;
pub mod schema;

use diesel::{connection::SimpleConnection, Connection, RunQueryDsl, SqliteConnection};

use crate::{config::Config, error::HomesError};

const CREATE_HOMES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS homes (
        id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        rm DOUBLE NOT NULL,
        lstat DOUBLE NOT NULL,
        dis DOUBLE NOT NULL,
        tax DOUBLE NOT NULL,
        ptratio DOUBLE NOT NULL,
        age DOUBLE NOT NULL,
        indus DOUBLE NOT NULL,
        medv DOUBLE NOT NULL
    )";

/// Opens a connection scoped to the caller. Dropping it closes the session.
pub fn establish_connection(config: &Config) -> Result<SqliteConnection, HomesError> {
    let mut conn =
        SqliteConnection::establish(&config.db_path).map_err(|source| HomesError::Connection {
            path: config.db_path.clone(),
            source,
        })?;
    conn.batch_execute("PRAGMA busy_timeout = 5000;")?;
    Ok(conn)
}

pub fn init_schema(config: &Config) -> Result<(), HomesError> {
    let mut conn = establish_connection(config)?;
    diesel::sql_query(CREATE_HOMES_TABLE).execute(&mut conn)?;
    Ok(())
}
