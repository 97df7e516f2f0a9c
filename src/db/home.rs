use diesel::{prelude::*, result::Error, sql_types::Double, SqliteConnection};
use log::info;

use super::schema::homes;
use crate::models::home::{Home, NewHome};

// Rows per INSERT statement; keeps bound parameters under SQLite's limit.
const INSERT_CHUNK: usize = 500;

diesel::sql_function!(fn abs(x: Double) -> Double);

pub fn insert(conn: &mut SqliteConnection, new_home: &NewHome) -> Result<Home, Error> {
    conn.transaction(|conn| {
        diesel::insert_into(homes::table)
            .values(new_home)
            .returning(Home::as_returning())
            .get_result(conn)
    })
}

/// Appends every record or none of them.
pub fn insert_all(conn: &mut SqliteConnection, new_homes: &[NewHome]) -> Result<usize, Error> {
    conn.transaction(|conn| {
        let mut inserted = 0;
        for chunk in new_homes.chunks(INSERT_CHUNK) {
            inserted += diesel::insert_into(homes::table)
                .values(chunk)
                .execute(conn)?;
        }
        info!("Inserted {} rows into homes table", inserted);
        Ok(inserted)
    })
}

pub fn list(conn: &mut SqliteConnection, skip: i64, limit: i64) -> Result<Vec<Home>, Error> {
    homes::table
        .order(homes::id.asc())
        .offset(skip)
        .limit(limit)
        .select(Home::as_select())
        .load(conn)
}

/// Rows closest to `target_medv`, nearest first. Equal distances keep id order.
pub fn nearest_by_medv(
    conn: &mut SqliteConnection,
    target_medv: f64,
    limit: i64,
) -> Result<Vec<Home>, Error> {
    homes::table
        .order(abs(homes::medv - target_medv).asc())
        .then_order_by(homes::id.asc())
        .limit(limit)
        .select(Home::as_select())
        .load(conn)
}

pub fn count(conn: &mut SqliteConnection) -> Result<i64, Error> {
    homes::table.count().get_result(conn)
}
