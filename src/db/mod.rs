use sqlx::sqlite::SqlitePool;

use crate::models::{City, CreateCity, DataRecord};

/// Create the city and data tables if they do not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS city (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               province TEXT NOT NULL UNIQUE,
               country TEXT NOT NULL,
               country_code TEXT NOT NULL,
               country_population INTEGER NOT NULL
           )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS data (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               city_id INTEGER NOT NULL REFERENCES city(id),
               date TEXT NOT NULL,
               confirmed INTEGER NOT NULL DEFAULT 0,
               deaths INTEGER NOT NULL DEFAULT 0,
               recovered INTEGER NOT NULL DEFAULT 0
           )"#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

// City queries
pub async fn get_city(pool: &SqlitePool, city_id: i64) -> Result<Option<City>, sqlx::Error> {
    sqlx::query_as::<_, City>(
        r#"SELECT * FROM city WHERE id = ?"#
    )
    .bind(city_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_city_by_name(pool: &SqlitePool, province: &str) -> Result<Option<City>, sqlx::Error> {
    sqlx::query_as::<_, City>(
        r#"SELECT * FROM city WHERE province = ?"#
    )
    .bind(province)
    .fetch_optional(pool)
    .await
}

pub async fn get_cities(pool: &SqlitePool, skip: i64, limit: i64) -> Result<Vec<City>, sqlx::Error> {
    sqlx::query_as::<_, City>(
        r#"SELECT * FROM city ORDER BY country_code LIMIT ? OFFSET ?"#
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await
}

pub async fn create_city(pool: &SqlitePool, city: &CreateCity) -> Result<City, sqlx::Error> {
    sqlx::query_as::<_, City>(
        r#"INSERT INTO city (province, country, country_code, country_population)
           VALUES (?, ?, ?, ?)
           RETURNING *"#,
    )
    .bind(&city.province)
    .bind(&city.country)
    .bind(&city.country_code)
    .bind(city.country_population)
    .fetch_one(pool)
    .await
}

// Data queries
pub async fn get_data(
    pool: &SqlitePool,
    city: Option<&str>,
    skip: i64,
    limit: i64,
) -> Result<Vec<DataRecord>, sqlx::Error> {
    if let Some(province) = city {
        sqlx::query_as::<_, DataRecord>(
            r#"SELECT data.* FROM data
               JOIN city ON city.id = data.city_id
               WHERE city.province = ?
               ORDER BY data.date DESC
               LIMIT ? OFFSET ?"#,
        )
        .bind(province)
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, DataRecord>(
            r#"SELECT * FROM data ORDER BY date DESC LIMIT ? OFFSET ?"#
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await
    }
}

pub async fn create_data(
    pool: &SqlitePool,
    city_id: i64,
    date: &str,
    confirmed: i64,
    deaths: i64,
    recovered: i64,
) -> Result<DataRecord, sqlx::Error> {
    sqlx::query_as::<_, DataRecord>(
        r#"INSERT INTO data (city_id, date, confirmed, deaths, recovered)
           VALUES (?, ?, ?, ?, ?)
           RETURNING *"#,
    )
    .bind(city_id)
    .bind(date)
    .bind(confirmed)
    .bind(deaths)
    .bind(recovered)
    .fetch_one(pool)
    .await
}

// Full-table deletes used by the sync job
pub async fn delete_all_cities(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM city"#).execute(pool).await?;
    Ok(result.rows_affected())
}

pub async fn delete_all_data(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM data"#).execute(pool).await?;
    Ok(result.rows_affected())
}
