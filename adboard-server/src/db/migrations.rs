//! Schema bootstrap for the advertisement table

use sqlx::PgPool;

/// Create the advertisement table and its title index if missing.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running advertisement migrations...");

    // creation_date is stored as UTC without time zone
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS advertisement (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            owner TEXT NOT NULL,
            creation_date TIMESTAMP NOT NULL DEFAULT (NOW() AT TIME ZONE 'utc'),
            CONSTRAINT advertisement_title_key UNIQUE (title)
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Advertisement migrations complete");
    Ok(())
}
