//! Pricing tables, created on startup if they do not exist.

use sqlx::PgPool;

use crate::error::Result;

const SCHEMA: &[&str] = &[
    r#"
    DO $$
    BEGIN
        CREATE TYPE item_type AS ENUM ('perishable', 'non-perishable');
    EXCEPTION
        WHEN duplicate_object THEN NULL;
    END
    $$
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS organizations (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id UUID PRIMARY KEY,
        type item_type NOT NULL,
        description TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pricing_rules (
        id UUID PRIMARY KEY,
        organization_id UUID NOT NULL REFERENCES organizations (id),
        item_id UUID NOT NULL REFERENCES items (id),
        zone TEXT NOT NULL,
        base_distance_in_km NUMERIC NOT NULL,
        km_price NUMERIC NOT NULL,
        fix_price NUMERIC NOT NULL
    )
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS pricing_rules_org_item_zone
        ON pricing_rules (organization_id, item_id, zone)
    "#,
];

/// Create the enum type, tables and indexes. Safe to run repeatedly.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::raw_sql(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!("Database schema is up to date");
    Ok(())
}
