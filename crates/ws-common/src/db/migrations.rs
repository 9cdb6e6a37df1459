use deadpool_postgres::PoolError;
use thiserror::Error;
use tokio_postgres::Error as PgError;
use tracing::{info, instrument};

use crate::db::PgPool;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to run migration: {0}")]
    Postgres(#[from] PgError),
}

struct Migration {
    id: i32,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        id: 1,
        description: "worker profiles and skills",
        sql: r#"
CREATE TABLE IF NOT EXISTS workstaff.worker_profiles (
    id TEXT PRIMARY KEY,
    user_id TEXT UNIQUE,
    location TEXT,
    total_years_experience DOUBLE PRECISION NOT NULL DEFAULT 0
        CHECK (total_years_experience >= 0),
    availability TEXT[] NOT NULL DEFAULT '{}',
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS workstaff.worker_skills (
    worker_id TEXT NOT NULL REFERENCES workstaff.worker_profiles(id) ON DELETE CASCADE,
    skill_name TEXT NOT NULL,
    level TEXT NOT NULL DEFAULT 'BASICO',
    years_experience INTEGER NOT NULL DEFAULT 0 CHECK (years_experience >= 0),
    PRIMARY KEY (worker_id, skill_name)
);

CREATE INDEX IF NOT EXISTS idx_worker_profiles_active
    ON workstaff.worker_profiles(id) WHERE is_active;
"#,
    },
    Migration {
        id: 2,
        description: "job postings and required skills",
        sql: r#"
CREATE TABLE IF NOT EXISTS workstaff.job_postings (
    id TEXT PRIMARY KEY,
    company_user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    location TEXT,
    duration TEXT,
    schedule TEXT[] NOT NULL DEFAULT '{}',
    status TEXT NOT NULL DEFAULT 'OPEN',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS workstaff.job_required_skills (
    job_id TEXT NOT NULL REFERENCES workstaff.job_postings(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    skill_name TEXT NOT NULL,
    minimum_level TEXT NOT NULL DEFAULT 'BASICO',
    importance_weight SMALLINT CHECK (importance_weight BETWEEN 1 AND 5),
    is_required BOOLEAN NOT NULL DEFAULT TRUE,
    PRIMARY KEY (job_id, position)
);

CREATE INDEX IF NOT EXISTS idx_job_postings_open
    ON workstaff.job_postings(id) WHERE status = 'OPEN';
"#,
    },
];

/// Apply pending migrations in order. Each one runs in its own transaction
/// and is recorded in `workstaff.schema_migrations`.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrationError> {
    let mut client = pool.get().await?;
    client
        .batch_execute(
            "CREATE SCHEMA IF NOT EXISTS workstaff;
             CREATE TABLE IF NOT EXISTS workstaff.schema_migrations (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
             );",
        )
        .await?;

    for migration in MIGRATIONS {
        let already_applied: bool = client
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM workstaff.schema_migrations WHERE id = $1)",
                &[&migration.id],
            )
            .await?
            .get(0);

        if already_applied {
            continue;
        }

        let tx = client.transaction().await?;
        tx.batch_execute(migration.sql).await?;
        tx.execute(
            "INSERT INTO workstaff.schema_migrations (id, description) VALUES ($1, $2)",
            &[&migration.id, &migration.description],
        )
        .await?;
        tx.commit().await?;

        info!(
            id = migration.id,
            description = migration.description,
            "applied migration"
        );
    }

    Ok(())
}
