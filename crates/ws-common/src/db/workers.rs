use std::collections::HashMap;

use deadpool_postgres::PoolError;
use tokio_postgres::{Error as PgError, Row};
use tracing::instrument;

use crate::db::util::TimedClientExt;
use crate::db::PgPool;
use crate::{ProficiencyLevel, WorkerProfile, WorkerSkill};

#[derive(Debug, thiserror::Error)]
pub enum WorkerFetchError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

const PROFILE_COLUMNS: &str =
    "id, location, total_years_experience, availability FROM workstaff.worker_profiles";

const SKILLS_FOR_WORKERS: &str = "SELECT worker_id, skill_name, level, years_experience \
     FROM workstaff.worker_skills \
     WHERE worker_id = ANY($1) \
     ORDER BY worker_id, skill_name";

pub(crate) fn non_negative_years(raw: i32) -> u32 {
    u32::try_from(raw).unwrap_or(0)
}

fn profile_from_row(row: &Row) -> WorkerProfile {
    WorkerProfile {
        id: row.get("id"),
        location: row.get("location"),
        total_years_experience: row.get("total_years_experience"),
        availability: row.get("availability"),
        skills: Vec::new(),
    }
}

fn skill_from_row(row: &Row) -> WorkerSkill {
    let level: String = row.get("level");
    WorkerSkill {
        name: row.get("skill_name"),
        level: ProficiencyLevel::parse_or_lowest(&level),
        years_experience: non_negative_years(row.get("years_experience")),
    }
}

async fn attach_skills(
    client: &deadpool_postgres::Client,
    profiles: &mut [WorkerProfile],
) -> Result<(), PgError> {
    if profiles.is_empty() {
        return Ok(());
    }

    let ids: Vec<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
    let rows = client
        .timed_query(SKILLS_FOR_WORKERS, &[&ids], "worker_skills_by_worker")
        .await?;

    let mut by_worker: HashMap<String, Vec<WorkerSkill>> = HashMap::new();
    for row in &rows {
        by_worker
            .entry(row.get("worker_id"))
            .or_default()
            .push(skill_from_row(row));
    }

    for profile in profiles.iter_mut() {
        profile.skills = by_worker.remove(&profile.id).unwrap_or_default();
    }
    Ok(())
}

#[instrument(skip(pool))]
pub async fn fetch_worker_profile(
    pool: &PgPool,
    worker_id: &str,
) -> Result<Option<WorkerProfile>, WorkerFetchError> {
    let client = pool.get().await?;
    let query = format!("SELECT {PROFILE_COLUMNS} WHERE id = $1");
    let Some(row) = client
        .timed_query_opt(query.as_str(), &[&worker_id], "worker_profile_by_id")
        .await?
    else {
        return Ok(None);
    };

    let mut profiles = [profile_from_row(&row)];
    attach_skills(&client, &mut profiles).await?;
    let [profile] = profiles;
    Ok(Some(profile))
}

/// Profile owned by an authenticated user (the JWT subject).
#[instrument(skip(pool))]
pub async fn fetch_worker_profile_by_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<WorkerProfile>, WorkerFetchError> {
    let client = pool.get().await?;
    let query = format!("SELECT {PROFILE_COLUMNS} WHERE user_id = $1");
    let Some(row) = client
        .timed_query_opt(query.as_str(), &[&user_id], "worker_profile_by_user")
        .await?
    else {
        return Ok(None);
    };

    let mut profiles = [profile_from_row(&row)];
    attach_skills(&client, &mut profiles).await?;
    let [profile] = profiles;
    Ok(Some(profile))
}

/// Active workers in id order, at most `limit` of them.
#[instrument(skip(pool))]
pub async fn fetch_active_worker_profiles(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<WorkerProfile>, WorkerFetchError> {
    let client = pool.get().await?;
    let query = format!("SELECT {PROFILE_COLUMNS} WHERE is_active ORDER BY id LIMIT $1");
    let rows = client
        .timed_query(query.as_str(), &[&limit], "active_worker_profiles")
        .await?;

    let mut profiles: Vec<WorkerProfile> = rows.iter().map(profile_from_row).collect();
    attach_skills(&client, &mut profiles).await?;
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_years_read_as_zero() {
        assert_eq!(non_negative_years(-3), 0);
        assert_eq!(non_negative_years(0), 0);
        assert_eq!(non_negative_years(7), 7);
    }

    #[test]
    fn skill_query_is_scoped_and_ordered() {
        assert!(SKILLS_FOR_WORKERS.contains("worker_id = ANY($1)"));
        assert!(SKILLS_FOR_WORKERS.ends_with("ORDER BY worker_id, skill_name"));
    }
}
