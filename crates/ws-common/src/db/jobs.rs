use std::collections::HashMap;

use deadpool_postgres::PoolError;
use tokio_postgres::{Error as PgError, Row};
use tracing::instrument;

use crate::db::util::TimedClientExt;
use crate::db::PgPool;
use crate::{JobPosting, ProficiencyLevel, RequiredSkill};

#[derive(Debug, thiserror::Error)]
pub enum JobFetchError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

pub const OPEN_STATUS: &str = "OPEN";

/// A posting plus the owning company's user id.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPostingRecord {
    pub job: JobPosting,
    pub company_user_id: String,
}

impl JobPostingRecord {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.company_user_id == user_id
    }
}

const REQUIREMENTS_FOR_JOBS: &str =
    "SELECT job_id, skill_name, minimum_level, importance_weight, is_required \
     FROM workstaff.job_required_skills \
     WHERE job_id = ANY($1) \
     ORDER BY job_id, position";

/// Stored weights outside 1..=5 are left for `RequiredSkill::effective_weight` to clamp.
pub(crate) fn stored_weight(raw: Option<i16>) -> Option<u8> {
    raw.map(|weight| weight.clamp(0, i16::from(u8::MAX)) as u8)
}

fn record_from_row(row: &Row) -> JobPostingRecord {
    JobPostingRecord {
        job: JobPosting {
            id: row.get("id"),
            title: row.get("title"),
            location: row.get("location"),
            duration: row.get("duration"),
            schedule: row.get("schedule"),
            required_skills: Vec::new(),
        },
        company_user_id: row.get("company_user_id"),
    }
}

fn requirement_from_row(row: &Row) -> RequiredSkill {
    let level: String = row.get("minimum_level");
    RequiredSkill {
        name: row.get("skill_name"),
        minimum_level: ProficiencyLevel::parse_or_lowest(&level),
        importance_weight: stored_weight(row.get("importance_weight")),
        is_required: row.get("is_required"),
    }
}

async fn attach_requirements(
    client: &deadpool_postgres::Client,
    records: &mut [JobPostingRecord],
) -> Result<(), PgError> {
    if records.is_empty() {
        return Ok(());
    }

    let ids: Vec<&str> = records.iter().map(|r| r.job.id.as_str()).collect();
    let rows = client
        .timed_query(REQUIREMENTS_FOR_JOBS, &[&ids], "job_requirements_by_job")
        .await?;

    let mut by_job: HashMap<String, Vec<RequiredSkill>> = HashMap::new();
    for row in &rows {
        by_job
            .entry(row.get("job_id"))
            .or_default()
            .push(requirement_from_row(row));
    }

    for record in records.iter_mut() {
        record.job.required_skills = by_job.remove(&record.job.id).unwrap_or_default();
    }
    Ok(())
}

#[instrument(skip(pool))]
pub async fn fetch_job_posting(
    pool: &PgPool,
    job_id: &str,
) -> Result<Option<JobPostingRecord>, JobFetchError> {
    let client = pool.get().await?;
    let Some(row) = client
        .timed_query_opt(
            "SELECT id, company_user_id, title, location, duration, schedule \
             FROM workstaff.job_postings WHERE id = $1",
            &[&job_id],
            "job_posting_by_id",
        )
        .await?
    else {
        return Ok(None);
    };

    let mut records = [record_from_row(&row)];
    attach_requirements(&client, &mut records).await?;
    let [record] = records;
    Ok(Some(record))
}

/// Open postings in id order, at most `limit` of them.
#[instrument(skip(pool))]
pub async fn fetch_open_job_postings(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<JobPosting>, JobFetchError> {
    let client = pool.get().await?;
    let rows = client
        .timed_query(
            "SELECT id, company_user_id, title, location, duration, schedule \
             FROM workstaff.job_postings WHERE status = $1 ORDER BY id LIMIT $2",
            &[&OPEN_STATUS, &limit],
            "open_job_postings",
        )
        .await?;

    let mut records: Vec<JobPostingRecord> = rows.iter().map(record_from_row).collect();
    attach_requirements(&client, &mut records).await?;
    Ok(records.into_iter().map(|record| record.job).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_is_exact() {
        let posting = JobPostingRecord {
            job: JobPosting {
                id: "job-1".into(),
                ..JobPosting::default()
            },
            company_user_id: "company-1".into(),
        };
        assert!(posting.is_owned_by("company-1"));
        assert!(!posting.is_owned_by("company-2"));
    }

    #[test]
    fn stored_weights_map_into_u8_range() {
        assert_eq!(stored_weight(None), None);
        assert_eq!(stored_weight(Some(4)), Some(4));
        assert_eq!(stored_weight(Some(-2)), Some(0));
        assert_eq!(stored_weight(Some(900)), Some(255));
    }
}
