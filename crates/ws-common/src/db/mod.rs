pub mod jobs;
pub mod migrations;
pub mod pool;
pub mod util;
pub mod workers;

pub use jobs::{JobFetchError, JobPostingRecord, fetch_job_posting, fetch_open_job_postings};
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPoolError, PgPool, create_pool_with_size};
pub use workers::{
    WorkerFetchError, fetch_active_worker_profiles, fetch_worker_profile,
    fetch_worker_profile_by_user,
};
