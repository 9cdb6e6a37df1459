use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;
use ws_common::api::{CandidateMatch, MatchQuery, QueryError, RecommendedJob};
use ws_common::logging::{ConsoleTarget, init_tracing_subscriber};
use ws_common::matching::{MatchingConfig, MatchingEngine, RankOptions};
use ws_common::{JobPosting, WorkerProfile};

#[derive(Debug, Parser)]
#[command(name = "ws-rank", about = "Rank workers and jobs from JSON files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank workers for one job posting
    Candidates {
        /// JSON file with one job posting
        #[arg(long)]
        job: PathBuf,
        /// JSON file with an array of worker profiles
        #[arg(long)]
        workers: PathBuf,
        #[command(flatten)]
        filters: Filters,
    },
    /// Rank job postings for one worker
    Jobs {
        /// JSON file with one worker profile
        #[arg(long)]
        worker: PathBuf,
        /// JSON file with an array of job postings
        #[arg(long)]
        jobs: PathBuf,
        #[command(flatten)]
        filters: Filters,
    },
}

#[derive(Debug, Clone, Args)]
struct Filters {
    /// Drop results below this overall score (0-100)
    #[arg(long, default_value_t = 0)]
    min_score: i64,
    /// Maximum number of results (1-100)
    #[arg(long, default_value_t = 20)]
    limit: i64,
    /// Only keep pairs that satisfy every required skill
    #[arg(long)]
    eligible_only: bool,
}

impl Filters {
    fn rank_options(&self) -> Result<RankOptions, QueryError> {
        MatchQuery {
            min_score: Some(self.min_score),
            limit: Some(self.limit),
            eligible_only: Some(self.eligible_only),
            worker_id: None,
        }
        .rank_options()
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("failed to render results: {0}")]
    Render(serde_json::Error),
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn execute(command: &Command, engine: &MatchingEngine) -> Result<String, CliError> {
    match command {
        Command::Candidates { job, workers, filters } => {
            let options = filters.rank_options()?;
            let job: JobPosting = load(job)?;
            let workers: Vec<WorkerProfile> = load(workers)?;

            let ranked: Vec<CandidateMatch> = engine
                .rank_candidates_for_job(&job, &workers, &options)
                .into_iter()
                .map(CandidateMatch::from)
                .collect();
            info!(job_id = %job.id, pool = workers.len(), returned = ranked.len(), "ranked candidates");
            serde_json::to_string_pretty(&ranked).map_err(CliError::Render)
        }
        Command::Jobs { worker, jobs, filters } => {
            let options = filters.rank_options()?;
            let worker: WorkerProfile = load(worker)?;
            let jobs: Vec<JobPosting> = load(jobs)?;

            let ranked: Vec<RecommendedJob> = engine
                .rank_jobs_for_worker(&worker, &jobs, &options)
                .into_iter()
                .map(RecommendedJob::from)
                .collect();
            info!(worker_id = %worker.id, pool = jobs.len(), returned = ranked.len(), "ranked jobs");
            serde_json::to_string_pretty(&ranked).map_err(CliError::Render)
        }
    }
}

fn main() {
    dotenv().ok();
    init_tracing_subscriber(env!("CARGO_PKG_NAME"), "warn", ConsoleTarget::Stderr);

    let cli = Cli::parse();
    let engine = MatchingEngine::new(MatchingConfig::from_env());

    match execute(&cli.command, &engine) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            tracing::error!(error = %err, "ws-rank failed");
            eprintln!("ws-rank: {err}");
            std::process::exit(1);
        }
    }
}
