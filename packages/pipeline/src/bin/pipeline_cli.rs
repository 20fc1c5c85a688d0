use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use completion_client::CompletionBatchClient;
use sqlx::PgPool;
use uuid::Uuid;

use pipeline_core::config::Config;
use pipeline_core::feed_ads;
use pipeline_core::kernel::{
    CompletionBatchAdapter, Diagnostics, GalleryClient, IntelligenceClient, NominatimGeocoder,
    NoopImageGallery, NoopLocationIntelligence, NoopTranslator, PerformanceRecorder, PipelineDeps,
    TranslateClient,
};
use pipeline_core::store::{PgBatchJobStore, PgTripStore};
use pipeline_core::usecases::{GenerateBlogPostsInput, GenerateBlogPostsUseCase, RunSettings};

#[derive(Parser)]
#[command(name = "pipeline", about = "Waypost content pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a blog-post drafting batch for one or more trips
    Generate {
        #[arg(long)]
        user_id: Uuid,
        /// Trip ids to draft posts for
        #[arg(long, required = true, num_args = 1..)]
        trip_ids: Vec<Uuid>,
        #[arg(long)]
        auto_publish: bool,
        #[arg(long)]
        skip_affiliate: bool,
    },
    /// Show the current state of a batch job
    Status {
        #[arg(long)]
        job_id: Uuid,
    },
    /// Preview ad slot positions for a feed of the given length
    FeedAds {
        #[arg(long)]
        total: usize,
        #[arg(long)]
        seed: String,
        #[arg(long, default_value_t = 3)]
        min_gap: usize,
        #[arg(long, default_value_t = 6)]
        max_gap: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            user_id,
            trip_ids,
            auto_publish,
            skip_affiliate,
        } => generate(user_id, trip_ids, auto_publish, !skip_affiliate).await,
        Commands::Status { job_id } => status(job_id).await,
        Commands::FeedAds {
            total,
            seed,
            min_gap,
            max_gap,
        } => {
            let positions = feed_ads::generate_positions(total, &seed, min_gap, max_gap, None);
            println!("{} ad slots for {} items:", positions.len(), total);
            for position in positions {
                println!("  after item {position}");
            }
            Ok(())
        }
    }
}

async fn build_deps(config: &Config) -> Result<(PipelineDeps, PgPool)> {
    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let mut completion = CompletionBatchClient::new(config.completion_api_key.clone());
    if let Some(base_url) = &config.completion_base_url {
        completion = completion.with_base_url(base_url.clone());
    }

    let gallery: Arc<dyn pipeline_core::kernel::BaseImageGallery> =
        match &config.gallery_api_key {
            Some(key) => Arc::new(GalleryClient::new(
                key.clone(),
                config.gallery_base_url.clone(),
            )?),
            None => Arc::new(NoopImageGallery),
        };

    let intelligence: Arc<dyn pipeline_core::kernel::BaseLocationIntelligence> =
        match &config.intelligence_api_key {
            Some(key) => Arc::new(IntelligenceClient::new(
                key.clone(),
                config.intelligence_base_url.clone(),
            )?),
            None => Arc::new(NoopLocationIntelligence),
        };

    let translator: Arc<dyn pipeline_core::kernel::BaseTranslator> =
        match &config.translate_base_url {
            Some(base_url) => Arc::new(TranslateClient::new(base_url.clone())?),
            None => Arc::new(NoopTranslator),
        };

    let deps = PipelineDeps::new(
        Arc::new(PgTripStore::new(pool.clone())),
        intelligence,
        gallery,
        Arc::new(NominatimGeocoder::new()?),
        translator,
        Arc::new(CompletionBatchAdapter::new(Arc::new(completion))),
        Arc::new(PgBatchJobStore::new(pool.clone())),
        Arc::new(Diagnostics::new()),
    );

    Ok((deps, pool))
}

async fn generate(
    user_id: Uuid,
    trip_ids: Vec<Uuid>,
    auto_publish: bool,
    include_affiliate: bool,
) -> Result<()> {
    let config = Config::from_env()?;
    let (deps, _pool) = build_deps(&config).await?;

    let settings = RunSettings {
        batch_fetch: config.batch_fetch(),
        fetch_timeout: config.fetch_timeout(),
        draft_model: config.draft_model.clone(),
    };

    let recorder = PerformanceRecorder::new(32);
    recorder.start();

    let usecase = GenerateBlogPostsUseCase::new(settings);
    let input = GenerateBlogPostsInput {
        user_id,
        trip_ids,
        auto_publish,
        include_affiliate,
        seo_optimize: true,
    };

    let run_started = std::time::Instant::now();
    let result = usecase.execute(input, &deps).await;
    recorder.record("generate_blog_posts", run_started.elapsed());
    recorder.stop();
    if result.success {
        println!(
            "Batch submitted: job {} ({})",
            result.batch_job.id,
            result
                .batch_job
                .external_batch_id
                .as_deref()
                .unwrap_or("no external id")
        );
    } else {
        println!("Generation did not start:");
        for error in &result.errors {
            println!("  - {error}");
        }
    }
    Ok(())
}

async fn status(job_id: Uuid) -> Result<()> {
    let config = Config::from_env()?;
    let (deps, _pool) = build_deps(&config).await?;

    let job = deps
        .job_store
        .find_by_id(job_id)
        .await?
        .with_context(|| format!("No batch job found with id {job_id}"))?;

    println!("Job {}: {}", job.id, job.status.as_str());
    println!("  type:       {}", job.job_type.as_str());
    println!("  trips:      {}", job.source_ids.len());
    match &job.external_batch_id {
        Some(batch_id) => {
            println!("  batch:      {batch_id}");
            let remote = deps.completion.poll_batch(batch_id).await?;
            println!("  provider:   {remote:?}");
        }
        None => println!("  batch:      not yet submitted"),
    }
    println!("  created:    {}", job.created_at);
    println!("  updated:    {}", job.updated_at);
    Ok(())
}
