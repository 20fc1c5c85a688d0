//! End-to-end tests for the blog drafting use case.
//!
//! Each test wires TestDependencies, runs the use case, then asserts on the
//! result plus what the mocks recorded (submissions, fetches, saved jobs).

use chrono::Utc;
use uuid::Uuid;

use pipeline_core::domain::{
    BatchJobStatus, ItineraryDay, LocationData, Trip, TripBundle, TripPost,
};
use pipeline_core::kernel::{BaseBatchJobStore, TestDependencies};
use pipeline_core::usecases::{
    GenerateBlogPostsInput, GenerateBlogPostsResult, GenerateBlogPostsUseCase, RunSettings,
};

// ============================================================================
// Helpers
// ============================================================================

fn bundle_for(user_id: Uuid, destination: &str) -> TripBundle {
    let trip_id = Uuid::new_v4();
    TripBundle {
        trip: Trip {
            id: trip_id,
            user_id,
            title: format!("A week in {destination}"),
            destination: Some(destination.to_string()),
            cover_image: None,
            location_data: Some(LocationData {
                destination: destination.to_string(),
                start_point: None,
                end_point: None,
            }),
            created_at: Utc::now(),
        },
        posts: vec![TripPost {
            id: Uuid::new_v4(),
            trip_id,
            title: "Arrival".to_string(),
            body: "Landed late, found the night market anyway.".to_string(),
        }],
        itinerary: vec![ItineraryDay {
            day_number: 1,
            title: "Old town".to_string(),
            description: "Walking the old quarter".to_string(),
            location: Some(destination.to_string()),
            activities: vec!["walking tour".to_string()],
        }],
    }
}

fn serial_settings() -> RunSettings {
    RunSettings {
        batch_fetch: pipeline_core::kernel::BatchFetchConfig {
            group_size: 1,
            group_delay: std::time::Duration::ZERO,
        },
        ..RunSettings::default()
    }
}

async fn run(
    test_deps: &TestDependencies,
    input: GenerateBlogPostsInput,
) -> GenerateBlogPostsResult {
    GenerateBlogPostsUseCase::new(serial_settings())
        .execute(input, &test_deps.deps())
        .await
}

fn input_for(user_id: Uuid, trip_ids: Vec<Uuid>) -> GenerateBlogPostsInput {
    GenerateBlogPostsInput {
        user_id,
        trip_ids,
        auto_publish: false,
        include_affiliate: true,
        seo_optimize: true,
    }
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn empty_trip_list_short_circuits_before_any_external_call() {
    let test_deps = TestDependencies::new();

    let result = run(&test_deps, input_for(Uuid::new_v4(), vec![])).await;

    assert!(!result.success);
    assert!(!result.errors.is_empty());
    assert_eq!(result.batch_job.status, BatchJobStatus::Pending);
    assert_eq!(result.batch_job.external_batch_id, None);

    assert!(test_deps.trip_store.fetch_calls().is_empty());
    assert_eq!(test_deps.completion.submission_count(), 0);
    assert!(test_deps.job_store.is_empty());
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn successful_run_starts_and_persists_the_job() {
    let test_deps = TestDependencies::new();
    let user_id = Uuid::new_v4();

    let a = bundle_for(user_id, "Lisbon, Portugal");
    let b = bundle_for(user_id, "Porto, Portugal");
    let ids = vec![a.trip.id, b.trip.id];
    test_deps.trip_store.insert(a);
    test_deps.trip_store.insert(b);

    let result = run(&test_deps, input_for(user_id, ids.clone())).await;

    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.batch_job.status, BatchJobStatus::Running);
    assert_eq!(
        result.batch_job.external_batch_id.as_deref(),
        Some("batch_test_1")
    );

    // One request per trip, keyed by trip id.
    let submissions = test_deps.completion.submissions();
    assert_eq!(submissions.len(), 1);
    let custom_ids: Vec<String> = submissions[0]
        .iter()
        .map(|r| r.custom_id.clone())
        .collect();
    assert_eq!(custom_ids, vec![ids[0].to_string(), ids[1].to_string()]);

    // The persisted job matches the returned one.
    let saved = test_deps
        .job_store
        .find_by_id(result.batch_job.id)
        .await
        .expect("store lookup")
        .expect("job persisted");
    assert_eq!(saved.status, BatchJobStatus::Running);
    assert_eq!(saved.external_batch_id.as_deref(), Some("batch_test_1"));
    assert_eq!(saved.source_ids, ids);
}

// ============================================================================
// Partial and total fetch failure
// ============================================================================

#[tokio::test]
async fn failed_trip_fetches_drop_the_trip_but_keep_the_run() {
    let test_deps = TestDependencies::new();
    let user_id = Uuid::new_v4();

    let good = bundle_for(user_id, "Lisbon, Portugal");
    let good_id = good.trip.id;
    let bad_id = Uuid::new_v4();
    test_deps.trip_store.insert(good);
    test_deps.trip_store.fail_for(bad_id);

    let result = run(&test_deps, input_for(user_id, vec![bad_id, good_id])).await;

    assert!(result.success);
    let submissions = test_deps.completion.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].len(), 1);
    assert_eq!(submissions[0][0].custom_id, good_id.to_string());

    // The job still records everything that was asked for.
    assert_eq!(result.batch_job.source_ids, vec![bad_id, good_id]);
}

#[tokio::test]
async fn all_fetches_failing_fails_the_run_without_submitting() {
    let test_deps = TestDependencies::new();
    let user_id = Uuid::new_v4();

    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    test_deps.trip_store.fail_for(a);
    test_deps.trip_store.fail_for(b);

    let result = run(&test_deps, input_for(user_id, vec![a, b])).await;

    assert!(!result.success);
    assert!(result.errors[0].contains("no trips could be loaded"));
    assert_eq!(result.batch_job.status, BatchJobStatus::Pending);
    assert_eq!(test_deps.completion.submission_count(), 0);
    assert!(test_deps.job_store.is_empty());
}

// ============================================================================
// Submission failure
// ============================================================================

#[tokio::test]
async fn submission_failure_leaves_the_job_pending_and_unpersisted() {
    let test_deps = TestDependencies::new();
    let user_id = Uuid::new_v4();

    let bundle = bundle_for(user_id, "Lisbon, Portugal");
    let trip_id = bundle.trip.id;
    test_deps.trip_store.insert(bundle);
    test_deps.completion.set_failing(true);

    let result = run(&test_deps, input_for(user_id, vec![trip_id])).await;

    assert!(!result.success);
    assert!(result.errors[0].contains("batch submission failed"));
    assert_eq!(result.batch_job.status, BatchJobStatus::Pending);
    assert_eq!(result.batch_job.external_batch_id, None);
    assert!(test_deps.job_store.is_empty());
}

// ============================================================================
// Intelligence fan-out
// ============================================================================

#[tokio::test]
async fn destination_intelligence_is_fetched_once_per_destination() {
    let test_deps = TestDependencies::new();
    let user_id = Uuid::new_v4();

    // Two trips to the same place, one elsewhere.
    let a = bundle_for(user_id, "Lisbon, Portugal");
    let b = bundle_for(user_id, "Lisbon, Portugal");
    let c = bundle_for(user_id, "Porto, Portugal");
    let ids = vec![a.trip.id, b.trip.id, c.trip.id];
    for bundle in [a, b, c] {
        test_deps.trip_store.insert(bundle);
    }

    let result = run(&test_deps, input_for(user_id, ids)).await;
    assert!(result.success);

    let calls = test_deps.intelligence.calls();
    assert_eq!(
        calls,
        vec!["Lisbon, Portugal".to_string(), "Porto, Portugal".to_string()]
    );
}

#[tokio::test]
async fn intelligence_outage_does_not_block_submission() {
    let test_deps = TestDependencies::new();
    test_deps.intelligence.set_failing(true);
    let user_id = Uuid::new_v4();

    let bundle = bundle_for(user_id, "Lisbon, Portugal");
    let trip_id = bundle.trip.id;
    test_deps.trip_store.insert(bundle);

    let result = run(&test_deps, input_for(user_id, vec![trip_id])).await;

    assert!(result.success);
    assert_eq!(test_deps.completion.submission_count(), 1);
}

// ============================================================================
// Affiliate flag plumbing
// ============================================================================

#[tokio::test]
async fn affiliate_opt_out_is_reflected_in_the_prompt_payload() {
    let test_deps = TestDependencies::new();
    let user_id = Uuid::new_v4();

    let bundle = bundle_for(user_id, "Lisbon, Portugal");
    let trip_id = bundle.trip.id;
    test_deps.trip_store.insert(bundle);

    let mut input = input_for(user_id, vec![trip_id]);
    input.include_affiliate = false;

    let result = run(&test_deps, input).await;
    assert!(result.success);

    let submissions = test_deps.completion.submissions();
    let payload = serde_json::to_string(&submissions[0][0]).expect("serializable request");
    assert!(!payload.contains("getyourguide"));
}

// ============================================================================
// Options round-trip
// ============================================================================

#[tokio::test]
async fn job_options_mirror_the_input_flags() {
    let test_deps = TestDependencies::new();
    let user_id = Uuid::new_v4();

    let bundle = bundle_for(user_id, "Lisbon, Portugal");
    let trip_id = bundle.trip.id;
    test_deps.trip_store.insert(bundle);

    let mut input = input_for(user_id, vec![trip_id]);
    input.auto_publish = true;
    input.seo_optimize = false;

    let result = run(&test_deps, input).await;
    assert!(result.success);

    let job = &result.batch_job;
    assert!(job.options.auto_publish);
    assert!(job.options.include_affiliate);
    assert!(!job.options.seo_optimize);
    assert_eq!(job.user_id, user_id);
}
