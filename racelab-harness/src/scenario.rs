//! Scenario execution and outcome aggregation
//!
//! Two modes per the harness contract: strictly sequential (no two calls
//! ever in flight together) and concurrent (N workers hammering one
//! endpoint until a deadline, each verifying its own echo).

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

use crate::caller::EndpointCaller;

/// How many requested/resolved pairs to keep for the report.
const MAX_MISMATCH_SAMPLES: usize = 8;

/// One observed mismatch, kept for the report
#[derive(Debug, Clone)]
pub struct MismatchSample {
    pub requested: String,
    pub resolved: String,
}

/// Aggregated result of one scenario run
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub endpoint: String,
    pub total_requests: u64,
    pub correct_responses: u64,
    pub failed_calls: u64,
    pub mismatch_samples: Vec<MismatchSample>,
    pub elapsed: Duration,
}

impl ScenarioOutcome {
    /// Fraction of calls whose resolved id matched the id they sent.
    /// An empty run counts as fully correct.
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 1.0;
        }
        self.correct_responses as f64 / self.total_requests as f64
    }

    pub fn meets_rate(&self, min_rate: f64) -> bool {
        self.success_rate() >= min_rate
    }
}

/// Shared counters for one scenario run
struct OutcomeTracker {
    total: AtomicU64,
    correct: AtomicU64,
    failed: AtomicU64,
    mismatches: Mutex<Vec<MismatchSample>>,
}

impl OutcomeTracker {
    fn new() -> Self {
        Self {
            total: AtomicU64::new(0),
            correct: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            mismatches: Mutex::new(Vec::new()),
        }
    }

    async fn record(&self, requested: &str, resolved: Option<&str>) {
        self.total.fetch_add(1, Ordering::Relaxed);
        match resolved {
            Some(resolved) if resolved == requested => {
                self.correct.fetch_add(1, Ordering::Relaxed);
            }
            Some(resolved) => {
                let mut samples = self.mismatches.lock().await;
                if samples.len() < MAX_MISMATCH_SAMPLES {
                    samples.push(MismatchSample {
                        requested: requested.to_string(),
                        resolved: resolved.to_string(),
                    });
                }
            }
            None => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    async fn into_outcome(self, endpoint: &str, elapsed: Duration) -> ScenarioOutcome {
        ScenarioOutcome {
            endpoint: endpoint.to_string(),
            total_requests: self.total.load(Ordering::Relaxed),
            correct_responses: self.correct.load(Ordering::Relaxed),
            failed_calls: self.failed.load(Ordering::Relaxed),
            mismatch_samples: self.mismatches.into_inner(),
            elapsed,
        }
    }
}

/// Issue one call per id, strictly one at a time.
///
/// No overlap can occur, so every strategy is expected to score 1.0 here
/// regardless of delay.
pub async fn run_sequential(
    caller: &dyn EndpointCaller,
    endpoint: &str,
    ids: &[String],
    delay_ms: u64,
) -> ScenarioOutcome {
    let tracker = OutcomeTracker::new();
    let start = Instant::now();

    for id in ids {
        match caller.call(endpoint, id, delay_ms).await {
            Ok(reply) => tracker.record(id, Some(&reply.resolved_id)).await,
            Err(err) => {
                debug!(endpoint, %id, %err, "sequential call failed");
                tracker.record(id, None).await;
            }
        }
    }

    tracker.into_outcome(endpoint, start.elapsed()).await
}

/// Launch `concurrency` workers, each repeatedly calling with its own
/// worker index as the id until `duration` elapses.
pub async fn run_concurrent(
    caller: Arc<dyn EndpointCaller>,
    endpoint: &str,
    concurrency: usize,
    duration: Duration,
    delay_ms: u64,
) -> ScenarioOutcome {
    let tracker = Arc::new(OutcomeTracker::new());
    let deadline = Instant::now() + duration;
    let start = Instant::now();

    let mut handles = Vec::with_capacity(concurrency);
    for worker in 0..concurrency {
        let caller = caller.clone();
        let tracker = tracker.clone();
        let endpoint = endpoint.to_string();
        let id = worker.to_string();

        handles.push(tokio::spawn(async move {
            // Small start jitter so workers do not move in lockstep.
            tokio::time::sleep(Duration::from_millis(fastrand::u64(0..20))).await;

            while Instant::now() < deadline {
                match caller.call(&endpoint, &id, delay_ms).await {
                    Ok(reply) => tracker.record(&id, Some(&reply.resolved_id)).await,
                    Err(err) => {
                        debug!(endpoint = %endpoint, worker, %err, "concurrent call failed");
                        tracker.record(&id, None).await;
                    }
                }
            }
        }));
    }

    for handle in handles {
        let _ = handle.await;
    }

    let elapsed = start.elapsed();
    match Arc::try_unwrap(tracker) {
        Ok(tracker) => tracker.into_outcome(endpoint, elapsed).await,
        // Unreachable once every worker is joined, but avoid a panic path.
        Err(shared) => ScenarioOutcome {
            endpoint: endpoint.to_string(),
            total_requests: shared.total.load(Ordering::Relaxed),
            correct_responses: shared.correct.load(Ordering::Relaxed),
            failed_calls: shared.failed.load(Ordering::Relaxed),
            mismatch_samples: shared.mismatches.lock().await.clone(),
            elapsed,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caller::DispatcherCaller;
    use racelab_core::{
        Dispatcher, ShutdownSignal, SAFE_PROTOTYPE_ENDPOINT, SAFE_SINGLETON_ENDPOINT,
        UNSAFE_ENDPOINT,
    };

    fn in_process_caller() -> Arc<dyn EndpointCaller> {
        Arc::new(DispatcherCaller::new(Arc::new(Dispatcher::new(
            ShutdownSignal::none(),
        ))))
    }

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("seq-{i}")).collect()
    }

    #[tokio::test]
    async fn sequential_mode_is_fully_correct_on_every_endpoint() {
        let caller = in_process_caller();
        for endpoint in [UNSAFE_ENDPOINT, SAFE_PROTOTYPE_ENDPOINT, SAFE_SINGLETON_ENDPOINT] {
            let outcome = run_sequential(caller.as_ref(), endpoint, &ids(10), 5).await;
            assert_eq!(outcome.total_requests, 10);
            assert_eq!(outcome.success_rate(), 1.0, "{endpoint} failed sequentially");
            assert!(outcome.mismatch_samples.is_empty());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_mode_keeps_safe_endpoints_correct() {
        let caller = in_process_caller();
        for endpoint in [SAFE_PROTOTYPE_ENDPOINT, SAFE_SINGLETON_ENDPOINT] {
            let outcome = run_concurrent(
                caller.clone(),
                endpoint,
                16,
                Duration::from_millis(500),
                10,
            )
            .await;
            assert!(outcome.total_requests > 0);
            assert_eq!(
                outcome.success_rate(),
                1.0,
                "{endpoint} lost updates under concurrency"
            );
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_mode_exposes_the_shared_mutable_race() {
        let caller = in_process_caller();
        let outcome = run_concurrent(
            caller,
            UNSAFE_ENDPOINT,
            16,
            Duration::from_millis(800),
            25,
        )
        .await;

        assert!(outcome.total_requests > 0);
        assert!(
            outcome.correct_responses < outcome.total_requests,
            "expected at least one lost update on {} calls",
            outcome.total_requests
        );
        assert!(!outcome.mismatch_samples.is_empty());
    }

    #[tokio::test]
    async fn failed_calls_are_counted_not_dropped() {
        let caller = in_process_caller();
        let outcome = run_sequential(caller.as_ref(), "no-such-endpoint", &ids(3), 0).await;
        assert_eq!(outcome.total_requests, 3);
        assert_eq!(outcome.failed_calls, 3);
        assert_eq!(outcome.correct_responses, 0);
    }

    #[test]
    fn success_rate_of_empty_run_is_one() {
        let outcome = ScenarioOutcome {
            endpoint: "unsafe".into(),
            total_requests: 0,
            correct_responses: 0,
            failed_calls: 0,
            mismatch_samples: Vec::new(),
            elapsed: Duration::ZERO,
        };
        assert_eq!(outcome.success_rate(), 1.0);
        assert!(outcome.meets_rate(0.99));
    }
}
