//! Human-readable scenario reports

use crate::scenario::ScenarioOutcome;

/// Print a scenario outcome to stdout.
pub fn print_outcome(outcome: &ScenarioOutcome) {
    println!("\n=== Scenario Results: /{} ===", outcome.endpoint);
    println!("Total Requests: {}", outcome.total_requests);
    println!(
        "Correct: {} ({:.2}%)",
        outcome.correct_responses,
        outcome.success_rate() * 100.0
    );
    println!("Failed Calls: {}", outcome.failed_calls);
    println!("Duration: {:.2}s", outcome.elapsed.as_secs_f64());

    if !outcome.mismatch_samples.is_empty() {
        println!("\nSample mismatches (requested -> resolved):");
        for sample in &outcome.mismatch_samples {
            println!("  {} -> {}", sample.requested, sample.resolved);
        }
    }
}

/// One-line summary, used by the CLI after threshold checks.
pub fn summary_line(outcome: &ScenarioOutcome) -> String {
    format!(
        "/{}: {}/{} correct ({:.2}%), {} failed, {:.2}s",
        outcome.endpoint,
        outcome.correct_responses,
        outcome.total_requests,
        outcome.success_rate() * 100.0,
        outcome.failed_calls,
        outcome.elapsed.as_secs_f64()
    )
}
