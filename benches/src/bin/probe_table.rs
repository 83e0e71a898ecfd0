//! Prints probe cost and accuracy for the standard benchmark cases.
//!
//! Run with: `cargo run --package frontier-bench --bin probe_table`

use frontier_bench::{benchmark_cases, run_case};

fn main() {
    println!(
        "{:<18} {:>16} {:>16} {:>8} {:>7} {:>7} {:>10}",
        "CASE", "FRONTIER", "ESTIMATE", "ERROR", "PROBES", "WORST", "TIME"
    );
    println!("{}", "-".repeat(90));

    for case in benchmark_cases() {
        match run_case(&case) {
            Ok(result) => println!(
                "{:<18} {:>16} {:>16} {:>8} {:>7} {:>7} {:>10.2?}",
                result.name,
                result.frontier,
                result.estimate,
                result.error(),
                result.probes,
                result.worst_case,
                result.duration,
            ),
            Err(e) => println!("{:<18} {e}", case.name),
        }
    }
}
