use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::json;

use crate::{record::BENCHMARK_COMPLETE, units::TimeUnit};

const GROUPS: &[&str] = &["arithmetic", "strings", "lists", "functions"];
const CATEGORIES: &[&str] = &["lexer", "parser", "lowerer", "evaluator", "full"];
const LABELS: &[&str] = &["NoChange", "Regressed", "Improved"];

/// Synthetic Criterion output: a mix of benchmark records, some without a change block, and
/// unrelated cargo messages that the formatter skips.
pub fn generate_records(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lines = Vec::with_capacity(count);
    for idx in 0..count {
        if rng.gen_ratio(1, 10) {
            let group = GROUPS[idx % GROUPS.len()];
            lines.push(json!({"reason": "group-complete", "group_name": group}).to_string());
            continue;
        }
        let group = GROUPS[rng.gen_range(0..GROUPS.len())];
        let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
        let unit = TimeUnit::ALL[rng.gen_range(0..TimeUnit::ALL.len())];
        let estimate: f64 = rng.gen_range(1.0..5_000_000.0);
        let change = if rng.gen_bool(0.8) {
            let relative: f64 = rng.gen_range(-0.25..0.25);
            json!({
                "change": LABELS[rng.gen_range(0..LABELS.len())],
                "mean": {"estimate": relative},
            })
        } else {
            serde_json::Value::Null
        };
        lines.push(
            json!({
                "reason": BENCHMARK_COMPLETE,
                "id": format!("{group}/{idx}/{category}"),
                "unit": unit,
                "typical": {"estimate": estimate},
                "change": change,
            })
            .to_string(),
        );
    }
    lines
}
