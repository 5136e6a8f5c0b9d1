use bench_report::{
    BenchReportError, format_report,
    record::{ParsedLine, parse_line},
    report::{DEFAULT_TREND_THRESHOLD, FormattedRow, Trend},
};

const LEXER: &str = r#"{"reason":"benchmark-complete","id":"suite/lexer","unit":"ns","typical":{"estimate":500000},"change":{"change":"NoChange","mean":{"estimate":0.1}}}"#;
const LEXER_NO_CHANGE: &str = r#"{"reason":"benchmark-complete","id":"suite/lexer","unit":"ns","typical":{"estimate":500000},"change":null}"#;
const ARITH_PARSER: &str = r#"{"reason":"benchmark-complete","id":"anilang/arith/parser","unit":"ms","typical":{"estimate":2.0},"change":{"change":"Regressed","mean":{"estimate":0.03}}}"#;
const STRINGS_PARSER: &str = r#"{"reason":"benchmark-complete","id":"anilang/strings/parser","unit":"ns","typical":{"estimate":1200},"change":{"change":"Regressed","mean":{"estimate":0.05}}}"#;
const LISTS_EVAL: &str = r#"{"reason":"benchmark-complete","id":"anilang/lists/evaluator","unit":"s","typical":{"estimate":3.0},"change":{"change":"Improved","mean":{"estimate":-0.1}}}"#;
const UNCHANGED: &str = r#"{"reason":"benchmark-complete","id":"misc/unchanged","unit":"ns","typical":{"estimate":12.5}}"#;
const ARTIFACT: &str = r#"{"reason":"compiler-artifact","package_id":"anilang 0.1.0","target":{"name":"anilang"}}"#;

fn row_for(line: &str) -> String {
    let ParsedLine::Benchmark(record) = parse_line(1, line).unwrap() else {
        panic!("expected benchmark record");
    };
    FormattedRow::from_record(&record).to_string()
}

fn run(lines: &[&str], threshold: f64) -> (Result<usize, BenchReportError>, String) {
    let input = lines.join("\n");
    let mut out = Vec::new();
    let result = format_report(input.as_bytes(), &mut out, threshold).map(|s| s.rows);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_row_with_change_bumps_current_unit() {
    assert_eq!(
        row_for(LEXER),
        "| suite/lexer | 500.0 us | 550.0 us | +50.0 us | +10.0% | No change |"
    );
}

#[test]
fn test_row_without_change_uses_placeholders() {
    assert_eq!(
        row_for(LEXER_NO_CHANGE),
        "| suite/lexer | 500.0 us | - | - | - | - |"
    );
    assert_eq!(row_for(UNCHANGED), "| misc/unchanged | 12.5 ns | - | - | - | - |");
}

#[test]
fn test_previous_and_diff_are_capped_at_current_unit() {
    let line = r#"{"reason":"benchmark-complete","id":"cap/eval","unit":"ns","typical":{"estimate":900000},"change":{"change":"Regressed","mean":{"estimate":0.5}}}"#;
    assert_eq!(
        row_for(line),
        "| cap/eval | 900.0 us | 1350.0 us | +450.0 us | +50.0% | Regressed |"
    );
    assert_eq!(
        row_for(STRINGS_PARSER),
        "| anilang/strings/parser | 1.2 us | 1.26 us | +60.0 ns | +5.0% | Regressed |"
    );
}

#[test]
fn test_negative_and_zero_changes_are_signed_once() {
    assert_eq!(
        row_for(LISTS_EVAL),
        "| anilang/lists/evaluator | 3.0 s | 2.7 s | -0.3 s | -10.0% | Improved |"
    );
    let zero = r#"{"reason":"benchmark-complete","id":"z/lexer","unit":"ns","typical":{"estimate":42},"change":{"change":"NoChange","mean":{"estimate":0.0}}}"#;
    assert_eq!(
        row_for(zero),
        "| z/lexer | 42.0 ns | 42.0 ns | +0.0 ns | +0.0% | No change |"
    );
}

#[test]
fn test_full_report_with_trend_table() {
    let (result, out) = run(
        &[
            ARTIFACT,
            LEXER,
            ARITH_PARSER,
            STRINGS_PARSER,
            LISTS_EVAL,
            UNCHANGED,
        ],
        DEFAULT_TREND_THRESHOLD,
    );
    assert_eq!(result.unwrap(), 5);
    let expected = "\
| benchmark | current time | previous time | diff | diff% | change |
| --------- | ------------ | ------------- | ---- | ----- | ------ |
| suite/lexer | 500.0 us | 550.0 us | +50.0 us | +10.0% | No change |
| anilang/arith/parser | 2.0 ms | 2.06 ms | +0.06 ms | +3.0% | Regressed |
| anilang/strings/parser | 1.2 us | 1.26 us | +60.0 ns | +5.0% | Regressed |
| anilang/lists/evaluator | 3.0 s | 2.7 s | -0.3 s | -10.0% | Improved |
| misc/unchanged | 12.5 ns | - | - | - | - |

| category | average diff% | trend |
| -------- | ------------- | ----- |
| lexer | +10.0% | Regressed |
| parser | +4.0% | Regressed |
| evaluator | -10.0% | Improved |
";
    assert_eq!(out, expected);
}

#[test]
fn test_threshold_changes_classification() {
    let (_, out) = run(&[ARITH_PARSER, STRINGS_PARSER], 5.0);
    assert!(out.ends_with("| parser | +4.0% | No Change |\n"), "{out}");
    assert_eq!(Trend::classify(4.0, 5.0), Trend::NoChange);
}

#[test]
fn test_categories_without_changes_are_omitted() {
    let (_, out) = run(&[LEXER_NO_CHANGE, UNCHANGED], DEFAULT_TREND_THRESHOLD);
    assert!(out.ends_with("| category | average diff% | trend |\n| -------- | ------------- | ----- |\n"));
}

#[test]
fn test_empty_input_writes_both_headers() {
    let (result, out) = run(&[], DEFAULT_TREND_THRESHOLD);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(out.lines().count(), 5);
    assert!(out.starts_with("| benchmark |"));
}

#[test]
fn test_malformed_line_aborts_after_earlier_rows() {
    let (result, out) = run(&[LEXER, "{\"reason\": "], DEFAULT_TREND_THRESHOLD);
    assert!(matches!(result, Err(BenchReportError::MalformedJson { line: 2, .. })));
    assert!(out.contains("| suite/lexer | 500.0 us |"));
    assert!(!out.contains("| category |"));
}

#[test]
fn test_missing_fields_and_unknown_units_are_fatal() {
    let missing = r#"{"reason":"benchmark-complete","id":"x/y","unit":"ns"}"#;
    let (result, _) = run(&[missing], DEFAULT_TREND_THRESHOLD);
    assert!(matches!(result, Err(BenchReportError::InvalidRecord { line: 1, .. })));

    let bad_unit = r#"{"reason":"benchmark-complete","id":"x/y","unit":"min","typical":{"estimate":1}}"#;
    let (result, _) = run(&[ARTIFACT, bad_unit], DEFAULT_TREND_THRESHOLD);
    assert!(matches!(result, Err(BenchReportError::InvalidRecord { line: 2, .. })));
}

#[test]
fn test_non_string_reason_is_skipped() {
    let mut out = Vec::new();
    let input = format!("{{\"reason\":7}}\n{LEXER}\n");
    let summary = format_report(input.as_bytes(), &mut out, DEFAULT_TREND_THRESHOLD).unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.rows, 1);
}
