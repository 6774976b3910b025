//! Integration tests for the header analyzer over a realistic captured
//! header block.

use std::path::Path;

use mailtrace::parser::analyze::analyze;
use mailtrace::parser::received::parse_hop;

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).expect("fixture readable")
}

// ─── Tokenization ───────────────────────────────────────────────────

#[test]
fn test_entry_count_and_order() {
    let model = analyze(&fixture("sample_headers.txt"));
    assert_eq!(model.entries.len(), 14);
    assert_eq!(model.entries[0].name, "Received");
    assert_eq!(model.entries[4].name, "From");
    assert_eq!(model.entries[13].name, "X-Custom-Thing");
}

#[test]
fn test_folded_values_are_joined() {
    let model = analyze(&fixture("sample_headers.txt"));
    let auth = model
        .entries
        .iter()
        .find(|e| e.name == "Authentication-Results")
        .unwrap();
    assert!(auth.value.contains("spf=pass"));
    assert!(auth.value.contains("dkim=pass"));
    assert!(!auth.value.contains('\n'));
}

// ─── Summary ────────────────────────────────────────────────────────

#[test]
fn test_summary_values_decoded() {
    let model = analyze(&fixture("sample_headers.txt"));
    assert_eq!(model.summary_value("Subject"), "Café con leña");
    assert!(model.summary_value("From").contains("José García"));
    assert_eq!(model.summary_value("To"), "user@example.org");
}

#[test]
fn test_summary_date_is_display_formatted() {
    let model = analyze(&fixture("sample_headers.txt"));
    assert_eq!(model.summary_value("Date"), "4/21/2018 3:01:31 AM");
}

// ─── Relay trace ────────────────────────────────────────────────────

#[test]
fn test_hops_are_chronological_and_numbered() {
    let model = analyze(&fixture("sample_headers.txt"));
    assert_eq!(model.hops.len(), 4);

    let hop_numbers: Vec<usize> = model.hops.iter().map(|h| h.hop).collect();
    assert_eq!(hop_numbers, [1, 2, 3, 4]);

    // Oldest hop first after reversal.
    assert_eq!(model.hops[0].by.as_deref(), Some("smtp.sender.test"));
    assert_eq!(
        model.hops[3].by.as_deref(),
        Some("MWHPR14MB1488.namprd14.prod.outlook.com")
    );

    // Timestamps strictly increasing across this trace.
    let times: Vec<i64> = model.hops.iter().filter_map(|h| h.date_num).collect();
    assert_eq!(times.len(), 4);
    assert!(times.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_postfix_hop_repair_in_context() {
    let model = analyze(&fixture("sample_headers.txt"));
    let postfix = &model.hops[1];
    assert_eq!(
        postfix.by.as_deref(),
        Some("example.com (Postfix, from userid 1001)")
    );
    assert_eq!(postfix.id.as_deref(), Some("1234ABCD"));
    assert!(postfix.from.is_none());
}

#[test]
fn test_delays_and_percentages() {
    let model = analyze(&fixture("sample_headers.txt"));

    // First hop has no predecessor: sentinel values.
    assert_eq!(model.hops[0].delay_sort, -1);
    assert!(model.hops[0].delay.is_none());
    assert_eq!(model.hops[0].percent, 0.0);

    // 1s + 1s + 2s across the chain.
    assert_eq!(model.hops[1].delay_sort, 1_000);
    assert_eq!(model.hops[1].delay.as_deref(), Some("1 second"));
    assert_eq!(model.hops[3].delay_sort, 2_000);
    assert_eq!(model.hops[3].delay.as_deref(), Some("2 seconds"));

    assert!((model.hops[1].percent - 25.0).abs() < 1e-9);
    assert!((model.hops[3].percent - 50.0).abs() < 1e-9);
    let percent_sum: f64 = model.hops.iter().map(|h| h.percent).sum();
    assert!(percent_sum <= 100.0 + 1e-9);

    assert_eq!(model.total_delay.as_deref(), Some("4 seconds"));
}

#[test]
fn test_hop_source_header_is_verbatim_value() {
    let model = analyze(&fixture("sample_headers.txt"));
    for hop in &model.hops {
        assert!(!hop.source_header.is_empty());
    }
    assert!(model.hops[0].source_header.contains("localhost"));
}

// ─── Antispam reports ───────────────────────────────────────────────

#[test]
fn test_microsoft_report() {
    let model = analyze(&fixture("sample_headers.txt"));
    let report = &model.microsoft_report;
    assert!(report.exists());
    assert_eq!(report.value("BCL"), "1");
    assert_eq!(report.value("PCL"), "0");
    assert_eq!(report.value("source"), "BCL:1;PCL:0;");
}

#[test]
fn test_forefront_report_with_unparsed_residue() {
    let model = analyze(&fixture("sample_headers.txt"));
    let report = &model.forefront_report;
    assert!(report.exists());
    assert_eq!(report.value("CTRY"), "US");
    assert_eq!(report.value("SCL"), "1");
    assert_eq!(report.value("SFS"), "(13024025)(8156002)");
    assert_eq!(report.value("H"), "mail-ot1-f54.google.com");
    // UIP is not a declared Forefront key; its (null) value is stripped.
    assert_eq!(report.value("unparsed"), "UIP:;");
}

// ─── Other headers ──────────────────────────────────────────────────

#[test]
fn test_other_bucket_membership_and_urls() {
    let model = analyze(&fixture("sample_headers.txt"));

    let names: Vec<&str> = model.other.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(
        names,
        ["Authentication-Results", "MIME-Version", "X-Custom-Thing"]
    );

    let auth = &model.other[0];
    assert!(auth.url.is_some());
    let custom = &model.other[2];
    assert!(custom.url.is_none());

    let numbers: Vec<usize> = model.other.iter().map(|h| h.number).collect();
    assert_eq!(numbers, [1, 2, 3]);
}

// ─── Degenerate input ───────────────────────────────────────────────

#[test]
fn test_empty_block() {
    let model = analyze("");
    assert!(model.entries.is_empty());
    assert!(model.hops.is_empty());
    assert!(model.total_delay.is_none());
    assert!(!model.microsoft_report.exists());
    assert!(!model.forefront_report.exists());
}

#[test]
fn test_received_with_empty_value_yields_sentinel_hop() {
    let model = analyze("Received:\n");
    assert_eq!(model.hops.len(), 1);
    let hop = &model.hops[0];
    assert_eq!(hop.delay_sort, -1);
    assert_eq!(hop.percent, 0.0);
    assert!(hop.date_num.is_none());
    assert_eq!(hop.hop, 1);
}

#[test]
fn test_standalone_hop_example() {
    let hop = parse_hop("test; Sat, 21 Apr 2018 03:01:32 +0000");
    assert_eq!(hop.date_num, Some(1_524_279_692_000));
}

// ─── Serialization ──────────────────────────────────────────────────

#[test]
fn test_json_output_field_names() {
    let model = analyze(&fixture("sample_headers.txt"));
    let json = serde_json::to_value(&model).unwrap();

    // The `for` clause keeps its wire name in JSON output.
    assert!(json["hops"][0]["for"].is_string());
    assert_eq!(json["hops"][0]["hop"], 1);
    assert!(json["total_delay"].is_string());
    assert!(json["forefront_report"]["fields"].is_array());
}
