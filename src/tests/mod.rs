use serde_json::json;

use crate::layout::TableLayout;
use crate::output::Renderer;
use crate::signal::{Collection, Signal};
use crate::view::{self, OverlayState, ViewState, DEFAULT_PAGE_SIZE};

fn signal(value: serde_json::Value) -> Signal {
    serde_json::from_value(value).unwrap()
}

fn numbered(n: usize) -> Collection {
    (0..n)
        .map(|i| {
            signal(json!({
                "Company Name": format!("Company {i}"),
                "Domain": format!("c{i}.example"),
                "Rank": i + 1
            }))
        })
        .collect()
}

fn mixed() -> Collection {
    vec![
        signal(json!({"Company Name": "Acme Robotics", "Domain": "acme.io", "Rank": 1})),
        signal(json!({"Company Name": "acme labs", "Domain": "labs.dev", "Rank": 2})),
        signal(json!({"Company Name": "Globex", "Domain": "globex-acme.com", "Rank": 3})),
        signal(json!({"Company Name": 404, "Domain": "numeric.name", "Rank": 4})),
        signal(json!({"Domain": "no-name.io", "Rank": 5})),
        signal(json!({"Company Name": "Initech", "Rank": 6})),
        signal(json!({"Company Name": "Umbrella", "Domain": null, "Rank": 7})),
    ]
    .into_iter()
    .collect()
}

fn ranks(rows: &[Signal]) -> Vec<u64> {
    rows.iter()
        .filter_map(|s| s.rank().and_then(|r| r.as_u64()))
        .collect()
}

fn contains_in_name_or_domain(s: &Signal, needle: &str) -> bool {
    s.name().is_some_and(|n| n.contains(needle)) || s.domain().is_some_and(|d| d.contains(needle))
}

#[test]
fn filter_partitions_by_name_or_domain() {
    let c = mixed();
    for needle in ["acme", "Acme", "a", ".io", "Globex", "404", "zzz", "e"] {
        let kept = view::filter_signals(c.as_slice(), needle);
        for s in kept.iter() {
            assert!(contains_in_name_or_domain(s, needle), "kept {s:?} for {needle}");
        }
        let excluded = c
            .iter()
            .filter(|s| !kept.iter().any(|k| std::ptr::eq(*k, *s)));
        for s in excluded {
            assert!(!contains_in_name_or_domain(s, needle), "dropped {s:?} for {needle}");
        }
    }
}

#[test]
fn filter_is_case_sensitive() {
    let c = mixed();
    let upper = view::filter_signals(c.as_slice(), "Acme");
    let lower = view::filter_signals(c.as_slice(), "acme");
    assert_eq!(ranks(&upper.into_iter().cloned().collect::<Vec<_>>()), vec![1]);
    assert_eq!(
        ranks(&lower.into_iter().cloned().collect::<Vec<_>>()),
        vec![1, 2, 3]
    );
}

#[test]
fn numeric_name_never_matches() {
    let c = mixed();
    assert!(view::filter_signals(c.as_slice(), "404").is_empty());
}

#[test]
fn empty_filter_returns_everything_in_order() {
    let c = mixed();
    let all = view::filter_signals(c.as_slice(), "");
    assert_eq!(all.len(), c.len());
    for (a, b) in all.iter().zip(c.iter()) {
        assert!(std::ptr::eq(*a, b));
    }
}

#[test]
fn page_count_law() {
    assert_eq!(view::page_count(0), 0);
    for n in 1..=DEFAULT_PAGE_SIZE {
        assert_eq!(view::page_count(n), 1);
    }
    assert_eq!(view::page_count(11), 2);
    assert_eq!(view::page_count(20), 2);
    assert_eq!(view::page_count(21), 3);
    assert_eq!(view::page_count(101), 11);
}

#[test]
fn interior_pages_hold_nine_rows() {
    let c = numbered(45);
    for p in 2..=4usize {
        let v = view::derive(&c, "", p);
        let expected: Vec<u64> = (((p - 1) * 10)..=(p * 10 - 2))
            .map(|i| i as u64 + 1)
            .collect();
        assert_eq!(v.rows.len(), 9);
        assert_eq!(ranks(&v.rows), expected);
    }
    assert_eq!(view::derive(&c, "", 1).rows.len(), 9);
}

#[test]
fn out_of_range_page_falls_back_to_first_ten() {
    let c = numbered(15);
    for p in [3usize, 7, 1000] {
        let v = view::derive(&c, "", p);
        assert_eq!(ranks(&v.rows), (1..=10).collect::<Vec<u64>>());
    }
}

#[test]
fn narrowing_filter_on_late_page_shows_fallback() {
    let c = numbered(60);
    let mut state = ViewState {
        current_page: 5,
        ..ViewState::default()
    };
    state.set_filter("Company 1");
    // "Company 1" and "Company 10".."Company 19": eleven matches, two pages.
    let v = state.derive(&c);
    assert_eq!(v.page_count, 2);
    assert_eq!(v.filtered_count, 11);
    assert_eq!(v.rows.len(), 10);
    assert_eq!(v.rows[0].name(), Some("Company 1"));
}

#[test]
fn selecting_row_sets_ranking_label() {
    let c = numbered(3);
    let mut state = ViewState::default();
    let row = state.derive(&c).rows[2].clone();
    state.select_row(row);
    assert_eq!(state.overlay(), OverlayState::Open);
    let detail = state.detail(&[]).unwrap();
    assert_eq!(detail.ranking_label, "Ranking: 3");
    assert_eq!(detail.title, "Company 2");
}

#[test]
fn fifteen_records_scenario() {
    let c = numbered(15);
    let first = view::derive(&c, "", 1);
    assert_eq!(first.rows.len(), 9);
    assert_eq!(first.page_count, 2);

    let second = view::derive(&c, "", 2);
    assert_eq!(second.rows.len(), 5);
    assert_eq!(ranks(&second.rows), vec![11, 12, 13, 14, 15]);
}

#[test]
fn no_match_scenario_renders_no_rows_and_no_pages() {
    let c = numbered(15);
    let layout = TableLayout::embedded().unwrap();
    let state = ViewState {
        filter_text: "nothing matches this".to_string(),
        ..ViewState::default()
    };
    let v = state.derive(&c);
    assert!(v.rows.is_empty());
    assert_eq!(v.page_count, 0);

    let frame = Renderer::plain().frame(&layout, &state, &v);
    assert!(frame.contains("Pages: none"));
    // heading, blank, filter, pages, blank, table header, rule
    assert_eq!(frame.lines().count(), 7);
}

#[tokio::test]
async fn load_then_derive_from_file() {
    let path = std::env::temp_dir().join(format!("signalboard-e2e-{}.json", std::process::id()));
    let records: Vec<serde_json::Value> = (0..12)
        .map(|i| {
            json!({
                "Company Name": format!("Firm {i}"),
                "Domain": format!("f{i}.io"),
                "Rank": i + 1
            })
        })
        .collect();
    std::fs::write(&path, serde_json::to_vec(&records).unwrap()).unwrap();

    let collection = crate::loader::load(
        &crate::loader::DataSource::File(path.clone()),
        &crate::loader::LoaderOptions::default(),
    )
    .await
    .unwrap();
    let _ = std::fs::remove_file(&path);

    let v = view::derive(&collection, "f1", 1);
    // f1.io, f10.io, f11.io
    assert_eq!(ranks(&v.rows), vec![2, 11, 12]);
    assert_eq!(v.page_count, 1);
}
