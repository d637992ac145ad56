//! Extraction-to-ranking pipeline tests

mod common;

use common::{fixture_normalizer, fixture_parser};
use wariai::analytics::{
    build_detailed_ranking, build_ranking, extract_titles, ratio_histogram, RankBy,
};
use wariai::models::{TitleRecord, SOURCE_NDL_SRU};

fn titles(raw: &[&str]) -> Vec<TitleRecord> {
    raw.iter()
        .map(|t| TitleRecord::new(SOURCE_NDL_SRU, *t, None))
        .collect()
}

#[test]
fn test_extract_titles_keeps_only_matches() {
    let titles = titles(&[
        "人は見た目が9割",
        "日経ヘルス",
        "家は見た目が九割だけど…",
        "「見た目が9割」内定術",
    ]);

    let (records, stats) = extract_titles(&fixture_parser(), &titles);

    assert_eq!(stats.total, 4);
    assert_eq!(stats.matched, 2);
    assert!((stats.match_rate_percent() - 50.0).abs() < f64::EPSILON);

    assert_eq!(records[0].a_raw, "人");
    assert_eq!(records[0].b_raw, "見た目");
    assert!((records[0].c_value - 9.0).abs() < f64::EPSILON);
    assert_eq!(records[0].title_raw, "人は見た目が9割");
    assert_eq!(records[1].a_raw, "家");
}

#[test]
fn test_rankings_from_extracted_records() {
    let titles = titles(&[
        "人は見た目が9割",
        "人は話し方が9割",
        "家は見た目が九割だけど…",
    ]);
    let (records, _) = extract_titles(&fixture_parser(), &titles);

    let subjects = build_ranking(&records, RankBy::Subject);
    assert_eq!(subjects[0].key, "人");
    assert!((subjects[0].c_sum - 18.0).abs() < f64::EPSILON);
    assert_eq!(subjects[0].n, 2);
    assert_eq!(subjects[0].examples, "人は見た目が9割 / 人は話し方が9割");

    let predicates = build_ranking(&records, RankBy::Predicate);
    assert_eq!(predicates[0].key, "見た目");
    assert!((predicates[0].c_sum - 18.0).abs() < f64::EPSILON);

    let histogram = ratio_histogram(&records);
    assert_eq!(histogram.get(&9), Some(&3));
}

#[test]
fn test_detailed_ranking_serializes() {
    let titles = titles(&["人は見た目が9割", "家は見た目が九割だけど…"]);
    let (records, _) = extract_titles(&fixture_parser(), &titles);

    let detailed = build_detailed_ranking(&fixture_normalizer(), &records);
    let json = serde_json::to_value(&detailed).unwrap();

    assert_eq!(json["metadata"]["total_titles"], 2);
    assert_eq!(json["metadata"]["total_b_categories"], 1);
    assert_eq!(json["rankings"][0]["b"], "見た目");
    assert_eq!(json["rankings"][0]["count"], 2);
    assert_eq!(json["rankings"][0]["a_breakdown"].as_array().unwrap().len(), 2);
}
