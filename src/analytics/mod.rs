//! Ranking and distribution summaries over extraction tables
//!
//! This module provides the aggregations downstream of the parser:
//! - Extraction pass over a harvested title table with match-rate stats
//! - Subject (A) and predicate (B) rankings by summed ratio weight
//! - Detailed per-predicate ranking with a normalized subject breakdown
//! - Ratio-value histogram

use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{ExtractedRecord, TitleRecord};
use crate::normalize::EntityNormalizer;
use crate::parser::RatioTitleParser;

/// Which clause side a ranking groups by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    /// Group by the A side (the clause subject)
    Subject,

    /// Group by the B side (the clause predicate)
    Predicate,
}

/// Outcome counts of one extraction pass
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MatchStats {
    /// Titles seen
    pub total: usize,

    /// Titles that yielded a valid ratio clause
    pub matched: usize,
}

impl MatchStats {
    /// Matched share as a percentage
    pub fn match_rate_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.matched as f64 / self.total as f64) * 100.0
        }
    }
}

/// Run the parser over a title table, keeping only matched rows
pub fn extract_titles(
    parser: &RatioTitleParser,
    titles: &[TitleRecord],
) -> (Vec<ExtractedRecord>, MatchStats) {
    let mut extracted = Vec::new();

    for title in titles {
        if let Some(triple) = parser.parse(&title.title_raw) {
            extracted.push(ExtractedRecord::from_parts(title, &triple));
        }
    }

    let stats = MatchStats {
        total: titles.len(),
        matched: extracted.len(),
    };

    tracing::info!(
        total = stats.total,
        matched = stats.matched,
        rate = %format!("{:.1}%", stats.match_rate_percent()),
        "Extraction pass complete"
    );

    (extracted, stats)
}

/// One row of a subject or predicate ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    /// Grouping key (a_raw or b_raw)
    pub key: String,

    /// Summed ratio weight across all titles in the group
    pub c_sum: f64,

    /// Number of titles in the group
    pub n: usize,

    /// Up to three representative titles, joined with " / "
    pub examples: String,
}

/// Group-by-sum ranking over the chosen clause side
///
/// Sorted by summed weight, then count, both descending; ties resolve by key
/// so the order is reproducible.
pub fn build_ranking(records: &[ExtractedRecord], by: RankBy) -> Vec<RankingEntry> {
    let mut groups: BTreeMap<&str, (f64, usize, Vec<&str>)> = BTreeMap::new();

    for record in records {
        let key = match by {
            RankBy::Subject => record.a_raw.as_str(),
            RankBy::Predicate => record.b_raw.as_str(),
        };

        let group = groups.entry(key).or_insert((0.0, 0, Vec::new()));
        group.0 += record.c_value;
        group.1 += 1;
        if group.2.len() < 3 {
            group.2.push(record.title_raw.as_str());
        }
    }

    let mut ranking: Vec<RankingEntry> = groups
        .into_iter()
        .map(|(key, (c_sum, n, examples))| RankingEntry {
            key: key.to_string(),
            c_sum,
            n,
            examples: examples.join(" / "),
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.c_sum
            .total_cmp(&a.c_sum)
            .then_with(|| b.n.cmp(&a.n))
            .then_with(|| a.key.cmp(&b.key))
    });

    ranking
}

/// Per-subject slice of a predicate's detailed ranking
#[derive(Debug, Clone, Serialize)]
pub struct SubjectBreakdown {
    /// Normalized subject (short-unit last noun)
    pub a: String,

    /// Summed ratio weight for this subject under the predicate
    pub c_sum: f64,

    /// Number of contributing titles
    pub count: usize,

    /// Contributing raw titles
    pub titles: Vec<String>,
}

/// One predicate's entry in the detailed ranking
#[derive(Debug, Clone, Serialize)]
pub struct PredicateRanking {
    /// Predicate (b_raw)
    pub b: String,

    /// Summed ratio weight across all titles with this predicate
    pub c_sum: f64,

    /// Number of contributing titles
    pub count: usize,

    /// Subjects claiming this predicate, heaviest first
    pub a_breakdown: Vec<SubjectBreakdown>,
}

/// Metadata block of the detailed ranking document
#[derive(Debug, Clone, Serialize)]
pub struct RankingMetadata {
    pub total_titles: usize,
    pub total_b_categories: usize,
    pub generated_at: String,
}

/// Detailed predicate ranking with per-subject breakdowns
#[derive(Debug, Clone, Serialize)]
pub struct DetailedRanking {
    pub rankings: Vec<PredicateRanking>,
    pub metadata: RankingMetadata,
}

/// Build the detailed predicate ranking document
///
/// Subjects are normalized to their short-unit last noun before the
/// breakdown, so variants like 住宅営業 and 営業 fold together.
pub fn build_detailed_ranking(
    normalizer: &EntityNormalizer,
    records: &[ExtractedRecord],
) -> DetailedRanking {
    let mut by_predicate: BTreeMap<&str, Vec<&ExtractedRecord>> = BTreeMap::new();
    for record in records {
        by_predicate.entry(&record.b_raw).or_default().push(record);
    }

    let mut rankings: Vec<PredicateRanking> = by_predicate
        .into_iter()
        .map(|(b, rows)| {
            let c_sum: f64 = rows.iter().map(|r| r.c_value).sum();

            let mut by_subject: BTreeMap<String, Vec<&ExtractedRecord>> = BTreeMap::new();
            for &row in &rows {
                by_subject
                    .entry(normalizer.last_noun(&row.a_raw))
                    .or_default()
                    .push(row);
            }

            let mut a_breakdown: Vec<SubjectBreakdown> = by_subject
                .into_iter()
                .map(|(a, subject_rows)| SubjectBreakdown {
                    a,
                    c_sum: subject_rows.iter().map(|r| r.c_value).sum(),
                    count: subject_rows.len(),
                    titles: subject_rows.iter().map(|r| r.title_raw.clone()).collect(),
                })
                .collect();
            a_breakdown.sort_by(|x, y| {
                y.c_sum.total_cmp(&x.c_sum).then_with(|| x.a.cmp(&y.a))
            });

            PredicateRanking {
                b: b.to_string(),
                c_sum,
                count: rows.len(),
                a_breakdown,
            }
        })
        .collect();

    rankings.sort_by(|x, y| y.c_sum.total_cmp(&x.c_sum).then_with(|| x.b.cmp(&y.b)));

    DetailedRanking {
        metadata: RankingMetadata {
            total_titles: records.len(),
            total_b_categories: rankings.len(),
            generated_at: Utc::now().to_rfc3339(),
        },
        rankings,
    }
}

/// Count titles per ratio value
pub fn ratio_histogram(records: &[ExtractedRecord]) -> BTreeMap<u8, usize> {
    let mut histogram = BTreeMap::new();
    for record in records {
        let bucket = record.c_value.round() as u8;
        *histogram.entry(bucket).or_insert(0) += 1;
    }
    histogram
}
