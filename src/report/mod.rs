//! Run-summary rendering with the Handlebars template engine
//!
//! Renders one Markdown document per run: harvest volume, match rate, the
//! top rankings, the ratio histogram and graph findings. The default
//! template is compiled in; a custom template file can replace it.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analytics::{MatchStats, RankingEntry};
use crate::graph::cycles::CycleReport;

/// Default report template
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/report.hbs");

/// Number of ranking rows shown in the rendered report
const RANKING_PREVIEW_ROWS: usize = 20;

/// One histogram row in the rendered report
#[derive(Debug, Clone, Serialize)]
pub struct HistogramRow {
    pub c: u8,
    pub count: usize,
}

/// One cycle row in the rendered report
#[derive(Debug, Clone, Serialize)]
pub struct CycleRow {
    pub path: String,
    pub length: usize,
}

/// Template data for the run summary
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub generated_at: String,
    pub total_titles: usize,
    pub matched_titles: usize,
    pub match_rate: String,
    pub subject_ranking: Vec<RankingEntry>,
    pub predicate_ranking: Vec<RankingEntry>,
    pub histogram: Vec<HistogramRow>,
    pub node_count: usize,
    pub edge_count: usize,
    pub cycles: Vec<CycleRow>,
    pub longest_path: String,
}

impl ReportData {
    /// Assemble template data from pipeline outputs
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stats: MatchStats,
        subject_ranking: &[RankingEntry],
        predicate_ranking: &[RankingEntry],
        histogram: &std::collections::BTreeMap<u8, usize>,
        node_count: usize,
        edge_count: usize,
        cycle_reports: &[CycleReport],
        longest_path: &[String],
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            total_titles: stats.total,
            matched_titles: stats.matched,
            match_rate: format!("{:.1}%", stats.match_rate_percent()),
            subject_ranking: subject_ranking
                .iter()
                .take(RANKING_PREVIEW_ROWS)
                .cloned()
                .collect(),
            predicate_ranking: predicate_ranking
                .iter()
                .take(RANKING_PREVIEW_ROWS)
                .cloned()
                .collect(),
            histogram: histogram
                .iter()
                .map(|(c, count)| HistogramRow {
                    c: *c,
                    count: *count,
                })
                .collect(),
            node_count,
            edge_count,
            cycles: cycle_reports
                .iter()
                .map(|report| CycleRow {
                    path: report.path_string(),
                    length: report.nodes.len(),
                })
                .collect(),
            longest_path: longest_path.join(" -> "),
        }
    }
}

/// Markdown report writer with Handlebars template engine
pub struct ReportWriter<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> ReportWriter<'a> {
    /// Create a writer with the default template
    ///
    /// # Errors
    ///
    /// Fails when the compiled-in template does not register, which would be
    /// a packaging defect.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string("report", DEFAULT_TEMPLATE)
            .context("Failed to register default report template")?;
        Ok(Self { handlebars })
    }

    /// Create a writer with a custom template file
    ///
    /// # Errors
    ///
    /// Fails when the template file cannot be read or parsed.
    pub fn with_template(template_path: &Path) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_file("report", template_path)
            .with_context(|| format!("Failed to register template: {}", template_path.display()))?;
        Ok(Self { handlebars })
    }

    /// Render the report to a Markdown string
    ///
    /// # Errors
    ///
    /// Fails when the template rejects the data.
    pub fn render(&self, data: &ReportData) -> Result<String> {
        self.handlebars
            .render("report", data)
            .context("Failed to render report template")
    }

    /// Render and save the report
    ///
    /// # Errors
    ///
    /// Fails on render or I/O errors.
    pub fn save(&self, path: &Path, data: &ReportData) -> Result<PathBuf> {
        let rendered = self.render(data)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, rendered)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_data() -> ReportData {
        let stats = MatchStats {
            total: 200,
            matched: 50,
        };
        let subject = vec![RankingEntry {
            key: "人".to_string(),
            c_sum: 27.0,
            n: 3,
            examples: "人は見た目が9割".to_string(),
        }];
        let predicate = vec![RankingEntry {
            key: "見た目".to_string(),
            c_sum: 18.0,
            n: 2,
            examples: "人は見た目が9割".to_string(),
        }];
        let histogram = BTreeMap::from([(9u8, 45usize), (10u8, 5usize)]);

        ReportData::new(
            stats,
            &subject,
            &predicate,
            &histogram,
            12,
            17,
            &[],
            &["営業".to_string(), "面談".to_string()],
        )
    }

    #[test]
    fn test_render_contains_sections() {
        let writer = ReportWriter::new().unwrap();
        let rendered = writer.render(&sample_data()).unwrap();

        assert!(rendered.contains("# Ratio Title Report"));
        assert!(rendered.contains("50 / 200"));
        assert!(rendered.contains("25.0%"));
        assert!(rendered.contains("人"));
        assert!(rendered.contains("見た目"));
        assert!(rendered.contains("営業 -> 面談"));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports").join("run.md");

        let writer = ReportWriter::new().unwrap();
        let saved = writer.save(&path, &sample_data()).unwrap();

        assert!(saved.exists());
    }
}
