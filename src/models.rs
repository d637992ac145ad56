// Core data structures for the wariai pipeline

use serde::{Deserialize, Serialize};

use crate::parser::RatioTriple;

/// Source tag for titles harvested from the NDL Search SRU API
pub const SOURCE_NDL_SRU: &str = "ndl_sru";

/// Source tag for titles harvested from the Google Books volumes API
pub const SOURCE_GOOGLE_BOOKS: &str = "google_books";

/// One harvested bibliographic title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    /// Which harvester produced this record
    pub source: String,

    /// Raw title string exactly as returned by the source
    pub title_raw: String,

    /// Source-specific identifier or URL, when available
    pub id_or_url: Option<String>,
}

impl TitleRecord {
    /// Create a record for the given source
    pub fn new(source: &str, title_raw: impl Into<String>, id_or_url: Option<String>) -> Self {
        Self {
            source: source.to_string(),
            title_raw: title_raw.into(),
            id_or_url,
        }
    }
}

/// A harvested title together with its parsed ratio clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Which harvester produced the underlying title
    pub source: String,

    /// Raw title string
    pub title_raw: String,

    /// Source-specific identifier or URL, when available
    pub id_or_url: Option<String>,

    /// Cleaned subject of the ratio clause
    pub a_raw: String,

    /// Cleaned predicate of the ratio clause
    pub b_raw: String,

    /// Ratio weight in tenths
    pub c_value: f64,
}

impl ExtractedRecord {
    /// Combine a title record with the triple parsed from it
    pub fn from_parts(title: &TitleRecord, triple: &RatioTriple) -> Self {
        Self {
            source: title.source.clone(),
            title_raw: title.title_raw.clone(),
            id_or_url: title.id_or_url.clone(),
            a_raw: triple.a.clone(),
            b_raw: triple.b.clone(),
            c_value: f64::from(triple.c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_record_from_parts() {
        let title = TitleRecord::new(SOURCE_NDL_SRU, "人は見た目が9割", None);
        let triple = RatioTriple {
            a: "人".to_string(),
            b: "見た目".to_string(),
            c: 9,
        };

        let record = ExtractedRecord::from_parts(&title, &triple);
        assert_eq!(record.source, SOURCE_NDL_SRU);
        assert_eq!(record.a_raw, "人");
        assert_eq!(record.b_raw, "見た目");
        assert!((record.c_value - 9.0).abs() < f64::EPSILON);
    }
}
