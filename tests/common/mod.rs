//! Common test utilities
//!
//! The regression suites run against a fixture lexicon instead of a real
//! Sudachi dictionary, so they are deterministic and need no dictionary
//! download. The lexicon covers exactly the vocabulary of the catalog titles
//! exercised by the tests, segmented the way UniDic-style dictionaries
//! segment them (long units keep compounds whole, short units split them).

use std::sync::Arc;
use wariai::morphology::{LexiconTagger, SharedTagger, NOUN_POS};
use wariai::normalize::EntityNormalizer;
use wariai::parser::RatioTitleParser;

const PARTICLE: &str = "助詞";
const VERB: &str = "動詞";
const ADJECTIVE: &str = "形容詞";
const AUXILIARY: &str = "助動詞";
const SYMBOL: &str = "補助記号";

/// Long-unit nouns seen at the subject position of the test titles
const LONG_NOUNS: &[&str] = &[
    "人",
    "X",
    "日本",
    "日本人",
    "会社",
    "一生",
    "家",
    "原因",
    "病状経過",
    "早期対応",
    "美容",
    "美肌",
    "不動産投資",
    "不良品",
    "工場",
    "部下",
    "育成",
    "まんが",
    "疲れ",
    "株",
    "デザイン",
    "無印良品",
    "ひとり",
    "終活",
    "痛み",
    "古典",
    "マスコミ",
    "入札参加資格申請",
    "リーダー",
    "見た目",
    "夢",
    "努力",
];

/// Long-unit non-noun vocabulary
const LONG_OTHERS: &[(&str, &str)] = &[
    ("の", PARTICLE),
    ("と", PARTICLE),
    ("が", PARTICLE),
    ("儲かる", VERB),
    ("長引く", VERB),
    ("多い", ADJECTIVE),
    ("太ら", VERB),
    ("老け", VERB),
    ("ない", AUXILIARY),
    ("、", SYMBOL),
    ("。", SYMBOL),
];

/// Short-unit vocabulary used by the aggregation tests
const SHORT_NOUNS: &[&str] = &[
    "住宅", "営業", "初回", "面談", "準備", "会社", "人", "見た目", "家",
];

/// Build the fixture tagger shared by the suites
pub fn fixture_tagger() -> SharedTagger {
    let mut tagger = LexiconTagger::new();

    for noun in LONG_NOUNS {
        tagger.add_long(noun, NOUN_POS);
    }
    for (surface, pos) in LONG_OTHERS {
        tagger.add_long(surface, pos);
    }
    for noun in SHORT_NOUNS {
        tagger.add_short(noun, NOUN_POS);
    }

    Arc::new(tagger)
}

/// Parser over the fixture tagger
pub fn fixture_parser() -> RatioTitleParser {
    RatioTitleParser::new(fixture_tagger())
}

/// Normalizer over the fixture tagger
pub fn fixture_normalizer() -> EntityNormalizer {
    EntityNormalizer::new(fixture_tagger())
}
