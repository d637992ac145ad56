pub mod extract;
pub mod graph;
pub mod harvest;
pub mod rank;
pub mod report;
pub mod tagger;

// Re-export command functions for convenience
pub use extract::extract;
pub use graph::graph;
pub use harvest::{harvest, harvest_books};
pub use rank::rank;
pub use report::report;
pub use tagger::build_tagger;
