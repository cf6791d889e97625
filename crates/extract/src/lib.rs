pub mod extractor;
pub mod rules;

pub use extractor::{extract, split_segments, ExtractedFields};
pub use rules::{FieldRule, RuleSet};
