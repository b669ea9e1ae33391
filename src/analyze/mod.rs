pub mod analyzer;
pub mod classifier;
pub mod model;

pub use analyzer::Analyzer;
pub use classifier::IssueClassifier;
pub use model::*;
