//! Rule engine: decides which declarations need a protecting try/catch.

pub mod engine;
pub mod matcher;
pub mod predicates;
pub mod suppression;
pub mod types;

pub use engine::RuleEngine;
pub use suppression::SuppressionChecker;
pub use types::*;
