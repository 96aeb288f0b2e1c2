//! Stateless field parsers and the per-line transaction classifier.

pub mod amount;
pub mod date;
pub mod header;
pub mod line;

pub use amount::parse_amount;
pub use date::parse_date;
pub use header::HeaderExtractor;
pub use line::LineParser;
