//! resumen-core: record types shared by the statement parser, the importer and the CLI

pub mod finance;

pub use finance::{Category, Currency, StatementRecord, TransactionRecord};
