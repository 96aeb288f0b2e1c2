//! resumen-finance: merchant category rules, the statement importer and CSV export

pub mod category_rules;
pub mod export;
pub mod store;

pub use category_rules::categorize;
pub use export::{export_records_csv, write_records_csv};
pub use store::{
    ImportOptions, ImportReport, MemoryStore, NewStatement, NewTransaction, StatementStore,
    StoredStatement, import_statement,
};
