//! CSV export of persisted transaction rows.

use anyhow::{Context, Result};
use resumen_core::TransactionRecord;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Flat CSV row; categories and currencies are written as their labels.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: u64,
    statement_id: u64,
    date: String,
    merchant: &'a str,
    amount: String,
    currency: &'static str,
    category: &'static str,
    description: &'a str,
}

impl<'a> From<&'a TransactionRecord> for CsvRow<'a> {
    fn from(r: &'a TransactionRecord) -> Self {
        Self {
            id: r.id,
            statement_id: r.statement_id,
            date: r.date.format("%Y-%m-%d").to_string(),
            merchant: &r.merchant,
            amount: format!("{:.2}", r.amount),
            currency: r.currency.code(),
            category: r.category.label(),
            description: r.description.as_deref().unwrap_or(""),
        }
    }
}

/// Write records as CSV (with a header row) to any writer.
pub fn write_records_csv<W: Write>(writer: W, records: &[TransactionRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(CsvRow::from(record))?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write records to a CSV file, replacing it if it exists.
pub fn export_records_csv(path: impl AsRef<Path>, records: &[TransactionRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_records_csv(file, records).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use resumen_core::{Category, Currency};

    fn records() -> Vec<TransactionRecord> {
        vec![
            TransactionRecord {
                id: 1,
                statement_id: 3,
                date: NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
                merchant: "PUPPIS".to_string(),
                amount: 46500.0,
                currency: Currency::Local,
                category: Category::Pets,
                description: Some("Cupón: 02842".to_string()),
            },
            TransactionRecord {
                id: 2,
                statement_id: 3,
                date: NaiveDate::from_ymd_opt(2025, 12, 13).unwrap(),
                merchant: "NETFLIX.COM, INC".to_string(),
                amount: 17.63,
                currency: Currency::Foreign,
                category: Category::Subscriptions,
                description: None,
            },
        ]
    }

    #[test]
    fn test_write_records_csv() {
        let mut out = Vec::new();
        write_records_csv(&mut out, &records()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "id,statement_id,date,merchant,amount,currency,category,description");
        assert_eq!(lines[1], "1,3,2025-11-30,PUPPIS,46500.00,ARS,Mascotas,Cupón: 02842");
        assert_eq!(lines[2], "2,3,2025-12-13,\"NETFLIX.COM, INC\",17.63,USD,Suscripciones,");
    }

    #[test]
    fn test_export_records_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        export_records_csv(&path, &records()).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = rdr.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][6], "Mascotas");
    }
}
