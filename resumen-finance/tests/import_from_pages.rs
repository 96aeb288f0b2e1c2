use chrono::NaiveDate;
use resumen_core::{Category, Currency};
use resumen_finance::{ImportOptions, MemoryStore, import_statement, write_records_csv};
use resumen_ingest::StatementParser;

const COVER: &str = r#"
ESTADO DE CUENTA AL: 31-Dic-25
PROXIMO CIERRE: 29-Ene-26        PROXIMO VENCIMIENTO: 11-Feb-26
SALDO PENDIENTE     1.000,00      0,00
SALDO ACTUAL $ 50.000,00 U$S 18,04
26-Nov-25 GOOGLE *YouTube (USA,ARS, 600,00) 00761 0,41
30-Nov-25 PUPPIS 02842 46500,00
13-Dic-25 NETFLIX.COM (USA,ARS, 25398,00) 00779 17,63
"#;

#[test]
fn test_import_parsed_statement() {
    let _ = env_logger::builder().is_test(true).try_init();

    let summary = StatementParser::new().unwrap().parse(&vec![COVER]);
    // 50000 - 46500 - 1000
    assert_eq!(summary.taxes_local(), 2500.0);

    let mut store = MemoryStore::new();
    let options = ImportOptions::new("resumen-dic.pdf", NaiveDate::from_ymd_opt(2026, 1, 2).unwrap())
        .with_exchange_rate(1475.0);
    let report = import_statement(&mut store, &summary, &options).unwrap();

    let statement = &report.stored.statement;
    assert_eq!(statement.month, 12);
    assert_eq!(statement.year, 2025);
    assert_eq!(statement.total_local, 50000.0);
    assert_eq!(statement.exchange_rate, 1475.0);
    assert_eq!(statement.next_due_date, NaiveDate::from_ymd_opt(2026, 2, 11));
    assert_eq!(statement.transaction_count, 4);

    let rows = &report.stored.transactions;
    assert_eq!(rows[0].currency, Currency::Foreign);
    assert_eq!(rows[0].category, Category::Subscriptions);
    assert_eq!(rows[1].category, Category::Pets);
    assert_eq!(rows[3].category, Category::Taxes);
    assert_eq!(rows[3].amount, 2500.0);
    assert!(rows.iter().all(|r| r.statement_id == statement.id));

    assert!(report.taxes_booked);
    assert_eq!(report.total_local, 49000.0);
    assert!((report.total_foreign - 18.04).abs() < 1e-9);

    let mut csv_out = Vec::new();
    write_records_csv(&mut csv_out, store.transactions()).unwrap();
    assert_eq!(String::from_utf8(csv_out).unwrap().lines().count(), 5);
}
