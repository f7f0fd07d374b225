//! Bulk importer unit tests.

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use rust_decimal::Decimal;

use revenda_api::errors::AppError;
use revenda_api::services::{CsvImporter, ImportService, RowValidator, RowVerdict};

use common::{advertisement, MockAdvertisementRepo, MockRowJudge};

fn temp_csv(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "revenda_import_{}_{}.csv",
        name,
        std::process::id()
    ));
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn create_returns_row(repo: &mut MockAdvertisementRepo, times: usize) {
    repo.expect_create().times(times).returning(|data| {
        Ok(advertisement(
            1,
            data.user_code,
            revenda_api::domain::AdvertisementStatus::Active,
        ))
    });
}

#[tokio::test]
async fn rejects_invalid_rows_and_persists_the_rest() {
    let mut repo = MockAdvertisementRepo::new();
    create_returns_row(&mut repo, 2);

    let importer = CsvImporter::new(Arc::new(repo), Arc::new(RowValidator));

    let path = temp_csv(
        "mixed",
        "adv_man_cod;modelo;ano_fabricacao;ano_modelo;marca;valor\n\
         1;Uno Mille;2010;2011;Fiat;15500,90\n\
         2;Palio;2012;2013;;22000,00\n\
         3;Ka;2015;2015;Ford;18000,00\n",
    );

    let report = importer.import_file(&path, 7).await.unwrap();

    // Source file is deleted after the full pass
    assert!(!path.exists());

    // Exactly the one rejected row comes back, annotated with the reason
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(report.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][1], "Palio");
    assert_eq!(&rows[0][6], "marca é obrigatória");
}

#[tokio::test]
async fn empty_report_when_every_row_is_valid() {
    let mut repo = MockAdvertisementRepo::new();
    create_returns_row(&mut repo, 2);

    let importer = CsvImporter::new(Arc::new(repo), Arc::new(RowValidator));

    let path = temp_csv(
        "all_valid",
        "adv_man_cod;modelo;ano_fabricacao;ano_modelo;marca;valor\n\
         1;Uno Mille;2010;2011;Fiat;15500,90\n\
         3;Ka;2015;2015;Ford;18000,00\n",
    );

    let report = importer.import_file(&path, 7).await.unwrap();
    assert_eq!(report, "");
    assert!(!path.exists());
}

#[tokio::test]
async fn validator_failure_only_rejects_its_own_row() {
    let mut repo = MockAdvertisementRepo::new();
    create_returns_row(&mut repo, 1);

    let mut judge = MockRowJudge::new();
    judge.expect_validate().returning(|row| {
        if row.model_description == "Celta" {
            Err(AppError::internal("validator exploded"))
        } else {
            Ok(RowVerdict::valid())
        }
    });

    let importer = CsvImporter::new(Arc::new(repo), Arc::new(judge));

    let path = temp_csv(
        "validator_failure",
        "adv_man_cod;modelo;ano_fabricacao;ano_modelo;marca;valor\n\
         4;Celta;2008;2008;Chevrolet;9000,00\n\
         3;Ka;2015;2015;Ford;18000,00\n",
    );

    let report = importer.import_file(&path, 7).await.unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(report.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][1], "Celta");
}

#[tokio::test]
async fn comma_decimal_separator_is_normalized() {
    let mut repo = MockAdvertisementRepo::new();
    repo.expect_create()
        .withf(|data| data.value == Decimal::new(1_550_090, 2))
        .returning(|data| {
            Ok(advertisement(
                1,
                data.user_code,
                revenda_api::domain::AdvertisementStatus::Active,
            ))
        });

    let importer = CsvImporter::new(Arc::new(repo), Arc::new(RowValidator));

    let path = temp_csv(
        "decimal",
        "adv_man_cod;modelo;ano_fabricacao;ano_modelo;marca;valor\n\
         1;Uno Mille;2010;2011;Fiat;15500,90\n",
    );

    assert_eq!(importer.import_file(&path, 7).await.unwrap(), "");
}

#[tokio::test]
async fn unreadable_file_propagates_io_error() {
    let repo = MockAdvertisementRepo::new();
    let importer = CsvImporter::new(Arc::new(repo), Arc::new(RowValidator));

    let missing = std::env::temp_dir().join("revenda_import_does_not_exist.csv");
    let result = importer.import_file(&missing, 7).await;

    assert!(matches!(result, Err(AppError::Io(_))));
}

#[tokio::test]
async fn rejection_report_round_trips_field_values() {
    let repo = MockAdvertisementRepo::new();

    let mut judge = MockRowJudge::new();
    judge
        .expect_validate()
        .returning(|_| Ok(RowVerdict::rejected("registro duplicado")));

    let importer = CsvImporter::new(Arc::new(repo), Arc::new(judge));

    let path = temp_csv(
        "round_trip",
        "adv_man_cod;modelo;ano_fabricacao;ano_modelo;marca;valor\n\
         1;Uno Mille;2010;2011;Fiat;15500,90\n\
         3;Ka;2015;2015;Ford;18000,00\n",
    );

    let report = importer.import_file(&path, 7).await.unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(report.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[0][1], "Uno Mille");
    assert_eq!(&rows[0][5], "15500,90");
    assert_eq!(&rows[1][1], "Ka");
    assert!(rows.iter().all(|row| &row[6] == "registro duplicado"));
}
