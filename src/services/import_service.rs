//! Bulk import of advertisements from semicolon-separated files.

use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::config::{IMPORT_DELIMITER, IMPORT_HEADERS, REJECTION_REASON_HEADER};
use crate::errors::{AppError, AppResult};
use crate::infra::AdvertisementRepository;
use crate::services::validation::{AdvertisementValidator, ImportRow, RowVerdict};

/// Import service trait for dependency injection.
#[async_trait]
pub trait ImportService: Send + Sync {
    /// Import every row of the file at `path` for the given owner.
    ///
    /// Rows are processed sequentially in source order; each one is
    /// validated, and valid rows are persisted. The source file is
    /// deleted afterwards (best effort). Returns the rejected rows
    /// re-encoded with their rejection reason, or an empty string when
    /// every row was imported.
    async fn import_file(&self, path: &Path, user_code: i64) -> AppResult<String>;
}

/// Concrete implementation of ImportService backed by the `csv` codec
pub struct CsvImporter {
    repo: Arc<dyn AdvertisementRepository>,
    validator: Arc<dyn AdvertisementValidator>,
}

impl CsvImporter {
    /// Create new importer instance
    pub fn new(
        repo: Arc<dyn AdvertisementRepository>,
        validator: Arc<dyn AdvertisementValidator>,
    ) -> Self {
        Self { repo, validator }
    }

    fn encode_rejections(rejected: &[(ImportRow, String)]) -> AppResult<String> {
        if rejected.is_empty() {
            return Ok(String::new());
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(IMPORT_DELIMITER)
            .from_writer(Vec::new());

        let mut header: Vec<&str> = IMPORT_HEADERS.to_vec();
        header.push(REJECTION_REASON_HEADER);
        writer.write_record(&header)?;

        for (row, reason) in rejected {
            writer.write_record([
                row.manufacturer_code.as_str(),
                row.model_description.as_str(),
                row.year_manufacture.as_str(),
                row.year_model.as_str(),
                row.brand.as_str(),
                row.value.as_str(),
                reason.as_str(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::internal(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AppError::internal(e.to_string()))
    }
}

#[async_trait]
impl ImportService for CsvImporter {
    async fn import_file(&self, path: &Path, user_code: i64) -> AppResult<String> {
        let contents = fs::read_to_string(path)?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(IMPORT_DELIMITER)
            .trim(csv::Trim::Headers)
            .from_reader(contents.as_bytes());

        let mut rejected: Vec<(ImportRow, String)> = Vec::new();
        let mut imported = 0usize;

        // Full sequential pass: every row is judged before completion is
        // signalled, and a failing validator only rejects its own row
        for record in reader.deserialize::<ImportRow>() {
            let row = record?;

            let verdict = match self.validator.validate(&row).await {
                Ok(verdict) => verdict,
                Err(err) => RowVerdict::rejected(err.to_string()),
            };

            if !verdict.valid {
                let reason = verdict
                    .error
                    .unwrap_or_else(|| "registro inválido".to_string());
                rejected.push((row, reason));
                continue;
            }

            match row.to_new_advertisement(user_code) {
                Ok(data) => {
                    self.repo.create(data).await?;
                    imported += 1;
                }
                Err(err) => rejected.push((row, err.to_string())),
            }
        }

        if let Err(err) = fs::remove_file(path) {
            tracing::debug!("import file cleanup failed: {}", err);
        }

        tracing::info!(imported, rejected = rejected.len(), "bulk import finished");

        Self::encode_rejections(&rejected)
    }
}
