//! Report command - Prints aggregate reports.

use serde::Serialize;

use crate::cli::args::{ReportArgs, ReportKind};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::Services;

/// Execute the report command
pub async fn execute(args: ReportArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await;
    let services = Services::from_connection(db.get_connection());
    let reports = services.reports();

    match args.kind {
        ReportKind::Views { user } => print_json(&reports.view_contact(user).await?),
        ReportKind::Status => print_json(&reports.status_breakdown().await?),
        ReportKind::Sold { user } => print_json(&reports.sold_percentage(user).await?),
        ReportKind::Categories { user } => print_json(&reports.sold_by_category(user).await?),
        ReportKind::Time { user } => {
            println!("{}", reports.time_in_listing(user).await?);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(report: &T) -> AppResult<()> {
    let rendered =
        serde_json::to_string_pretty(report).map_err(|e| AppError::internal(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}
