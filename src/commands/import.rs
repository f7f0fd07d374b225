//! Import command - Bulk advertisement import.

use crate::cli::args::ImportArgs;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::Services;

/// Execute the import command
pub async fn execute(args: ImportArgs, config: Config) -> AppResult<()> {
    tracing::info!(file = %args.file.display(), user = args.user, "Starting bulk import...");

    let db = Database::connect(&config).await;
    let services = Services::from_connection(db.get_connection());

    let rejections = services.importer().import_file(&args.file, args.user).await?;

    if rejections.is_empty() {
        tracing::info!("Every row was imported");
    } else {
        tracing::warn!("Some rows were rejected; rejection report follows");
        println!("{}", rejections);
    }

    Ok(())
}
