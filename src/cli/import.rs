//! CSV import CLI command

use std::path::PathBuf;

use crate::auth::Session;
use crate::display::format_import_report;
use crate::error::FinDashResult;
use crate::services::ImportService;
use crate::storage::Storage;

/// Handle `findash import <file>`
pub fn handle_import(storage: &Storage, session: &Session, file: PathBuf) -> FinDashResult<()> {
    let report = ImportService::new(storage).import_file(session.user_id, &file)?;
    print!("{}", format_import_report(&report));
    Ok(())
}
