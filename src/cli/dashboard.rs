//! Dashboard CLI command

use crate::auth::Session;
use crate::config::settings::Settings;
use crate::display::{format_dashboard, format_monthly_summary, format_top_payees, format_trend};
use crate::error::{FinDashError, FinDashResult};
use crate::models::Month;
use crate::services::dashboard::{DashboardService, DateRange};
use crate::storage::Storage;

/// Options for `findash dashboard`
pub struct DashboardArgs {
    /// Lookback window in days; settings default when absent
    pub days: Option<i64>,
    /// Show the top N payees by spending instead of the summary
    pub top: Option<usize>,
    /// Show one month's totals and trend instead of the summary (YYYY-MM)
    pub month: Option<String>,
}

/// Handle `findash dashboard`
pub fn handle_dashboard(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    args: DashboardArgs,
) -> FinDashResult<()> {
    let service = DashboardService::new(storage);
    let range = DateRange::trailing_days(args.days.unwrap_or(settings.default_range_days));

    if let Some(raw) = args.month {
        let month: Month = raw
            .parse()
            .map_err(|e: crate::models::month::MonthParseError| {
                FinDashError::Validation(e.to_string())
            })?;
        let summary = service.monthly_summary(session.user_id, month)?;
        let trend = service.spending_trend(session.user_id, month)?;
        println!("{}", format_monthly_summary(&summary));
        println!("{}", format_trend(&trend));
        return Ok(());
    }

    if let Some(limit) = args.top {
        let payees = service.top_payees(session.user_id, range, limit)?;
        println!("{}", format_top_payees(&payees));
        return Ok(());
    }

    let summary = service.summarize(session.user_id, range, settings.recent_limit)?;
    print!("{}", format_dashboard(&summary));
    Ok(())
}
