//! Budget display formatting

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{BudgetStatus, Month};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
}

impl From<&BudgetStatus> for BudgetRow {
    fn from(status: &BudgetStatus) -> Self {
        let used = match status.percent_used {
            Some(percent) => format!("{:.1}%", percent),
            None => "-".to_string(),
        };
        Self {
            category: status.category.clone(),
            budgeted: status.budgeted.to_string(),
            spent: status.spent.to_string(),
            remaining: status.remaining.to_string(),
            used,
        }
    }
}

/// Render a month's budget progress
pub fn format_budget_table(month: Month, statuses: &[BudgetStatus]) -> String {
    if statuses.is_empty() {
        return format!("No budgets set for {}.", month.display_name());
    }

    let rows: Vec<BudgetRow> = statuses.iter().map(BudgetRow::from).collect();
    let table = Table::new(rows)
        .with(Style::sharp())
        .modify(Columns::new(1..), Alignment::right())
        .to_string();

    let over: Vec<&str> = statuses
        .iter()
        .filter(|s| s.is_over())
        .map(|s| s.category.as_str())
        .collect();

    let mut output = format!("Budgets for {}\n{}", month.display_name(), table);
    if !over.is_empty() {
        output.push_str(&format!("\nOver budget: {}", over.join(", ")));
    }
    output
}
