//! Dashboard display formatting

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Money;
use crate::services::dashboard::{DashboardSummary, MonthlySummary, SpendingTrend, TrendDirection};

use super::transaction::format_transaction_table;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    spent: String,
}

/// Render the full dashboard summary
pub fn format_dashboard(summary: &DashboardSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Summary {} to {}\n\n",
        summary.range.start.format("%Y-%m-%d"),
        summary.range.end.format("%Y-%m-%d")
    ));
    output.push_str(&format!("Total balance:  {}\n", summary.total_balance));
    output.push_str(&format!("Income:         {}\n", summary.income));
    output.push_str(&format!("Expenses:       {}\n", summary.expenses));
    output.push_str(&format!("Net:            {}\n", summary.net));
    if summary.uncategorized_count > 0 {
        output.push_str(&format!(
            "Uncategorized:  {} transactions\n",
            summary.uncategorized_count
        ));
    }

    if !summary.by_category.is_empty() {
        let rows: Vec<CategoryRow> = summary
            .by_category
            .iter()
            .map(|(category, spent)| CategoryRow {
                category: category.clone(),
                spent: spent.to_string(),
            })
            .collect();
        let table = Table::new(rows)
            .with(Style::sharp())
            .modify(Columns::single(1), Alignment::right())
            .to_string();
        output.push_str(&format!("\nSpending by category\n{}\n", table));
    }

    if !summary.recent.is_empty() {
        output.push_str(&format!(
            "\nRecent transactions\n{}\n",
            format_transaction_table(&summary.recent)
        ));
    }

    output
}

/// Render top payees by spending
pub fn format_top_payees(payees: &[(String, Money)]) -> String {
    if payees.is_empty() {
        return "No spending in this period.".to_string();
    }

    #[derive(Tabled)]
    struct PayeeRow {
        #[tabled(rename = "Payee")]
        payee: String,
        #[tabled(rename = "Spent")]
        spent: String,
    }

    let rows: Vec<PayeeRow> = payees
        .iter()
        .map(|(payee, spent)| PayeeRow {
            payee: payee.clone(),
            spent: spent.to_string(),
        })
        .collect();
    Table::new(rows)
        .with(Style::sharp())
        .modify(Columns::single(1), Alignment::right())
        .to_string()
}

/// Render one month's totals
pub fn format_monthly_summary(summary: &MonthlySummary) -> String {
    format!(
        "{}\n  Income:       {}\n  Expenses:     {}\n  Net:          {}\n  Transactions: {} (avg expense {})",
        summary.month.display_name(),
        summary.income,
        summary.expenses,
        summary.net,
        summary.transaction_count,
        summary.average_expense
    )
}

/// Render a month-over-month spending trend line
pub fn format_trend(trend: &SpendingTrend) -> String {
    let arrow = match trend.direction {
        TrendDirection::Up => "▲",
        TrendDirection::Down => "▼",
        TrendDirection::Neutral => "—",
    };
    format!(
        "{}: spent {} (prev {}) {} {:.1}%",
        trend.month.display_name(),
        trend.current,
        trend.previous,
        arrow,
        trend.percent_change
    )
}
