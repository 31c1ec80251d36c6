use std::fmt::Write as FmtWrite;
use crate::analysis::{PropertyReport, StrategyResult};
use crate::portfolio::Portfolio;
use crate::property::LeaseStrategy;

const LABEL_WIDTH: usize = 22;
const VALUE_WIDTH: usize = 24;

/// Format a dollar amount with two decimals
pub fn format_currency(value: f64) -> String {
    format!("${:.2}", value)
}

/// Format a DSCR with two decimals, `n/a` when undefined
pub fn format_dscr(result: &StrategyResult) -> String {
    match result.dscr_value() {
        Some(dscr) => format!("{:.2}", dscr),
        None => "n/a".to_string(),
    }
}

/// Render the metrics of one property side by side for both strategies
pub fn format_property_report(report: &PropertyReport) -> String {
    let mut output = String::new();
    let normal = &report.normal_lease;
    let free = &report.free_month_strategy;

    writeln!(output, "Property {}", report.property_index).unwrap();
    writeln!(
        output,
        "  Monthly Mortgage Payment: {}",
        format_currency(report.monthly_mortgage_payment)
    )
    .unwrap();
    writeln!(
        output,
        "  Annual Debt Service: {}",
        format_currency(report.annual_debt_service)
    )
    .unwrap();
    writeln!(
        output,
        "  Annual Depreciation: {}",
        format_currency(report.annual_depreciation)
    )
    .unwrap();
    writeln!(output).unwrap();

    // Header
    write!(output, "  {:<width$}", "", width = LABEL_WIDTH).unwrap();
    for strategy in LeaseStrategy::ALL {
        write!(output, "{:>width$}", strategy.label(), width = VALUE_WIDTH).unwrap();
    }
    writeln!(output).unwrap();

    let rows = [
        ("Annual NOI", format_currency(normal.annual_noi), format_currency(free.annual_noi)),
        (
            "Taxable Income",
            format_currency(normal.taxable_income),
            format_currency(free.taxable_income),
        ),
        (
            "Tax Liability",
            format_currency(normal.tax_liability),
            format_currency(free.tax_liability),
        ),
        ("DSCR", format_dscr(normal), format_dscr(free)),
        (
            "Monthly Cash Flow",
            format_currency(normal.monthly_cash_flow),
            format_currency(free.monthly_cash_flow),
        ),
    ];

    for (label, left, right) in rows {
        writeln!(
            output,
            "  {:<lw$}{:>vw$}{:>vw$}",
            label,
            left,
            right,
            lw = LABEL_WIDTH,
            vw = VALUE_WIDTH
        )
        .unwrap();
    }

    output
}

/// Generate the full text report for a portfolio
pub fn generate_text_report(portfolio: &Portfolio, reports: &[PropertyReport]) -> String {
    let mut report = String::new();

    writeln!(report, "{}", "=".repeat(70)).unwrap();
    writeln!(report, "REAL ESTATE CASH FLOW AND DSCR REPORT").unwrap();
    writeln!(report, "{}", "=".repeat(70)).unwrap();
    writeln!(report).unwrap();

    writeln!(report, "{}", portfolio.summary()).unwrap();

    for property in reports {
        writeln!(report, "{}", "-".repeat(70)).unwrap();
        writeln!(report, "{}", format_property_report(property)).unwrap();
    }

    writeln!(report, "{}", "=".repeat(70)).unwrap();

    report
}

/// One row per property comparing the strategies' headline figures
pub fn generate_summary_table(reports: &[PropertyReport]) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "{:>8}{:>14}{:>14}{:>10}{:>10}{:>14}{:>14}",
        "Property", "NOI Normal", "NOI Free", "DSCR N", "DSCR F", "Cash Normal", "Cash Free"
    )
    .unwrap();

    for report in reports {
        let normal = &report.normal_lease;
        let free = &report.free_month_strategy;
        writeln!(
            output,
            "{:>8}{:>14}{:>14}{:>10}{:>10}{:>14}{:>14}",
            report.property_index,
            format_currency(normal.annual_noi),
            format_currency(free.annual_noi),
            format_dscr(normal),
            format_dscr(free),
            format_currency(normal.monthly_cash_flow),
            format_currency(free.monthly_cash_flow),
        )
        .unwrap();
    }

    output
}
