use polars::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use crate::analysis::PropertyReport;
use crate::property::{LeaseStrategy, PropertyEntry};
use crate::Result;

/// Load property rows from a CSV file.
/// Expected columns: monthly_rent_normal, monthly_rent_free_strategy,
/// monthly_operating_expenses, property_value, loan_amount, mortgage_rate (%),
/// lease_term_years. Missing columns and empty cells take default values.
pub fn load_properties_csv<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyEntry>> {
    let path = path.as_ref();
    let mut reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .from_path(path)?;

    let mut entries = Vec::new();
    for record in reader.deserialize() {
        let entry: PropertyEntry = record?;
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(crate::Error::Other(
            format!("No properties found in file: {}", path.display())
        ));
    }

    debug!(count = entries.len(), path = %path.display(), "loaded property rows");
    Ok(entries)
}

/// Flatten reports into one row per property per strategy
pub fn reports_to_dataframe(reports: &[PropertyReport]) -> Result<DataFrame> {
    let rows = reports.len() * LeaseStrategy::ALL.len();
    let mut property = Vec::with_capacity(rows);
    let mut strategy = Vec::with_capacity(rows);
    let mut annual_rent = Vec::with_capacity(rows);
    let mut annual_noi = Vec::with_capacity(rows);
    let mut taxable_income = Vec::with_capacity(rows);
    let mut tax_liability = Vec::with_capacity(rows);
    let mut dscr = Vec::with_capacity(rows);
    let mut monthly_cash_flow = Vec::with_capacity(rows);
    let mut monthly_mortgage_payment = Vec::with_capacity(rows);
    let mut annual_debt_service = Vec::with_capacity(rows);
    let mut annual_depreciation = Vec::with_capacity(rows);

    for report in reports {
        for lease in LeaseStrategy::ALL {
            let result = report.strategy(lease);
            property.push(report.property_index as u32);
            strategy.push(lease.label());
            annual_rent.push(result.annual_rent);
            annual_noi.push(result.annual_noi);
            taxable_income.push(result.taxable_income);
            tax_liability.push(result.tax_liability);
            dscr.push(result.dscr_value());
            monthly_cash_flow.push(result.monthly_cash_flow);
            monthly_mortgage_payment.push(report.monthly_mortgage_payment);
            annual_debt_service.push(report.annual_debt_service);
            annual_depreciation.push(report.annual_depreciation);
        }
    }

    let df = DataFrame::new(vec![
        Column::new("property".into(), property),
        Column::new("strategy".into(), strategy),
        Column::new("annual_rent".into(), annual_rent),
        Column::new("annual_noi".into(), annual_noi),
        Column::new("taxable_income".into(), taxable_income),
        Column::new("tax_liability".into(), tax_liability),
        Column::new("dscr".into(), dscr),
        Column::new("monthly_cash_flow".into(), monthly_cash_flow),
        Column::new("monthly_mortgage_payment".into(), monthly_mortgage_payment),
        Column::new("annual_debt_service".into(), annual_debt_service),
        Column::new("annual_depreciation".into(), annual_depreciation),
    ])?;

    Ok(df)
}

/// Save DataFrame to CSV file
pub fn save_csv<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let mut file = fs::File::create(path)?;
    CsvWriter::new(&mut file)
        .finish(&mut df.clone())?;

    Ok(())
}

/// Save DataFrame to Parquet file
pub fn save_parquet<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let file = fs::File::create(path)?;
    ParquetWriter::new(file)
        .finish(&mut df.clone())?;

    Ok(())
}

/// Append a `.csv` extension when the path has none
pub fn resolve_output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_none() {
        path.with_extension("csv")
    } else {
        path.to_path_buf()
    }
}

/// Ask on stdin whether an existing file may be replaced
fn confirm_overwrite(path: &Path) -> Result<bool> {
    print!("File {} already exists. Overwrite? [y/N] ", path.display());
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Check whether `path` may be written, prompting unless `force` is set
fn may_write(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force && !confirm_overwrite(path)? {
        info!(path = %path.display(), "skipped existing file");
        return Ok(false);
    }
    Ok(true)
}

/// Export reports as CSV or Parquet, chosen by file extension.
/// Returns the path written, or `None` when the user declined to overwrite.
pub fn export_reports<P: AsRef<Path>>(
    reports: &[PropertyReport],
    path: P,
    force: bool,
) -> Result<Option<PathBuf>> {
    let path = resolve_output_path(path);
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    if extension != "csv" && extension != "parquet" {
        return Err(crate::Error::Other(
            format!("Unsupported export format '{}': use .csv or .parquet", extension)
        ));
    }

    if !may_write(&path, force)? {
        return Ok(None);
    }

    let df = reports_to_dataframe(reports)?;
    if extension == "parquet" {
        save_parquet(&df, &path)?;
    } else {
        save_csv(&df, &path)?;
    }

    debug!(rows = df.height(), path = %path.display(), "exported reports");
    Ok(Some(path))
}

/// Write rendered text to a file.
/// Returns false when the user declined to overwrite.
pub fn save_text<P: AsRef<Path>>(text: &str, path: P, force: bool) -> Result<bool> {
    let path = path.as_ref();
    if !may_write(path, force)? {
        return Ok(false);
    }
    fs::write(path, text)?;
    Ok(true)
}
