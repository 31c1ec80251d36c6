use clap::Parser;
use crate::property::{GlobalParams, PropertyEntry, DEFAULT_DEPRECIATION_YEARS, DEFAULT_TAX_RATE_PCT};

pub const DEFAULT_FUNCTION: &str = "report";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file (defaults to ./.rental_analyzer.toml, then the user config directory)
    #[arg(short, long)]
    pub config: Option<String>,

    /// CSV file with one property per row
    #[arg(short, long)]
    pub properties: Option<String>,

    /// Function/operation to perform (report, summary, export)
    #[arg(short = 'f', long, default_value = DEFAULT_FUNCTION)]
    pub function: String,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Force overwrite of existing output files without prompting
    #[arg(long)]
    pub force: bool,

    /// Verbose mode
    #[arg(short, long)]
    pub verbose: bool,

    /// Tax rate in percent [default: 21]
    #[arg(long)]
    pub tax_rate: Option<f64>,

    /// Depreciation period in years [default: 27]
    #[arg(long)]
    pub depreciation_years: Option<u32>,

    /// Monthly rent under a normal lease [default: 1000]
    #[arg(long)]
    pub rent_normal: Option<f64>,

    /// Monthly rent under the 1-month free strategy [default: rent-normal * 12 / 11]
    #[arg(long)]
    pub rent_free: Option<f64>,

    /// Monthly operating expenses [default: 200]
    #[arg(long)]
    pub expenses: Option<f64>,

    /// Property value [default: 300000]
    #[arg(long)]
    pub property_value: Option<f64>,

    /// Loan amount [default: 200000]
    #[arg(long)]
    pub loan_amount: Option<f64>,

    /// Annual mortgage rate in percent [default: 5]
    #[arg(long)]
    pub mortgage_rate: Option<f64>,

    /// Loan term in years [default: 1]
    #[arg(long)]
    pub lease_term: Option<u32>,
}

impl Args {
    /// Global parameters from the tax flags, defaults filled in
    pub fn global_params(&self) -> GlobalParams {
        GlobalParams::from_percent(
            self.tax_rate.unwrap_or(DEFAULT_TAX_RATE_PCT),
            self.depreciation_years.unwrap_or(DEFAULT_DEPRECIATION_YEARS),
        )
    }

    /// The single property described by the per-property flags
    pub fn property_entry(&self) -> PropertyEntry {
        PropertyEntry {
            monthly_rent_normal: self.rent_normal,
            monthly_rent_free_strategy: self.rent_free,
            monthly_operating_expenses: self.expenses,
            property_value: self.property_value,
            loan_amount: self.loan_amount,
            mortgage_rate: self.mortgage_rate,
            lease_term_years: self.lease_term,
        }
    }

    /// Whether any per-property flag was given
    pub fn has_property_flags(&self) -> bool {
        self.property_entry() != PropertyEntry::default()
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}
