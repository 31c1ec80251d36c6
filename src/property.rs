use serde::{Deserialize, Serialize};
use crate::metrics;
use crate::{Error, Result};

pub const DEFAULT_TAX_RATE_PCT: f64 = 21.0;
pub const DEFAULT_DEPRECIATION_YEARS: u32 = 27;

pub const DEFAULT_MONTHLY_RENT_NORMAL: f64 = 1_000.0;
pub const DEFAULT_MONTHLY_OPERATING_EXPENSES: f64 = 200.0;
pub const DEFAULT_PROPERTY_VALUE: f64 = 300_000.0;
pub const DEFAULT_LOAN_AMOUNT: f64 = 200_000.0;
pub const DEFAULT_MORTGAGE_RATE_PCT: f64 = 5.0;
pub const DEFAULT_LEASE_TERM_YEARS: u32 = 1;

/// Leasing strategy compared for every property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaseStrategy {
    Normal,
    OneMonthFree,
}

impl LeaseStrategy {
    pub const ALL: [LeaseStrategy; 2] = [LeaseStrategy::Normal, LeaseStrategy::OneMonthFree];

    pub fn label(&self) -> &'static str {
        match self {
            LeaseStrategy::Normal => "Normal Lease",
            LeaseStrategy::OneMonthFree => "1-Month Free Strategy",
        }
    }

    /// Months per year in which rent is collected
    pub fn rent_months(&self) -> u32 {
        match self {
            LeaseStrategy::Normal => metrics::MONTHS_PER_YEAR,
            LeaseStrategy::OneMonthFree => metrics::FREE_STRATEGY_RENT_MONTHS,
        }
    }
}

/// Inputs for a single property, rates as fractions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    pub monthly_rent_normal: f64,
    pub monthly_rent_free_strategy: f64,
    pub monthly_operating_expenses: f64,
    pub property_value: f64,
    pub loan_amount: f64,
    pub annual_mortgage_rate: f64,
    pub lease_term_years: u32,
}

impl PropertyInput {
    /// Monthly rent charged under the given strategy
    pub fn monthly_rent(&self, strategy: LeaseStrategy) -> f64 {
        match strategy {
            LeaseStrategy::Normal => self.monthly_rent_normal,
            LeaseStrategy::OneMonthFree => self.monthly_rent_free_strategy,
        }
    }

    /// Check the numeric bounds the calculations assume
    pub fn validate(&self) -> Result<()> {
        validate_money("monthly_rent_normal", self.monthly_rent_normal)?;
        validate_money("monthly_rent_free_strategy", self.monthly_rent_free_strategy)?;
        validate_money("monthly_operating_expenses", self.monthly_operating_expenses)?;
        validate_money("property_value", self.property_value)?;
        validate_money("loan_amount", self.loan_amount)?;
        validate_fraction("annual_mortgage_rate", self.annual_mortgage_rate)?;
        validate_at_least_one("lease_term_years", self.lease_term_years)?;
        Ok(())
    }
}

impl Default for PropertyInput {
    fn default() -> Self {
        PropertyEntry::default().to_input()
    }
}

/// Parameters shared by every property in an analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalParams {
    pub tax_rate: f64,
    pub depreciation_years: u32,
}

impl GlobalParams {
    /// Build from a tax rate given in percent
    pub fn from_percent(tax_rate_pct: f64, depreciation_years: u32) -> Self {
        GlobalParams {
            tax_rate: tax_rate_pct / 100.0,
            depreciation_years,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_fraction("tax_rate", self.tax_rate)?;
        validate_at_least_one("depreciation_years", self.depreciation_years)?;
        Ok(())
    }
}

impl Default for GlobalParams {
    fn default() -> Self {
        GlobalParams::from_percent(DEFAULT_TAX_RATE_PCT, DEFAULT_DEPRECIATION_YEARS)
    }
}

/// A property as entered by a user: every field optional, mortgage rate in
/// percent. Shared by `[[properties]]` config tables and CSV rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyEntry {
    pub monthly_rent_normal: Option<f64>,
    pub monthly_rent_free_strategy: Option<f64>,
    pub monthly_operating_expenses: Option<f64>,
    pub property_value: Option<f64>,
    pub loan_amount: Option<f64>,
    pub mortgage_rate: Option<f64>,
    pub lease_term_years: Option<u32>,
}

impl PropertyEntry {
    /// Fill unset fields with defaults and convert the rate to a fraction.
    ///
    /// An unset free-strategy rent is the rent-equivalent of the normal rent,
    /// rounded to cents.
    pub fn to_input(&self) -> PropertyInput {
        let monthly_rent_normal = self.monthly_rent_normal.unwrap_or(DEFAULT_MONTHLY_RENT_NORMAL);
        let monthly_rent_free_strategy = self.monthly_rent_free_strategy.unwrap_or_else(|| {
            round_cents(metrics::equivalent_free_strategy_rent(monthly_rent_normal))
        });

        PropertyInput {
            monthly_rent_normal,
            monthly_rent_free_strategy,
            monthly_operating_expenses: self
                .monthly_operating_expenses
                .unwrap_or(DEFAULT_MONTHLY_OPERATING_EXPENSES),
            property_value: self.property_value.unwrap_or(DEFAULT_PROPERTY_VALUE),
            loan_amount: self.loan_amount.unwrap_or(DEFAULT_LOAN_AMOUNT),
            annual_mortgage_rate: self.mortgage_rate.unwrap_or(DEFAULT_MORTGAGE_RATE_PCT) / 100.0,
            lease_term_years: self.lease_term_years.unwrap_or(DEFAULT_LEASE_TERM_YEARS),
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn validate_money(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid_input(field, value, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(Error::invalid_input(field, value, "must be non-negative"));
    }
    Ok(())
}

fn validate_fraction(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::invalid_input(field, value, "must be between 0% and 100%"));
    }
    Ok(())
}

fn validate_at_least_one(field: &str, value: u32) -> Result<()> {
    if value < 1 {
        return Err(Error::invalid_input(field, value, "must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_input_matches_form_defaults() {
        let input = PropertyInput::default();
        assert_eq!(input.monthly_rent_normal, 1_000.0);
        assert_eq!(input.monthly_rent_free_strategy, 1_090.91);
        assert_eq!(input.monthly_operating_expenses, 200.0);
        assert_eq!(input.property_value, 300_000.0);
        assert_eq!(input.loan_amount, 200_000.0);
        assert!((input.annual_mortgage_rate - 0.05).abs() < 1e-12);
        assert_eq!(input.lease_term_years, 1);
    }

    #[test]
    fn test_default_global_params() {
        let global = GlobalParams::default();
        assert!((global.tax_rate - 0.21).abs() < 1e-12);
        assert_eq!(global.depreciation_years, 27);
    }

    #[test]
    fn test_entry_free_rent_follows_normal_rent() {
        let entry = PropertyEntry {
            monthly_rent_normal: Some(2_200.0),
            ..Default::default()
        };
        assert_eq!(entry.to_input().monthly_rent_free_strategy, 2_400.0);
    }

    #[test]
    fn test_entry_explicit_values_win() {
        let entry = PropertyEntry {
            monthly_rent_free_strategy: Some(1_050.0),
            mortgage_rate: Some(6.5),
            lease_term_years: Some(30),
            ..Default::default()
        };
        let input = entry.to_input();
        assert_eq!(input.monthly_rent_free_strategy, 1_050.0);
        assert!((input.annual_mortgage_rate - 0.065).abs() < 1e-12);
        assert_eq!(input.lease_term_years, 30);
    }

    #[test]
    fn test_strategy_labels_and_months() {
        assert_eq!(LeaseStrategy::Normal.label(), "Normal Lease");
        assert_eq!(LeaseStrategy::OneMonthFree.label(), "1-Month Free Strategy");
        assert_eq!(LeaseStrategy::Normal.rent_months(), 12);
        assert_eq!(LeaseStrategy::OneMonthFree.rent_months(), 11);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(PropertyInput::default().validate().is_ok());
        assert!(GlobalParams::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_money() {
        let input = PropertyInput {
            loan_amount: -1.0,
            ..Default::default()
        };
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("loan_amount"));
    }

    #[test]
    fn test_validate_rejects_non_finite_money() {
        let input = PropertyInput {
            property_value: f64::NAN,
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_rate_out_of_range() {
        let input = PropertyInput {
            annual_mortgage_rate: 1.5,
            ..Default::default()
        };
        assert!(input.validate().is_err());

        let global = GlobalParams {
            tax_rate: -0.1,
            depreciation_years: 27,
        };
        assert!(global.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_terms() {
        let input = PropertyInput {
            lease_term_years: 0,
            ..Default::default()
        };
        assert!(input.validate().is_err());

        let global = GlobalParams {
            tax_rate: 0.21,
            depreciation_years: 0,
        };
        assert!(global.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_zero_loan_and_rate() {
        let input = PropertyInput {
            loan_amount: 0.0,
            annual_mortgage_rate: 0.0,
            ..Default::default()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_very_long_terms() {
        for term in [400_000_000, u32::MAX] {
            let input = PropertyInput {
                lease_term_years: term,
                ..Default::default()
            };
            assert!(input.validate().is_ok());
        }
    }
}
