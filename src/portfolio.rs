use tracing::debug;
use crate::analysis::{self, PropertyReport};
use crate::property::{GlobalParams, PropertyEntry, PropertyInput};
use crate::Result;

/// Property count at which reports are computed in parallel
pub const PARALLEL_THRESHOLD: usize = 256;

/// Validated set of properties and the parameters they are analyzed under
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub global: GlobalParams,
    pub properties: Vec<PropertyInput>,
}

impl Portfolio {
    /// Create a portfolio, rejecting out-of-range inputs
    pub fn new(global: GlobalParams, properties: Vec<PropertyInput>) -> Result<Self> {
        if properties.is_empty() {
            return Err(crate::Error::invalid_input(
                "properties",
                0,
                "at least one property is required",
            ));
        }

        global.validate()?;
        for (i, property) in properties.iter().enumerate() {
            property.validate().map_err(|e| e.for_property(i + 1))?;
        }

        Ok(Portfolio { global, properties })
    }

    /// Create a portfolio from user entries, filling unset fields with defaults
    pub fn from_entries(global: GlobalParams, entries: &[PropertyEntry]) -> Result<Self> {
        let properties = entries.iter().map(PropertyEntry::to_input).collect();
        Self::new(global, properties)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Compute one report per property, in order
    pub fn reports(&self) -> Vec<PropertyReport> {
        if self.properties.len() >= PARALLEL_THRESHOLD {
            debug!(count = self.properties.len(), "analyzing properties in parallel");
            analysis::analyze_parallel(&self.global, &self.properties)
        } else {
            debug!(count = self.properties.len(), "analyzing properties");
            analysis::analyze(&self.global, &self.properties)
        }
    }

    /// Get portfolio summary
    pub fn summary(&self) -> String {
        let mut summary = String::from("Portfolio Summary:\n");
        summary.push_str(&format!("Properties: {}\n", self.properties.len()));
        summary.push_str(&format!("Tax Rate: {:.2}%\n", self.global.tax_rate * 100.0));
        summary.push_str(&format!(
            "Depreciation Period: {} years\n",
            self.global.depreciation_years
        ));

        let total_value: f64 = self.properties.iter().map(|p| p.property_value).sum();
        let total_loan: f64 = self.properties.iter().map(|p| p.loan_amount).sum();
        summary.push_str(&format!("Total Property Value: ${:.2}\n", total_value));
        summary.push_str(&format!("Total Loan Amount: ${:.2}\n", total_loan));

        summary
    }
}
