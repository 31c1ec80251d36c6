use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use crate::metrics;
use crate::property::{GlobalParams, LeaseStrategy, PropertyInput};

/// Metrics for one property under one leasing strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub annual_rent: f64,
    pub annual_noi: f64,
    pub taxable_income: f64,
    pub tax_liability: f64,
    /// NaN when the property carries no debt service
    pub dscr: f64,
    /// Rent minus operating expenses; debt service is not deducted
    pub monthly_cash_flow: f64,
}

impl StrategyResult {
    /// DSCR, or `None` when it is undefined
    pub fn dscr_value(&self) -> Option<f64> {
        if self.dscr.is_nan() {
            None
        } else {
            Some(self.dscr)
        }
    }
}

/// Both strategies for one property, plus the figures they share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyReport {
    /// 1-based position in the submitted property list
    pub property_index: usize,
    pub monthly_mortgage_payment: f64,
    pub annual_debt_service: f64,
    pub annual_depreciation: f64,
    pub normal_lease: StrategyResult,
    pub free_month_strategy: StrategyResult,
}

impl PropertyReport {
    pub fn strategy(&self, strategy: LeaseStrategy) -> &StrategyResult {
        match strategy {
            LeaseStrategy::Normal => &self.normal_lease,
            LeaseStrategy::OneMonthFree => &self.free_month_strategy,
        }
    }
}

fn strategy_result(
    input: &PropertyInput,
    global: &GlobalParams,
    strategy: LeaseStrategy,
    annual_debt_service: f64,
    annual_depreciation: f64,
) -> StrategyResult {
    let monthly_rent = input.monthly_rent(strategy);
    let annual_rent = monthly_rent * strategy.rent_months() as f64;
    let annual_expenses = input.monthly_operating_expenses * metrics::MONTHS_PER_YEAR as f64;
    let annual_noi = annual_rent - annual_expenses;
    let taxable_income = metrics::taxable_income(annual_rent, annual_expenses, annual_depreciation);

    StrategyResult {
        annual_rent,
        annual_noi,
        taxable_income,
        tax_liability: metrics::tax_liability(taxable_income, global.tax_rate),
        dscr: metrics::dscr(annual_noi, annual_debt_service),
        monthly_cash_flow: monthly_rent - input.monthly_operating_expenses,
    }
}

/// Compute both leasing strategies for a single property.
///
/// Inputs are assumed to be within the bounds checked by
/// [`PropertyInput::validate`] and [`GlobalParams::validate`].
pub fn build_property_report(
    input: &PropertyInput,
    global: &GlobalParams,
    property_index: usize,
) -> PropertyReport {
    let monthly_payment = metrics::monthly_mortgage_payment(
        input.loan_amount,
        input.annual_mortgage_rate,
        input.lease_term_years,
    );
    let annual_debt_service = metrics::annual_debt_service(monthly_payment);
    let annual_depreciation = input.property_value / global.depreciation_years as f64;

    PropertyReport {
        property_index,
        monthly_mortgage_payment: monthly_payment,
        annual_debt_service,
        annual_depreciation,
        normal_lease: strategy_result(
            input,
            global,
            LeaseStrategy::Normal,
            annual_debt_service,
            annual_depreciation,
        ),
        free_month_strategy: strategy_result(
            input,
            global,
            LeaseStrategy::OneMonthFree,
            annual_debt_service,
            annual_depreciation,
        ),
    }
}

/// Build one report per property, in input order, indexed from 1
pub fn analyze(global: &GlobalParams, properties: &[PropertyInput]) -> Vec<PropertyReport> {
    properties
        .iter()
        .enumerate()
        .map(|(i, input)| build_property_report(input, global, i + 1))
        .collect()
}

/// Same as [`analyze`], evaluating properties in parallel
pub fn analyze_parallel(global: &GlobalParams, properties: &[PropertyInput]) -> Vec<PropertyReport> {
    properties
        .par_iter()
        .enumerate()
        .map(|(i, input)| build_property_report(input, global, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_global() -> GlobalParams {
        GlobalParams {
            tax_rate: 0.21,
            depreciation_years: 27,
        }
    }

    fn sample_input() -> PropertyInput {
        PropertyInput {
            monthly_rent_normal: 1_000.0,
            monthly_rent_free_strategy: 1_090.91,
            monthly_operating_expenses: 200.0,
            property_value: 300_000.0,
            loan_amount: 200_000.0,
            annual_mortgage_rate: 0.05,
            lease_term_years: 1,
        }
    }

    #[test]
    fn test_shared_loan_figures() {
        let report = build_property_report(&sample_input(), &sample_global(), 1);
        assert_close(report.monthly_mortgage_payment, 17_121.50, 0.005);
        assert_close(report.annual_debt_service, 205_457.96, 0.005);
        assert_close(report.annual_depreciation, 11_111.11, 0.005);
    }

    #[test]
    fn test_normal_lease_branch() {
        let report = build_property_report(&sample_input(), &sample_global(), 1);
        let normal = report.normal_lease;
        assert_close(normal.annual_rent, 12_000.0, 1e-9);
        assert_close(normal.annual_noi, 9_600.0, 1e-9);
        assert_close(normal.taxable_income, -1_511.11, 0.005);
        assert_close(normal.tax_liability, -317.33, 0.005);
        assert_close(normal.dscr, 0.046725, 1e-6);
        assert_close(normal.monthly_cash_flow, 800.0, 1e-9);
    }

    #[test]
    fn test_free_month_branch() {
        let report = build_property_report(&sample_input(), &sample_global(), 1);
        let free = report.free_month_strategy;
        assert_close(free.annual_rent, 12_000.01, 1e-6);
        assert_close(free.annual_noi, 9_600.01, 1e-6);
        assert_close(free.taxable_income, -1_511.10, 0.005);
        assert_close(free.tax_liability, -317.33, 0.005);
        assert_close(free.dscr, 0.046725, 1e-6);
        assert_close(free.monthly_cash_flow, 890.91, 1e-6);
    }

    #[test]
    fn test_branches_share_depreciation_and_debt_service() {
        let input = PropertyInput {
            monthly_rent_free_strategy: 500.0,
            ..sample_input()
        };
        let report = build_property_report(&input, &sample_global(), 1);
        let normal_deductions = report.normal_lease.annual_noi - report.normal_lease.taxable_income;
        let free_deductions =
            report.free_month_strategy.annual_noi - report.free_month_strategy.taxable_income;
        assert_close(normal_deductions, report.annual_depreciation, 1e-9);
        assert_close(free_deductions, report.annual_depreciation, 1e-9);
        assert_close(
            report.normal_lease.annual_noi / report.normal_lease.dscr,
            report.free_month_strategy.annual_noi / report.free_month_strategy.dscr,
            1e-6,
        );
    }

    #[test]
    fn test_no_loan_gives_undefined_dscr_but_other_fields() {
        let input = PropertyInput {
            loan_amount: 0.0,
            ..sample_input()
        };
        let report = build_property_report(&input, &sample_global(), 1);
        assert_eq!(report.annual_debt_service, 0.0);
        assert!(report.normal_lease.dscr.is_nan());
        assert_eq!(report.normal_lease.dscr_value(), None);
        assert_close(report.normal_lease.annual_noi, 9_600.0, 1e-9);
        assert_close(report.normal_lease.monthly_cash_flow, 800.0, 1e-9);
    }

    #[test]
    fn test_zero_rate_loan() {
        let input = PropertyInput {
            annual_mortgage_rate: 0.0,
            lease_term_years: 10,
            loan_amount: 120_000.0,
            ..sample_input()
        };
        let report = build_property_report(&input, &sample_global(), 1);
        assert_eq!(report.monthly_mortgage_payment, 1_000.0);
        assert_eq!(report.annual_debt_service, 12_000.0);
        assert_close(report.normal_lease.dscr, 0.8, 1e-12);
    }

    #[test]
    fn test_analyze_preserves_order_and_indices() {
        let properties: Vec<PropertyInput> = (0..5)
            .map(|i| PropertyInput {
                monthly_rent_normal: 1_000.0 + 100.0 * i as f64,
                ..sample_input()
            })
            .collect();

        let reports = analyze(&sample_global(), &properties);
        assert_eq!(reports.len(), 5);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.property_index, i + 1);
            assert_close(
                report.normal_lease.annual_rent,
                properties[i].monthly_rent_normal * 12.0,
                1e-9,
            );
        }
    }

    #[test]
    fn test_report_independent_of_other_properties() {
        let global = sample_global();
        let alone = analyze(&global, &[sample_input()]);
        let other = PropertyInput {
            loan_amount: 0.0,
            ..sample_input()
        };
        let together = analyze(&global, &[other, sample_input()]);
        assert_eq!(alone[0].normal_lease, together[1].normal_lease);
        assert_eq!(alone[0].free_month_strategy, together[1].free_month_strategy);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let properties: Vec<PropertyInput> = (0..300)
            .map(|i| PropertyInput {
                monthly_rent_normal: 800.0 + i as f64,
                loan_amount: 1_000.0 * i as f64,
                lease_term_years: 1 + (i % 30) as u32,
                ..sample_input()
            })
            .collect();

        let sequential = analyze(&sample_global(), &properties);
        let parallel = analyze_parallel(&sample_global(), &properties);
        assert_eq!(sequential.len(), parallel.len());
        for (s, p) in sequential.iter().zip(parallel.iter()) {
            assert_eq!(s.property_index, p.property_index);
            assert_eq!(s.normal_lease.annual_noi, p.normal_lease.annual_noi);
            assert_eq!(s.free_month_strategy.tax_liability, p.free_month_strategy.tax_liability);
            assert_eq!(s.normal_lease.dscr_value(), p.normal_lease.dscr_value());
        }
    }

    #[test]
    fn test_strategy_accessor() {
        let report = build_property_report(&sample_input(), &sample_global(), 3);
        assert_eq!(report.property_index, 3);
        assert_eq!(report.strategy(LeaseStrategy::Normal), &report.normal_lease);
        assert_eq!(
            report.strategy(LeaseStrategy::OneMonthFree),
            &report.free_month_strategy
        );
    }
}
