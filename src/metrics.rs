//! Single-period investment metrics for a rental property.
//!
//! Every function here is pure and total over `f64`: degenerate inputs
//! produce a numeric limit or a NaN sentinel instead of panicking, so one
//! bad property never prevents the others from being reported.

pub const MONTHS_PER_YEAR: u32 = 12;

/// Rent-paying months per year under the 1-month-free concession.
pub const FREE_STRATEGY_RENT_MONTHS: u32 = 11;

/// Calculate the fixed monthly payment of a fully amortizing loan.
///
/// `annual_rate` is a fraction (0.05 for 5%). A zero rate, or one too small
/// to discount at `f64` precision, falls back to straight-line repayment,
/// `loan_amount / (term_years * 12)`.
pub fn monthly_mortgage_payment(loan_amount: f64, annual_rate: f64, term_years: u32) -> f64 {
    let monthly_rate = annual_rate / MONTHS_PER_YEAR as f64;
    let num_payments = term_years as f64 * MONTHS_PER_YEAR as f64;

    if annual_rate == 0.0 {
        return loan_amount / num_payments;
    }

    // 1 - (1 + r)^-n without cancellation for small r
    let discount = -(-num_payments * monthly_rate.ln_1p()).exp_m1();
    if !discount.is_normal() || discount <= 0.0 {
        return loan_amount / num_payments;
    }

    loan_amount * monthly_rate / discount
}

/// Twelve monthly payments.
pub fn annual_debt_service(monthly_payment: f64) -> f64 {
    monthly_payment * MONTHS_PER_YEAR as f64
}

/// Rent minus expenses minus depreciation. Negative results are losses and
/// are kept as-is.
pub fn taxable_income(gross_annual_rent: f64, annual_expenses: f64, annual_depreciation: f64) -> f64 {
    gross_annual_rent - annual_expenses - annual_depreciation
}

/// Linear tax model: a negative taxable income gives a negative liability
/// (a tax benefit).
pub fn tax_liability(taxable_income: f64, tax_rate: f64) -> f64 {
    taxable_income * tax_rate
}

/// Debt service coverage ratio.
///
/// Returns `f64::NAN` when there is no debt service (e.g. an unleveraged
/// property), meaning the ratio is undefined.
pub fn dscr(annual_noi: f64, annual_debt_service: f64) -> f64 {
    if annual_debt_service == 0.0 {
        return f64::NAN;
    }
    annual_noi / annual_debt_service
}

/// Nominal monthly rent under the 1-month-free strategy that collects the
/// same annual rent as `monthly_rent_normal` over a full year.
pub fn equivalent_free_strategy_rent(monthly_rent_normal: f64) -> f64 {
    monthly_rent_normal * MONTHS_PER_YEAR as f64 / FREE_STRATEGY_RENT_MONTHS as f64
}
