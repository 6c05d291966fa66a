//! Salary and corpus growth helpers used by the yearly projection

/// Share of gross salary paid into NPS each month (employee + government)
pub const NPS_CONTRIB_RATE: f64 = 0.24;

/// Share of gross salary paid into UPS each month (employee + government)
pub const UPS_CONTRIB_RATE: f64 = 0.20;

/// Months of contributions compounded per projected year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Gross monthly salary: basic pay plus dearness allowance
pub fn calculate_salary(basic_pay: f64, da_rate: f64) -> f64 {
    basic_pay * (1.0 + da_rate)
}

/// Corpus after one year of monthly compounding with a fixed monthly contribution.
///
/// Future value of the opening lump sum plus an ordinary annuity of twelve
/// contributions, at a monthly rate of `return_rate / 12`:
///
/// `corpus * (1+r)^12 + contrib * ((1+r)^12 - 1) / r`
///
/// A zero rate is handled exactly as `corpus + 12 * contrib`.
pub fn get_yearly_accumulated_corpus(initial_corpus: f64, return_rate: f64, monthly_contrib: f64) -> f64 {
    let r = return_rate / MONTHS_PER_YEAR as f64;
    let n = MONTHS_PER_YEAR as f64;

    if r == 0.0 {
        return initial_corpus + monthly_contrib * n;
    }

    let growth = (1.0 + r).powi(MONTHS_PER_YEAR as i32);
    let fv_corpus = initial_corpus * growth;
    let fv_contrib = monthly_contrib * ((growth - 1.0) / r);
    fv_corpus + fv_contrib
}
