//! EMI and amortization arithmetic.
//!
//! Everything here is a pure function of [`LoanParameters`]. Values are kept at
//! full floating precision; rounding to cents happens only for display via
//! [`round_cents`] and [`PaymentSummary::rounded`].

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// Absorbs float noise such as `2.9999999999 * 12` before truncating to months.
const MONTH_EPSILON: f64 = 1e-9;

/// Longest schedule accepted: 1000 years of monthly installments.
pub const MAX_PERIOD_COUNT: u32 = 12_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_years: f64,
}

impl LoanParameters {
    pub fn new(principal: f64, annual_rate_percent: f64, tenure_years: f64) -> CalcResult<Self> {
        let params = Self {
            principal,
            annual_rate_percent,
            tenure_years,
        };
        params.validate()?;
        Ok(params)
    }

    /// Builds parameters from the raw text of the three input fields.
    pub fn parse(principal: &str, annual_rate_percent: &str, tenure_years: &str) -> CalcResult<Self> {
        Self::new(
            parse_field("principal", principal)?,
            parse_field("interest_rate", annual_rate_percent)?,
            parse_field("tenure", tenure_years)?,
        )
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.principal.is_finite() {
            return Err(CalcError::invalid("principal", "must be a number"));
        }
        if !self.annual_rate_percent.is_finite() {
            return Err(CalcError::invalid("interest_rate", "must be a number"));
        }
        if !self.tenure_years.is_finite() {
            return Err(CalcError::invalid("tenure", "must be a number"));
        }
        if self.principal <= 0.0 {
            return Err(CalcError::invalid("principal", "must be greater than zero"));
        }
        if self.annual_rate_percent < 0.0 {
            return Err(CalcError::invalid("interest_rate", "must not be negative"));
        }
        if self.tenure_years <= 0.0 {
            return Err(CalcError::invalid("tenure", "must be greater than zero"));
        }
        if self.period_count() == 0 {
            return Err(CalcError::invalid("tenure", "must cover at least one whole month"));
        }
        if self.period_count() > MAX_PERIOD_COUNT {
            return Err(CalcError::invalid(
                "tenure",
                format!("must not exceed {} months", MAX_PERIOD_COUNT),
            ));
        }
        Ok(())
    }

    /// Periodic (monthly) rate as a fraction, e.g. 8.5% a year -> 0.0070833...
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12.0 / 100.0
    }

    /// Number of monthly installments. Partial months are truncated, and both
    /// the summary and the schedule use this count.
    pub fn period_count(&self) -> u32 {
        let months = (self.tenure_years * 12.0 + MONTH_EPSILON).floor();
        if months < 1.0 {
            0
        } else if months >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            months as u32
        }
    }
}

fn parse_field(field: &'static str, raw: &str) -> CalcResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::invalid(field, "is empty"));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| CalcError::invalid(field, format!("'{trimmed}' is not a number")))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub periodic_payment: f64,
    pub total_interest: f64,
    pub total_payment: f64,
}

impl PaymentSummary {
    /// Copy with every value rounded to two decimal places.
    pub fn rounded(&self) -> Self {
        Self {
            periodic_payment: round_cents(self.periodic_payment),
            total_interest: round_cents(self.total_interest),
            total_payment: round_cents(self.total_payment),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub payment: f64,
    pub interest_portion: f64,
    pub principal_portion: f64,
    pub remaining_balance: f64,
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `1 - (1 + r)^-n`, computed without cancellation for tiny `r` and without
/// overflow for long tenures.
fn discount_factor(monthly_rate: f64, months: f64) -> f64 {
    -(-months * monthly_rate.ln_1p()).exp_m1()
}

fn amortizes_linearly(params: &LoanParameters) -> bool {
    let monthly_rate = params.monthly_rate();
    monthly_rate == 0.0 || discount_factor(monthly_rate, f64::from(params.period_count())) == 0.0
}

fn periodic_payment(params: &LoanParameters) -> CalcResult<f64> {
    let monthly_rate = params.monthly_rate();
    let months = f64::from(params.period_count());

    let payment = if amortizes_linearly(params) {
        params.principal / months
    } else {
        params.principal * monthly_rate / discount_factor(monthly_rate, months)
    };

    if !payment.is_finite() || !(payment * months).is_finite() {
        return Err(CalcError::invalid("principal", "too large to amortize"));
    }
    Ok(payment)
}

/// Balance outstanding once `paid` installments have been made.
///
/// Closed form of the interest/principal recurrence; iterating the recurrence
/// instead compounds float error by `(1 + r)^n` over long tenures.
fn balance_after(params: &LoanParameters, paid: u32) -> f64 {
    let months = params.period_count();
    let left = f64::from(months.saturating_sub(paid));

    if amortizes_linearly(params) {
        params.principal * left / f64::from(months)
    } else {
        let monthly_rate = params.monthly_rate();
        params.principal * discount_factor(monthly_rate, left)
            / discount_factor(monthly_rate, f64::from(months))
    }
}

pub fn compute_summary(params: &LoanParameters) -> CalcResult<PaymentSummary> {
    params.validate()?;

    let payment = periodic_payment(params)?;
    let total_payment = payment * f64::from(params.period_count());

    Ok(PaymentSummary {
        periodic_payment: payment,
        total_interest: total_payment - params.principal,
        total_payment,
    })
}

pub fn compute_schedule(params: &LoanParameters) -> CalcResult<Vec<AmortizationRow>> {
    params.validate()?;

    let payment = periodic_payment(params)?;
    let monthly_rate = params.monthly_rate();
    let months = params.period_count();

    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = params.principal;

    for period in 1..=months {
        let interest_portion = balance * monthly_rate;
        let principal_portion = payment - interest_portion;
        balance = balance_after(params, period);

        rows.push(AmortizationRow {
            period,
            payment,
            interest_portion,
            principal_portion,
            remaining_balance: if balance <= 0.0 { 0.0 } else { balance },
        });
    }

    log::debug!(
        "generated {} schedule rows for principal {} at {}% over {} years",
        rows.len(),
        params.principal,
        params.annual_rate_percent,
        params.tenure_years
    );

    Ok(rows)
}
