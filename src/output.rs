//! Non-interactive rendering of a summary or schedule.
//!
//! Figures are rounded to cents on the way out; the table format adds the
//! currency symbol and thousands separators.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::calculator::{round_cents, AmortizationRow, LoanParameters, PaymentSummary};
use crate::format::{format_currency, format_number, CURRENCY_SYMBOL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
}

#[derive(Serialize)]
struct SummaryReport<'a> {
    parameters: &'a LoanParameters,
    months: u32,
    #[serde(flatten)]
    summary: PaymentSummary,
}

fn rounded_row(row: &AmortizationRow) -> AmortizationRow {
    AmortizationRow {
        period: row.period,
        payment: round_cents(row.payment),
        interest_portion: round_cents(row.interest_portion),
        principal_portion: round_cents(row.principal_portion),
        remaining_balance: round_cents(row.remaining_balance),
    }
}

pub fn write_summary<W: Write>(
    out: &mut W,
    format: OutputFormat,
    params: &LoanParameters,
    summary: &PaymentSummary,
) -> Result<()> {
    let rounded = summary.rounded();
    match format {
        OutputFormat::Json => {
            let report = SummaryReport {
                parameters: params,
                months: params.period_count(),
                summary: rounded,
            };
            serde_json::to_writer_pretty(&mut *out, &report)
                .context("Failed to serialize summary")?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            wtr.serialize(rounded).context("Failed to write summary CSV")?;
            wtr.flush()?;
        }
        OutputFormat::Table => {
            writeln!(out, "{:<16}{}", "Loan Amount:", format_currency(params.principal))?;
            writeln!(out, "{:<16}{}%", "Interest Rate:", params.annual_rate_percent)?;
            writeln!(
                out,
                "{:<16}{} years ({} months)",
                "Tenure:",
                params.tenure_years,
                params.period_count()
            )?;
            writeln!(out)?;
            writeln!(out, "{:<16}{}", "Monthly EMI:", format_currency(rounded.periodic_payment))?;
            writeln!(out, "{:<16}{}", "Total Interest:", format_currency(rounded.total_interest))?;
            writeln!(out, "{:<16}{}", "Total Payment:", format_currency(rounded.total_payment))?;
        }
    }
    Ok(())
}

pub fn write_schedule<W: Write>(out: &mut W, format: OutputFormat, rows: &[AmortizationRow]) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let rounded: Vec<AmortizationRow> = rows.iter().map(rounded_row).collect();
            serde_json::to_writer_pretty(&mut *out, &rounded)
                .context("Failed to serialize schedule")?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            for row in rows {
                wtr.serialize(rounded_row(row))
                    .context("Failed to write schedule CSV")?;
            }
            wtr.flush()?;
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "{:>6}  {:>16}  {:>16}  {:>16}  {:>18}",
                "Month", "EMI", "Interest", "Principal", "Balance"
            )?;
            for row in rows {
                writeln!(
                    out,
                    "{:>6}  {:>16}  {:>16}  {:>16}  {:>18}",
                    row.period,
                    format!("{CURRENCY_SYMBOL}{}", format_number(row.payment)),
                    format!("{CURRENCY_SYMBOL}{}", format_number(row.interest_portion)),
                    format!("{CURRENCY_SYMBOL}{}", format_number(row.principal_portion)),
                    format!("{CURRENCY_SYMBOL}{}", format_number(row.remaining_balance)),
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{compute_schedule, compute_summary};

    fn reference() -> LoanParameters {
        LoanParameters::new(100_000.0, 10.0, 1.0).unwrap()
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn summary_json_is_rounded() {
        let params = reference();
        let summary = compute_summary(&params).unwrap();
        let text = render(|out| write_summary(out, OutputFormat::Json, &params, &summary));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["periodic_payment"], serde_json::json!(8791.59));
        assert_eq!(value["months"], serde_json::json!(12));
        assert_eq!(value["parameters"]["principal"], serde_json::json!(100000.0));
    }

    #[test]
    fn summary_table_uses_currency_format() {
        let params = reference();
        let summary = compute_summary(&params).unwrap();
        let text = render(|out| write_summary(out, OutputFormat::Table, &params, &summary));
        assert!(text.contains("₹ 8,791.59"));
        assert!(text.contains("₹ 105,499.06"));
    }

    #[test]
    fn schedule_csv_has_header_and_one_line_per_row() {
        let rows = compute_schedule(&reference()).unwrap();
        let text = render(|out| write_schedule(out, OutputFormat::Csv, &rows));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(
            lines[0],
            "period,payment,interest_portion,principal_portion,remaining_balance"
        );
        assert_eq!(lines[1], "1,8791.59,833.33,7958.26,92041.74");
        assert!(lines[12].ends_with(",0.0"));
    }

    #[test]
    fn schedule_table_lists_each_period() {
        let rows = compute_schedule(&reference()).unwrap();
        let text = render(|out| write_schedule(out, OutputFormat::Table, &rows[..2]));
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("₹92,041.74"));
    }
}
