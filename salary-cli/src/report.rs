//! Plain-text rendering of results.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use salary_core::{SalaryInput, SalaryResult, TaxYearTable, round_half_up};

use crate::utils::format_amount;

const LABEL_WIDTH: usize = 26;
const AMOUNT_WIDTH: usize = 12;

fn label(wire_name: &str) -> &'static str {
    match wire_name {
        "incomeTax" => "Income tax",
        "churchTax" => "Church tax",
        "solidarityTax" => "Solidarity surcharge",
        "healthInsurance" => "Health insurance",
        "pensionInsurance" => "Pension insurance",
        "unemploymentInsurance" => "Unemployment insurance",
        "nursingCareInsurance" => "Nursing-care insurance",
        _ => "Other",
    }
}

fn period_gross(input: &SalaryInput) -> Decimal {
    round_half_up(input.annual_gross() / input.period.divisor())
}

fn line(
    out: &mut String,
    text: &str,
    amount: Decimal,
) {
    let _ = writeln!(
        out,
        "{text:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        format_amount(amount)
    );
}

/// A payslip-style breakdown of one result.
pub fn render_result(
    input: &SalaryInput,
    result: &SalaryResult,
) -> String {
    let mut out = String::new();
    let rule = "-".repeat(LABEL_WIDTH + AMOUNT_WIDTH);

    let _ = writeln!(
        out,
        "{} {}, tax class {}, {}",
        input.year,
        input.period.as_str(),
        input.tax_class.number(),
        input.federal_state.name()
    );
    let _ = writeln!(out, "{rule}");
    line(&mut out, "Gross", period_gross(input));
    for (name, amount) in result.breakdown.items() {
        line(&mut out, label(name), amount);
    }
    let _ = writeln!(out, "{rule}");
    line(&mut out, "Taxes", result.breakdown.taxes());
    line(&mut out, "Social insurance", result.breakdown.social_insurance());
    line(&mut out, "Net", result.net);

    out
}

/// One row per input, for batch runs.
pub fn render_batch(rows: &[(SalaryInput, SalaryResult)]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>6}  {:>7}  {:>5}  {:>5}  {:>12}  {:>12}  {:>12}  {:>12}",
        "row", "year", "period", "class", "state", "gross", "taxes", "insurance", "net"
    );

    for (idx, (input, result)) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:>6}  {:>7}  {:>5}  {:>5}  {:>12}  {:>12}  {:>12}  {:>12}",
            idx + 1,
            input.year,
            input.period.as_str(),
            input.tax_class.number(),
            input.federal_state.code(),
            format_amount(period_gross(input)),
            format_amount(result.breakdown.taxes()),
            format_amount(result.breakdown.social_insurance()),
            format_amount(result.net)
        );
    }

    out
}

/// Configured years, marking the fallback.
pub fn render_years(table: &TaxYearTable) -> String {
    let mut out = String::new();
    for year in table.years() {
        let marker = if year == table.default_year() { " (default)" } else { "" };
        let _ = writeln!(out, "{year}{marker}");
    }
    out
}
