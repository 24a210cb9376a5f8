//! Terminal rendering.
//!
//! Amounts are shown in rupees with Indian digit grouping. The `₹` symbol is
//! added here and nowhere else.

use rust_decimal::Decimal;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};
use tax_core::format::{format_amount, lakh_label};
use tax_core::{RegimeConfig, SlabBracket, TaxComputationResult, TaxSlab};

use crate::batch::BatchRecord;

const LABEL_WIDTH: usize = 34;

pub fn rupees(amount: Decimal) -> String {
    format!("₹{}", format_amount(amount, None))
}

/// Relief lines are shown as reductions.
fn minus_rupees(amount: Decimal) -> String {
    format!("-₹{}", format_amount(amount, None))
}

/// `₹4,00,000 to ₹8,00,000`
pub fn range_label(slab: &TaxSlab) -> String {
    format!("{} to {}", rupees(slab.range_start), rupees(slab.range_end))
}

#[derive(Debug, Clone, Tabled)]
struct SlabRow {
    #[tabled(rename = "Tax Slab")]
    range: String,

    #[tabled(rename = "Tax Rate")]
    rate: String,

    #[tabled(rename = "Total")]
    total: String,
}

#[derive(Debug, Clone, Tabled)]
struct BracketRow {
    #[tabled(rename = "From")]
    from: String,

    #[tabled(rename = "To")]
    to: String,

    #[tabled(rename = "Rate")]
    rate: String,
}

#[derive(Debug, Clone, Tabled)]
struct BatchRow {
    #[tabled(rename = "#")]
    row: usize,

    #[tabled(rename = "Income")]
    income: String,

    #[tabled(rename = "Deduction")]
    deduction: String,

    #[tabled(rename = "Taxable")]
    taxable: String,

    #[tabled(rename = "Tax")]
    gross_tax: String,

    #[tabled(rename = "Rebate")]
    rebate: String,

    #[tabled(rename = "Relief")]
    marginal_relief: String,

    #[tabled(rename = "Cess")]
    cess: String,

    #[tabled(rename = "Liability")]
    liability: String,
}

fn line(
    label: &str,
    value: String,
) -> String {
    format!("  {label:<LABEL_WIDTH$}{value}")
}

/// The slab breakdown with a right-aligned rate and total.
pub fn slab_table(slabs: &[TaxSlab]) -> String {
    let rows: Vec<SlabRow> = slabs
        .iter()
        .map(|slab| SlabRow {
            range: range_label(slab),
            rate: format!("{}%", slab.rate_percent),
            total: format_amount(slab.taxed_amount, None),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

/// The full calculation summary.
pub fn summary(
    result: &TaxComputationResult,
    config: &RegimeConfig,
) -> String {
    let mut lines = vec![
        "Income Tax Calculator".to_string(),
        format!(
            "{} | {}",
            config.financial_year_label(),
            config.regime.label()
        ),
        String::new(),
        "Income Details".to_string(),
        line("Annual Income", rupees(result.income)),
        "Deductions".to_string(),
        line(
            "Standard Deduction",
            minus_rupees(result.standard_deduction_applied),
        ),
        "Taxable Income".to_string(),
        line("Income After Deductions", rupees(result.taxable_income)),
    ];

    if !result.slab_breakdown.is_empty() {
        lines.push(String::new());
        lines.push("Tax Slabs Calculation".to_string());
        lines.push(slab_table(&result.slab_breakdown));
    }

    lines.push(String::new());
    lines.push(line("Applicable Income Tax", rupees(result.gross_tax)));
    if !result.rebate.is_zero() {
        let label = format!("Rebate upto ₹{}", lakh_label(config.rebate_ceiling));
        lines.push(line(&label, minus_rupees(result.rebate)));
    }
    if !result.marginal_relief.is_zero() {
        lines.push(line("Marginal Relief", minus_rupees(result.marginal_relief)));
    }
    let cess_label = format!(
        "Health and Education Cess ({}%)",
        config.cess_rate_percent
    );
    lines.push(line(&cess_label, rupees(result.cess)));

    lines.push(String::new());
    lines.push("Tax Liability".to_string());
    lines.push(format!("  {}", rupees(result.final_liability)));

    lines.join("\n")
}

/// The configured slab table and the scalar settings around it.
pub fn regime_table(config: &RegimeConfig) -> String {
    let rows: Vec<BracketRow> = config.slabs.iter().map(bracket_row).collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();

    [
        config.financial_year_label(),
        config.regime.label().to_string(),
        String::new(),
        table,
        String::new(),
        line("Standard Deduction", rupees(config.standard_deduction)),
        line("Rebate Ceiling", rupees(config.rebate_ceiling)),
        line(
            "Health and Education Cess",
            format!("{}%", config.cess_rate_percent),
        ),
    ]
    .join("\n")
}

fn bracket_row(bracket: &SlabBracket) -> BracketRow {
    BracketRow {
        from: rupees(bracket.min_income),
        to: bracket
            .max_income
            .map(rupees)
            .unwrap_or_else(|| "and above".to_string()),
        rate: format!("{}%", bracket.rate_percent),
    }
}

/// One row per computed income.
pub fn batch_table(records: &[BatchRecord]) -> String {
    let rows: Vec<BatchRow> = records
        .iter()
        .map(|r| BatchRow {
            row: r.row,
            income: format_amount(r.income, None),
            deduction: format_amount(r.standard_deduction, None),
            taxable: format_amount(r.taxable_income, None),
            gross_tax: format_amount(r.gross_tax, None),
            rebate: format_amount(r.rebate, None),
            marginal_relief: format_amount(r.marginal_relief, None),
            cess: format_amount(r.cess, None),
            liability: format_amount(r.final_liability, None),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::TaxEngine;

    use super::*;

    fn summary_for(
        income: &str,
        apply_standard_deduction: bool,
    ) -> String {
        let engine = TaxEngine::default();
        let result = engine.compute(income, apply_standard_deduction);
        summary(&result, engine.config())
    }

    // =========================================================================
    // labels
    // =========================================================================

    #[test]
    fn rupees_prefixes_grouped_amount() {
        assert_eq!(rupees(dec!(1250000)), "₹12,50,000");
        assert_eq!(rupees(dec!(617.25)), "₹617.25");
    }

    #[test]
    fn range_label_joins_bounds() {
        let slab = TaxSlab {
            range_start: dec!(2400000),
            range_end: dec!(3000000),
            rate_percent: 30,
            taxable_amount: dec!(600000),
            taxed_amount: dec!(180000),
        };

        assert_eq!(range_label(&slab), "₹24,00,000 to ₹30,00,000");
    }

    // =========================================================================
    // summary
    // =========================================================================

    #[test]
    fn summary_heading_names_year_and_regime() {
        let text = summary_for("1000000", true);

        assert!(text.starts_with("Income Tax Calculator\n"));
        assert!(text.contains("Financial Year 2025-26 (AY 2026-27) | New Tax Regime"));
    }

    #[test]
    fn summary_shows_rebate_but_not_relief_below_ceiling() {
        let text = summary_for("1000000", true);

        assert!(text.contains("-₹75,000"));
        assert!(text.contains("₹9,25,000"));
        assert!(text.contains("Rebate upto ₹12 Lakh"));
        assert!(!text.contains("Marginal Relief"));
        assert!(text.ends_with("Tax Liability\n  ₹0"));
    }

    #[test]
    fn summary_shows_relief_but_not_rebate_above_ceiling() {
        let text = summary_for("1250000", false);

        assert!(!text.contains("Rebate upto"));
        assert!(text.contains("Marginal Relief"));
        assert!(text.contains("-₹17,500"));
        assert!(text.contains("Health and Education Cess (4%)"));
        assert!(text.ends_with("₹52,000"));
    }

    #[test]
    fn summary_omits_slab_table_when_no_tax() {
        let text = summary_for("", true);

        assert!(!text.contains("Tax Slabs Calculation"));
        assert!(text.contains("₹-75,000"));
    }

    #[test]
    fn summary_lists_taxed_slabs() {
        let text = summary_for("3000000", false);

        assert!(text.contains("Tax Slabs Calculation"));
        assert!(text.contains("₹4,00,000 to ₹8,00,000"));
        assert!(text.contains("₹24,00,000 to ₹30,00,000"));
        assert!(text.contains("30%"));
        assert!(!text.contains("₹0 to ₹4,00,000"));
        assert!(text.ends_with("₹4,99,200"));
    }

    #[test]
    fn summary_rebate_label_follows_config() {
        let mut config = RegimeConfig::default();
        config.rebate_ceiling = dec!(700000);
        let engine = TaxEngine::new(config).expect("valid config");

        let result = engine.compute("600000", false);
        let text = summary(&result, engine.config());

        assert!(text.contains("Rebate upto ₹7 Lakh"), "got:\n{text}");
    }

    // =========================================================================
    // tables
    // =========================================================================

    #[test]
    fn regime_table_lists_every_bracket() {
        let text = regime_table(&RegimeConfig::default());

        assert!(text.contains("₹0"));
        assert!(text.contains("₹24,00,000"));
        assert!(text.contains("and above"));
        assert!(text.contains("₹75,000"));
        assert!(text.contains("₹12,00,000"));
        assert_eq!(text.matches('%').count(), 8);
    }

    #[test]
    fn batch_table_has_one_line_per_record() {
        let engine = TaxEngine::default();
        let records: Vec<BatchRecord> = ["1000000", "1300000"]
            .iter()
            .enumerate()
            .map(|(i, income)| BatchRecord::new(i + 1, &engine.compute(income, true)))
            .collect();

        let text = batch_table(&records);

        assert!(text.contains("Liability"));
        assert!(text.contains("10,00,000"));
        assert!(text.contains("13,00,000"));
        // Top border, header, separator, two rows, bottom border.
        assert_eq!(text.lines().count(), 6);
    }
}
