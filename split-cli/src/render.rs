//! Plain-text rendering of a session snapshot.

use std::fmt;

use split_core::format::{format_money, format_percentage};
use split_core::input::opt_amount_display;
use split_core::{AmountLine, Snapshot, ValidationError};

/// Displays a [`Snapshot`] as an aligned block of labelled lines.
pub struct SnapshotView<'a>(pub &'a Snapshot);

/// Displays validation errors one per line, or "No errors."
pub struct ErrorsView<'a>(pub &'a [ValidationError]);

fn write_lines(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    lines: &[AmountLine],
) -> fmt::Result {
    writeln!(f, "{label}:")?;
    for (index, line) in lines.iter().enumerate() {
        writeln!(f, "  [{index}] {}", opt_amount_display(&line.amount))?;
    }
    Ok(())
}

impl fmt::Display for SnapshotView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let Snapshot {
            form,
            derived,
            errors,
        } = self.0;

        writeln!(f, "Bill amount:        {}", opt_amount_display(&form.bill_amount))?;
        writeln!(
            f,
            "Bill without taxes: {}",
            opt_amount_display(&form.bill_without_taxes)
        )?;
        write_lines(f, "Taxes", &form.taxes)?;
        write_lines(f, "Charges", &form.charges)?;

        let percentage = derived
            .tax_percentage
            .map(|p| format!("{}%", format_percentage(p)))
            .unwrap_or_else(|| "—".to_string());
        writeln!(f, "Tax percentage:     {percentage}")?;
        writeln!(
            f,
            "Charges subtotal:   {}",
            format_money(derived.charges_subtotal)
        )?;
        writeln!(f, "Tax on charges:     {}", format_money(derived.charges_tax))?;
        writeln!(f, "Total payable:      {}", format_money(derived.total_payable))?;

        if !errors.is_empty() {
            write!(f, "{}", ErrorsView(errors))?;
        }
        Ok(())
    }
}

impl fmt::Display for ErrorsView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No errors.");
        }
        writeln!(f, "Errors:")?;
        for error in self.0 {
            writeln!(f, "  {error}")?;
        }
        Ok(())
    }
}
