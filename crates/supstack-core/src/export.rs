use std::fmt::Write;

use super::catalog::Catalog;
use super::error::ExportError;
use super::interactions::resolve_interactions;
use super::stack::Stack;
use super::summary::dollars;
use super::summary::StackSummary;

pub const DEFAULT_EXPORT_FILE_NAME: &str = "my-supplement-stack.txt";

/// Plain-text report of the stack: per-item dose, timing and cost, the
/// daily total, and any detected interactions.
pub fn render_report(stack: &Stack, catalog: &Catalog) -> Result<String, ExportError> {
    if stack.is_empty() {
        return Err(ExportError::EmptyStack);
    }

    let mut out = String::new();
    out.push_str("MY ANTI-INFLAMMATORY SUPPLEMENT STACK\n");
    out.push_str("=====================================\n\n");

    for entry in stack.entries() {
        let item = &entry.item;
        let _ = writeln!(out, "{}", item.name);
        let _ = write!(out, "Dose: {}", item.recommended_dose);
        if entry.has_custom_multiplier() {
            let _ = write!(out, " ({}x)", entry.multiplier);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Timing: {}", item.timing.label());
        let _ = writeln!(out, "Cost: {}/day", dollars(entry.daily_cost()));
        out.push('\n');
    }

    let summary = StackSummary::compute(stack);
    let _ = writeln!(out, "\nTOTAL ESTIMATED DAILY COST: {}", summary.cost_label());

    let found = resolve_interactions(stack, catalog.interactions());
    if !found.is_empty() {
        out.push_str("\nPOTENTIAL INTERACTIONS:\n");
        for rule in found {
            let [a, b] = &rule.supplements;
            let _ = writeln!(
                out,
                "- {} + {}: {}",
                catalog.item_name(a),
                catalog.item_name(b),
                rule.description
            );
        }
    }

    Ok(out)
}
