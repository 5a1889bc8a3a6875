//! Plain-text views of the session: browse grid and list, item details,
//! templates, and the stack with its interactions panel and totals.

use supstack_core::browse::visible_items_for;
use supstack_core::catalog::Catalog;
use supstack_core::interactions::resolve_interactions;
use supstack_core::stack::Stack;
use supstack_core::state::CategoryFilter;
use supstack_core::state::Item;
use supstack_core::state::SessionState;
use supstack_core::state::ViewMode;
use supstack_core::summary::dollars;
use supstack_core::summary::StackSummary;

const IN_STACK_MARKER: &str = "✓";

pub fn render_browse(state: &SessionState, catalog: &Catalog) -> String {
    let items = visible_items_for(state, catalog);
    let mut lines = vec![format!(
        "{} | category: {} | sort: {} | view: {}",
        state.tab.label(),
        category_label(state.category),
        state.sort_by.label(),
        state.view.label(),
    )];
    if !state.search_query.is_empty() {
        lines.push(format!("search: \"{}\"", state.search_query));
    }
    lines.push(String::new());

    if items.is_empty() {
        lines.push("No supplements match your filters.".to_string());
        return lines.join("\n");
    }

    for item in &items {
        let in_stack = state.is_in_stack(&item.id);
        match state.view {
            ViewMode::Grid => {
                lines.extend(grid_card(item, in_stack));
                lines.push(String::new());
            }
            ViewMode::List => lines.push(list_row(item, in_stack)),
        }
    }
    if state.view == ViewMode::Grid {
        lines.pop();
    }
    lines.push(String::new());
    lines.push(format!(
        "{} of {} supplements",
        items.len(),
        catalog.items().len()
    ));
    lines.join("\n")
}

fn grid_card(item: &Item, in_stack: bool) -> Vec<String> {
    let marker = if in_stack {
        format!("  [{IN_STACK_MARKER} In stack]")
    } else {
        String::new()
    };
    vec![
        format!("{} ({}){marker}", item.name, item.category.label()),
        format!("  {}", item.description),
        format!(
            "  anti-inflammatory {} | evidence {} | {}/day | {} pills/day",
            item.anti_inflammatory_label(),
            item.evidence_label(),
            dollars(item.cost_per_day),
            item.pills_per_day,
        ),
        format!("  id: {}", item.id),
    ]
}

fn list_row(item: &Item, in_stack: bool) -> String {
    let marker = if in_stack { IN_STACK_MARKER } else { " " };
    format!(
        "{marker} {:<24} {:<28} {:<12} {:>7} {:>7}",
        item.id,
        item.name,
        item.category.label(),
        item.anti_inflammatory_label(),
        dollars(item.cost_per_day),
    )
}

pub fn render_details(item: &Item, stack: &Stack) -> String {
    let mut lines = vec![
        format!("{} ({})", item.name, item.category.label()),
        item.description.clone(),
        String::new(),
        format!("Anti-inflammatory potential: {}", item.anti_inflammatory_label()),
        format!(
            "Evidence: {} ({} studies)",
            item.evidence_label(),
            item.evidence.studies
        ),
        format!("Safety score: {}/10", item.safety_score),
        format!("Recommended dose: {}", item.recommended_dose),
        format!("Timing: {}", item.timing.label()),
        format!("Cost: {}/day", dollars(item.cost_per_day)),
        format!("Pills per day: {}", item.pills_per_day),
    ];

    push_section(&mut lines, "Benefits", &item.benefits);
    push_section(&mut lines, "Forms", &item.forms);
    push_section(&mut lines, "Side effects", &item.side_effects);
    push_section(&mut lines, "Drug interactions", &item.interactions);

    if let Some(breakdown) = &item.evidence_breakdown {
        lines.push(String::new());
        lines.push("Evidence breakdown:".to_string());
        lines.push(format!("  Studies: {}", breakdown.study_count));
        if !breakdown.study_types.is_empty() {
            lines.push(format!("  Study types: {}", breakdown.study_types.join(", ")));
        }
        for (label, value) in [
            ("Effect size", &breakdown.effect_size),
            ("Mechanism", &breakdown.mechanism),
            ("Safety", &breakdown.safety),
            ("Best study", &breakdown.best_study),
        ] {
            if !value.is_empty() {
                lines.push(format!("  {label}: {value}"));
            }
        }
    }

    lines.push(String::new());
    lines.push(match stack.entry(&item.id) {
        Some(entry) if entry.has_custom_multiplier() => {
            format!("{IN_STACK_MARKER} In your stack (x{})", entry.multiplier)
        }
        Some(_) => format!("{IN_STACK_MARKER} In your stack"),
        None => format!("Not in your stack. Add it with `supstack add {}`", item.id),
    });
    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, title: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{title}:"));
    lines.extend(values.iter().map(|value| format!("  - {value}")));
}

pub fn render_templates(catalog: &Catalog) -> String {
    if catalog.templates().is_empty() {
        return "No stack templates available.".to_string();
    }
    let mut blocks = Vec::new();
    for template in catalog.templates() {
        let names: Vec<&str> = template
            .supplements
            .iter()
            .map(|id| catalog.item_name(id))
            .collect();
        blocks.push(format!(
            "{} {} ({})\n  {}\n  Includes: {}",
            template.icon,
            template.name,
            template.id,
            template.description,
            names.join(", ")
        ));
    }
    blocks.join("\n\n")
}

pub fn render_stack(stack: &Stack, catalog: &Catalog) -> String {
    if stack.is_empty() {
        return "Your stack is empty. Browse supplements or apply a template to get started."
            .to_string();
    }

    let mut lines = vec!["My Stack".to_string(), String::new()];
    for entry in stack.entries() {
        let item = &entry.item;
        lines.push(format!(
            "{:<28} x{:<4} {}/day  {} pills/day  {}",
            item.name,
            entry.multiplier,
            dollars(entry.daily_cost()),
            format_pills(entry.daily_pills()),
            item.timing.label(),
        ));
    }

    let flagged = resolve_interactions(stack, catalog.interactions());
    if !flagged.is_empty() {
        lines.push(String::new());
        lines.push("Interactions to review:".to_string());
        for rule in flagged {
            lines.push(format!(
                "  [{}] {} + {}: {}",
                rule.severity.label(),
                catalog.item_name(&rule.supplements[0]),
                catalog.item_name(&rule.supplements[1]),
                rule.description
            ));
        }
    }

    let summary = StackSummary::compute(stack);
    lines.push(String::new());
    lines.push(format!(
        "Supplements: {} | Daily cost: {} | Pills per day: {}",
        summary.item_count,
        summary.cost_label(),
        summary.rounded_pills()
    ));
    lines.join("\n")
}

fn format_pills(pills: f64) -> String {
    if pills.fract() == 0.0 {
        format!("{pills:.0}")
    } else {
        format!("{pills:.1}")
    }
}

fn category_label(filter: CategoryFilter) -> &'static str {
    match filter {
        CategoryFilter::All => "All",
        CategoryFilter::Only(category) => category.label(),
    }
}
