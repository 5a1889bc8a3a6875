use std::collections::HashSet;

use super::stack::Stack;
use super::state::InteractionRule;

/// Rules whose two endpoints are both in the stack, in table order.
pub fn resolve_interactions<'r>(stack: &Stack, rules: &'r [InteractionRule]) -> Vec<&'r InteractionRule> {
    if stack.len() < 2 {
        return Vec::new();
    }
    let present: HashSet<&str> = stack.item_ids().collect();
    rules
        .iter()
        .filter(|rule| {
            let [a, b] = &rule.supplements;
            present.contains(a.as_str()) && present.contains(b.as_str())
        })
        .collect()
}
