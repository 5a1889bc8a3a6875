use super::stack::Stack;

/// Daily totals across the stack, weighted by each entry's multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StackSummary {
    pub item_count: usize,
    pub total_cost: f64,
    pub total_pills: f64,
}

impl StackSummary {
    pub fn compute(stack: &Stack) -> Self {
        stack.entries().iter().fold(
            Self {
                item_count: stack.len(),
                ..Self::default()
            },
            |acc, entry| Self {
                total_cost: acc.total_cost + entry.daily_cost(),
                total_pills: acc.total_pills + entry.daily_pills(),
                ..acc
            },
        )
    }

    pub fn cost_label(&self) -> String {
        dollars(self.total_cost)
    }

    pub fn rounded_pills(&self) -> u64 {
        self.total_pills.round().max(0.0) as u64
    }
}

/// `$x.xx` with halves rounded up, so 0.125 reads as `$0.13`.
pub fn dollars(amount: f64) -> String {
    format!("${:.2}", (amount * 100.0).round() / 100.0)
}
