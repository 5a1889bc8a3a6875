use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::stack::Stack;

pub const MIN_MULTIPLIER: f64 = 0.5;
pub const MAX_MULTIPLIER: f64 = 5.0;
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

pub fn multiplier_in_range(value: f64) -> bool {
    (MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Omega-3")]
    Omega3,
    Herbs,
    Antioxidants,
    Vitamins,
    Minerals,
    Adaptogens,
    #[serde(rename = "Amino Acids")]
    AminoAcids,
    Probiotics,
    Enzymes,
    Mushrooms,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Self::Omega3,
        Self::Herbs,
        Self::Antioxidants,
        Self::Vitamins,
        Self::Minerals,
        Self::Adaptogens,
        Self::AminoAcids,
        Self::Probiotics,
        Self::Enzymes,
        Self::Mushrooms,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Omega3 => "Omega-3",
            Self::Herbs => "Herbs",
            Self::Antioxidants => "Antioxidants",
            Self::Vitamins => "Vitamins",
            Self::Minerals => "Minerals",
            Self::Adaptogens => "Adaptogens",
            Self::AminoAcids => "Amino Acids",
            Self::Probiotics => "Probiotics",
            Self::Enzymes => "Enzymes",
            Self::Mushrooms => "Mushrooms",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive match against the display label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(label))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timing {
    #[serde(rename = "With meals")]
    WithMeals,
    #[serde(rename = "Empty stomach (30 min before meals)")]
    EmptyStomach,
    Morning,
    Evening,
    #[serde(rename = "Before bed")]
    BeforeBed,
    #[serde(rename = "Any time")]
    AnyTime,
}

impl Timing {
    pub fn label(self) -> &'static str {
        match self {
            Self::WithMeals => "With meals",
            Self::EmptyStomach => "Empty stomach (30 min before meals)",
            Self::Morning => "Morning",
            Self::Evening => "Evening",
            Self::BeforeBed => "Before bed",
            Self::AnyTime => "Any time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Evidence {
    /// 0-100 scale.
    pub score: f64,
    pub studies: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvidenceBreakdown {
    pub study_count: u32,
    pub study_types: Vec<String>,
    pub effect_size: String,
    pub mechanism: String,
    pub safety: String,
    pub best_study: String,
}

/// One immutable catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub anti_inflammatory_potential: f64,
    pub evidence: Evidence,
    pub recommended_dose: String,
    pub timing: Timing,
    #[serde(default)]
    pub forms: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub side_effects: Vec<String>,
    /// Drug classes this item is known to interact with.
    #[serde(default)]
    pub interactions: Vec<String>,
    pub cost_per_day: f64,
    pub pills_per_day: u32,
    pub safety_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_breakdown: Option<EvidenceBreakdown>,
}

impl Item {
    /// Evidence rescaled to 0-10 with one decimal, as shown on cards.
    pub fn evidence_label(&self) -> String {
        format!("{:.1}/10", self.evidence.score / 10.0)
    }

    pub fn anti_inflammatory_label(&self) -> String {
        format!("{:.1}/10", self.anti_inflammatory_potential)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRule {
    /// Unordered pair of item ids.
    pub supplements: [String; 2],
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub supplements: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Browse,
    Templates,
    MyStack,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Browse => "Browse",
            Self::Templates => "Templates",
            Self::MyStack => "My Stack",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    AntiInflammatory,
    Name,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::AntiInflammatory => "anti-inflammatory",
            Self::Name => "name",
        }
    }
}

/// Everything a running session tracks. Mutated only by the reducer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub tab: Tab,
    pub view: ViewMode,
    pub category: CategoryFilter,
    /// Always lowercase.
    pub search_query: String,
    pub sort_by: SortKey,
    pub expanded_item: Option<String>,
    pub stack: Stack,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_stack(&self, item_id: &str) -> bool {
        self.stack.contains(item_id)
    }
}

pub type ItemRef = Arc<Item>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn category_labels_round_trip_through_lookup() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
        assert_eq!(Category::from_label("amino acids"), Some(Category::AminoAcids));
        assert_eq!(Category::from_label("nootropics"), None);
    }

    #[test]
    fn multiplier_bounds_are_inclusive() {
        assert!(multiplier_in_range(0.5));
        assert!(multiplier_in_range(5.0));
        assert!(!multiplier_in_range(0.49));
        assert!(!multiplier_in_range(5.01));
        assert!(!multiplier_in_range(f64::NAN));
    }

    #[test]
    fn category_filter_all_matches_everything() {
        assert!(CategoryFilter::All.matches(Category::Mushrooms));
        assert!(CategoryFilter::Only(Category::Herbs).matches(Category::Herbs));
        assert!(!CategoryFilter::Only(Category::Herbs).matches(Category::Vitamins));
    }
}
