use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::error::CatalogError;
use super::state::InteractionRule;
use super::state::Item;
use super::state::ItemRef;
use super::state::Template;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// On-disk shape of a catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogDocument {
    pub supplements: Vec<Item>,
    pub interactions: Vec<InteractionRule>,
    pub templates: Vec<Template>,
}

/// Read-only dataset shared by every session: items, interaction rules
/// and stack templates.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<ItemRef>,
    interactions: Vec<InteractionRule>,
    templates: Vec<Template>,
}

impl Catalog {
    pub fn new(
        items: Vec<Item>,
        interactions: Vec<InteractionRule>,
        templates: Vec<Template>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateItem(item.id.clone()));
            }
        }
        for rule in &interactions {
            for id in &rule.supplements {
                if !seen.contains(id.as_str()) {
                    log::debug!("interaction rule references unknown supplement '{id}'");
                }
            }
        }
        Ok(Self {
            items: items.into_iter().map(Arc::new).collect(),
            interactions,
            templates,
        })
    }

    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        Self::new(
            document.supplements,
            document.interactions,
            document.templates,
        )
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Self::from_document(serde_json::from_str(raw)?)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, CatalogError> {
        Self::from_document(serde_yaml::from_str(raw)?)
    }

    /// Format is picked from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let raw = std::fs::read_to_string(path)?;
        match extension.as_str() {
            "json" => Self::from_json(&raw),
            "yaml" | "yml" => Self::from_yaml(&raw),
            _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&ItemRef> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn interactions(&self) -> &[InteractionRule] {
        &self.interactions
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Display name for an item id, falling back to the id itself.
    pub fn item_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.item(id).map_or(id, |item| item.name.as_str())
    }

    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            supplements: self.items.iter().map(|item| item.as_ref().clone()).collect(),
            interactions: self.interactions.clone(),
            templates: self.templates.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::state::Category;
    use crate::state::Evidence;
    use crate::state::Severity;
    use crate::state::Timing;

    pub(crate) fn item(
        id: &str,
        name: &str,
        category: Category,
        potential: f64,
        cost_per_day: f64,
        pills_per_day: u32,
    ) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            category,
            description: format!("{name} supplement"),
            anti_inflammatory_potential: potential,
            evidence: Evidence {
                score: 80.0,
                studies: 12,
            },
            recommended_dose: "500mg".to_string(),
            timing: Timing::WithMeals,
            forms: vec!["Capsules".to_string()],
            benefits: vec!["Anti-inflammatory effects".to_string()],
            side_effects: Vec::new(),
            interactions: Vec::new(),
            cost_per_day,
            pills_per_day,
            safety_score: 9,
            evidence_breakdown: None,
        }
    }

    pub(crate) fn rule(a: &str, b: &str, severity: Severity, description: &str) -> InteractionRule {
        InteractionRule {
            supplements: [a.to_string(), b.to_string()],
            severity,
            description: description.to_string(),
        }
    }

    pub(crate) fn catalog() -> Catalog {
        Catalog::new(
            vec![
                item("turmeric", "Turmeric", Category::Herbs, 9.0, 0.75, 2),
                item("fish-oil", "Fish Oil", Category::Omega3, 8.5, 0.60, 3),
                item("ginger", "Ginger", Category::Herbs, 7.0, 0.25, 1),
                item("vitamin-d", "Vitamin D3", Category::Vitamins, 6.0, 0.10, 1),
                item("boswellia", "Boswellia", Category::Herbs, 8.0, 0.90, 2),
            ],
            vec![
                rule(
                    "turmeric",
                    "fish-oil",
                    Severity::Moderate,
                    "Both have mild blood-thinning effects",
                ),
                rule("ginger", "turmeric", Severity::Low, "Additive antiplatelet effect"),
                rule(
                    "fish-oil",
                    "vitamin-d",
                    Severity::Low,
                    "Fat-soluble, take together with a meal",
                ),
            ],
            vec![Template {
                id: "joint-support".to_string(),
                name: "Joint Support".to_string(),
                icon: "bone".to_string(),
                description: "Classic joint stack".to_string(),
                supplements: vec![
                    "turmeric".to_string(),
                    "boswellia".to_string(),
                    "glucosamine".to_string(),
                ],
            }],
        )
        .expect("fixture catalog")
    }
}
