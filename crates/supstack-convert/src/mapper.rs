//! Field mapping from the upstream research schema into catalog [`Item`]s.
//!
//! Every rule here is a table lookup or a keyword scan with a fixed default,
//! so the mapping is total: a record with no usable fields still produces an
//! item. Rules are evaluated in table order and the first match wins where a
//! single value is produced.

use once_cell::sync::Lazy;
use regex::Regex;
use supstack_core::state::Category;
use supstack_core::state::Evidence;
use supstack_core::state::EvidenceBreakdown;
use supstack_core::state::Item;
use supstack_core::state::Timing;

use super::source::SourceEvidenceBreakdown;
use super::source::SourceSupplement;

// ASCII digits only; `\d` in `regex` also matches other scripts.
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid integer regex"));

const CATEGORY_TABLE: [(&str, Category); 16] = [
    ("fatty_acids", Category::Omega3),
    ("herbs", Category::Herbs),
    ("antioxidants", Category::Antioxidants),
    ("vitamins", Category::Vitamins),
    ("minerals", Category::Minerals),
    ("adaptogens", Category::Adaptogens),
    ("amino_acids", Category::AminoAcids),
    ("probiotics", Category::Probiotics),
    ("enzymes", Category::Enzymes),
    ("mushrooms", Category::Mushrooms),
    ("superfoods", Category::Other),
    ("hormones", Category::Other),
    ("marine", Category::Other),
    ("proteins", Category::AminoAcids),
    ("peptides", Category::Other),
    ("postbiotics", Category::Probiotics),
];

const TIMING_TABLE: [(&str, Timing); 6] = [
    ("with_meals", Timing::WithMeals),
    ("empty_stomach", Timing::EmptyStomach),
    ("morning", Timing::Morning),
    ("evening", Timing::Evening),
    ("before_bed", Timing::BeforeBed),
    ("anytime", Timing::AnyTime),
];

const BIOAVAILABILITY_FORMS: [(&str, &str); 4] = [
    ("extract", "Standardized extract"),
    ("oil", "Oil"),
    ("powder", "Powder"),
    ("capsule", "Capsules"),
];
const DEFAULT_FORMS: [&str; 2] = ["Capsules", "Powder"];

const MECHANISM_BENEFITS: [(&str, &str); 4] = [
    ("NF-κB", "Reduces NF-κB activation"),
    ("COX", "Inhibits COX enzymes"),
    ("antioxidant", "Powerful antioxidant"),
    ("immune", "Modulates immune response"),
];
const EFFECT_SIZE_BENEFITS: [(&str, &str); 4] = [
    ("CRP", "Reduces CRP levels"),
    ("IL-6", "Lowers IL-6"),
    ("TNF", "Reduces TNF-alpha"),
    ("ESR", "Lowers ESR"),
];
const FALLBACK_BENEFITS: [&str; 3] = [
    "Anti-inflammatory effects",
    "Supports overall health",
    "Evidence-based supplement",
];
const MIN_BENEFITS: usize = 3;
const MAX_BENEFITS: usize = 5;

const SIDE_EFFECT_RULES: [(&[&str], &str); 4] = [
    (&["gi", "stomach"], "May cause mild GI upset"),
    (&["blood thin", "anticoag"], "May interact with blood thinners"),
    (&["drowsy", "sedat"], "May cause drowsiness"),
    (&["blood sugar"], "May affect blood sugar levels"),
];
const WELL_TOLERATED: &str = "Generally well tolerated";

const INTERACTION_RULES: [(&[&str], &str); 4] = [
    (&["anticoag", "blood thin"], "Blood thinning medications"),
    (&["statin"], "Statin medications"),
    (&["blood sugar", "diabet"], "Diabetes medications"),
    (&["immune"], "Immunosuppressive drugs"),
];

const SAFETY_SCORE_RULES: [(&[&str], u8); 5] = [
    (&["very safe", "excellent"], 10),
    (&["generally safe"], 9),
    (&["safe"], 8),
    (&["caution", "monitor"], 7),
    (&["risk"], 6),
];
const DEFAULT_SAFETY_SCORE: u8 = 8;

const DEFAULT_COST_PER_DAY: f64 = 1.0;
const DAYS_PER_MONTH: f64 = 30.0;
const DEFAULT_PILLS_PER_DAY: u32 = 2;

pub fn map_category(category: Option<&str>) -> Category {
    category
        .and_then(|key| {
            CATEGORY_TABLE
                .iter()
                .find(|(source, _)| *source == key)
                .map(|(_, target)| *target)
        })
        .unwrap_or(Category::Other)
}

pub fn map_timing(timing: Option<&str>) -> Timing {
    timing
        .and_then(|key| {
            TIMING_TABLE
                .iter()
                .find(|(source, _)| *source == key)
                .map(|(_, target)| *target)
        })
        .unwrap_or(Timing::WithMeals)
}

pub fn extract_forms(record: &SourceSupplement) -> Vec<String> {
    let mut forms = Vec::new();
    if let Some(bioavailability) = record.bioavailability.as_deref() {
        for (keyword, form) in BIOAVAILABILITY_FORMS {
            if bioavailability.contains(keyword) {
                forms.push(form.to_string());
            }
        }
    }
    if record.name.as_deref().is_some_and(|name| name.contains("Oil")) {
        forms.push("Oil".to_string());
        forms.push("Softgels".to_string());
    }
    if forms.is_empty() {
        forms.extend(DEFAULT_FORMS.iter().map(|form| form.to_string()));
    }
    forms
}

/// Mechanism matches first, then effect-size matches. Fewer than three hits
/// appends the full fallback list; the result is capped at five.
pub fn extract_benefits(record: &SourceSupplement) -> Vec<String> {
    let mut benefits: Vec<String> = Vec::new();

    for mechanism in &record.mechanisms {
        for (keyword, benefit) in MECHANISM_BENEFITS {
            if mechanism.contains(keyword) {
                benefits.push(benefit.to_string());
            }
        }
    }

    if let Some(effect) = breakdown_field(record, |b| b.effect_size.as_deref()) {
        for (keyword, benefit) in EFFECT_SIZE_BENEFITS {
            if effect.contains(keyword) {
                benefits.push(benefit.to_string());
            }
        }
    }

    if benefits.len() < MIN_BENEFITS {
        benefits.extend(FALLBACK_BENEFITS.iter().map(|benefit| benefit.to_string()));
    }
    benefits.truncate(MAX_BENEFITS);
    benefits
}

pub fn extract_side_effects(safety: Option<&str>) -> Vec<String> {
    let Some(safety) = safety else {
        return Vec::new();
    };
    let mut side_effects = matching_sentences(&safety.to_lowercase(), &SIDE_EFFECT_RULES);
    // The tolerance check is case-sensitive on the text as written.
    if side_effects.is_empty() && safety.contains("safe") {
        side_effects.push(WELL_TOLERATED.to_string());
    }
    side_effects
}

pub fn extract_interactions(safety: Option<&str>) -> Vec<String> {
    safety
        .map(|safety| matching_sentences(&safety.to_lowercase(), &INTERACTION_RULES))
        .unwrap_or_default()
}

/// Averages the first two integers of a monthly price range into a daily cost.
pub fn extract_cost(price: Option<&str>) -> f64 {
    let Some(price) = price else {
        return DEFAULT_COST_PER_DAY;
    };
    let numbers = integers(price);
    match numbers.as_slice() {
        [low, high, ..] => (low + high) / 2.0 / DAYS_PER_MONTH,
        _ => DEFAULT_COST_PER_DAY,
    }
}

pub fn estimate_pills_per_day(dose: Option<&str>) -> u32 {
    let Some(dose) = dose else {
        return DEFAULT_PILLS_PER_DAY;
    };
    let Some(&leading) = integers(dose).first() else {
        return DEFAULT_PILLS_PER_DAY;
    };

    if dose.contains("tablet") || dose.contains("capsule") || dose.contains("pill") {
        // Float to int casts saturate.
        let per_dose = leading as u32;
        if dose.contains("3x") || dose.contains("three times") {
            return per_dose.saturating_mul(3);
        }
        if dose.contains("2x") || dose.contains("twice") {
            return per_dose.saturating_mul(2);
        }
        return per_dose;
    }

    match leading {
        mg if mg <= 500.0 => 1,
        mg if mg <= 1000.0 => 2,
        mg if mg <= 2000.0 => 3,
        _ => 4,
    }
}

pub fn estimate_safety_score(safety: Option<&str>) -> u8 {
    let Some(safety) = safety else {
        return DEFAULT_SAFETY_SCORE;
    };
    let safety = safety.to_lowercase();
    SAFETY_SCORE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| safety.contains(keyword)))
        .map_or(DEFAULT_SAFETY_SCORE, |(_, score)| *score)
}

pub fn convert_supplement(record: &SourceSupplement) -> Item {
    let safety = breakdown_field(record, |b| b.safety.as_deref());
    let anti_inflammatory_potential = record
        .anti_inflammatory_potential
        .filter(|value| *value != 0.0)
        .or(record.anti_inflammatory_score)
        .unwrap_or(0.0);

    Item {
        id: record.id.clone().unwrap_or_default(),
        name: record.name.clone().unwrap_or_default(),
        category: map_category(record.category.as_deref()),
        description: record.description.clone().unwrap_or_default(),
        anti_inflammatory_potential,
        evidence: Evidence {
            score: record.evidence_score.unwrap_or(0.0) * 10.0,
            studies: record
                .evidence_breakdown
                .as_ref()
                .and_then(|b| b.study_count)
                .unwrap_or(0),
        },
        recommended_dose: record.optimal_dose.clone().unwrap_or_default(),
        timing: map_timing(record.timing.as_deref()),
        forms: extract_forms(record),
        benefits: extract_benefits(record),
        side_effects: extract_side_effects(safety),
        interactions: extract_interactions(safety),
        cost_per_day: extract_cost(record.price.as_deref()),
        pills_per_day: estimate_pills_per_day(record.optimal_dose.as_deref()),
        safety_score: estimate_safety_score(safety),
        evidence_breakdown: record.evidence_breakdown.as_ref().map(carry_breakdown),
    }
}

fn carry_breakdown(source: &SourceEvidenceBreakdown) -> EvidenceBreakdown {
    EvidenceBreakdown {
        study_count: source.study_count.unwrap_or(0),
        study_types: source.study_types.clone(),
        effect_size: source.effect_size.clone().unwrap_or_default(),
        mechanism: source.mechanism.clone().unwrap_or_default(),
        safety: source.safety.clone().unwrap_or_default(),
        best_study: source.best_study.clone().unwrap_or_default(),
    }
}

fn breakdown_field<'a>(
    record: &'a SourceSupplement,
    field: impl FnOnce(&'a SourceEvidenceBreakdown) -> Option<&'a str>,
) -> Option<&'a str> {
    record.evidence_breakdown.as_ref().and_then(field)
}

fn matching_sentences(text: &str, rules: &[(&[&str], &str)]) -> Vec<String> {
    rules
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, sentence)| sentence.to_string())
        .collect()
}

fn integers(text: &str) -> Vec<f64> {
    INTEGER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn with_safety(safety: &str) -> SourceSupplement {
        SourceSupplement {
            evidence_breakdown: Some(SourceEvidenceBreakdown {
                safety: Some(safety.to_string()),
                ..SourceEvidenceBreakdown::default()
            }),
            ..SourceSupplement::default()
        }
    }

    #[test]
    fn fish_oil_record_maps_to_omega3_item() {
        let record: SourceSupplement = serde_json::from_value(serde_json::json!({
            "category": "fatty_acids",
            "timing": "with_meals",
            "evidenceScore": 7,
            "optimalDose": "1000mg",
            "evidenceBreakdown": { "safety": "Generally safe, may interact with blood thinners" }
        }))
        .expect("record");

        let item = convert_supplement(&record);

        assert_eq!(item.category, Category::Omega3);
        assert_eq!(item.timing, Timing::WithMeals);
        assert_eq!(item.evidence.score, 70.0);
        assert_eq!(item.pills_per_day, 2);
        assert_eq!(item.safety_score, 9);
        assert!(item
            .side_effects
            .contains(&"May interact with blood thinners".to_string()));
        assert_eq!(item.interactions, vec!["Blood thinning medications"]);
    }

    #[test]
    fn unknown_category_and_timing_fall_back() {
        assert_eq!(map_category(Some("nootropics")), Category::Other);
        assert_eq!(map_category(None), Category::Other);
        assert_eq!(map_category(Some("proteins")), Category::AminoAcids);
        assert_eq!(map_category(Some("postbiotics")), Category::Probiotics);
        assert_eq!(map_timing(Some("midnight")), Timing::WithMeals);
        assert_eq!(map_timing(None), Timing::WithMeals);
        assert_eq!(map_timing(Some("empty_stomach")), Timing::EmptyStomach);
    }

    #[test]
    fn cost_averages_monthly_range_into_daily() {
        assert!((extract_cost(Some("$25-45")) - 35.0 / 30.0).abs() < 1e-9);
        assert!((extract_cost(Some("$25-45")) - 1.1667).abs() < 1e-4);
        assert_eq!(extract_cost(Some("$30")), 1.0);
        assert_eq!(extract_cost(Some("varies")), 1.0);
        assert_eq!(extract_cost(None), 1.0);
        assert_eq!(extract_cost(Some("$10-20 (60 caps)")), 0.5);
    }

    #[test]
    fn pill_counts_from_explicit_units_and_frequency() {
        assert_eq!(estimate_pills_per_day(Some("2 capsules 3x daily")), 6);
        assert_eq!(estimate_pills_per_day(Some("1 tablet twice daily")), 2);
        assert_eq!(estimate_pills_per_day(Some("2 pills three times a day")), 6);
        assert_eq!(estimate_pills_per_day(Some("3 softgel capsules")), 3);
    }

    #[test]
    fn pill_counts_bucket_milligram_doses() {
        assert_eq!(estimate_pills_per_day(Some("500mg")), 1);
        assert_eq!(estimate_pills_per_day(Some("1000mg")), 2);
        assert_eq!(estimate_pills_per_day(Some("1500-2000mg")), 3);
        assert_eq!(estimate_pills_per_day(Some("3000mg")), 4);
        assert_eq!(estimate_pills_per_day(Some("as directed")), 2);
        assert_eq!(estimate_pills_per_day(None), 2);
        // Unit words are matched case-sensitively.
        assert_eq!(estimate_pills_per_day(Some("2 Capsules")), 1);
    }

    #[test]
    fn only_ascii_digits_count_as_numbers() {
        // Arabic-Indic zero splits the run into 5 and 0.
        assert_eq!(estimate_pills_per_day(Some("5٠0mg")), 1);
        assert_eq!(estimate_pills_per_day(Some("٥٠٠mg")), 2);
        assert_eq!(extract_cost(Some("$٢٥-٤٥")), 1.0);
    }

    #[test]
    fn safety_score_uses_first_matching_rule() {
        assert_eq!(estimate_safety_score(Some("Excellent safety record")), 10);
        assert_eq!(estimate_safety_score(Some("Very safe; monitor dose")), 10);
        assert_eq!(estimate_safety_score(Some("Generally safe")), 9);
        assert_eq!(estimate_safety_score(Some("Safe up to 2g")), 8);
        assert_eq!(estimate_safety_score(Some("Use caution in pregnancy")), 7);
        assert_eq!(estimate_safety_score(Some("Bleeding risk at high doses")), 6);
        assert_eq!(estimate_safety_score(Some("No data")), 8);
        assert_eq!(estimate_safety_score(None), 8);
    }

    #[test]
    fn side_effects_and_interactions_scan_lowercased_safety() {
        let safety = "May cause STOMACH upset and sedation; use with ANTICOAGULANTS, statins or diabetes drugs";
        assert_eq!(
            extract_side_effects(Some(safety)),
            vec![
                "May cause mild GI upset",
                "May interact with blood thinners",
                "May cause drowsiness",
            ]
        );
        assert_eq!(
            extract_interactions(Some(safety)),
            vec![
                "Blood thinning medications",
                "Statin medications",
                "Diabetes medications",
            ]
        );
    }

    #[test]
    fn well_tolerated_needs_lowercase_safe_in_raw_text() {
        assert_eq!(
            extract_side_effects(Some("Considered safe for long-term use")),
            vec![WELL_TOLERATED]
        );
        assert!(extract_side_effects(Some("SAFE for most adults")).is_empty());
        assert!(extract_side_effects(None).is_empty());
    }

    #[test]
    fn benefits_pad_with_all_fallbacks_below_three_matches() {
        let mut record = with_safety("safe");
        record.mechanisms = vec!["COX-2 inhibition".to_string()];
        record.evidence_breakdown = Some(SourceEvidenceBreakdown {
            effect_size: Some("Lowered CRP".to_string()),
            ..SourceEvidenceBreakdown::default()
        });

        assert_eq!(
            extract_benefits(&record),
            vec![
                "Inhibits COX enzymes",
                "Reduces CRP levels",
                "Anti-inflammatory effects",
                "Supports overall health",
                "Evidence-based supplement",
            ]
        );

        assert_eq!(
            extract_benefits(&SourceSupplement::default()),
            FALLBACK_BENEFITS.to_vec()
        );
    }

    #[test]
    fn benefits_keep_match_order_and_cap_at_five() {
        let record = SourceSupplement {
            mechanisms: vec![
                "NF-κB suppression and COX inhibition".to_string(),
                "antioxidant and immune modulation".to_string(),
            ],
            evidence_breakdown: Some(SourceEvidenceBreakdown {
                effect_size: Some("CRP, IL-6 and TNF reduced".to_string()),
                ..SourceEvidenceBreakdown::default()
            }),
            ..SourceSupplement::default()
        };

        assert_eq!(
            extract_benefits(&record),
            vec![
                "Reduces NF-κB activation",
                "Inhibits COX enzymes",
                "Powerful antioxidant",
                "Modulates immune response",
                "Reduces CRP levels",
            ]
        );
    }

    #[test]
    fn forms_come_from_bioavailability_and_name() {
        let record = SourceSupplement {
            name: Some("Krill Oil".to_string()),
            bioavailability: Some("oil-based extract, better than powder".to_string()),
            ..SourceSupplement::default()
        };
        assert_eq!(
            extract_forms(&record),
            vec!["Standardized extract", "Oil", "Powder", "Oil", "Softgels"]
        );
        assert_eq!(
            extract_forms(&SourceSupplement::default()),
            vec!["Capsules", "Powder"]
        );
    }

    #[test]
    fn anti_inflammatory_potential_falls_back_to_score_when_zero() {
        let record = SourceSupplement {
            anti_inflammatory_potential: Some(0.0),
            anti_inflammatory_score: Some(7.5),
            ..SourceSupplement::default()
        };
        assert_eq!(convert_supplement(&record).anti_inflammatory_potential, 7.5);

        let record = SourceSupplement {
            anti_inflammatory_potential: Some(8.0),
            anti_inflammatory_score: Some(7.5),
            ..SourceSupplement::default()
        };
        assert_eq!(convert_supplement(&record).anti_inflammatory_potential, 8.0);
    }

    #[test]
    fn evidence_breakdown_is_carried_through() {
        let record: SourceSupplement = serde_json::from_value(serde_json::json!({
            "id": "boswellia",
            "evidenceBreakdown": {
                "studyCount": 42,
                "studyTypes": ["RCT"],
                "effectSize": "moderate",
                "mechanism": "5-LOX inhibition",
                "safety": "Generally safe",
                "bestStudy": "Sengupta 2008"
            }
        }))
        .expect("record");

        let item = convert_supplement(&record);
        assert_eq!(item.evidence.studies, 42);
        let breakdown = item.evidence_breakdown.expect("breakdown");
        assert_eq!(breakdown.study_types, vec!["RCT"]);
        assert_eq!(breakdown.best_study, "Sengupta 2008");
        assert_eq!(item.side_effects, vec![WELL_TOLERATED]);
    }
}
