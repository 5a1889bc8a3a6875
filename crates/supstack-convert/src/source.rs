use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

/// Loosely-typed record in the upstream research dataset. Every field is
/// optional; the mapper supplies defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceSupplement {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub anti_inflammatory_potential: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub anti_inflammatory_score: Option<f64>,
    /// 0-10 scale.
    #[serde(deserialize_with = "lenient_f64")]
    pub evidence_score: Option<f64>,
    pub evidence_breakdown: Option<SourceEvidenceBreakdown>,
    pub optimal_dose: Option<String>,
    pub timing: Option<String>,
    pub bioavailability: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub mechanisms: Vec<String>,
    /// Monthly price range such as "$25-45".
    pub price: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceEvidenceBreakdown {
    #[serde(deserialize_with = "lenient_u32")]
    pub study_count: Option<u32>,
    #[serde(deserialize_with = "null_as_empty")]
    pub study_types: Vec<String>,
    pub effect_size: Option<String>,
    pub mechanism: Option<String>,
    pub safety: Option<String>,
    pub best_study: Option<String>,
}

// Upstream numbers arrive as ints, floats or numeric strings; anything else
// reads as absent rather than failing the batch.
fn lenient_number(value: Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(Value::deserialize(deserializer)?))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(Value::deserialize(deserializer)?)
        .filter(|number| *number >= 0.0)
        .map(|number| number as u32))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A source file holds either one record or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SourceDocument {
    Many(Vec<SourceSupplement>),
    One(Box<SourceSupplement>),
}

impl SourceDocument {
    pub fn into_records(self) -> Vec<SourceSupplement> {
        match self {
            Self::Many(records) => records,
            Self::One(record) => vec![*record],
        }
    }
}
