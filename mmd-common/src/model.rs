//! Assessment data model
//!
//! Shapes of the three precomputed base documents and of the views derived
//! from them. Fields the dashboard does not interpret (question wording
//! aside) are kept in `extra` maps so a copy of a base record serializes
//! exactly like the record it came from.
//!
//! Derived and descriptive fields tolerate an explicit `null` as well as a
//! missing key; both read as the field's default.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::band::Band;

/// Read `null` the same way as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single assessment question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within its domain
    pub id: String,
    /// Name of the pillar this question belongs to
    pub pillar: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub band: Band,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A thematic grouping of questions within a domain
///
/// Membership is implicit: every question whose `pillar` equals `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub name: String,
    #[serde(default)]
    pub avg_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub band: Band,
    /// Member questions that carried a score at the last recomputation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scored_count: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full assessment record for one domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainDetail {
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pillars: Vec<Pillar>,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_band: Band,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Pillar entry of a domain summary
///
/// Base summaries may carry more per-pillar fields (counts, notes); they
/// live in `extra`. A pillar rebuilt from a recomputed detail record has
/// name, average and band only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarScore {
    pub name: String,
    #[serde(default)]
    pub avg_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub band: Band,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&Pillar> for PillarScore {
    fn from(pillar: &Pillar) -> Self {
        Self {
            name: pillar.name.clone(),
            avg_score: pillar.avg_score,
            band: pillar.band,
            extra: Map::new(),
        }
    }
}

/// Reduced projection of a domain used by the list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub domain: String,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_band: Band,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pillars: Vec<PillarScore>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of the cross-domain matrix
///
/// Serializes flat: `{"domain": .., "<pillar name>": .., "overall": ..}`.
/// Columns other than `domain` and `overall` are kept as they were read,
/// so non-numeric columns (labels, ranks) pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewRow {
    pub domain: String,
    #[serde(default)]
    pub overall: Option<f64>,
    /// Pillar name -> pillar average, plus any other column
    #[serde(flatten)]
    pub columns: Map<String, Value>,
}

impl OverviewRow {
    /// Numeric value of a pillar column, `None` when absent or not a number
    pub fn pillar_score(&self, pillar: &str) -> Option<f64> {
        self.columns.get(pillar).and_then(Value::as_f64)
    }

    /// Overwrite a pillar column with a (possibly absent) average
    pub fn set_pillar_score(&mut self, pillar: &str, score: Option<f64>) {
        let value = score.map_or(Value::Null, Value::from);
        self.columns.insert(pillar.to_string(), value);
    }
}

/// Cross-domain comparison matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewMatrix {
    /// Column order of the pillars
    #[serde(default, deserialize_with = "null_as_default")]
    pub pillars: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matrix: Vec<OverviewRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_keeps_unknown_fields() {
        let raw = json!({
            "id": "Q1",
            "pillar": "Domain Ownership",
            "text": "Is there a named owner?",
            "score": 3.0,
            "band": "Defined",
            "method": "auto"
        });

        let question: Question = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(question.score, Some(3.0));
        assert_eq!(question.band, Band::Defined);
        assert_eq!(question.extra.get("method"), Some(&json!("auto")));
        assert_eq!(serde_json::to_value(&question).unwrap(), raw);
    }

    #[test]
    fn test_overview_row_is_flat() {
        let raw = json!({
            "domain": "Sales",
            "Data as a Product": 2.5,
            "Domain Ownership": null,
            "overall": 2.5
        });

        let row: OverviewRow = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(row.domain, "Sales");
        assert_eq!(row.overall, Some(2.5));
        assert_eq!(row.pillar_score("Data as a Product"), Some(2.5));
        assert_eq!(row.pillar_score("Domain Ownership"), None);
        assert_eq!(row.columns.get("Domain Ownership"), Some(&Value::Null));
        assert_eq!(serde_json::to_value(&row).unwrap(), raw);
    }

    #[test]
    fn test_pillar_without_scored_count_round_trips_unchanged() {
        let raw = json!({"name": "Federated Governance", "avg_score": null, "band": "Not Assessed"});
        let pillar: Pillar = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(pillar.scored_count, None);
        assert_eq!(serde_json::to_value(&pillar).unwrap(), raw);
    }

    #[test]
    fn test_overview_row_keeps_non_numeric_columns() {
        let raw = json!({
            "domain": "HR",
            "Domain Ownership": 2.0,
            "label": "People & Culture",
            "rank": "7th",
            "overall": 2.0
        });

        let mut row: OverviewRow = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(row.pillar_score("label"), None);
        assert_eq!(serde_json::to_value(&row).unwrap(), raw);

        row.set_pillar_score("Domain Ownership", Some(3.5));
        row.set_pillar_score("Data as a Product", None);
        assert_eq!(row.pillar_score("Domain Ownership"), Some(3.5));
        assert_eq!(row.columns.get("Data as a Product"), Some(&Value::Null));
        assert_eq!(row.columns.get("rank"), Some(&json!("7th")));
    }

    #[test]
    fn test_null_band_and_text_read_as_defaults() {
        let raw = json!({
            "domain": "Sales",
            "questions": [
                {"id": "Q1", "pillar": "Ownership", "text": null, "score": 3.0, "band": null}
            ],
            "pillars": [
                {"name": "Ownership", "avg_score": 3.0, "band": null}
            ],
            "overall_score": 3.0,
            "overall_band": null
        });

        let detail: DomainDetail = serde_json::from_value(raw).unwrap();
        assert_eq!(detail.questions[0].text, "");
        assert_eq!(detail.questions[0].band, Band::NotAssessed);
        assert_eq!(detail.pillars[0].band, Band::NotAssessed);
        assert_eq!(detail.overall_band, Band::NotAssessed);

        let summary: DomainSummary = serde_json::from_value(json!({
            "domain": "Sales",
            "overall_band": null,
            "pillars": [{"name": "Ownership", "avg_score": null, "band": null}]
        }))
        .unwrap();
        assert_eq!(summary.overall_band, Band::NotAssessed);
        assert_eq!(summary.pillars[0].band, Band::NotAssessed);
    }

    #[test]
    fn test_summary_pillar_keeps_unknown_fields() {
        let raw = json!({
            "name": "Ownership",
            "avg_score": 3.5,
            "band": "Managed",
            "scored_count": 2,
            "total_count": 3
        });

        let pillar: PillarScore = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(pillar.extra.get("total_count"), Some(&json!(3)));
        assert_eq!(serde_json::to_value(&pillar).unwrap(), raw);
    }
}
