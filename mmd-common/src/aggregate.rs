//! Override application and score aggregation
//!
//! Produces a recomputed copy of a domain's detail record from its base
//! record and the current overrides. The base record is only ever borrowed,
//! so repeated calls with the same inputs give the same output.

use std::collections::{BTreeMap, HashMap};

use crate::band::Band;
use crate::model::DomainDetail;
use crate::overrides::OverrideSet;

/// Round to one decimal place, halves away from zero
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean of the present values, rounded to one decimal place
///
/// Returns `None` when there is nothing to average.
pub fn mean_of_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(round1(sum / count as f64))
    }
}

/// Apply a domain's overrides to its base detail record
///
/// Without overrides for `domain` the result is a plain copy of `base`.
/// Otherwise overridden questions take the override score, then pillar
/// and overall aggregates are recomputed. Override ids that match no
/// question are ignored.
pub fn apply_overrides(domain: &str, base: &DomainDetail, overrides: &OverrideSet) -> DomainDetail {
    match overrides.domain(domain) {
        Some(scores) if !scores.is_empty() => apply_scores(base, scores),
        _ => base.clone(),
    }
}

/// Apply a per-domain override map (question id -> score) to a base record
pub fn apply_scores(base: &DomainDetail, scores: &BTreeMap<String, f64>) -> DomainDetail {
    let mut detail = base.clone();

    for question in &mut detail.questions {
        if let Some(&score) = scores.get(&question.id) {
            question.score = Some(score);
            question.band = Band::classify(Some(score));
        }
    }

    recalculate(&mut detail);
    detail
}

/// Recompute pillar and overall aggregates from the current question scores
pub fn recalculate(detail: &mut DomainDetail) {
    // pillar name -> scores of its members, one pass over the questions
    let mut members: HashMap<&str, Vec<f64>> = HashMap::new();
    for question in &detail.questions {
        if let Some(score) = question.score {
            members.entry(question.pillar.as_str()).or_default().push(score);
        }
    }

    let mut pillar_scores = Vec::with_capacity(detail.pillars.len());
    for pillar in &detail.pillars {
        let scores = members.get(pillar.name.as_str());
        let avg = scores.and_then(|s| mean_of_present(s.iter().copied().map(Some)));
        let scored = scores.map_or(0, Vec::len);
        pillar_scores.push((avg, scored));
    }

    for (pillar, (avg, scored)) in detail.pillars.iter_mut().zip(pillar_scores) {
        pillar.avg_score = avg;
        pillar.band = Band::classify(avg);
        pillar.scored_count = Some(scored);
    }

    detail.overall_score = mean_of_present(detail.pillars.iter().map(|p| p.avg_score));
    detail.overall_band = Band::classify(detail.overall_score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Pillar, Question};
    use serde_json::Map;

    fn question(id: &str, pillar: &str, score: Option<f64>) -> Question {
        Question {
            id: id.to_string(),
            pillar: pillar.to_string(),
            text: format!("Question {}", id),
            score,
            band: Band::classify(score),
            extra: Map::new(),
        }
    }

    fn pillar(name: &str, avg_score: Option<f64>) -> Pillar {
        Pillar {
            name: name.to_string(),
            avg_score,
            band: Band::classify(avg_score),
            scored_count: None,
            extra: Map::new(),
        }
    }

    /// Ownership: [3, 4, absent], Product: [5, 4], Platform: [absent]
    fn sales() -> DomainDetail {
        DomainDetail {
            domain: "Sales".to_string(),
            questions: vec![
                question("Q1", "Ownership", Some(3.0)),
                question("Q2", "Ownership", Some(4.0)),
                question("Q3", "Ownership", None),
                question("Q4", "Product", Some(5.0)),
                question("Q5", "Product", Some(4.0)),
                question("Q6", "Platform", None),
            ],
            pillars: vec![
                pillar("Ownership", Some(3.5)),
                pillar("Product", Some(4.5)),
                pillar("Platform", None),
            ],
            overall_score: Some(4.0),
            overall_band: Band::Managed,
            extra: Map::new(),
        }
    }

    fn overrides(entries: &[(&str, &str, f64)]) -> OverrideSet {
        let mut set = OverrideSet::default();
        for (domain, id, score) in entries {
            set.insert(domain, id, *score);
        }
        set
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(3.5), 3.5);
        assert_eq!(round1(3.25), 3.3);
        assert_eq!(round1(11.0 / 3.0), 3.7);
        assert_eq!(round1(-1.25), -1.3);
    }

    #[test]
    fn test_mean_of_present_skips_absent() {
        assert_eq!(mean_of_present([Some(3.0), Some(4.0), None]), Some(3.5));
        assert_eq!(mean_of_present([Some(3.5), Some(4.5), None]), Some(4.0));
        assert_eq!(mean_of_present([None, None]), None);
        assert_eq!(mean_of_present(Vec::<Option<f64>>::new()), None);
    }

    #[test]
    fn test_no_overrides_returns_equal_copy() {
        let base = sales();
        let result = apply_overrides("Sales", &base, &OverrideSet::default());
        assert_eq!(result, base);

        // Overrides for other domains do not touch this one
        let other = overrides(&[("Finance", "Q1", 1.0)]);
        assert_eq!(apply_overrides("Sales", &base, &other), base);
    }

    #[test]
    fn test_pillar_and_overall_aggregation() {
        let base = sales();
        let result = apply_overrides("Sales", &base, &overrides(&[("Sales", "Q4", 5.0)]));

        let ownership = &result.pillars[0];
        assert_eq!(ownership.avg_score, Some(3.5));
        assert_eq!(ownership.band, Band::Managed);
        assert_eq!(ownership.scored_count, Some(2));

        let platform = &result.pillars[2];
        assert_eq!(platform.avg_score, None);
        assert_eq!(platform.band, Band::NotAssessed);
        assert_eq!(platform.scored_count, Some(0));

        assert_eq!(result.overall_score, Some(4.0));
        assert_eq!(result.overall_band, Band::Managed);
    }

    #[test]
    fn test_override_replaces_score_and_band() {
        let base = sales();
        let result = apply_overrides("Sales", &base, &overrides(&[("Sales", "Q1", 5.0)]));

        assert_eq!(result.questions[0].score, Some(5.0));
        assert_eq!(result.questions[0].band, Band::Optimized);
        // (5 + 4) / 2
        assert_eq!(result.pillars[0].avg_score, Some(4.5));
        assert_eq!(result.pillars[0].band, Band::Optimized);
        // (4.5 + 4.5) / 2
        assert_eq!(result.overall_score, Some(4.5));
        assert_eq!(result.overall_band, Band::Optimized);

        // Base is untouched
        assert_eq!(base.questions[0].score, Some(3.0));
        assert_eq!(base.pillars[0].avg_score, Some(3.5));
    }

    #[test]
    fn test_override_can_assess_unscored_pillar() {
        let base = sales();
        let result = apply_overrides("Sales", &base, &overrides(&[("Sales", "Q6", 1.0)]));

        assert_eq!(result.pillars[2].avg_score, Some(1.0));
        assert_eq!(result.pillars[2].band, Band::Initial);
        // (3.5 + 4.5 + 1.0) / 3 = 3.0
        assert_eq!(result.overall_score, Some(3.0));
        assert_eq!(result.overall_band, Band::Defined);
    }

    #[test]
    fn test_unknown_question_is_ignored() {
        let base = sales();
        let result = apply_overrides("Sales", &base, &overrides(&[("Sales", "Q99", 1.0)]));

        for (recomputed, original) in result.pillars.iter().zip(&base.pillars) {
            assert_eq!(recomputed.avg_score, original.avg_score);
            assert_eq!(recomputed.band, original.band);
        }
        assert_eq!(result.questions, base.questions);
        assert_eq!(result.overall_score, base.overall_score);
    }

    #[test]
    fn test_repeated_application_is_idempotent() {
        let base = sales();
        let set = overrides(&[("Sales", "Q1", 2.0), ("Sales", "Q3", 1.0)]);

        let first = apply_overrides("Sales", &base, &set);
        let second = apply_overrides("Sales", &base, &set);
        assert_eq!(first, second);

        // Feeding a result back in does not drift either
        let third = apply_overrides("Sales", &first, &set);
        assert_eq!(first, third);
    }

    #[test]
    fn test_no_scores_anywhere_is_not_assessed() {
        let mut base = sales();
        for q in &mut base.questions {
            q.score = None;
        }
        recalculate(&mut base);

        assert!(base.pillars.iter().all(|p| p.avg_score.is_none()));
        assert_eq!(base.overall_score, None);
        assert_eq!(base.overall_band, Band::NotAssessed);
    }
}
