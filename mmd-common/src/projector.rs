//! Summary views with overrides folded in
//!
//! The domain list and the cross-domain matrix are precomputed in the base
//! data. When a domain has overrides its detail record is recomputed and
//! the results replace that domain's entries in the copied view. A domain
//! without a detail record keeps its base values.

use tracing::warn;

use crate::aggregate::apply_overrides;
use crate::dataset::Dataset;
use crate::model::{DomainDetail, DomainSummary, OverviewMatrix, PillarScore};
use crate::overrides::OverrideSet;

/// Recompute `domain` if it has overrides and a detail record
fn recomputed(dataset: &Dataset, domain: &str, overrides: &OverrideSet) -> Option<DomainDetail> {
    if !overrides.has_overrides(domain) {
        return None;
    }
    match dataset.details.get(domain) {
        Some(base) => Some(apply_overrides(domain, base, overrides)),
        None => {
            warn!("Domain {} has overrides but no detail record, using base values", domain);
            None
        }
    }
}

/// Domain summaries with overrides applied
pub fn domains_with_overrides(dataset: &Dataset, overrides: &OverrideSet) -> Vec<DomainSummary> {
    dataset
        .domains
        .iter()
        .map(|base| {
            let mut summary = base.clone();
            if let Some(detail) = recomputed(dataset, &base.domain, overrides) {
                summary.overall_score = detail.overall_score;
                summary.overall_band = detail.overall_band;
                summary.pillars = detail.pillars.iter().map(PillarScore::from).collect();
            }
            summary
        })
        .collect()
}

/// Cross-domain matrix with overrides applied
pub fn overview_with_overrides(dataset: &Dataset, overrides: &OverrideSet) -> OverviewMatrix {
    let mut overview = dataset.overview.clone();

    for row in &mut overview.matrix {
        if let Some(detail) = recomputed(dataset, &row.domain, overrides) {
            row.overall = detail.overall_score;
            for pillar in &detail.pillars {
                row.set_pillar_score(&pillar.name, pillar.avg_score);
            }
        }
    }

    overview
}
