//! Precomputed base datasets
//!
//! Three JSON documents are read once at startup from the data directory:
//! - `domains.json`: list of domain summaries
//! - `overview.json`: cross-domain matrix
//! - `details.json`: domain name -> full detail record
//!
//! The loaded `Dataset` is never modified afterwards; every view handed to
//! callers is derived from it.

use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{info, warn};

use crate::aggregate::apply_overrides;
use crate::model::{DomainDetail, DomainSummary, OverviewMatrix};
use crate::overrides::OverrideSet;
use crate::{Error, Result};

pub const DOMAINS_FILE: &str = "domains.json";
pub const OVERVIEW_FILE: &str = "overview.json";
pub const DETAILS_FILE: &str = "details.json";

/// Immutable base data for every domain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub domains: Vec<DomainSummary>,
    pub overview: OverviewMatrix,
    pub details: BTreeMap<String, DomainDetail>,
}

impl Dataset {
    /// Load the three base documents from `data_dir`
    pub fn load(data_dir: &Path) -> Result<Self> {
        let dataset = Self {
            domains: read_json(&data_dir.join(DOMAINS_FILE))?,
            overview: read_json(&data_dir.join(OVERVIEW_FILE))?,
            details: read_json(&data_dir.join(DETAILS_FILE))?,
        };

        info!(
            "✓ Loaded pre-computed data for {} domains ({} detail records)",
            dataset.domains.len(),
            dataset.details.len()
        );
        Ok(dataset)
    }

    /// Detail record for `name` with its overrides applied
    pub fn detail(&self, name: &str, overrides: &OverrideSet) -> Option<DomainDetail> {
        self.details
            .get(name)
            .map(|base| apply_overrides(name, base, overrides))
    }

    /// Domains listed in the summary or the matrix but missing a detail record
    ///
    /// Such domains cannot be recomputed and always show their base values.
    pub fn missing_details(&self) -> Vec<String> {
        let listed: BTreeSet<&str> = self
            .domains
            .iter()
            .map(|d| d.domain.as_str())
            .chain(self.overview.matrix.iter().map(|r| r.domain.as_str()))
            .collect();

        listed
            .into_iter()
            .filter(|name| !self.details.contains_key(*name))
            .map(str::to_string)
            .collect()
    }

    /// Check cross-document consistency
    ///
    /// In strict mode any domain without a detail record is an error.
    /// Otherwise it is logged and tolerated.
    pub fn check_integrity(&self, strict: bool) -> Result<()> {
        let missing = self.missing_details();
        if missing.is_empty() {
            return Ok(());
        }

        let list = missing.join(", ");
        if strict {
            return Err(Error::Integrity(format!(
                "no detail record for domain(s): {}",
                list
            )));
        }

        warn!(
            "No detail record for domain(s) {}; overrides for them will not be reflected",
            list
        );
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}
