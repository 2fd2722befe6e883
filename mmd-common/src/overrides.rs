//! Manual score overrides and their durable store
//!
//! `OverrideSet` is the plain mapping domain -> question id -> score.
//! `OverrideStore` owns one behind a lock and mirrors it to a JSON file.
//! Every mutation is applied to a copy, written to disk, and only then
//! committed to memory, so a failed write leaves both sides unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Overrides for one domain: question id -> score
pub type DomainOverrides = BTreeMap<String, f64>;

/// Overrides for all domains
///
/// A domain key never maps to an empty set of overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideSet(BTreeMap<String, DomainOverrides>);

impl OverrideSet {
    pub fn get(&self, domain: &str, question_id: &str) -> Option<f64> {
        self.0.get(domain)?.get(question_id).copied()
    }

    /// Overrides of one domain, if it has any
    pub fn domain(&self, domain: &str) -> Option<&DomainOverrides> {
        self.0.get(domain)
    }

    pub fn has_overrides(&self, domain: &str) -> bool {
        self.0.get(domain).is_some_and(|m| !m.is_empty())
    }

    pub fn insert(&mut self, domain: &str, question_id: &str, score: f64) {
        self.0
            .entry(domain.to_string())
            .or_default()
            .insert(question_id.to_string(), score);
    }

    /// Remove one override, dropping the domain once it has none left
    pub fn remove(&mut self, domain: &str, question_id: &str) -> Option<f64> {
        let scores = self.0.get_mut(domain)?;
        let removed = scores.remove(question_id);
        if scores.is_empty() {
            self.0.remove(domain);
        }
        removed
    }

    /// Remove every override of a domain
    pub fn remove_domain(&mut self, domain: &str) -> Option<DomainOverrides> {
        self.0.remove(domain)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of overridden questions across all domains
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Drop empty domain maps (e.g. from a hand-edited file)
    fn prune(&mut self) {
        self.0.retain(|_, scores| !scores.is_empty());
    }
}

/// Durable, lock-guarded override storage
#[derive(Debug)]
pub struct OverrideStore {
    path: PathBuf,
    overrides: RwLock<OverrideSet>,
}

impl OverrideStore {
    /// Open the store backed by `path`
    ///
    /// A missing file starts an empty store. A file that is present but
    /// not a valid override document is an error.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let overrides = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let mut set: OverrideSet = serde_json::from_str(&content)?;
                set.prune();
                info!(
                    "Loaded {} overrides across {} domains from {}",
                    set.len(),
                    set.domains().count(),
                    path.display()
                );
                set
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No override file at {}, starting empty", path.display());
                OverrideSet::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            overrides: RwLock::new(overrides),
        })
    }

    /// Path of the backing JSON document
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self, domain: &str, question_id: &str) -> Option<f64> {
        self.overrides.read().await.get(domain, question_id)
    }

    /// Snapshot of all overrides
    pub async fn get_all(&self) -> OverrideSet {
        self.overrides.read().await.clone()
    }

    /// Snapshot of one domain's overrides (empty when it has none)
    pub async fn domain(&self, domain: &str) -> DomainOverrides {
        self.overrides
            .read()
            .await
            .domain(domain)
            .cloned()
            .unwrap_or_default()
    }

    /// Save (`Some`) or remove (`None`) one override and persist
    ///
    /// Returns the domain's overrides after the change.
    pub async fn set(
        &self,
        domain: &str,
        question_id: &str,
        score: Option<f64>,
    ) -> Result<DomainOverrides> {
        if domain.trim().is_empty() {
            return Err(Error::InvalidInput("domain is required".to_string()));
        }
        if question_id.trim().is_empty() {
            return Err(Error::InvalidInput("questionId is required".to_string()));
        }

        let mut guard = self.overrides.write().await;
        let mut next = guard.clone();

        match score {
            Some(score) => {
                next.insert(domain, question_id, score);
                debug!("Override {}/{} = {}", domain, question_id, score);
            }
            None => {
                if next.remove(domain, question_id).is_none() {
                    debug!("No override to remove for {}/{}", domain, question_id);
                }
            }
        }

        self.persist(&next).await?;
        *guard = next;

        Ok(guard.domain(domain).cloned().unwrap_or_default())
    }

    /// Remove all overrides for a domain and persist
    ///
    /// Returns `false` when the domain had no overrides; nothing is written
    /// in that case.
    pub async fn clear_domain(&self, domain: &str) -> Result<bool> {
        let mut guard = self.overrides.write().await;
        if !guard.has_overrides(domain) {
            return Ok(false);
        }

        let mut next = guard.clone();
        next.remove_domain(domain);

        self.persist(&next).await?;
        *guard = next;

        info!("Cleared overrides for domain {}", domain);
        Ok(true)
    }

    /// Write the whole set through a sibling temp file and rename it into place
    async fn persist(&self, set: &OverrideSet) -> Result<()> {
        let json = serde_json::to_string_pretty(set)?;
        let tmp_path = self.tmp_path();

        if let Err(e) = tokio::fs::write(&tmp_path, json).await {
            warn!("Failed to write overrides to {}: {}", tmp_path.display(), e);
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            warn!("Failed to replace {}: {}", self.path.display(), e);
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        debug!("Persisted {} overrides to {}", set.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "overrides.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
