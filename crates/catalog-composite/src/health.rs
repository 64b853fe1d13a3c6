//! Folds backend health probes into one composite status.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::warn;

use crate::integration::HealthProbe;

/// Health of one component, or of the whole composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Per-component statuses plus their fold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositeHealth {
    /// `Up` only if every component is `Up`.
    pub status: HealthStatus,
    pub components: BTreeMap<String, HealthStatus>,
}

/// Probes the owning services concurrently.
#[derive(Clone, Default)]
pub struct HealthAggregator {
    components: Vec<(String, Arc<dyn HealthProbe>)>,
}

impl HealthAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component under `name`.
    #[must_use]
    pub fn with_component(mut self, name: impl Into<String>, probe: Arc<dyn HealthProbe>) -> Self {
        self.components.push((name.into(), probe));
        self
    }

    /// Probes every component. A failing probe marks its component `Down`;
    /// the probe's error is logged and never returned.
    pub async fn check(&self) -> CompositeHealth {
        let probes = self.components.iter().map(|(name, probe)| async move {
            let status = match probe.check().await {
                Ok(()) => HealthStatus::Up,
                Err(e) => {
                    warn!(component = %name, error = %e, "health probe failed");
                    HealthStatus::Down
                }
            };
            (name.clone(), status)
        });

        let components: BTreeMap<String, HealthStatus> = join_all(probes).await.into_iter().collect();
        let status = if components.values().all(|s| *s == HealthStatus::Up) {
            HealthStatus::Up
        } else {
            HealthStatus::Down
        };

        CompositeHealth { status, components }
    }
}
