// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Level ladder derived from all-time points.

use crate::models::source::RegistryError;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A named rank reached once all-time points cross `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LevelTier {
    pub level: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub threshold: u64,
    pub title: String,
}

/// Current tier, the one after it, and how far along the way we are.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LevelInfo {
    pub current: LevelTier,
    pub next: Option<LevelTier>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_points: u64,
    /// Fraction of the way from `current` to `next`, in `[0, 1]`.
    /// 1.0 once the last tier is reached.
    pub progress: f64,
}

/// Ordered tiers with strictly increasing thresholds.
#[derive(Debug, Clone)]
pub struct LevelLadder {
    tiers: Vec<LevelTier>,
}

impl LevelLadder {
    pub fn new(tiers: Vec<LevelTier>) -> Result<Self, RegistryError> {
        if tiers.is_empty() {
            return Err(RegistryError::EmptyLadder);
        }
        for pair in tiers.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(RegistryError::NonMonotonicLadder(pair[1].level));
            }
        }
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[LevelTier] {
        &self.tiers
    }

    /// Highest tier whose threshold is at or below `total_points`.
    ///
    /// Totals below the first threshold still map to the first tier.
    pub fn level_for(&self, total_points: u64) -> LevelInfo {
        let reached = self
            .tiers
            .partition_point(|tier| tier.threshold <= total_points);
        let index = reached.saturating_sub(1);
        let current = self.tiers[index].clone();
        let next = self.tiers.get(index + 1).cloned();

        let progress = match &next {
            Some(next) => {
                let span = (next.threshold - current.threshold) as f64;
                let gained = total_points.saturating_sub(current.threshold) as f64;
                (gained / span).clamp(0.0, 1.0)
            }
            None => 1.0,
        };

        LevelInfo {
            current,
            next,
            total_points,
            progress,
        }
    }

    /// The ladder the dashboard ships with.
    pub fn builtin() -> Self {
        let tiers = [
            (1, 0, "🌱 Seedling"),
            (2, 50, "🌿 Sprout"),
            (3, 150, "🌳 Sapling"),
            (4, 400, "🌲 Tree"),
            (5, 800, "🏔️ Mountain"),
            (6, 1500, "⭐ Star"),
            (7, 3000, "🌟 Constellation"),
            (8, 5000, "🌙 Moon"),
            (9, 8000, "☀️ Sun"),
            (10, 12000, "🌌 Galaxy"),
        ]
        .into_iter()
        .map(|(level, threshold, title)| LevelTier {
            level,
            threshold,
            title: title.to_string(),
        })
        .collect();

        Self { tiers }
    }
}
