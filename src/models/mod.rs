// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod filter;
pub mod level;
pub mod page;
pub mod points;
pub mod source;

pub use filter::{PropertyCondition, QueryFilter, TimestampCondition};
pub use level::{LevelInfo, LevelLadder, LevelTier};
pub use page::{Page, PropertyValue};
pub use points::{DailyHistoryEntry, DateWindow, PeriodResult, SourceResult};
pub use source::{ComputedPoints, DateRule, PointSource, PointsRule, RegistryError, SourceRegistry};
