use serde::{Deserialize, Serialize};

/// Core credit a student keeps before any surplus may cover an area deficit.
pub const CORE_MIN_FOR_SPILLOVER: i64 = 31;
/// Area credit (including carried core surplus) kept before covering a free deficit.
pub const AREA_MIN_FOR_SPILLOVER: i64 = 9;

/// Credit amounts for the three elective tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectiveCredits {
    pub core: i64,
    pub area: i64,
    pub free: i64,
}

impl ElectiveCredits {
    pub const fn new(core: i64, area: i64, free: i64) -> Self {
        Self { core, area, free }
    }

    /// Per-tier `max(0, required - have)`.
    pub fn shortfall(required: Self, have: Self) -> Self {
        Self {
            core: required.core.saturating_sub(have.core).max(0),
            area: required.area.saturating_sub(have.area).max(0),
            free: required.free.saturating_sub(have.free).max(0),
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            core: self.core.max(0),
            area: self.area.max(0),
            free: self.free.max(0),
        }
    }

    pub fn total(&self) -> i64 {
        self.core
            .saturating_add(self.area)
            .saturating_add(self.free)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpilloverThresholds {
    pub core_min: i64,
    pub area_min: i64,
}

impl Default for SpilloverThresholds {
    fn default() -> Self {
        Self {
            core_min: CORE_MIN_FOR_SPILLOVER,
            area_min: AREA_MIN_FOR_SPILLOVER,
        }
    }
}

/// Post-spillover deficits plus the credit view shown in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpilloverResolution {
    pub missing: ElectiveCredits,
    pub effective_have: ElectiveCredits,
}

/// Move surplus core credit onto the area deficit, then surplus area credit (with any
/// core surplus left over) onto the free deficit. The core deficit is never reduced.
/// When `enabled` is false the deficits are only clamped.
pub fn resolve(
    have: ElectiveCredits,
    missing: ElectiveCredits,
    enabled: bool,
    thresholds: SpilloverThresholds,
) -> SpilloverResolution {
    if !enabled {
        return SpilloverResolution {
            missing: missing.clamped(),
            effective_have: have,
        };
    }

    let mut missing = missing;

    let mut core_surplus = have.core.saturating_sub(thresholds.core_min).max(0);
    if core_surplus > 0 && missing.area > 0 {
        let used = core_surplus.min(missing.area);
        missing.area -= used;
        core_surplus -= used;
    }

    let total_area_with_spill = have.area.saturating_add(core_surplus);
    let area_surplus = total_area_with_spill
        .saturating_sub(thresholds.area_min)
        .max(0);
    if area_surplus > 0 {
        missing.free = missing.free.saturating_sub(area_surplus).max(0);
    }

    SpilloverResolution {
        missing: missing.clamped(),
        effective_have: effective_have(have, thresholds),
    }
}

// Display view uses the full core surplus, before any of it is spent on the area deficit.
fn effective_have(have: ElectiveCredits, thresholds: SpilloverThresholds) -> ElectiveCredits {
    let core_surplus = have.core.saturating_sub(thresholds.core_min).max(0);
    let total_area_with_spill = have.area.saturating_add(core_surplus);

    ElectiveCredits {
        core: have.core,
        area: thresholds.area_min.min(total_area_with_spill),
        free: have
            .free
            .saturating_add(total_area_with_spill.saturating_sub(thresholds.area_min).max(0)),
    }
}
