//! Level/XP state and the level-up rule.
//!
//! # Invariants
//! - `level >= 1`.
//! - `xp < level * XP_PER_LEVEL_STEP` after every grant.

use serde::{Deserialize, Serialize};

/// XP needed per level step; reaching `level * XP_PER_LEVEL_STEP` levels up.
pub const XP_PER_LEVEL_STEP: u32 = 20;

/// Persisted progression state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub xp: u32,
    pub level: u32,
}

impl Default for LevelState {
    fn default() -> Self {
        Self { xp: 0, level: 1 }
    }
}

/// Outcome of one XP grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGrant {
    pub amount: u32,
    pub levels_gained: u32,
    pub state: LevelState,
}

impl LevelState {
    /// XP threshold of the current level.
    pub fn threshold(&self) -> u32 {
        self.level.saturating_mul(XP_PER_LEVEL_STEP)
    }

    pub fn xp_to_next_level(&self) -> u32 {
        self.threshold().saturating_sub(self.xp)
    }

    pub fn is_normalized(&self) -> bool {
        self.level >= 1 && self.xp < self.threshold()
    }

    /// Adds `amount` XP and applies the level-up loop.
    pub fn grant(&mut self, amount: u32) -> XpGrant {
        self.xp = self.xp.saturating_add(amount);
        let levels_gained = self.normalize();
        XpGrant {
            amount,
            levels_gained,
            state: *self,
        }
    }

    /// While `xp >= level * 20`, spends the threshold and levels up.
    ///
    /// Returns the number of levels gained. Requires `level >= 1`.
    /// Stops at `u32::MAX` instead of overflowing the level.
    pub fn normalize(&mut self) -> u32 {
        let mut gained = 0;
        while self.level >= 1 && self.xp >= self.threshold() {
            let Some(next) = self.level.checked_add(1) else {
                break;
            };
            self.xp -= self.threshold();
            self.level = next;
            gained += 1;
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::LevelState;

    #[test]
    fn grant_levels_up_at_threshold() {
        let mut state = LevelState::default();
        for _ in 0..3 {
            state.grant(5);
        }
        assert_eq!(state, LevelState { xp: 15, level: 1 });

        let report = state.grant(5);
        assert_eq!(report.levels_gained, 1);
        assert_eq!(state, LevelState { xp: 0, level: 2 });
    }

    #[test]
    fn normalize_can_gain_several_levels() {
        let mut state = LevelState { xp: 100, level: 1 };
        // 100 - 20 - 40 = 40 < 60
        assert_eq!(state.normalize(), 2);
        assert_eq!(state, LevelState { xp: 40, level: 3 });
        assert!(state.is_normalized());
    }

    #[test]
    fn normalize_stops_at_maximum_level() {
        let mut state = LevelState {
            xp: u32::MAX,
            level: u32::MAX,
        };
        assert_eq!(state.normalize(), 0);
        assert_eq!(state.level, u32::MAX);

        let mut near_max = LevelState {
            xp: u32::MAX,
            level: u32::MAX - 1,
        };
        assert_eq!(near_max.normalize(), 1);
        assert_eq!(near_max.level, u32::MAX);
        assert_eq!(near_max.grant(5).levels_gained, 0);
    }

    #[test]
    fn xp_to_next_level_counts_remaining() {
        let state = LevelState { xp: 7, level: 2 };
        assert_eq!(state.xp_to_next_level(), 33);
    }
}
