//! Progression engine: XP rewards and level-ups.
//!
//! # Invariants
//! - Rewards are fixed per action kind.
//! - The wrapped state satisfies `xp < level * 20` after every grant.

use crate::model::level::{LevelState, XpGrant};
use log::info;

/// Action that earns XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reward {
    TaskAdded,
    ThoughtAdded,
    GoalCompleted,
}

impl Reward {
    pub fn xp(self) -> u32 {
        match self {
            Self::TaskAdded => 5,
            Self::ThoughtAdded => 2,
            Self::GoalCompleted => 10,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::TaskAdded => "task_added",
            Self::ThoughtAdded => "thought_added",
            Self::GoalCompleted => "goal_completed",
        }
    }
}

/// Owner of the level document.
#[derive(Debug, Clone, Default)]
pub struct Progression {
    state: LevelState,
}

impl Progression {
    /// Wraps a loaded state, normalizing it if an external edit broke the invariant.
    pub fn new(mut state: LevelState) -> Self {
        let gained = state.normalize();
        if gained > 0 {
            info!(
                "event=level_normalized module=progression status=ok levels_gained={gained} level={}",
                state.level
            );
        }
        Self { state }
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    pub fn grant(&mut self, amount: u32) -> XpGrant {
        self.state.grant(amount)
    }

    pub fn reward(&mut self, reward: Reward) -> XpGrant {
        let grant = self.grant(reward.xp());
        info!(
            "event=xp_grant module=progression status=ok reward={} amount={} levels_gained={} level={} xp={}",
            reward.label(),
            grant.amount,
            grant.levels_gained,
            grant.state.level,
            grant.state.xp
        );
        grant
    }
}

#[cfg(test)]
mod tests {
    use super::{Progression, Reward};
    use crate::model::level::LevelState;

    #[test]
    fn rewards_match_action_kinds() {
        assert_eq!(Reward::TaskAdded.xp(), 5);
        assert_eq!(Reward::ThoughtAdded.xp(), 2);
        assert_eq!(Reward::GoalCompleted.xp(), 10);
    }

    #[test]
    fn new_normalizes_out_of_range_state() {
        let progression = Progression::new(LevelState { xp: 25, level: 1 });
        assert_eq!(progression.state(), LevelState { xp: 5, level: 2 });
    }
}
