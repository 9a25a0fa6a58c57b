//! Player and role data model for balanced team formation.
//!
//! This crate holds the vocabulary shared by every other crate in the workspace
//! together with the skill model that turns a player's ladder standing into
//! per-role performance scores:
//!
//! - [`Role`] / [`AssignedRole`] - The five lanes and the `forced` fallback slot
//! - [`Tier`] / [`Rank`] - Ladder standing (iron…challenger, divisions V…I)
//! - [`Player`] - A candidate as supplied by the caller
//! - [`RatedPlayer`] - A candidate with its skill factor and [`RolePerformance`] precomputed
//! - [`skill`] - The skill model itself
//!
//! # Example
//!
//! ```
//! use teamforge_model::{Player, RatedPlayer, Role, Tier};
//!
//! let player = Player::new("p1", Tier::Gold).with_roles([Role::Mid, Role::Top]);
//! let rated = RatedPlayer::rate(player);
//!
//! assert!(rated.performance().get(Role::Mid) > rated.performance().get(Role::Top));
//! assert!(rated.performance().forced().is_some());
//! ```

pub use self::{ladder::*, player::*, role::*, skill::RolePerformance};

mod ladder;
mod player;
mod role;
pub mod skill;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown role '{label}' (expected one of top, jungle, mid, bottom, support)")]
pub struct ParseRoleError {
    label: String,
}

impl ParseRoleError {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}
