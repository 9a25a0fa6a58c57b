//! Balanced two-team formation.
//!
//! This is the entry point of the workspace. A request takes a list of
//! [`Player`](teamforge_model::Player)s and a [`FormationConfig`], and returns a
//! [`Formation`]: two teams with one player per lane, the benched candidates, and
//! the figures describing how balanced the split is.
//!
//! # Request Flow
//!
//! ```text
//! Players
//!     ↓ validate count (≥ 2 × team_size)
//!     ↓ sort candidates, rate once (skill factor + role performance)
//! Rated candidates
//!     ↓ genetic search (teamforge-genetic)
//! Best chromosome
//!     ↓ final decode + role assignment
//! Formation (team A, team B, bench, metrics, seed)
//! ```
//!
//! Every request draws its randomness from one generator initialized with a
//! [`FormationSeed`]. The seed is part of the result, so any formation can be
//! replayed.
//!
//! # Errors
//!
//! The only failure is [`FormationError::InsufficientPlayers`]. Everything else
//! degrades gracefully: unknown tiers rate as `default`, and players whose
//! preferred lanes are taken still get an open lane.

pub use self::{config::*, seed::*, service::*};

mod config;
mod seed;
mod service;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FormationError {
    #[display(
        "not enough players to form two teams of {team_size}: {available} available, \
         {required} required ({} more needed)",
        required.saturating_sub(*available)
    )]
    InsufficientPlayers {
        team_size: usize,
        required: usize,
        available: usize,
    },
}

impl FormationError {
    /// How many more players would let the request succeed.
    #[must_use]
    pub fn missing(&self) -> usize {
        match self {
            Self::InsufficientPlayers {
                required,
                available,
                ..
            } => required.saturating_sub(*available),
        }
    }
}
