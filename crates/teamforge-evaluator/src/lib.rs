//! Evaluator system for scoring candidate team splits.
//!
//! This crate implements a two-level evaluation architecture:
//!
//! 1. **Role Assignment** ([`role_assigner`]) - Maps the members of one team onto the
//!    five lanes, maximizing per-role fit with a greedy highest-spread-first heuristic.
//!
//! 2. **Split Evaluation** ([`split_evaluator`]) - Scores a full two-team split by
//!    combining aggregate skill balance with lane-versus-lane ladder matchups.
//!
//! # Architecture
//!
//! ```text
//! Split Evaluation (fitness for the optimizer)
//!     ↓ uses
//! Lineup (team members + assigned roles)
//!     ↓ uses
//! Role Assignment (members → lanes)
//! ```
//!
//! # Supporting Modules
//!
//! - [`lineup`] - [`Lineup`](lineup::Lineup) is a borrowed view used during
//!   optimization; [`Team`](lineup::Team) is the owned result handed to callers
//!
//! # Design Principles
//!
//! ## Copy-on-Decode
//!
//! Evaluating a split never touches the caller's player records. Lineups borrow the
//! rated players and keep role assignments alongside them, so thousands of
//! evaluations per generation cannot leak assignments into each other. Only the
//! final decode produces owned [`Team`](lineup::Team)s.
//!
//! ## Graceful Degradation
//!
//! Role assignment cannot fail. A player left without an open lane receives
//! [`AssignedRole::Forced`](teamforge_model::AssignedRole::Forced) instead of an error.
//!
//! # Example
//!
//! ```
//! use teamforge_evaluator::{
//!     lineup::Lineup,
//!     split_evaluator::{BalancedSplitEvaluator, SplitEvaluator},
//! };
//! use teamforge_model::{Player, RatedPlayer, Role, Tier};
//!
//! let players: Vec<RatedPlayer> = Tier::RANKED
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, tier)| {
//!         RatedPlayer::rate(Player::new(format!("p{i}"), tier).with_roles(Role::ALL))
//!     })
//!     .collect();
//!
//! let evaluator = BalancedSplitEvaluator::default();
//! let fitness = evaluator.evaluate_split(&players, &[0, 2, 4, 6, 8], &[1, 3, 5, 7, 9]);
//! assert!((0.0..=100.0).contains(&fitness));
//! ```

pub mod lineup;
pub mod role_assigner;
pub mod split_evaluator;
