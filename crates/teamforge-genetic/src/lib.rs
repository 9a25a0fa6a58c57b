//! Genetic search for balanced two-team splits.
//!
//! This crate searches the space of candidate splits with a permutation-encoded
//! genetic algorithm. Fitness is provided by a
//! [`SplitEvaluator`](teamforge_evaluator::split_evaluator::SplitEvaluator), so the
//! search knows nothing about what makes a split good.
//!
//! # How the Search Works
//!
//! 1. **Encoding** - A chromosome is a permutation of candidate indices; the first
//!    `team_size` genes are team A, the next `team_size` are team B, the rest sit out
//! 2. **Evaluation** - Each chromosome is decoded into two lineups, roles are
//!    assigned, and the evaluator scores the split
//! 3. **Selection** - Tournament selection picks parents
//! 4. **Reproduction** - Order crossover and swap mutation produce children that are
//!    still valid permutations
//! 5. **Elitism** - The best split seen so far is carried into every generation
//! 6. **Repeat** until the generation budget runs out or progress stalls
//!
//! # Architecture
//!
//! ```text
//! Chromosome (permutation)
//!     ↓ decoded by position
//! Team A / Team B indices
//!     ↓ role assignment (teamforge-evaluator)
//! Lineups
//!     ↓ scored by
//! Split Evaluator
//!     ↓ produces
//! Fitness Score
//!     ↓ guides
//! Selection & Reproduction
//! ```
//!
//! See [`chromosome`] for the operators and [`genetic`] for the generation loop.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use teamforge_evaluator::split_evaluator::BalancedSplitEvaluator;
//! use teamforge_genetic::genetic::{GeneticOptimizer, GeneticParams};
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
//! let params = GeneticParams { generations: 50, ..GeneticParams::default() };
//! let optimizer = GeneticOptimizer::new(&players, 5, &evaluator, &params);
//! let outcome = optimizer.run(&mut Pcg32::seed_from_u64(42));
//!
//! let (team_a, team_b) = outcome.best.chromosome().teams(5);
//! assert_eq!(team_a.len() + team_b.len(), 10);
//! assert!(outcome.best.fitness() > 90.0);
//! ```
//!
//! # Current Limitations
//!
//! - **Single objective**: Team balance and role matchups are folded into one scalar
//!   with fixed weights, so trade-offs between them are not explored
//! - **Redundant encoding**: Orderings within a team and swapping team A with team B
//!   decode to equivalent splits, so the search space is larger than the number of
//!   distinct splits
//! - **No caching**: Equivalent chromosomes are evaluated again every time they appear

pub mod chromosome;
pub mod genetic;
