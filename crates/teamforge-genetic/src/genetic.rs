//! Genetic algorithm searching for the best two-team split.
//!
//! The GA evolves a population of permutation chromosomes. Each chromosome is
//! decoded into two lineups and scored by a
//! [`SplitEvaluator`](teamforge_evaluator::split_evaluator::SplitEvaluator).
//!
//! # Algorithm Overview
//!
//! 1. **Initialize** - `population_size` random permutations of `0..N`
//! 2. **Evaluate Fitness** - Score every chromosome
//! 3. **Track Best** - Keep the best chromosome ever seen outside the population
//! 4. **Early Stop** - Stop after `early_stop_patience` generations without improvement
//! 5. **Elitism** - Seed the next generation with a copy of the best chromosome
//! 6. **Reproduce** - Tournament selection, order crossover, swap mutation until
//!    the population is full again
//! 7. **Repeat** until the generation budget runs out
//!
//! # Key Components
//!
//! - [`Individual`] - A chromosome and its fitness
//! - [`Population`] - Collection of individuals evaluated together
//! - [`PopulationEvolver`] - Selection and variation parameters
//! - [`GeneticParams`] - Run configuration, including adaptive sizing for small pools
//! - [`GeneticOptimizer`] - The generation loop
//!
//! # Adaptive Sizing
//!
//! Small candidate pools have few distinct splits but rugged fitness landscapes,
//! so [`GeneticParams::adapted_to`] raises the search effort for them:
//!
//! | Pool size | Population | Generations | Mutation rate |
//! |-----------|------------|-------------|---------------|
//! | N ≤ 15    | ≥ 150      | ≥ 300       | ≥ 0.15        |
//! | N ≤ 20    | ≥ 150      | ≥ 300       | as configured |
//! | N > 20    | as configured | as configured | as configured |
//!
//! # Parallelization
//!
//! Fitness evaluation has no cross-chromosome dependency. With
//! `parallel_evaluation` enabled the population is split into chunks evaluated on
//! scoped threads. Results are identical to sequential evaluation because
//! evaluation consumes no randomness.
//!
//! # Reproducibility
//!
//! All randomness (initial population, tournament sampling, crossover cut points,
//! mutation) is drawn from the single RNG passed to [`GeneticOptimizer::run`].
//! Seeding that RNG makes a whole run reproducible.

use std::{num::NonZero, thread};

use rand::{Rng, seq::IndexedRandom as _};
use serde::{Deserialize, Serialize};
use teamforge_evaluator::split_evaluator::SplitEvaluator;
use teamforge_model::RatedPlayer;

use crate::chromosome::{self, Chromosome};

/// Pools at or below this size get a larger population and more generations.
pub const SMALL_POOL_THRESHOLD: usize = 20;
/// Pools at or below this size get a higher mutation rate.
pub const TINY_POOL_THRESHOLD: usize = 15;
pub const SMALL_POOL_MIN_POPULATION: usize = 150;
pub const SMALL_POOL_MIN_GENERATIONS: usize = 300;
pub const TINY_POOL_MIN_MUTATION_RATE: f64 = 0.15;

/// Progress is logged at `info` level every this many generations.
const LOG_INTERVAL: usize = 10;

/// A single individual in the population.
///
/// An individual is a candidate split: a permutation of candidate indices and
/// the fitness the evaluator gave it. The first `team_size` genes form team A,
/// the next `team_size` form team B, and any remaining genes are benched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Individual {
    chromosome: Chromosome,
    fitness: f64,
}

impl Individual {
    /// Wraps a chromosome that has not been evaluated yet.
    ///
    /// The fitness starts at negative infinity, so any evaluated individual
    /// compares as fitter until [`Population::evaluate_fitness`] runs.
    ///
    /// # Arguments
    ///
    /// * `chromosome` - Permutation of candidate indices
    #[must_use]
    pub fn new(chromosome: Chromosome) -> Self {
        Self {
            chromosome,
            fitness: f64::NEG_INFINITY,
        }
    }

    #[must_use]
    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    /// Fitness in `[0, 100]` once evaluated, negative infinity before.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    fn evaluate<E>(&mut self, players: &[RatedPlayer], team_size: usize, evaluator: &E)
    where
        E: SplitEvaluator + ?Sized,
    {
        let (team_a, team_b) = self.chromosome.teams(team_size);
        self.fitness = evaluator.evaluate_split(players, team_a, team_b);
    }
}

/// A population of candidate splits.
///
/// All individuals share the same chromosome length, the size of the
/// candidate pool. Generations replace the population wholesale through
/// [`PopulationEvolver::evolve`].
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates the initial population.
    ///
    /// Each individual is an independently shuffled permutation of
    /// `0..player_count` with no fitness yet.
    ///
    /// # Arguments
    ///
    /// * `player_count` - Number of candidates (length of each chromosome)
    /// * `count` - Number of individuals in the population
    /// * `rng` - Random number generator
    #[must_use]
    pub fn random<R>(player_count: usize, count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Individual::new(Chromosome::random(rng, player_count)))
            .collect();
        Self { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Evaluates fitness for all individuals, optionally on scoped threads.
    ///
    /// Individuals keep their order, and parallel evaluation gives the same
    /// fitness values as sequential evaluation.
    ///
    /// # Arguments
    ///
    /// * `players` - Rated candidate pool indexed by the chromosomes
    /// * `team_size` - Players per team
    /// * `evaluator` - Fitness function for a split
    /// * `parallel` - Split the work across available CPU cores
    pub fn evaluate_fitness<E>(
        &mut self,
        players: &[RatedPlayer],
        team_size: usize,
        evaluator: &E,
        parallel: bool,
    ) where
        E: SplitEvaluator + ?Sized,
    {
        if !parallel {
            for ind in &mut self.individuals {
                ind.evaluate(players, team_size, evaluator);
            }
            return;
        }

        let workers = thread::available_parallelism().map_or(1, NonZero::get);
        let chunk_size = self.individuals.len().div_ceil(workers).max(1);
        thread::scope(|s| {
            for chunk in self.individuals.chunks_mut(chunk_size) {
                s.spawn(move || {
                    for ind in chunk {
                        ind.evaluate(players, team_size, evaluator);
                    }
                });
            }
        });
    }

    /// The first individual with the highest fitness.
    #[must_use]
    pub fn fittest(&self) -> Option<&Individual> {
        self.individuals.iter().reduce(|best, ind| {
            if ind.fitness > best.fitness {
                ind
            } else {
                best
            }
        })
    }

    /// Minimum, maximum and mean fitness, or `None` for an empty population.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fitness_range(&self) -> Option<(f64, f64, f64)> {
        if self.individuals.is_empty() {
            return None;
        }
        let (min, max, sum) = self.individuals.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), ind| (min.min(ind.fitness), max.max(ind.fitness), sum + ind.fitness),
        );
        Some((min, max, sum / self.individuals.len() as f64))
    }
}

/// Controls how one generation produces the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationEvolver {
    /// Tournament size for selection (larger = stronger selection pressure)
    pub tournament_size: usize,
    /// Probability of applying a swap mutation to each child
    pub mutation_rate: f64,
}

impl PopulationEvolver {
    /// Builds the next generation.
    ///
    /// 1. Copies `elite` unchanged into the first slot
    /// 2. Fills the remaining slots with children of tournament-selected parents
    ///    (order crossover, then swap mutation)
    ///
    /// # Arguments
    ///
    /// * `population` - Current, evaluated population
    /// * `elite` - Best individual seen so far
    /// * `rng` - Random number generator
    ///
    /// # Returns
    ///
    /// New, unevaluated population with the same size as the input (at least 1)
    ///
    /// # Panics
    ///
    /// Panics if `population` is empty.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, elite: &Individual, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let target = population.individuals.len().max(1);
        let mut next_individuals = Vec::with_capacity(target);
        next_individuals.push(elite.clone());

        while next_individuals.len() < target {
            let p1 = tournament_select(&population.individuals, self.tournament_size, rng);
            let p2 = tournament_select(&population.individuals, self.tournament_size, rng);

            let mut child = chromosome::order_crossover(&p1.chromosome, &p2.chromosome, rng);
            chromosome::swap_mutate(&mut child, self.mutation_rate, rng);
            debug_assert!(child.is_valid());

            next_individuals.push(Individual::new(child));
        }

        Population {
            individuals: next_individuals,
        }
    }
}

/// Selects an individual using tournament selection.
///
/// Samples `tournament_size` distinct individuals (capped at the population size)
/// and returns the fittest. Ties go to the earliest sampled.
fn tournament_select<'a, R>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    assert!(!population.is_empty());
    population
        .choose_multiple(rng, tournament_size.clamp(1, population.len()))
        .reduce(|best, ind| if ind.fitness > best.fitness { ind } else { best })
        .expect("tournament samples at least one individual")
}

/// Genetic algorithm configuration.
///
/// These are the values as configured. [`GeneticParams::adapted_to`] derives
/// the values actually used for a given pool size, and [`GeneticOptimizer`]
/// applies it on construction. Missing fields deserialize to the defaults
/// (population 100, 200 generations, tournament 3, mutation rate 0.10,
/// patience 50, sequential evaluation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticParams {
    /// Individuals per generation
    pub population_size: usize,
    /// Upper bound on generations evaluated
    pub generations: usize,
    /// Tournament size for parent selection
    pub tournament_size: usize,
    /// Probability of a swap mutation per child
    pub mutation_rate: f64,
    /// Generations without improvement before stopping early.
    pub early_stop_patience: usize,
    /// Evaluate fitness on scoped threads.
    pub parallel_evaluation: bool,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 200,
            tournament_size: 3,
            mutation_rate: 0.10,
            early_stop_patience: 50,
            parallel_evaluation: false,
        }
    }
}

impl GeneticParams {
    /// Returns the parameters actually used for a pool of `player_count` candidates.
    ///
    /// Applies adaptive sizing for small pools and normalizes degenerate values
    /// (population and generations at least 1, tournament size within the
    /// population, mutation rate within `[0, 1]`). A non-finite mutation rate
    /// falls back to the default rate before adaptation.
    ///
    /// # Examples
    ///
    /// ```
    /// use teamforge_genetic::genetic::GeneticParams;
    ///
    /// let params = GeneticParams::default().adapted_to(10);
    /// assert_eq!(params.population_size, 150);
    /// assert_eq!(params.generations, 300);
    /// assert_eq!(params.mutation_rate, 0.15);
    ///
    /// let params = GeneticParams::default().adapted_to(40);
    /// assert_eq!(params.population_size, 100);
    /// assert_eq!(params.mutation_rate, 0.10);
    /// ```
    #[must_use]
    pub fn adapted_to(&self, player_count: usize) -> Self {
        let mut params = *self;
        if player_count <= SMALL_POOL_THRESHOLD {
            params.population_size = params.population_size.max(SMALL_POOL_MIN_POPULATION);
            params.generations = params.generations.max(SMALL_POOL_MIN_GENERATIONS);
        }
        if !params.mutation_rate.is_finite() {
            params.mutation_rate = Self::default().mutation_rate;
        }
        if player_count <= TINY_POOL_THRESHOLD {
            params.mutation_rate = params.mutation_rate.max(TINY_POOL_MIN_MUTATION_RATE);
        }
        params.population_size = params.population_size.max(1);
        params.generations = params.generations.max(1);
        params.tournament_size = params.tournament_size.clamp(1, params.population_size);
        params.mutation_rate = params.mutation_rate.clamp(0.0, 1.0);
        params
    }

    #[must_use]
    pub fn evolver(&self) -> PopulationEvolver {
        PopulationEvolver {
            tournament_size: self.tournament_size,
            mutation_rate: self.mutation_rate,
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The generation budget was used up.
    GenerationLimit,
    /// No improvement for `early_stop_patience` generations.
    EarlyStop,
}

/// Fitness figures of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationSummary {
    pub generation: usize,
    /// Best fitness seen so far, this generation included.
    pub best_fitness: f64,
    pub generation_best: f64,
    pub generation_mean: f64,
    pub generation_min: f64,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    pub best: Individual,
    pub history: Vec<GenerationSummary>,
    pub stop_reason: StopReason,
    /// Parameters after adaptive sizing.
    pub params: GeneticParams,
}

/// Runs the generation loop over a fixed candidate pool.
#[derive(Debug)]
pub struct GeneticOptimizer<'a, E: ?Sized> {
    players: &'a [RatedPlayer],
    team_size: usize,
    evaluator: &'a E,
    params: GeneticParams,
}

impl<'a, E> GeneticOptimizer<'a, E>
where
    E: SplitEvaluator + ?Sized,
{
    /// Creates an optimizer for a fixed candidate pool.
    ///
    /// `params` are adapted to the pool size here; [`GeneticOptimizer::params`]
    /// returns the adapted values.
    ///
    /// # Arguments
    ///
    /// * `players` - Rated candidates, in chromosome index order
    /// * `team_size` - Players per team
    /// * `evaluator` - Fitness function for a split
    /// * `params` - Configured parameters
    #[must_use]
    pub fn new(
        players: &'a [RatedPlayer],
        team_size: usize,
        evaluator: &'a E,
        params: &GeneticParams,
    ) -> Self {
        Self {
            players,
            team_size,
            evaluator,
            params: params.adapted_to(players.len()),
        }
    }

    #[must_use]
    pub fn params(&self) -> &GeneticParams {
        &self.params
    }

    /// Runs the GA until the generation budget is used up or early stopping
    /// triggers, and returns the best individual ever evaluated.
    ///
    /// The best fitness never decreases from one generation to the next. The
    /// history holds one summary per generation evaluated, so it only grows
    /// as far as the run actually goes.
    ///
    /// # Arguments
    ///
    /// * `rng` - Random number generator; a seeded one makes the run repeatable
    pub fn run<R>(&self, rng: &mut R) -> OptimizationOutcome
    where
        R: Rng + ?Sized,
    {
        let GeneticParams {
            population_size,
            generations,
            early_stop_patience,
            parallel_evaluation,
            ..
        } = self.params;
        let evolver = self.params.evolver();

        let mut population = Population::random(self.players.len(), population_size, rng);
        let mut best: Option<Individual> = None;
        let mut no_improvement_count = 0;
        let mut history = Vec::new();
        let mut stop_reason = StopReason::GenerationLimit;

        for generation in 0..generations {
            population.evaluate_fitness(
                self.players,
                self.team_size,
                self.evaluator,
                parallel_evaluation,
            );

            let Some(generation_best) = population.fittest() else {
                break;
            };
            let improved = best
                .as_ref()
                .is_none_or(|b| generation_best.fitness > b.fitness);
            if improved {
                best = Some(generation_best.clone());
                no_improvement_count = 0;
            } else {
                no_improvement_count += 1;
            }
            let Some(elite) = best.as_ref() else {
                break;
            };

            if let Some((min, max, mean)) = population.fitness_range() {
                history.push(GenerationSummary {
                    generation,
                    best_fitness: elite.fitness,
                    generation_best: max,
                    generation_mean: mean,
                    generation_min: min,
                });
            }
            tracing::debug!(
                generation,
                best_fitness = elite.fitness,
                generation_best = generation_best.fitness,
                "generation evaluated"
            );
            if generation % LOG_INTERVAL == 0 || generation + 1 == generations {
                tracing::info!(
                    generation,
                    generations,
                    best_fitness = format_args!("{:.2}", elite.fitness),
                    "genetic search progress"
                );
            }

            if no_improvement_count >= early_stop_patience {
                tracing::info!(
                    generation,
                    patience = early_stop_patience,
                    "early stopping, no improvement"
                );
                stop_reason = StopReason::EarlyStop;
                break;
            }

            if generation + 1 < generations {
                population = evolver.evolve(&population, elite, rng);
            }
        }

        let best = best.unwrap_or_else(|| {
            // only reachable with an empty population, which `adapted_to` rules out
            let mut ind = Individual::new(Chromosome::identity(self.players.len()));
            ind.evaluate(self.players, self.team_size, self.evaluator);
            ind
        });

        OptimizationOutcome {
            best,
            history,
            stop_reason,
            params: self.params,
        }
    }
}
