//! Permutation chromosomes and their genetic operators.
//!
//! A [`Chromosome`] is a permutation of the candidate indices `0..N`. It encodes a
//! split positionally:
//!
//! ```text
//! [ 7 2 9 0 4 | 1 8 3 6 5 | 10 11 ]
//!   team A      team B      bench
//!   (team_size) (team_size) (rest)
//! ```
//!
//! # Operations
//!
//! - **Initialization**: [`Chromosome::random`] draws a uniform random permutation
//! - **Crossover**: [`order_crossover`] combines two parents without breaking the
//!   permutation
//! - **Mutation**: [`swap_mutate`] swaps two genes with a given probability
//!
//! Both operators keep every chromosome a valid permutation, so no repair step is
//! needed.

use rand::{Rng, seq::SliceRandom as _};
use serde::Serialize;

/// A permutation of candidate indices encoding a two-team split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Chromosome(Vec<usize>);

impl Chromosome {
    /// Identity permutation `[0, 1, ..., len - 1]`.
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// Uniformly random permutation of `0..len`.
    pub fn random<R>(rng: &mut R, len: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut genes: Vec<usize> = (0..len).collect();
        genes.shuffle(rng);
        Self(genes)
    }

    /// Wraps `genes` if they form a permutation of `0..genes.len()`.
    #[must_use]
    pub fn from_genes(genes: Vec<usize>) -> Option<Self> {
        is_permutation(&genes).then_some(Self(genes))
    }

    #[must_use]
    pub fn genes(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Candidate indices of team A and team B.
    ///
    /// Each team takes up to `team_size` genes; team B may be short if the
    /// chromosome is shorter than `2 * team_size`.
    #[must_use]
    pub fn teams(&self, team_size: usize) -> (&[usize], &[usize]) {
        let a_end = team_size.min(self.0.len());
        let b_end = (2 * team_size).min(self.0.len());
        (&self.0[..a_end], &self.0[a_end..b_end])
    }

    /// Candidate indices left out of both teams.
    #[must_use]
    pub fn bench(&self, team_size: usize) -> &[usize] {
        &self.0[(2 * team_size).min(self.0.len())..]
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_permutation(&self.0)
    }
}

fn is_permutation(genes: &[usize]) -> bool {
    let mut seen = vec![false; genes.len()];
    genes.iter().all(|&g| match seen.get_mut(g) {
        Some(slot) if !*slot => {
            *slot = true;
            true
        }
        _ => false,
    })
}

/// Order crossover (OX) between two parents of equal length.
///
/// 1. Pick two distinct cut points `start < end` uniformly at random
/// 2. Copy `p1[start..=end]` into the child at the same positions
/// 3. Fill the remaining positions, left to right, with the genes of `p2` that
///    are not in the copied slice, in the order they appear in `p2`
///
/// Chromosomes shorter than two genes are returned as a copy of `p1`.
///
/// # Panics
///
/// Panics if parent chromosomes have different lengths.
pub fn order_crossover<R>(p1: &Chromosome, p2: &Chromosome, rng: &mut R) -> Chromosome
where
    R: Rng + ?Sized,
{
    assert_eq!(p1.len(), p2.len());
    let size = p1.len();
    if size < 2 {
        return p1.clone();
    }

    let cuts = rand::seq::index::sample(rng, size, 2);
    let (start, end) = {
        let (a, b) = (cuts.index(0), cuts.index(1));
        (a.min(b), a.max(b))
    };

    let mut in_slice = vec![false; size];
    for &gene in &p1.0[start..=end] {
        in_slice[gene] = true;
    }
    let mut fill = p2.0.iter().copied().filter(|&gene| !in_slice[gene]);

    let genes = (0..size)
        .map(|i| {
            if (start..=end).contains(&i) {
                p1.0[i]
            } else {
                fill.next()
                    .expect("parent 2 supplies exactly the genes missing from the slice")
            }
        })
        .collect();
    Chromosome(genes)
}

/// Swaps two distinct random genes with probability `rate`.
///
/// `rate` is clamped to `[0.0, 1.0]` and a NaN rate never mutates.
/// Chromosomes shorter than two genes are left unchanged.
pub fn swap_mutate<R>(chromosome: &mut Chromosome, rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let size = chromosome.len();
    let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
    if size < 2 || !rng.random_bool(rate) {
        return;
    }
    let picks = rand::seq::index::sample(rng, size, 2);
    chromosome.0.swap(picks.index(0), picks.index(1));
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(0x7ea_f0_57)
    }

    #[test]
    fn test_random_is_permutation() {
        let mut rng = rng();
        for len in [0, 1, 2, 10, 37] {
            let c = Chromosome::random(&mut rng, len);
            assert_eq!(c.len(), len);
            assert!(c.is_valid());
        }
    }

    #[test]
    fn test_from_genes_rejects_invalid() {
        assert!(Chromosome::from_genes(vec![2, 0, 1]).is_some());
        assert!(Chromosome::from_genes(vec![0, 0, 1]).is_none());
        assert!(Chromosome::from_genes(vec![0, 3, 1]).is_none());
        assert!(Chromosome::from_genes(vec![]).is_some());
    }

    #[test]
    fn test_teams_and_bench() {
        let c = Chromosome::from_genes(vec![5, 3, 0, 1, 4, 2, 6]).unwrap();
        let (a, b) = c.teams(3);
        assert_eq!(a, [5, 3, 0]);
        assert_eq!(b, [1, 4, 2]);
        assert_eq!(c.bench(3), [6]);

        let (a, b) = c.teams(5);
        assert_eq!(a, [5, 3, 0, 1, 4]);
        assert_eq!(b, [2, 6]);
        assert!(c.bench(5).is_empty());
    }

    #[test]
    fn test_crossover_keeps_permutation() {
        let mut rng = rng();
        for len in [2, 3, 10, 12, 25] {
            for _ in 0..200 {
                let p1 = Chromosome::random(&mut rng, len);
                let p2 = Chromosome::random(&mut rng, len);
                let child = order_crossover(&p1, &p2, &mut rng);
                assert!(child.is_valid(), "{p1:?} x {p2:?} => {child:?}");
            }
        }
    }

    #[test]
    fn test_crossover_preserves_parent1_slice_and_parent2_order() {
        let mut rng = rng();
        let p1 = Chromosome::identity(10);
        let p2 = Chromosome::from_genes((0..10).rev().collect()).unwrap();
        for _ in 0..50 {
            let child = order_crossover(&p1, &p2, &mut rng);
            // genes equal to their position came from parent 1's slice; the rest must
            // appear in parent 2's (descending) order
            let from_p2: Vec<usize> = child
                .genes()
                .iter()
                .enumerate()
                .filter(|&(i, &g)| i != g)
                .map(|(_, &g)| g)
                .collect();
            assert!(from_p2.windows(2).all(|w| w[0] > w[1]), "{child:?}");
            assert!(child.genes().iter().enumerate().filter(|&(i, &g)| i == g).count() >= 2);
        }
    }

    #[test]
    fn test_crossover_of_identical_parents() {
        let mut rng = rng();
        let p = Chromosome::random(&mut rng, 10);
        assert_eq!(order_crossover(&p, &p, &mut rng), p);
    }

    #[test]
    fn test_crossover_short_chromosomes() {
        let mut rng = rng();
        let p = Chromosome::identity(1);
        assert_eq!(order_crossover(&p, &p, &mut rng), p);
        let e = Chromosome::identity(0);
        assert_eq!(order_crossover(&e, &e, &mut rng), e);
    }

    #[test]
    fn test_mutation_rate_extremes() {
        let mut rng = rng();
        let original = Chromosome::identity(10);

        let mut c = original.clone();
        swap_mutate(&mut c, 0.0, &mut rng);
        assert_eq!(c, original);

        for _ in 0..50 {
            let mut c = original.clone();
            swap_mutate(&mut c, 1.0, &mut rng);
            assert!(c.is_valid());
            let moved = c.genes().iter().enumerate().filter(|&(i, &g)| i != g).count();
            assert_eq!(moved, 2);
        }
    }

    #[test]
    fn test_mutation_non_finite_rate() {
        let mut rng = rng();
        let original = Chromosome::identity(10);
        for _ in 0..20 {
            let mut c = original.clone();
            swap_mutate(&mut c, f64::NAN, &mut rng);
            assert_eq!(c, original);
        }

        let mut c = original.clone();
        swap_mutate(&mut c, f64::INFINITY, &mut rng);
        assert_ne!(c, original);
        assert!(c.is_valid());
    }

    #[test]
    fn test_mutation_short_chromosome() {
        let mut rng = rng();
        let mut c = Chromosome::identity(1);
        swap_mutate(&mut c, 1.0, &mut rng);
        assert_eq!(c, Chromosome::identity(1));
    }
}
