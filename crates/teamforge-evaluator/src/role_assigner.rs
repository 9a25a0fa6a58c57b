//! Role assignment: mapping team members onto the five lanes.
//!
//! # Algorithm
//!
//! 1. Build a member × lane performance matrix. Lanes a member did not declare are
//!    unavailable (never preferred), not zero.
//! 2. Compute each lane's spread (max − min over members who declared it, 0 if
//!    nobody did).
//! 3. Visit lanes from the widest spread down. Each lane goes to the unassigned
//!    member with the highest performance for it; a lane nobody declared stays open.
//! 4. Every member still unassigned takes the open lane they perform best in, with
//!    undeclared lanes ranking below declared ones. [`AssignedRole::Forced`] is only
//!    used when no lane is open at all (more members than lanes).
//!
//! Lanes with equal spread are visited in standard order, and among members with
//! equal performance the earlier member wins, so the result is deterministic.
//!
//! With exactly five members every lane is used exactly once.

use arrayvec::ArrayVec;
use teamforge_model::{AssignedRole, Role, RolePerformance};

type PerformanceRow = [Option<f64>; Role::LEN];

/// Resolution at which lane spreads are compared.
///
/// Spreads that are equal on paper can differ in the last bits after float
/// arithmetic; quantizing keeps such lanes in standard order.
const SPREAD_RESOLUTION: f64 = 1e-9;

/// Assigns a role to every member, returned in member order.
///
/// # Examples
///
/// ```
/// use teamforge_evaluator::role_assigner::assign_roles;
/// use teamforge_model::{AssignedRole, Role, skill};
///
/// let team = [
///     skill::role_performance(1.0, &[Role::Top]),
///     skill::role_performance(1.0, &[Role::Jungle]),
///     skill::role_performance(1.0, &[Role::Mid]),
///     skill::role_performance(1.0, &[Role::Bottom]),
///     skill::role_performance(1.0, &[]),
/// ];
/// let roles = assign_roles(&team);
/// assert_eq!(roles[0], AssignedRole::Lane(Role::Top));
/// assert_eq!(roles[4], AssignedRole::Lane(Role::Support));
/// ```
#[must_use]
pub fn assign_roles<T>(members: &[T]) -> Vec<AssignedRole>
where
    T: AsRef<RolePerformance>,
{
    let matrix: Vec<PerformanceRow> = members
        .iter()
        .map(|member| Role::ALL.map(|role| member.as_ref().get(role)))
        .collect();

    let mut priority: ArrayVec<(Role, f64), { Role::LEN }> = Role::ALL
        .into_iter()
        .map(|role| (role, (spread(&matrix, role) / SPREAD_RESOLUTION).round()))
        .collect();
    // stable: equal spreads keep standard order
    priority.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut assigned: Vec<Option<AssignedRole>> = vec![None; members.len()];
    let mut open = ArrayVec::from(Role::ALL);

    for (role, _) in priority {
        let best = matrix
            .iter()
            .enumerate()
            .filter(|(i, _)| assigned[*i].is_none())
            .filter_map(|(i, row)| row[role.index()].map(|p| (i, p)))
            .fold(None, |best: Option<(usize, f64)>, (i, p)| match best {
                Some((_, best_p)) if best_p >= p => best,
                _ => Some((i, p)),
            });
        if let Some((i, _)) = best {
            assigned[i] = Some(AssignedRole::Lane(role));
            open.retain(|r| *r != role);
        }
    }

    for (i, slot) in assigned.iter_mut().enumerate() {
        if slot.is_some() {
            continue;
        }
        let choice = best_open_lane(&matrix[i], &open);
        *slot = Some(match choice {
            Some(pos) => AssignedRole::Lane(open.remove(pos)),
            None => {
                tracing::debug!(member = i, "no open lane left, assigning forced role");
                AssignedRole::Forced
            }
        });
    }

    assigned.into_iter().flatten().collect()
}

fn spread(matrix: &[PerformanceRow], role: Role) -> f64 {
    let mut values = matrix.iter().filter_map(|row| row[role.index()]);
    let Some(first) = values.next() else {
        return 0.0;
    };
    let (min, max) = values.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    max - min
}

/// Position in `open` of the lane this member performs best in.
fn best_open_lane(row: &PerformanceRow, open: &[Role]) -> Option<usize> {
    let mut best: Option<(usize, Option<f64>)> = None;
    for (pos, role) in open.iter().enumerate() {
        let p = row[role.index()];
        match best {
            Some((_, best_p)) if p <= best_p => {}
            _ => best = Some((pos, p)),
        }
    }
    best.map(|(pos, _)| pos)
}
