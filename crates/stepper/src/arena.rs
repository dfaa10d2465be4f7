//! Private layout of the stepper's working memory.
//!
//! Reals: scalars, then `x0`, `g0`, `d` (each `n`), then the correction
//! memory `s`, `y` (each `m * n`), `rho`, `alpha` (each `m`).
//!
//! Ints: counters, then the ring-buffer cursor of the correction memory.

use twine_core::{Workspace, WorkspaceSize};

use crate::memory::Memory;

// Real scalars.
pub(crate) const F0: usize = 0;
pub(crate) const STP: usize = 1;
pub(crate) const DG: usize = 2;
pub(crate) const F_DELTA: usize = 3;
pub(crate) const G_NORM: usize = 4;
pub(crate) const STEP_LENGTH: usize = 5;
pub(crate) const F_TOL: usize = 6;
pub(crate) const G_TOL: usize = 7;
const SCALARS: usize = 8;

// Integer counters.
pub(crate) const N: usize = 0;
pub(crate) const M: usize = 1;
pub(crate) const ITER: usize = 2;
pub(crate) const EVALS: usize = 3;
pub(crate) const ITER_EVALS: usize = 4;
pub(crate) const TRIALS: usize = 5;
const COUNTERS: usize = 6;
const RING: usize = 2;

/// Returns the workspace sizes for `n` variables and `m` correction pairs.
///
/// Returns `None` if the real block length overflows `usize`.
pub(crate) fn size(n: usize, m: usize) -> Option<WorkspaceSize> {
    let pairs = m.checked_mul(n)?.checked_add(m)?.checked_mul(2)?;
    let reals = n.checked_mul(3)?.checked_add(pairs)?.checked_add(SCALARS)?;
    Some(WorkspaceSize {
        reals,
        ints: COUNTERS + RING,
    })
}

/// Mutable views into a workspace laid out for `n` variables and `m` pairs.
pub(crate) struct Arena<'a> {
    pub(crate) scalars: &'a mut [f64],
    pub(crate) counters: &'a mut [i64],
    pub(crate) x0: &'a mut [f64],
    pub(crate) g0: &'a mut [f64],
    pub(crate) d: &'a mut [f64],
    pub(crate) memory: Memory<'a>,
}

impl<'a> Arena<'a> {
    /// Splits a workspace into its regions.
    ///
    /// Returns `None` if the workspace is too small for `n` and `m`.
    pub(crate) fn carve(workspace: &'a mut Workspace, n: usize, m: usize) -> Option<Self> {
        let needed = size(n, m)?;
        let have = workspace.size();
        if have.reals < needed.reals || have.ints < needed.ints {
            return None;
        }

        let (reals, ints) = workspace.split_mut();
        let (scalars, rest) = reals.split_at_mut(SCALARS);
        let (x0, rest) = rest.split_at_mut(n);
        let (g0, rest) = rest.split_at_mut(n);
        let (d, rest) = rest.split_at_mut(n);
        let (s, rest) = rest.split_at_mut(m * n);
        let (y, rest) = rest.split_at_mut(m * n);
        let (rho, rest) = rest.split_at_mut(m);
        let (alpha, _) = rest.split_at_mut(m);

        let (counters, rest) = ints.split_at_mut(COUNTERS);
        let (ring, _) = rest.split_at_mut(RING);

        Some(Self {
            scalars,
            counters,
            x0,
            g0,
            d,
            memory: Memory::new(n, m, s, y, rho, alpha, ring),
        })
    }

    /// Reads a counter as `usize`.
    pub(crate) fn count(&self, index: usize) -> usize {
        usize::try_from(self.counters[index]).unwrap_or(0)
    }

    /// Increments a counter.
    pub(crate) fn bump(&mut self, index: usize) {
        self.counters[index] += 1;
    }
}

/// Reads the dimensions recorded by the last `START`, if the header is present.
pub(crate) fn recorded_dims(workspace: &Workspace) -> Option<(usize, usize)> {
    let ints = workspace.ints();
    if ints.len() < COUNTERS + RING || workspace.reals().len() < SCALARS {
        return None;
    }
    let n = usize::try_from(ints[N]).ok()?;
    let m = usize::try_from(ints[M]).ok()?;
    Some((n, m))
}

/// Reads a real scalar without carving the whole arena.
pub(crate) fn scalar(workspace: &Workspace, index: usize) -> f64 {
    workspace.reals().get(index).copied().unwrap_or(0.0)
}

/// Reads an integer counter without carving the whole arena.
pub(crate) fn counter(workspace: &Workspace, index: usize) -> usize {
    workspace
        .ints()
        .get(index)
        .and_then(|v| usize::try_from(*v).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_grows_with_dimension_and_history() {
        let small = size(2, 3).unwrap();
        let large = size(4, 3).unwrap();
        let deep = size(2, 6).unwrap();

        assert_eq!(small.reals, 8 + 6 + 12 + 6);
        assert!(large.reals > small.reals);
        assert!(deep.reals > small.reals);
        assert_eq!(small.ints, large.ints);
    }

    #[test]
    fn size_overflow_is_none() {
        assert!(size(2, usize::MAX / 2).is_none());
        assert!(size(usize::MAX / 2, 1).is_none());
        assert!(size(usize::MAX, 0).is_none());
    }

    #[test]
    fn carve_rejects_small_workspace() {
        let mut workspace = Workspace::new(WorkspaceSize { reals: 4, ints: 8 });
        assert!(Arena::carve(&mut workspace, 2, 3).is_none());
    }

    #[test]
    fn carve_regions_are_disjoint() {
        let mut workspace = Workspace::new(size(3, 2).unwrap());
        {
            let arena = Arena::carve(&mut workspace, 3, 2).unwrap();
            arena.x0.fill(1.0);
            arena.g0.fill(2.0);
            arena.d.fill(3.0);
            arena.scalars[F0] = 4.0;
        }

        let reals = workspace.reals();
        assert_eq!(reals[F0], 4.0);
        assert_eq!(&reals[8..11], &[1.0; 3]);
        assert_eq!(&reals[11..14], &[2.0; 3]);
        assert_eq!(&reals[14..17], &[3.0; 3]);
        assert!(reals[17..].iter().all(|v| *v == 0.0));
    }
}
