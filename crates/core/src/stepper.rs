//! The reverse-communication contract with an opaque quasi-Newton solver.
//!
//! A [`Stepper`] never calls the objective itself. Each call to
//! [`Stepper::step`] advances its internal state and writes a task token
//! telling the driver what to do next: evaluate at the (updated) point,
//! acknowledge a new iterate, or stop. All solver state lives in a
//! [`Workspace`] owned by the driver and handed back unchanged on every call.

/// How a single dimension is constrained.
///
/// The numeric codes returned by [`BoundKind::code`] follow the classic
/// encoding used by box-constrained quasi-Newton solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    /// No finite bound.
    Unbounded,
    /// Only a finite lower bound.
    LowerOnly,
    /// Finite lower and upper bounds.
    Both,
    /// Only a finite upper bound.
    UpperOnly,
}

impl BoundKind {
    /// Returns the classic numeric control code (0, 1, 2, or 3).
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Unbounded => 0,
            Self::LowerOnly => 1,
            Self::Both => 2,
            Self::UpperOnly => 3,
        }
    }

    /// Decodes a numeric control code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Unbounded),
            1 => Some(Self::LowerOnly),
            2 => Some(Self::Both),
            3 => Some(Self::UpperOnly),
            _ => None,
        }
    }

    /// Returns true if the lower bound slot is meaningful.
    #[must_use]
    pub fn has_lower(self) -> bool {
        matches!(self, Self::LowerOnly | Self::Both)
    }

    /// Returns true if the upper bound slot is meaningful.
    #[must_use]
    pub fn has_upper(self) -> bool {
        matches!(self, Self::Both | Self::UpperOnly)
    }
}

/// Bounds in the form a [`Stepper`] consumes.
///
/// All three vectors have one entry per dimension. Bound slots that the
/// control code marks as unused hold `0.0` and must not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedBounds {
    /// Constraint kind of each dimension.
    pub kinds: Vec<BoundKind>,
    /// Lower bound of each dimension, `0.0` where unused.
    pub lower: Vec<f64>,
    /// Upper bound of each dimension, `0.0` where unused.
    pub upper: Vec<f64>,
}

impl EncodedBounds {
    /// Returns an encoding with every dimension unbounded.
    #[must_use]
    pub fn unbounded(n: usize) -> Self {
        Self {
            kinds: vec![BoundKind::Unbounded; n],
            lower: vec![0.0; n],
            upper: vec![0.0; n],
        }
    }

    /// Returns the number of encoded dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns true if no dimensions are encoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Solver settings passed on every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Number of correction pairs kept to approximate curvature.
    pub history_size: usize,
    /// Relative function-reduction tolerance.
    pub f_tolerance: f64,
    /// Projected-gradient infinity-norm tolerance.
    pub g_tolerance: f64,
    /// Diagnostic output level, `0` is silent.
    pub verbosity: u32,
}

/// Sizes of the two working-memory blocks a [`Stepper`] needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceSize {
    /// Length of the floating-point block.
    pub reals: usize,
    /// Length of the integer block.
    pub ints: usize,
}

/// Opaque working memory owned by one minimization run.
///
/// The driver allocates it from [`Stepper::workspace_size`] and passes it
/// back unchanged on every step. Its layout is private to the stepper.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    reals: Vec<f64>,
    ints: Vec<i64>,
}

impl Workspace {
    /// Allocates a zeroed workspace.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails. Use [`Workspace::try_new`] for sizes
    /// derived from caller input.
    #[must_use]
    pub fn new(size: WorkspaceSize) -> Self {
        Self {
            reals: vec![0.0; size.reals],
            ints: vec![0; size.ints],
        }
    }

    /// Allocates a zeroed workspace, or returns `None` if the memory cannot
    /// be reserved.
    #[must_use]
    pub fn try_new(size: WorkspaceSize) -> Option<Self> {
        let mut reals = Vec::new();
        reals.try_reserve_exact(size.reals).ok()?;
        reals.resize(size.reals, 0.0);

        let mut ints = Vec::new();
        ints.try_reserve_exact(size.ints).ok()?;
        ints.resize(size.ints, 0);

        Some(Self { reals, ints })
    }

    /// Returns the allocated sizes.
    #[must_use]
    pub fn size(&self) -> WorkspaceSize {
        WorkspaceSize {
            reals: self.reals.len(),
            ints: self.ints.len(),
        }
    }

    #[must_use]
    pub fn reals(&self) -> &[f64] {
        &self.reals
    }

    #[must_use]
    pub fn ints(&self) -> &[i64] {
        &self.ints
    }

    /// Borrows both blocks mutably at once.
    pub fn split_mut(&mut self) -> (&mut [f64], &mut [i64]) {
        (&mut self.reals, &mut self.ints)
    }
}

/// Everything a [`Stepper`] reads and writes during one step.
#[derive(Debug)]
pub struct Step<'a> {
    /// Current point, updated in place when an evaluation is requested.
    pub x: &'a mut [f64],
    /// Objective value at `x` from the previous evaluation.
    pub f: &'a mut f64,
    /// Gradient at `x` from the previous evaluation.
    pub g: &'a mut [f64],
    /// Box constraints, one entry per dimension.
    pub bounds: &'a EncodedBounds,
    /// Tolerances, history size, and verbosity for this run.
    pub settings: &'a Settings,
    /// Solver state carried between calls.
    pub workspace: &'a mut Workspace,
    /// Task token buffer, read on entry and overwritten on exit.
    pub task: &'a mut String,
}

/// Counters and convergence distances reported by a [`Stepper`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Progress {
    /// Completed iterations.
    pub iterations: usize,
    /// Total evaluations (one value plus one gradient call each).
    pub evaluations: usize,
    /// Evaluations spent in the most recent iteration.
    pub iteration_evaluations: usize,
    /// Step length accepted in the most recent iteration.
    pub step_length: f64,
    /// Relative reduction of the objective in the most recent iteration.
    pub f_delta: f64,
    /// Tolerance that `f_delta` is compared against.
    pub f_delta_bound: f64,
    /// Infinity norm of the projected gradient at the current iterate.
    pub g_norm: f64,
    /// Tolerance that `g_norm` is compared against.
    pub g_norm_bound: f64,
}

/// An iterative box-constrained quasi-Newton solver driven by task tokens.
///
/// Implementations must be pure step functions over the explicit state they
/// are given: everything that survives between calls lives in the
/// [`Workspace`]. This lets one stepper value serve any number of
/// concurrent runs, each with its own workspace.
pub trait Stepper {
    /// Returns the working-memory sizes for `n` variables and
    /// `history_size` correction pairs.
    ///
    /// Returns `None` if the sizes are not representable.
    fn workspace_size(&self, n: usize, history_size: usize) -> Option<WorkspaceSize>;

    /// Advances the solver by one step and writes the next task token.
    ///
    /// The driver seeds the token buffer with `START` before the first call.
    fn step(&self, step: Step<'_>);

    /// Reads the solver's own counters and convergence distances.
    fn progress(&self, workspace: &Workspace) -> Progress;
}
