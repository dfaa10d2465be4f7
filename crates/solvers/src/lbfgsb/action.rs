/// Actions an observer can take when notified of a new iterate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the run immediately.
    ///
    /// The run is reported as [`ExitCode::Failure`] with a zeroed result,
    /// the same as a failing objective.
    ///
    /// [`ExitCode::Failure`]: super::ExitCode::Failure
    Abort,
}
