use twine_core::Observer;

use crate::traits::{HasGradientNorm, HasIteration, HasObjective};

/// Emits one `tracing` event per iterate at `INFO` level.
///
/// Never requests an action. Install a subscriber to see the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceProgress;

impl<E, A> Observer<E, A> for TraceProgress
where
    E: HasIteration + HasObjective + HasGradientNorm,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        tracing::info!(
            iteration = event.iteration(),
            f = event.objective(),
            g_norm = event.gradient_norm(),
            g_tolerance = event.gradient_tolerance(),
            "iterate"
        );
        None
    }
}
