//! Optimization strategy trait definitions

use crate::error::EngineResult;
use shared::{OptimizationCandidate, OptimizationRequest};

/// Core search strategy trait that all optimizers must implement
///
/// Implementations are pure: the same request always yields the same
/// candidates, and they may be called from any worker without locking.
#[mockall::automock]
pub trait SearchStrategy: Send + Sync {
    /// Produce candidates ordered by descending score
    fn search(&self, request: &OptimizationRequest) -> EngineResult<Vec<OptimizationCandidate>>;
}
