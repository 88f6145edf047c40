//! Re-apply a transform until its result is distinguishable from the input.
//!
//! Contract
//! - At most `max_attempts` applications (at least one).
//! - Returns the first result whose row-wise deviation from `original`
//!   exceeds `atol` at some coordinate.
//! - If every attempt is a near-duplicate, the last attempt is returned as-is
//!   and a warning is logged. Callers must tolerate that degenerate candidate.

use crate::geometry::VertexSet;
use crate::rng::RandomSources;
use crate::transform::Transform;

pub fn until_distinct<T>(
    transform: &T,
    original: &VertexSet,
    max_attempts: u32,
    atol: f64,
    rng: &mut RandomSources,
) -> VertexSet
where
    T: Transform + ?Sized,
{
    let budget = max_attempts.max(1);
    let mut candidate = transform.apply(original, rng);
    let mut attempts = 1;
    while candidate.all_close(original, atol) {
        if attempts >= budget {
            tracing::warn!(
                attempts,
                cubes = original.cube_count(),
                "retry budget exhausted; keeping degenerate candidate"
            );
            break;
        }
        candidate = transform.apply(original, rng);
        attempts += 1;
    }
    candidate
}
