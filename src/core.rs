//! Tunable constants and shared helpers.
//!
//! The sort keeps its entire working set on the stack: the dispatcher
//! reserves a fixed scratch region on its own activation frame and every
//! lower layer borrows a slice of it. The constants here size that region
//! and steer the analyzer's dispatch decisions.

/// Scratch size, in elements, reserved by the owned-scratch entry points
/// for inputs longer than [`SMALL_SORT_MAX`].
///
/// The fulcrum partition stages exactly 64 boundary elements in the
/// scratch; the rest is headroom for pivot sampling and for the small
/// sort's auxiliary merges.
pub const AUX_SIZE: usize = 512;

/// Inputs at or below this length skip analysis entirely and go straight
/// to the stable small sort.
pub const SMALL_SORT_MAX: usize = 256;

/// Partition leaf threshold. A side at or below this length is handed to
/// the small sort instead of being partitioned further.
pub(crate) const LEAF_THRESHOLD: usize = 96;

/// Quadrant length above which the analyzer always dispatches each
/// quadrant separately, so no single partition pass outgrows the fast
/// cache levels. Measured inflection points vary by hardware; tens of
/// thousands of elements is the useful band.
pub(crate) const QUAD_CACHE: usize = 32_768;

/// Minimum scratch length the partition kernels can operate with: 32
/// staged elements from each end of the range.
pub(crate) const PARTITION_SWAP_MIN: usize = 64;

/// Recursion budget for the partition loop.
///
/// The loop iterates on one side and recurses on the other, so depth is
/// logarithmic for any reasonable pivot. The budget only exists to bound
/// the stack against a comparator that defeats pivot selection; an
/// exhausted budget finalizes the range with the small sort.
pub(crate) fn depth_limit(n: usize) -> u32 {
    2 * (usize::BITS - n.leading_zeros())
}
