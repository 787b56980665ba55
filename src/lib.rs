//! # Fulcrumsort
//!
//! `fulcrumsort` is an adaptive, in-place, comparison-based sort for slices of
//! fixed-size elements, built around a branchless, cache-aware partition.
//!
//! It keeps quicksort-class throughput on random data while degrading toward
//! linear time on input that is already ordered, reverse-ordered, or nearly
//! so, and it does this with a small, bounded auxiliary region instead of an
//! allocation proportional to the input.
//!
//! ## Key Features
//!
//! - **Adaptive analysis**: A single linear scan fingerprints the disorder of
//!   the input's four quadrants and dispatches each to the cheapest viable
//!   strategy: nothing at all, a reversal, a stable small sort, or the
//!   partitioner.
//! - **Branchless fulcrum partition**: One comparison per element, with reads
//!   and writes decoupled through a 64-element staging region so the hot loop
//!   carries no data-dependent branches.
//! - **Duplicate-proof recursion**: Cube-root pivot sampling detects input
//!   dominated by a handful of keys and switches to a dual-sided partition
//!   scheme that shears off duplicate clusters instead of recursing on them.
//! - **Stack-only working set**: The scratch region lives on the activation
//!   frame (512 elements), or is borrowed from the caller for reuse across
//!   calls.
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! Any slice of `Copy + Ord` elements sorts in place:
//!
//! ```rust
//! use fulcrumsort::fulcrumsort;
//!
//! let mut data = vec![37, 4, 19, 4, 0, 101];
//! fulcrumsort(&mut data);
//!
//! assert_eq!(data, vec![0, 4, 4, 19, 37, 101]);
//! ```
//!
//! ### Custom Orderings
//!
//! Types without a total `Ord`, or alternative orderings, go through
//! [`fulcrumsort_by`]:
//!
//! ```rust
//! use fulcrumsort::fulcrumsort_by;
//!
//! let mut data = vec![1.5f32, -0.25, 9.0, 2.0];
//! fulcrumsort_by(&mut data, |a, b| b.partial_cmp(a).unwrap()); // descending
//!
//! assert_eq!(data, vec![9.0, 2.0, 1.5, -0.25]);
//! ```
//!
//! ### Reusable Scratch
//!
//! Hot paths that sort many slices can hand in one scratch buffer with
//! [`fulcrumsort_swap`] / [`fulcrumsort_swap_by`] instead of reserving frame
//! scratch per call:
//!
//! ```rust
//! use fulcrumsort::fulcrumsort_swap;
//!
//! let mut swap = vec![0u32; 512];
//! for chunk in 0..4 {
//!     let mut data: Vec<u32> = (0..2000).map(|i| i * 7 % 1999 + chunk).collect();
//!     fulcrumsort_swap(&mut data, &mut swap);
//!     assert!(data.windows(2).all(|w| w[0] <= w[1]));
//! }
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Best Case**: O(n) on sorted, reverse-sorted, and constant input.
//! - **Average Case**: O(n log n), one comparison per element per partition
//!   level.
//! - **Worst Case**: O(n log n); a recursion budget backstops adversarial
//!   comparators with a stable merge fallback.
//! - **Memory Overhead**: 512 elements of stack scratch (256 for short
//!   inputs); the heap is never touched.
//!
//! The sort is **not stable**: equal elements may be reordered. Elements must
//! be `Copy`; the kernels move raw values through the scratch region and rely
//! on moves being plain copies.

pub mod algo;
pub mod core;
mod partition;
mod smallsort;

pub use algo::{fulcrumsort, fulcrumsort_by, fulcrumsort_swap, fulcrumsort_swap_by};
pub use core::{AUX_SIZE, SMALL_SORT_MAX};

pub mod prelude {
    pub use crate::algo::{fulcrumsort, fulcrumsort_by, fulcrumsort_swap, fulcrumsort_swap_by};
}
