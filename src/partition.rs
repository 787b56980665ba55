//! Fulcrum partition and pivot selection.
//!
//! One partition level separates a range around a pivot into a `<=` half
//! and a `>` half with exactly one comparison per element. The kernel is
//! branchless: it stages the outer 32+32 elements in the scratch region,
//! then walks two read cursors inward while a pair of write fronts fills
//! both halves simultaneously, each element written to both fronts and
//! only the matching front advanced.
//!
//! The outer loop iterates on the left side and recurses on the right
//! side, keeping stack depth logarithmic. A parent pivot known to be an
//! upper bound of the current range flips the pass into a reverse
//! partition, which strands the duplicate cluster on the right and keeps
//! heavily repeated keys from degenerating the recursion.

use std::cmp::Ordering;

use crate::core::LEAF_THRESHOLD;
use crate::smallsort::smallsort;

/// Largest range pivoted by median-of-nine; above this the cube-root
/// sampler takes over.
const MEDIAN_OF_NINE_MAX: usize = 2048;

/// Partitions `v` around a selected pivot and sorts both sides.
///
/// `max` carries the pivot of the enclosing call when that pivot is known
/// to be `>=` every element of `v`; `depth` is the remaining recursion
/// budget. The scratch must hold at least 64 elements.
pub(crate) fn fulcrum_partition<T, F>(
    v: &mut [T],
    swap: &mut [T],
    mut max: Option<T>,
    depth: u32,
    cmp: &mut F,
) where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut n = v.len();

    if depth == 0 {
        smallsort(v, swap, cmp);
        return;
    }

    loop {
        let p = if n <= MEDIAN_OF_NINE_MAX {
            median_of_nine(&v[..n], cmp)
        } else {
            let mut generic = false;
            let p = median_of_cbrt(&mut v[..n], swap, &mut generic, cmp);
            if generic {
                break;
            }
            p
        };
        let piv = v[p];

        if let Some(ceiling) = max {
            if cmp(&ceiling, &piv).is_le() {
                // Everything here is <= the parent pivot: keep only the
                // strictly-smaller elements and strand the equal cluster
                // on the right, already in final position.
                let a_size = reverse_partition(&mut v[..n], swap, &piv, cmp);
                let s_size = n - a_size;
                n = a_size;

                if s_size <= a_size / 32 || a_size <= LEAF_THRESHOLD {
                    break;
                }
                max = None;
                continue;
            }
        }

        // Park the pivot in the last slot of the range.
        n -= 1;
        v[p] = v[n];

        let a_size = default_partition(&mut v[..n], swap, &piv, cmp);
        let s_size = n - a_size;

        // Restore the pivot at the fulcrum slot.
        v[n] = v[a_size];
        v[a_size] = piv;

        if a_size <= s_size / 32 || s_size <= LEAF_THRESHOLD {
            smallsort(&mut v[a_size + 1..n + 1], swap, cmp);
        } else {
            fulcrum_partition(&mut v[a_size + 1..n + 1], swap, max, depth - 1, cmp);
        }
        n = a_size;

        if s_size <= a_size / 32 || a_size <= LEAF_THRESHOLD {
            if a_size <= LEAF_THRESHOLD {
                break;
            }
            // Lopsided split with the pivot near the range maximum:
            // retry in reverse to shear off the duplicate cluster.
            let a_size = reverse_partition(&mut v[..n], swap, &piv, cmp);
            let s_size = n - a_size;
            n = a_size;

            if s_size <= a_size / 32 || a_size <= LEAF_THRESHOLD {
                break;
            }
            max = None;
            continue;
        }
        max = Some(piv);
    }
    smallsort(&mut v[..n], swap, cmp);
}

/// Branchless one-pass partition. `keep` decides membership of the left
/// half; the return value is the size of that half.
///
/// Requires `v.len() >= 64` and a scratch of at least 64 elements.
fn fulcrum_kernel<T, K>(v: &mut [T], swap: &mut [T], keep: &mut K) -> usize
where
    T: Copy,
    K: FnMut(&T) -> bool,
{
    let n = v.len();
    debug_assert!(n >= 64);
    debug_assert!(swap.len() >= 64);

    swap[..32].copy_from_slice(&v[..32]);
    swap[32..64].copy_from_slice(&v[n - 32..]);

    // m: kept count and left write front. rev: consumed count; the right
    // write front is n - 1 - rev + m. a/b: forward and backward read
    // cursors over the unstaged middle.
    let mut m = 0;
    let mut rev = 0;
    let mut a = 32;
    let mut b = n - 33;
    let mut cnt = n / 16 - 4;

    macro_rules! deposit {
        ($e:expr) => {
            let e = $e;
            let kept = keep(&e);
            v[m] = e;
            v[n - 1 - rev + m] = e;
            m += kept as usize;
            rev += 1;
        };
    }

    loop {
        debug_assert!(m <= a && a - m <= 64);

        if a - m <= 48 {
            if cnt == 0 {
                break;
            }
            cnt -= 1;
            for _ in 0..16 {
                deposit!(v[a]);
                a += 1;
            }
        }
        if a - m >= 16 {
            if cnt == 0 {
                break;
            }
            cnt -= 1;
            for _ in 0..16 {
                deposit!(v[b]);
                b -= 1;
            }
        }
    }

    if a - m <= 48 {
        for _ in 0..n % 16 {
            deposit!(v[a]);
            a += 1;
        }
    } else {
        for _ in 0..n % 16 {
            deposit!(v[b]);
            b -= 1;
        }
    }

    for i in 0..64 {
        deposit!(swap[i]);
    }

    m
}

/// Left half keeps `element <= pivot`.
fn default_partition<T, F>(v: &mut [T], swap: &mut [T], piv: &T, cmp: &mut F) -> usize
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    fulcrum_kernel(v, swap, &mut |e| cmp(e, piv).is_le())
}

/// Left half keeps `element < pivot`, so equals migrate right. Used when
/// the pivot is known to be `>=` the whole range.
fn reverse_partition<T, F>(v: &mut [T], swap: &mut [T], piv: &T, cmp: &mut F) -> usize
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    fulcrum_kernel(v, swap, &mut |e| cmp(piv, e).is_gt())
}

/// Index of the rank-middle element among `v[x]`, `v[y]`, `v[z]`.
fn median_of_three<T, F>(v: &[T], x: usize, y: usize, z: usize, cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let idx = [x, y, z];
    let a = cmp(&v[x], &v[y]).is_gt();
    let b = cmp(&v[x], &v[z]).is_gt();
    let c = cmp(&v[y], &v[z]).is_gt();

    idx[(a == b) as usize + (b ^ c) as usize]
}

/// Median of three medians-of-three, sampled across the range.
fn median_of_nine<T, F>(v: &[T], cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let div = v.len() / 16;

    let x = median_of_three(v, div * 2, div, div * 4, cmp);
    let y = median_of_three(v, div * 8, div * 6, div * 10, cmp);
    let z = median_of_three(v, div * 14, div * 12, div * 15, cmp);

    median_of_three(v, x, y, z, cmp)
}

/// Median of two equal-length sorted sample runs at `v[a..]` and `v[b..]`
/// by binary descent: halve the lookahead, advance whichever run is
/// smaller at it, and finish on the larger of the two finalists.
fn binary_median<T, F>(v: &[T], mut a: usize, mut b: usize, mut len: usize, cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    loop {
        len /= 2;
        if len == 0 {
            break;
        }
        if cmp(&v[a + len], &v[b + len]).is_le() {
            a += len;
        } else {
            b += len;
        }
    }
    if cmp(&v[a], &v[b]).is_gt() { a } else { b }
}

/// Cube-root-of-n sampling pivot.
///
/// Exchanges `cbrt` strided samples into the front of the range, sorts
/// the two sample halves, and returns the index of their combined median.
/// `generic` is raised when both sorted halves top out at the low sample,
/// the signature of input dominated by a handful of keys.
fn median_of_cbrt<T, F>(v: &mut [T], swap: &mut [T], generic: &mut bool, cmp: &mut F) -> usize
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();

    let mut cbrt: usize = 32;
    while n > cbrt.saturating_mul(cbrt).saturating_mul(cbrt) && cbrt < swap.len() {
        cbrt *= 2;
    }
    let div = n / cbrt;

    // Deterministic perturbation of the sample stride, seeded from the
    // length so repeated runs stay byte-identical.
    let offset = n.wrapping_mul(2654435761) % div;

    for j in 0..cbrt {
        v.swap(cbrt - 1 - j, n - 1 - offset - j * div);
    }

    let half = cbrt / 2;
    smallsort(&mut v[..half], swap, cmp);
    smallsort(&mut v[half..cbrt], swap, cmp);

    *generic = cmp(&v[cbrt - 1], &v[0]).is_le() && cmp(&v[half - 1], &v[0]).is_le();

    binary_median(v, 0, half, half, cmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordcmp(a: &i64, b: &i64) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn kernel_splits_and_preserves() {
        let n = 200;
        let mut v: Vec<i64> = (0..n).map(|i| (i * 37) % 101).collect();
        let mut expected = v.clone();
        expected.sort_unstable();

        let mut swap = [0i64; 64];
        let piv = 50i64;
        let m = default_partition(&mut v, &mut swap, &piv, &mut ordcmp);

        assert!(v[..m].iter().all(|&e| e <= piv));
        assert!(v[m..].iter().all(|&e| e > piv));

        v.sort_unstable();
        assert_eq!(v, expected);
    }

    #[test]
    fn reverse_kernel_sends_equals_right() {
        let mut v = vec![7i64; 128];
        v[3] = 1;
        v[90] = 2;

        let mut swap = [0i64; 64];
        let piv = 7i64;
        let m = reverse_partition(&mut v, &mut swap, &piv, &mut ordcmp);

        assert_eq!(m, 2);
        assert!(v[m..].iter().all(|&e| e == 7));
    }

    #[test]
    fn median_of_three_picks_rank_middle() {
        let v = [30i64, 10, 20];
        let m = median_of_three(&v, 0, 1, 2, &mut ordcmp);
        assert_eq!(v[m], 20);

        // Every permutation of three distinct keys lands on the middle.
        let perms = [
            [1i64, 2, 3],
            [1, 3, 2],
            [2, 1, 3],
            [2, 3, 1],
            [3, 1, 2],
            [3, 2, 1],
        ];
        for p in perms {
            let m = median_of_three(&p, 0, 1, 2, &mut ordcmp);
            assert_eq!(p[m], 2, "failed on {p:?}");
        }
    }

    #[test]
    fn cbrt_sampler_flags_flat_samples() {
        let mut v = vec![5i64; 5000];
        let mut swap = [0i64; 512];
        let mut generic = false;
        let p = median_of_cbrt(&mut v, &mut swap, &mut generic, &mut ordcmp);

        assert!(generic);
        assert_eq!(v[p], 5);
    }
}
