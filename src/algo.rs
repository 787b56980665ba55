//! Public entry points and the adaptive analyzer.
//!
//! The analyzer fingerprints the input in one linear scan: four cursors
//! walk the four quadrants in lockstep, counting descending adjacent
//! pairs (*balance*) and monotone 32-element blocks (*streaks*). The
//! fingerprint picks the cheapest viable strategy per quadrant: nothing
//! at all for sorted data, a reversal for descending runs, the stable
//! small sort for mostly-ordered quadrants, and the fulcrum partition for
//! the rest. Sorted quadrants are stitched back together with at most
//! three rotate merges.
//!
//! The main entry points are [`fulcrumsort`] and [`fulcrumsort_by`], with
//! [`fulcrumsort_swap`] and [`fulcrumsort_swap_by`] accepting a
//! caller-owned scratch buffer.

use cuneiform::cuneiform;
use std::cmp::Ordering;

use crate::core::{AUX_SIZE, PARTITION_SWAP_MIN, QUAD_CACHE, SMALL_SORT_MAX, depth_limit};
use crate::partition::fulcrum_partition;
use crate::smallsort::{rotate_merge, smallsort};

/// Sorts a slice of `Copy` elements by their `Ord` ordering.
///
/// Adaptive: fully or mostly sorted input (forward or reverse) finishes
/// in near-linear time, random input runs at quicksort speed. The working
/// set beyond the slice itself is a fixed scratch region on the stack;
/// nothing is heap-allocated. The sort is not stable.
///
/// # Examples
///
/// ```
/// use fulcrumsort::fulcrumsort;
///
/// let mut data = vec![5, 2, 9, 1, 3];
/// fulcrumsort(&mut data);
///
/// assert_eq!(data, vec![1, 2, 3, 5, 9]);
/// ```
pub fn fulcrumsort<T: Copy + Ord>(v: &mut [T]) {
    fulcrumsort_by(v, T::cmp);
}

/// Sorts a slice of `Copy` elements with a caller-supplied comparator.
///
/// The comparator must implement a total order over the elements. If it
/// does not, the resulting order is unspecified, but every element stays
/// present in the slice.
///
/// # Examples
///
/// ```
/// use fulcrumsort::fulcrumsort_by;
///
/// let mut data = vec![0.5f64, -1.25, 3.0, 0.0];
/// fulcrumsort_by(&mut data, |a, b| a.partial_cmp(b).unwrap());
///
/// assert_eq!(data, vec![-1.25, 0.0, 0.5, 3.0]);
/// ```
pub fn fulcrumsort_by<T, F>(v: &mut [T], mut cmp: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    if n < 2 {
        return;
    }
    if n <= SMALL_SORT_MAX {
        let mut swap = [v[0]; SMALL_SORT_MAX];
        smallsort(v, &mut swap[..n], &mut cmp);
        return;
    }

    let mut swap = [v[0]; AUX_SIZE];
    analyze(v, &mut swap, &mut cmp);
}

/// [`fulcrumsort`] with a caller-owned scratch buffer.
///
/// Lets repeated sorts reuse one allocation instead of reserving stack
/// scratch per call. The scratch contents are unspecified on return. A
/// scratch shorter than the 64 elements the partition kernel stages is
/// tolerated; the call falls back to frame-owned scratch.
///
/// # Examples
///
/// ```
/// use fulcrumsort::fulcrumsort_swap;
///
/// let mut data: Vec<u64> = (0..1000).rev().collect();
/// let mut swap = vec![0u64; 512];
/// fulcrumsort_swap(&mut data, &mut swap);
///
/// assert!(data.windows(2).all(|w| w[0] <= w[1]));
/// ```
pub fn fulcrumsort_swap<T: Copy + Ord>(v: &mut [T], swap: &mut [T]) {
    fulcrumsort_swap_by(v, swap, T::cmp);
}

/// [`fulcrumsort_by`] with a caller-owned scratch buffer.
pub fn fulcrumsort_swap_by<T, F>(v: &mut [T], swap: &mut [T], mut cmp: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    if n < 2 {
        return;
    }
    if n <= SMALL_SORT_MAX {
        smallsort(v, swap, &mut cmp);
        return;
    }

    if swap.len() < PARTITION_SWAP_MIN {
        let mut owned = [v[0]; AUX_SIZE];
        analyze(v, &mut owned, &mut cmp);
    } else {
        analyze(v, swap, &mut cmp);
    }
}

// Cache-aligned per-quadrant scan counters.
#[cuneiform]
struct ScanCounters {
    balance: [usize; 4],
    streaks: [usize; 4],
}

/// One linear scan, then repair or dispatch.
///
/// Requires `v.len() > 256` and a scratch of at least 64 elements.
fn analyze<T, F>(v: &mut [T], swap: &mut [T], cmp: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();

    let half1 = n / 2;
    let quad1 = half1 / 2;
    let quad2 = half1 - quad1;
    let half2 = n - half1;
    let quad3 = half2 / 2;
    let quad4 = half2 - quad3;

    let mut pta = 0;
    let mut ptb = quad1;
    let mut ptc = half1;
    let mut ptd = half1 + quad3;

    let mut c = ScanCounters {
        balance: [0; 4],
        streaks: [0; 4],
    };

    // Block scan: 32 adjacent-pair comparisons per cursor per band of
    // 128. A block counts toward streaks when its sum is 0 or 32. When
    // no cursor saw a monotone block and plenty of band remains, the
    // data is random enough that further analysis cannot pay off: jump
    // 96 ahead and charge half the skipped pairs to each balance.
    let mut cnt = n;
    while cnt > 132 {
        let mut asum = 0usize;
        let mut bsum = 0usize;
        let mut csum = 0usize;
        let mut dsum = 0usize;

        for _ in 0..32 {
            asum += cmp(&v[pta], &v[pta + 1]).is_gt() as usize;
            pta += 1;
            bsum += cmp(&v[ptb], &v[ptb + 1]).is_gt() as usize;
            ptb += 1;
            csum += cmp(&v[ptc], &v[ptc + 1]).is_gt() as usize;
            ptc += 1;
            dsum += cmp(&v[ptd], &v[ptd + 1]).is_gt() as usize;
            ptd += 1;
        }

        c.balance[0] += asum;
        c.balance[1] += bsum;
        c.balance[2] += csum;
        c.balance[3] += dsum;

        let a_run = asum == 0 || asum == 32;
        let b_run = bsum == 0 || bsum == 32;
        let c_run = csum == 0 || csum == 32;
        let d_run = dsum == 0 || dsum == 32;

        c.streaks[0] += a_run as usize;
        c.streaks[1] += b_run as usize;
        c.streaks[2] += c_run as usize;
        c.streaks[3] += d_run as usize;

        if cnt > 516 && !a_run && !b_run && !c_run && !d_run {
            c.balance[0] += 48;
            pta += 96;
            c.balance[1] += 48;
            ptb += 96;
            c.balance[2] += 48;
            ptc += 96;
            c.balance[3] += 48;
            ptd += 96;
            cnt -= 384;
        }

        cnt -= 128;
    }

    // Tail scan: one comparison per cursor, then one extra for each
    // quadrant longer than quad1, landing every cursor on the last
    // element of its quadrant.
    while cnt > 7 {
        c.balance[0] += cmp(&v[pta], &v[pta + 1]).is_gt() as usize;
        pta += 1;
        c.balance[1] += cmp(&v[ptb], &v[ptb + 1]).is_gt() as usize;
        ptb += 1;
        c.balance[2] += cmp(&v[ptc], &v[ptc + 1]).is_gt() as usize;
        ptc += 1;
        c.balance[3] += cmp(&v[ptd], &v[ptd + 1]).is_gt() as usize;
        ptd += 1;
        cnt -= 4;
    }

    if quad1 < quad2 {
        c.balance[1] += cmp(&v[ptb], &v[ptb + 1]).is_gt() as usize;
        ptb += 1;
    }
    if quad1 < quad3 {
        c.balance[2] += cmp(&v[ptc], &v[ptc + 1]).is_gt() as usize;
        ptc += 1;
    }
    if quad1 < quad4 {
        c.balance[3] += cmp(&v[ptd], &v[ptd + 1]).is_gt() as usize;
        ptd += 1;
    }

    if c.balance.iter().sum::<usize>() == 0
        && cmp(&v[pta], &v[pta + 1]).is_le()
        && cmp(&v[ptb], &v[ptb + 1]).is_le()
        && cmp(&v[ptc], &v[ptc + 1]).is_le()
    {
        return;
    }

    // A quadrant whose balance is one short of its length is strictly
    // descending. Adjacent descending quadrants whose boundary also
    // descends form one reversible span; the three span bits pick the
    // widest reversal schedule, then stragglers reverse individually.
    let a_desc = c.balance[0] + 1 == quad1;
    let b_desc = c.balance[1] + 1 == quad2;
    let c_desc = c.balance[2] + 1 == quad3;
    let d_desc = c.balance[3] + 1 == quad4;

    if a_desc || b_desc || c_desc || d_desc {
        let span1 = a_desc && b_desc && cmp(&v[pta], &v[pta + 1]).is_gt();
        let span2 = b_desc && c_desc && cmp(&v[ptb], &v[ptb + 1]).is_gt();
        let span3 = c_desc && d_desc && cmp(&v[ptc], &v[ptc + 1]).is_gt();

        match span1 as usize | (span2 as usize) << 1 | (span3 as usize) << 2 {
            0 => {}
            1 => {
                v[..=ptb].reverse();
                c.balance[0] = 0;
                c.balance[1] = 0;
            }
            2 => {
                v[pta + 1..=ptc].reverse();
                c.balance[1] = 0;
                c.balance[2] = 0;
            }
            3 => {
                v[..=ptc].reverse();
                c.balance[0] = 0;
                c.balance[1] = 0;
                c.balance[2] = 0;
            }
            4 => {
                v[ptb + 1..=ptd].reverse();
                c.balance[2] = 0;
                c.balance[3] = 0;
            }
            5 => {
                v[..=ptb].reverse();
                v[ptb + 1..=ptd].reverse();
                c.balance = [0; 4];
            }
            6 => {
                v[pta + 1..=ptd].reverse();
                c.balance[1] = 0;
                c.balance[2] = 0;
                c.balance[3] = 0;
            }
            _ => {
                v[..=ptd].reverse();
                return;
            }
        }

        if a_desc && c.balance[0] != 0 {
            v[..=pta].reverse();
            c.balance[0] = 0;
        }
        if b_desc && c.balance[1] != 0 {
            v[pta + 1..=ptb].reverse();
            c.balance[1] = 0;
        }
        if c_desc && c.balance[2] != 0 {
            v[ptb + 1..=ptc].reverse();
            c.balance[2] = 0;
        }
        if d_desc && c.balance[3] != 0 {
            v[ptc + 1..=ptd].reverse();
            c.balance[3] = 0;
        }
    }

    // A quadrant with more monotone blocks than n/256 is at least half
    // ordered; the small sort beats partitioning there. Oversized
    // quadrants always dispatch separately to stay cache-resident.
    let streak_limit = n / 256;
    let a_sorted = c.streaks[0] > streak_limit;
    let b_sorted = c.streaks[1] > streak_limit;
    let c_sorted = c.streaks[2] > streak_limit;
    let d_sorted = c.streaks[3] > streak_limit;

    let verdict = a_sorted as usize
        | (b_sorted as usize) << 1
        | (c_sorted as usize) << 2
        | (d_sorted as usize) << 3;

    let depth = depth_limit(n);

    match if quad1 > QUAD_CACHE { usize::MAX } else { verdict } {
        0 => {
            fulcrum_partition(v, swap, None, depth, cmp);
            return;
        }
        1 => {
            if c.balance[0] != 0 {
                smallsort(&mut v[..quad1], swap, cmp);
            }
            fulcrum_partition(&mut v[quad1..], swap, None, depth, cmp);
        }
        2 => {
            fulcrum_partition(&mut v[..quad1], swap, None, depth, cmp);
            if c.balance[1] != 0 {
                smallsort(&mut v[quad1..half1], swap, cmp);
            }
            fulcrum_partition(&mut v[half1..], swap, None, depth, cmp);
        }
        3 => {
            if c.balance[0] != 0 {
                smallsort(&mut v[..quad1], swap, cmp);
            }
            if c.balance[1] != 0 {
                smallsort(&mut v[quad1..half1], swap, cmp);
            }
            fulcrum_partition(&mut v[half1..], swap, None, depth, cmp);
        }
        4 => {
            fulcrum_partition(&mut v[..half1], swap, None, depth, cmp);
            if c.balance[2] != 0 {
                smallsort(&mut v[half1..half1 + quad3], swap, cmp);
            }
            fulcrum_partition(&mut v[half1 + quad3..], swap, None, depth, cmp);
        }
        8 => {
            fulcrum_partition(&mut v[..half1 + quad3], swap, None, depth, cmp);
            if c.balance[3] != 0 {
                smallsort(&mut v[half1 + quad3..], swap, cmp);
            }
        }
        9 => {
            if c.balance[0] != 0 {
                smallsort(&mut v[..quad1], swap, cmp);
            }
            fulcrum_partition(&mut v[quad1..half1 + quad3], swap, None, depth, cmp);
            if c.balance[3] != 0 {
                smallsort(&mut v[half1 + quad3..], swap, cmp);
            }
        }
        12 => {
            fulcrum_partition(&mut v[..half1], swap, None, depth, cmp);
            if c.balance[2] != 0 {
                smallsort(&mut v[half1..half1 + quad3], swap, cmp);
            }
            if c.balance[3] != 0 {
                smallsort(&mut v[half1 + quad3..], swap, cmp);
            }
        }
        _ => {
            if a_sorted {
                if c.balance[0] != 0 {
                    smallsort(&mut v[..quad1], swap, cmp);
                }
            } else {
                fulcrum_partition(&mut v[..quad1], swap, None, depth, cmp);
            }
            if b_sorted {
                if c.balance[1] != 0 {
                    smallsort(&mut v[quad1..half1], swap, cmp);
                }
            } else {
                fulcrum_partition(&mut v[quad1..half1], swap, None, depth, cmp);
            }
            if c_sorted {
                if c.balance[2] != 0 {
                    smallsort(&mut v[half1..half1 + quad3], swap, cmp);
                }
            } else {
                fulcrum_partition(&mut v[half1..half1 + quad3], swap, None, depth, cmp);
            }
            if d_sorted {
                if c.balance[3] != 0 {
                    smallsort(&mut v[half1 + quad3..], swap, cmp);
                }
            } else {
                fulcrum_partition(&mut v[half1 + quad3..], swap, None, depth, cmp);
            }
        }
    }

    // Stitch the sorted quadrants: merge within each half only where the
    // boundary still descends, then across the halves.
    if cmp(&v[pta], &v[pta + 1]).is_le() {
        if cmp(&v[ptc], &v[ptc + 1]).is_le() {
            if cmp(&v[ptb], &v[ptb + 1]).is_le() {
                return;
            }
        } else {
            rotate_merge(&mut v[half1..], swap, quad3, cmp);
        }
    } else {
        rotate_merge(&mut v[..half1], swap, quad1, cmp);

        if cmp(&v[ptc], &v[ptc + 1]).is_gt() {
            rotate_merge(&mut v[half1..], swap, quad3, cmp);
        }
    }
    rotate_merge(v, swap, half1, cmp);
}
