//! Partition-exchange sort keyed by record midpoint
//!
//! Hoare partitioning with the first element of each range as pivot. Not
//! stable: records with equal midpoints may land in any order, which is fine
//! because only positional median values are read back.

use crate::models::DailyRecord;

/// Sort records ascending by `(open + close) / 2`, in place
pub fn sort_by_midpoint(records: &mut [DailyRecord]) {
    if records.len() < 2 {
        return;
    }
    quick_sort(records, 0, records.len() - 1);
}

/// Sort the inclusive index range `[low, high]`
///
/// Recurses into the smaller side and loops on the larger one so stack depth
/// stays logarithmic even on adversarial input.
fn quick_sort(records: &mut [DailyRecord], mut low: usize, mut high: usize) {
    while low < high {
        let split = partition(records, low, high);

        if split - low < high - split {
            quick_sort(records, low, split);
            low = split + 1;
        } else {
            quick_sort(records, split + 1, high);
            high = split;
        }
    }
}

/// Hoare partition of `[low, high]`
///
/// Returns `split` with `low <= split < high` such that every key in
/// `[low, split]` is <= every key in `[split + 1, high]`.
fn partition(records: &mut [DailyRecord], low: usize, high: usize) -> usize {
    let pivot = records[low].midpoint();
    let mut i = low;
    let mut j = high;

    loop {
        while records[i].midpoint() < pivot {
            i += 1;
        }
        while records[j].midpoint() > pivot {
            j -= 1;
        }

        if i >= j {
            return j;
        }

        records.swap(i, j);
        i += 1;
        j -= 1;
    }
}
