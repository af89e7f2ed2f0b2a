use std::sync::OnceLock;

use super::ops::slide_line;
use super::state::{Direction, Score};

/// Precomputed lookup tables for all possible 4-tile lines (16-bit packed).
///
/// Shifting a row or column depends only on its 4 nibbles, and there
/// are 2^16 possible packed lines. We precompute the slid line for
/// both horizontal directions plus the score gained by the merges,
/// which keeps moves branch-light at runtime. Column moves reuse the
/// row tables via transpose.
///
/// The merge gain of a line is the same for both scan directions
/// (merges only pair tiles inside runs of equal values), so a single
/// `gain` table serves Left and Right; the build asserts this.
pub(crate) struct Stores {
    pub(crate) shift_left: Box<[u64]>,
    pub(crate) shift_right: Box<[u64]>,
    pub(crate) gain: Box<[Score]>,
}

const LINE_TABLE_SIZE: usize = 0x1_0000; // 65,536 possible 16-bit lines

static STORES: OnceLock<Stores> = OnceLock::new();

/// Ensure the lookup tables are initialized.
pub(crate) fn init() {
    let _ = STORES.get_or_init(create_stores);
}

#[inline(always)]
pub(crate) fn stores() -> &'static Stores {
    STORES.get_or_init(create_stores)
}

fn create_stores() -> Stores {
    // Allocate on the heap to keep stack frames small during init.
    let mut shift_left = vec![0u64; LINE_TABLE_SIZE];
    let mut shift_right = vec![0u64; LINE_TABLE_SIZE];
    let mut gain = vec![0u64; LINE_TABLE_SIZE];

    for val in 0..LINE_TABLE_SIZE {
        let line = val as u64;
        let (left, left_gain) = slide_line(line, Direction::Left);
        let (right, right_gain) = slide_line(line, Direction::Right);
        debug_assert_eq!(
            left_gain, right_gain,
            "merge gain must not depend on scan direction (line {line:#06x})"
        );
        shift_left[val] = left;
        shift_right[val] = right;
        gain[val] = left_gain;
    }

    Stores {
        shift_left: shift_left.into_boxed_slice(),
        shift_right: shift_right.into_boxed_slice(),
        gain: gain.into_boxed_slice(),
    }
}

#[inline(always)]
pub(crate) fn line_entry(table: &[u64], idx: u16) -> u64 {
    debug_assert!((idx as usize) < LINE_TABLE_SIZE);
    unsafe { *table.get_unchecked(idx as usize) }
}

#[inline(always)]
pub(crate) fn gain_entry(idx: u16) -> Score {
    debug_assert!((idx as usize) < LINE_TABLE_SIZE);
    let gain_table = &stores().gain;
    unsafe { *gain_table.get_unchecked(idx as usize) }
}
