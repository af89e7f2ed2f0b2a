use rand::Rng;

use super::state::{Board, BoardRaw, Direction, Line, Score, SIZE, WIN_EXPONENT};
use super::tables::{gain_entry, line_entry, stores};

/// Slide/merge every line of the board in `dir`, returning the new
/// board and the score gained by the merges. No randomness, no
/// legality check: an ineffective shift simply returns an equal board
/// with a gain of 0.
pub fn shift(board: Board, dir: Direction) -> (Board, Score) {
    match dir {
        Direction::Left | Direction::Right => shift_rows(board, dir),
        // Columns become rows under transpose: Up shifts toward the
        // low index, like Left; Down like Right.
        Direction::Up => {
            let (shifted, gain) = shift_rows(Board(transpose(board.0)), Direction::Left);
            (Board(transpose(shifted.0)), gain)
        }
        Direction::Down => {
            let (shifted, gain) = shift_rows(Board(transpose(board.0)), Direction::Right);
            (Board(transpose(shifted.0)), gain)
        }
    }
}

fn shift_rows(board: Board, dir: Direction) -> (Board, Score) {
    let s = stores();
    let table: &[u64] = match dir {
        Direction::Left => &s.shift_left,
        Direction::Right => &s.shift_right,
        _ => unreachable!("column shifts are transposed to row shifts"),
    };
    let mut raw: BoardRaw = 0;
    let mut gain: Score = 0;
    for row_idx in 0..SIZE as u64 {
        let line = extract_line(board.0, row_idx) as u16;
        raw |= line_entry(table, line) << (48 - 16 * row_idx);
        gain += gain_entry(line);
    }
    (Board(raw), gain)
}

/// Slide one packed 4-nibble line in `dir` (Left or Right only):
/// non-zero tiles compact toward the move side in traversal order,
/// each adjacent equal pair merges exactly once (the scan index
/// advances past a merged pair), zeros pad the trailing side.
///
/// Returns the new line and the merge gain in actual tile values
/// (each merge contributes its doubled value).
pub(crate) fn slide_line(line: Line, dir: Direction) -> (Line, Score) {
    debug_assert!(matches!(dir, Direction::Left | Direction::Right));
    let mut cells: Vec<u8> = (0..SIZE)
        .map(|i| ((line >> ((SIZE - 1 - i) * 4)) & 0xf) as u8)
        .collect();
    if dir == Direction::Right {
        cells.reverse();
    }

    let mut packed: Vec<u8> = cells.into_iter().filter(|&c| c != 0).collect();
    let mut gain: Score = 0;
    let mut i = 0;
    while i + 1 < packed.len() {
        if packed[i] == packed[i + 1] {
            gain += 1u64 << (packed[i] + 1);
            // Nibble representation caps at 2^15; unreachable in a
            // real game since 2048 ends it first.
            packed[i] = (packed[i] + 1).min(0xf);
            packed.remove(i + 1);
        }
        i += 1;
    }
    packed.resize(SIZE, 0);
    if dir == Direction::Right {
        packed.reverse();
    }
    let out = packed.iter().fold(0u64, |acc, &c| (acc << 4) | c as u64);
    (out, gain)
}

// Credit to Nneonneo
pub(crate) fn transpose(x: BoardRaw) -> BoardRaw {
    let a1 = x & 0xF0F00F0FF0F00F0F;
    let a2 = x & 0x0000F0F00000F0F0;
    let a3 = x & 0x0F0F00000F0F0000;
    let a = a1 | (a2 << 12) | (a3 >> 12);
    let b1 = a & 0xFF00FF0000FF00FF;
    let b2 = a & 0x00FF00FF00000000;
    let b3 = a & 0x00000000FF00FF00;
    b1 | (b2 >> 24) | (b3 << 24)
}

pub(crate) fn extract_line(board: BoardRaw, line_idx: u64) -> Line {
    (board >> ((3 - line_idx) * 16)) & 0xffff
}

// https://stackoverflow.com/questions/38225571/count-number-of-zero-nibbles-in-an-unsigned-64-bit-integer
/// Count the number of empty cells.
pub fn count_empty(board: Board) -> u64 {
    let mut raw = board.0;
    raw |= raw >> 1;
    raw |= raw >> 2;
    raw &= 0x1111111111111111;
    16 - raw.count_ones() as u64
}

/// Insert a 2 (p = 0.9) or 4 (p = 0.1) into a uniformly chosen empty
/// cell. A full board is a silent no-op, not an error.
pub fn spawn_random_tile<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Board {
    let empty = count_empty(board);
    if empty == 0 {
        return board;
    }
    let mut index = rng.gen_range(0..empty);
    let mut tile: u64 = if rng.gen_range(0..10) < 9 { 1 } else { 2 };
    // Walk nibbles from the low end, sliding `tile` up past occupied
    // cells until it sits over the index-th empty one.
    let mut tmp = board.0;
    loop {
        while (tmp & 0xf) != 0 {
            tmp >>= 4;
            tile <<= 4;
        }
        if index == 0 {
            break;
        }
        index -= 1;
        tmp >>= 4;
        tile <<= 4;
    }
    Board(board.0 | tile)
}

/// True iff any cell holds the winning 2048 tile.
pub fn has_won(board: Board) -> bool {
    board.tiles().any(|exp| exp >= WIN_EXPONENT)
}

/// True iff the board has no empty cell and no shift in any direction
/// changes it (i.e. no orthogonally adjacent equal pair remains).
///
/// The empty-cell guard matters: an all-empty board is unshiftable but
/// not stuck.
pub fn is_stuck(board: Board) -> bool {
    if count_empty(board) > 0 {
        return false;
    }
    Direction::ALL.iter().all(|&dir| shift(board, dir).0 == board)
}

/// Highest tile value present, 0 for an empty board.
pub fn highest_tile(board: Board) -> u32 {
    let max_exp = board.tiles().max().unwrap_or(0);
    if max_exp == 0 {
        0
    } else {
        1u32 << max_exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn slide_left(line: Line) -> (Line, Score) {
        slide_line(line, Direction::Left)
    }

    fn slide_right(line: Line) -> (Line, Score) {
        slide_line(line, Direction::Right)
    }

    #[test]
    fn slide_left_compacts_and_merges() {
        assert_eq!(slide_left(0x0000), (0x0000, 0));
        assert_eq!(slide_left(0x0002), (0x2000, 0));
        assert_eq!(slide_left(0x1234), (0x1234, 0));
        // 2,2 merges across a gap: [2,0,0,2] -> [4,0,0,0]
        assert_eq!(slide_left(0x1001), (0x2000, 4));
        // Spec scenario 1: [2,2,4,4] -> [4,8,0,0], gain 4 + 8
        assert_eq!(slide_left(0x1122), (0x2300, 12));
    }

    #[test]
    fn slide_right_scans_from_the_right() {
        assert_eq!(slide_right(0x2000), (0x0002, 0));
        assert_eq!(slide_right(0x1234), (0x1234, 0));
        // Spec scenario 2: [2,0,2,2] -> [0,0,2,4]; the trailing pair
        // merges, the leftmost 2 stays unmerged.
        assert_eq!(slide_right(0x1011), (0x0012, 4));
        assert_eq!(slide_right(0x1122), (0x0023, 12));
    }

    #[test]
    fn merge_once_per_tile() {
        // [2,2,2,0] -> [4,2,0,0], never [4,4,..] or [8,..]
        assert_eq!(slide_left(0x1110), (0x2100, 4));
        // [4,4,4,4] -> [8,8,0,0], the two fresh 8s do not cascade
        assert_eq!(slide_left(0x2222), (0x3300, 16));
        assert_eq!(slide_right(0x0111), (0x0012, 4));
    }

    #[test]
    fn shift_moves_whole_board() {
        let board = Board::from_raw(0x1234133220021002);
        assert_eq!(shift(board, Direction::Left).0, Board::from_raw(0x1234142030001200));
        assert_eq!(shift(board, Direction::Right).0, Board::from_raw(0x1234014200030012));

        let board = Board::from_raw(0x1121230033004222);
        assert_eq!(shift(board, Direction::Up).0, Board::from_raw(0x1131240232004000));
        assert_eq!(shift(board, Direction::Down).0, Board::from_raw(0x1000210034014232));
    }

    #[test]
    fn shift_gain_sums_over_lines() {
        // Two rows of [2,2,4,4]: each gains 12.
        let board = Board::from_grid([[2, 2, 4, 4], [2, 2, 4, 4], [0; 4], [0; 4]]);
        let (shifted, gain) = shift(board, Direction::Left);
        assert_eq!(gain, 24);
        assert_eq!(shifted.to_grid()[0], [4, 8, 0, 0]);
        assert_eq!(shifted.to_grid()[1], [4, 8, 0, 0]);
    }

    #[test]
    fn column_shift_gains_match_rows() {
        // Same values arranged as a column.
        let board = Board::from_grid([[2, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 0]]);
        let (shifted, gain) = shift(board, Direction::Up);
        assert_eq!(gain, 12);
        let grid = shifted.to_grid();
        assert_eq!([grid[0][0], grid[1][0], grid[2][0], grid[3][0]], [4, 8, 0, 0]);
    }

    #[test]
    fn count_empty_counts_zero_nibbles() {
        assert_eq!(count_empty(Board::EMPTY), 16);
        assert_eq!(count_empty(Board::from_raw(0x1111000011110000)), 8);
        assert_eq!(count_empty(Board::from_raw(0x1100000000000000)), 14);
    }

    #[test]
    fn spawn_fills_every_empty_cell_eventually() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::EMPTY;
        for expected_empty in (0..16).rev() {
            board = spawn_random_tile(board, &mut rng);
            assert_eq!(count_empty(board), expected_empty);
        }
        // Full board: spawning is a no-op.
        assert_eq!(spawn_random_tile(board, &mut rng), board);
    }

    #[test]
    fn spawn_places_only_twos_and_fours() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let board = spawn_random_tile(Board::EMPTY, &mut rng);
            let val = board.highest_tile();
            assert!(val == 2 || val == 4, "spawned {val}");
        }
    }

    #[test]
    fn win_detection() {
        assert!(!has_won(Board::EMPTY));
        assert!(!has_won(Board::from_grid([[1024, 0, 0, 0], [0; 4], [0; 4], [0; 4]])));
        assert!(has_won(Board::from_grid([[0, 0, 2048, 0], [0; 4], [0; 4], [0; 4]])));
    }

    #[test]
    fn stuck_requires_full_board_and_no_adjacent_pair() {
        // Spec scenario 3: checkerboard, full and unmergeable.
        let checker = Board::from_grid([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(is_stuck(checker));

        // One adjacent equal pair unsticks it.
        let mergeable = Board::from_grid([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 2, 4],
        ]);
        assert!(!is_stuck(mergeable));

        // Any empty cell unsticks it, including the degenerate empty board.
        assert!(!is_stuck(Board::EMPTY));
        let one_gap = Board::from_grid([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 0],
        ]);
        assert!(!is_stuck(one_gap));
    }

    #[test]
    fn highest_tile_reads_values() {
        assert_eq!(highest_tile(Board::EMPTY), 0);
        let board = Board::from_grid([[2, 16, 0, 0], [0, 0, 512, 0], [0; 4], [0; 4]]);
        assert_eq!(highest_tile(board), 512);
    }

    #[test]
    fn transpose_is_involutive() {
        let raw = 0x1234133220021002;
        assert_eq!(transpose(transpose(raw)), raw);
    }
}
