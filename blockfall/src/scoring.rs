//! Score awards

/// Points for each soft drop, whether or not it locked the piece
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points for every row a hard drop descends
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

const LINE_CLEAR_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

/// Points for clearing `lines` rows at once. Anything past a tetris pays the
/// tetris rate.
pub fn line_clear_points(lines: usize) -> u32 {
    LINE_CLEAR_POINTS
        .get(lines)
        .copied()
        .unwrap_or(LINE_CLEAR_POINTS[4])
}
