use serde::{Deserialize, Serialize};

use crate::error::BlockfallError;
use crate::piece::Piece;
use crate::shapes::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Fixed-size grid of locked cells. Row 0 is the top of the well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    // Board width
    width: usize,
    // Board height
    height: usize,
    // rows[y][x], every row holds exactly `width` cells
    rows: Vec<Vec<Cell>>,
}

// Unchecked wire form, validated into a Board
#[derive(Deserialize)]
struct RawBoard {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BlockfallError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.rows.len() != raw.height || raw.rows.iter().any(|row| row.len() != raw.width) {
            return Err(BlockfallError::BoardShapeMismatch {
                width: raw.width,
                height: raw.height,
            });
        }
        Ok(Board {
            width: raw.width,
            height: raw.height,
            rows: raw.rows,
        })
    }
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at (x, y); anything outside the grid reads as empty
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 {
            return Cell::Empty;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(Cell::Empty)
    }

    /// Set a single cell. Returns false if (x, y) is outside the grid.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.rows[y as usize][x as usize] = cell;
        true
    }

    /// Cells above the ceiling are never occupied, so pieces may spawn
    /// partially off-grid.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_filled()
    }

    /// Would `piece` shifted by (dx, dy) leave the well or overlap a locked cell?
    ///
    /// Cells above row 0 only check the side walls.
    pub fn collides(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        piece.cells_offset(dx, dy).any(|(x, y)| {
            x < 0
                || x as usize >= self.width
                || y >= self.height as i32
                || (y >= 0 && self.is_occupied(x, y))
        })
    }

    /// Paint the piece's color into every cell it covers. Cells above the
    /// ceiling are dropped.
    pub fn lock(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.set(x, y, Cell::Filled(piece.color));
            }
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(Cell::is_filled))
    }

    /// Remove every full row, shifting the rows above down and inserting empty
    /// rows at the top. Returns the number of rows removed.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.rows.remove(y - 1);
                self.rows.insert(0, vec![Cell::Empty; self.width]);
                cleared += 1;
                // rows above moved down into y - 1, test it again
            } else {
                y -= 1;
            }
        }
        cleared
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Empty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{shape, ShapeKind};

    const RED: Cell = Cell::Filled(Color(0xff0000));

    fn fill_row(board: &mut Board, y: i32) {
        for x in 0..board.width() as i32 {
            board.set(x, y, RED);
        }
    }

    #[test]
    fn test_board_creation() {
        let board = Board::new(10, 20);
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        assert_eq!(board.rows().len(), 20);
        assert!(board.rows().iter().all(|row| row.len() == 10));
        assert!(board.rows().iter().flatten().all(|c| *c == Cell::Empty));
    }

    #[test]
    fn test_out_of_grid_is_unoccupied() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 0);
        assert!(board.is_occupied(0, 0));
        assert!(!board.is_occupied(0, -1));
        assert!(!board.is_occupied(-1, 0));
        assert!(!board.is_occupied(10, 0));
        assert!(!board.set(10, 0, RED));
        assert!(!board.set(0, 20, RED));
    }

    #[test]
    fn test_collides_walls_and_floor() {
        let board = Board::new(10, 20);
        let mut piece = Piece::from_shape(shape(ShapeKind::I), 0, 0);
        assert!(!board.collides(&piece, 0, 0));
        assert!(board.collides(&piece, -1, 0));
        assert!(!board.collides(&piece, 6, 0));
        assert!(board.collides(&piece, 7, 0));

        piece.y = 19;
        assert!(!board.collides(&piece, 0, 0));
        assert!(board.collides(&piece, 0, 1));
    }

    #[test]
    fn test_collides_above_ceiling_only_checks_walls() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 0);
        let piece = Piece::from_shape(shape(ShapeKind::O), 4, -2);
        assert!(!board.collides(&piece, 0, 0));
        assert!(board.collides(&piece, 0, 1));
        assert!(board.collides(&piece, -5, 0));
    }

    #[test]
    fn test_lock_drops_cells_above_ceiling() {
        let mut board = Board::new(10, 20);
        let piece = Piece::from_shape(shape(ShapeKind::T), 3, -1);
        board.lock(&piece);
        let color = Cell::Filled(piece.color);
        assert_eq!(board.cell(3, 0), color);
        assert_eq!(board.cell(4, 0), color);
        assert_eq!(board.cell(5, 0), color);
        let filled = board.rows().iter().flatten().filter(|c| c.is_filled()).count();
        assert_eq!(filled, 3);
    }

    #[test]
    fn test_clear_full_lines_compacts() {
        let mut board = Board::new(4, 6);
        // marker rows keep their relative order after the clear
        board.set(0, 1, RED);
        fill_row(&mut board, 2);
        board.set(1, 3, RED);
        fill_row(&mut board, 4);
        fill_row(&mut board, 5);

        let before = board.rows().to_vec();
        assert_eq!(board.clear_full_lines(), 3);
        assert_eq!(board.rows().len(), 6);
        assert!(board.rows()[..3].iter().flatten().all(|c| *c == Cell::Empty));
        assert_eq!(board.rows()[3], before[0]);
        assert_eq!(board.rows()[4], before[1]);
        assert_eq!(board.rows()[5], before[3]);
    }

    #[test]
    fn test_deserialize_checks_row_shape() {
        let mut board = Board::new(3, 2);
        board.set(1, 1, RED);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        let short_rows = r#"{"width":10,"height":2,"rows":[[],[]]}"#;
        assert!(serde_json::from_str::<Board>(short_rows).is_err());
        let missing_row = r#"{"width":1,"height":2,"rows":[["Empty"]]}"#;
        assert!(serde_json::from_str::<Board>(missing_row).is_err());
    }

    #[test]
    fn test_clear_adjacent_full_lines() {
        let mut board = Board::new(10, 20);
        for y in 16..20 {
            fill_row(&mut board, y);
        }
        board.set(2, 15, RED);
        assert_eq!(board.clear_full_lines(), 4);
        assert_eq!(board.cell(2, 19), RED);
        assert_eq!(board.rows().iter().flatten().filter(|c| c.is_filled()).count(), 1);
        assert_eq!(board.clear_full_lines(), 0);
    }
}
