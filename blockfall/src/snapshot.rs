//! Read-only view of a session for renderers and state dumps

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell};
use crate::gravity::SpeedLevel;
use crate::piece::Piece;
use crate::session::SessionState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub current: Option<Piece>,
    pub next: Option<Piece>,
    pub score: u32,
    pub lines_cleared: u32,
    pub state: SessionState,
    pub speed: SpeedLevel,
}

impl GameSnapshot {
    /// Locked cells with the falling piece painted over them.
    /// Piece cells above the ceiling are not shown.
    pub fn well(&self) -> Vec<Vec<Cell>> {
        let mut rows = self.board.rows().to_vec();
        if let Some(piece) = &self.current {
            for (x, y) in piece.cells() {
                if x < 0 || y < 0 {
                    continue;
                }
                if let Some(cell) = rows
                    .get_mut(y as usize)
                    .and_then(|row| row.get_mut(x as usize))
                {
                    *cell = Cell::Filled(piece.color);
                }
            }
        }
        rows
    }

    /// The lookahead piece's mask as cells, ready for a preview box
    pub fn preview(&self) -> Vec<Vec<Cell>> {
        match &self.next {
            Some(piece) => piece
                .mask
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|&filled| if filled { Cell::Filled(piece.color) } else { Cell::Empty })
                        .collect()
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{shape, ShapeKind};

    fn snapshot_with(current: Option<Piece>, next: Option<Piece>) -> GameSnapshot {
        GameSnapshot {
            board: Board::new(6, 4),
            current,
            next,
            score: 120,
            lines_cleared: 1,
            state: SessionState::Running,
            speed: SpeedLevel::new(3),
        }
    }

    #[test]
    fn test_well_overlays_current_piece() {
        let piece = Piece::from_shape(shape(ShapeKind::S), 1, -1);
        let color = Cell::Filled(piece.color);
        let mut snapshot = snapshot_with(Some(piece), None);
        snapshot.board.set(0, 3, Cell::Filled(shape(ShapeKind::Z).color));

        let well = snapshot.well();
        // top row of the S is above the ceiling
        assert_eq!(well[0][1], color);
        assert_eq!(well[0][2], color);
        assert_eq!(well[0][3], Cell::Empty);
        assert_eq!(well[3][0], Cell::Filled(shape(ShapeKind::Z).color));
        assert_eq!(well.iter().flatten().filter(|c| c.is_filled()).count(), 3);
        // the board itself is untouched
        assert!(!snapshot.board.is_occupied(1, 0));
    }

    #[test]
    fn test_preview_of_next_piece() {
        let snapshot = snapshot_with(None, Some(Piece::from_shape(shape(ShapeKind::L), 2, 0)));
        let color = Cell::Filled(shape(ShapeKind::L).color);
        assert_eq!(
            snapshot.preview(),
            vec![
                vec![Cell::Empty, Cell::Empty, color],
                vec![color, color, color],
            ]
        );
        assert!(snapshot_with(None, None).preview().is_empty());
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let snapshot = snapshot_with(
            Some(Piece::from_shape(shape(ShapeKind::T), 2, 0)),
            Some(Piece::from_shape(shape(ShapeKind::I), 1, 0)),
        );
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_snapshot_json_rejects_broken_invariants() {
        let snapshot = snapshot_with(None, None);
        let mut value = serde_json::to_value(&snapshot).unwrap();
        value["speed"] = serde_json::json!(0);
        assert!(serde_json::from_value::<GameSnapshot>(value).is_err());

        let mut value = serde_json::to_value(&snapshot).unwrap();
        value["board"]["rows"] = serde_json::json!([[], [], [], []]);
        assert!(serde_json::from_value::<GameSnapshot>(value).is_err());
    }
}
