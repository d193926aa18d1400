//! Static catalog of the seven tetromino shapes and their colors

use serde::{Deserialize, Serialize};

/// 24-bit RGB color used both as paint data and as the occupancy flag of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    fn index(self) -> usize {
        match self {
            ShapeKind::I => 0,
            ShapeKind::O => 1,
            ShapeKind::T => 2,
            ShapeKind::S => 3,
            ShapeKind::Z => 4,
            ShapeKind::J => 5,
            ShapeKind::L => 6,
        }
    }
}

/// Immutable shape definition: a row-major 0/1 mask and its color
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub mask: &'static [&'static [u8]],
    pub color: Color,
}

impl Shape {
    /// Number of mask columns
    pub fn width(&self) -> usize {
        self.mask.first().map_or(0, |row| row.len())
    }

    /// Number of mask rows
    pub fn height(&self) -> usize {
        self.mask.len()
    }
}

static SHAPES: [Shape; 7] = [
    Shape {
        kind: ShapeKind::I,
        mask: &[&[1, 1, 1, 1]],
        color: Color(0x00d4ff),
    },
    Shape {
        kind: ShapeKind::O,
        mask: &[&[1, 1], &[1, 1]],
        color: Color(0xffdd00),
    },
    Shape {
        kind: ShapeKind::T,
        mask: &[&[0, 1, 0], &[1, 1, 1]],
        color: Color(0xaa00ff),
    },
    Shape {
        kind: ShapeKind::S,
        mask: &[&[0, 1, 1], &[1, 1, 0]],
        color: Color(0x00ff00),
    },
    Shape {
        kind: ShapeKind::Z,
        mask: &[&[1, 1, 0], &[0, 1, 1]],
        color: Color(0xff0000),
    },
    Shape {
        kind: ShapeKind::J,
        mask: &[&[1, 0, 0], &[1, 1, 1]],
        color: Color(0x0000ff),
    },
    Shape {
        kind: ShapeKind::L,
        mask: &[&[0, 0, 1], &[1, 1, 1]],
        color: Color(0xff8800),
    },
];

/// All shapes, in I, O, T, S, Z, J, L order
pub fn all_shapes() -> &'static [Shape; 7] {
    &SHAPES
}

pub fn shape(kind: ShapeKind) -> &'static Shape {
    &SHAPES[kind.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_seven_tetrominoes() {
        let shapes = all_shapes();
        assert_eq!(shapes.len(), 7);
        for (s, kind) in shapes.iter().zip(ShapeKind::ALL) {
            assert_eq!(s.kind, kind);
            assert_eq!(shape(kind).kind, kind);
            let filled: usize = s
                .mask
                .iter()
                .map(|row| row.iter().filter(|&&v| v != 0).count())
                .sum();
            assert_eq!(filled, 4, "{:?} should have 4 cells", kind);
            assert!(s.mask.iter().all(|row| row.len() == s.width()));
        }
    }

    #[test]
    fn test_color_display() {
        assert_eq!(shape(ShapeKind::I).color.to_string(), "#00d4ff");
        assert_eq!(shape(ShapeKind::J).color.to_string(), "#0000ff");
        assert_eq!(Color(0xff8800).rgb(), (0xff, 0x88, 0x00));
    }
}
