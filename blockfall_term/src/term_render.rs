use std::borrow::Cow;

use blockfall::{Cell, Color, GameSnapshot, SessionState};
use console::Term;

#[derive(Clone, Debug, PartialEq)]
pub enum TermCell {
    Empty,
    Block(Color),
    BorderVertical,
    BorderHorizontal,
    BorderTopLeft,
    BorderTopRight,
    BorderBottomLeft,
    BorderBottomRight,
    Space,
    Message(String),
}

impl From<Cell> for TermCell {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => TermCell::Empty,
            Cell::Filled(color) => TermCell::Block(color),
        }
    }
}

pub trait TermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> Cow<'a, str>;

    /// Printed width in columns. Board cells are two columns wide so they
    /// look square.
    fn width(&self, cell: &TermCell) -> usize {
        match cell {
            TermCell::Empty | TermCell::Block(_) => 2,
            TermCell::BorderHorizontal => 2,
            TermCell::BorderVertical
            | TermCell::BorderTopLeft
            | TermCell::BorderTopRight
            | TermCell::BorderBottomLeft
            | TermCell::BorderBottomRight => 1,
            TermCell::Space => 1,
            TermCell::Message(s) => s.chars().count(),
        }
    }
}

pub trait TermRender {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>>;
    fn render(&self, style: &impl TermStyle) -> Vec<String> {
        let mut lines = Vec::new();
        for row in self.output(style) {
            let mut line = String::new();
            for cell in &row {
                line.push_str(&style.display(cell));
            }
            lines.push(line);
        }
        lines
    }
}

fn line_width(line: &[TermCell], style: &impl TermStyle) -> usize {
    line.iter().map(|c| style.width(c)).sum()
}

// Make all lines in block the same width by padding with TermCell::Space
pub fn pad_block_right(block: &mut [Vec<TermCell>], style: &impl TermStyle) {
    let width = block
        .iter()
        .map(|row| line_width(row, style))
        .max()
        .unwrap_or(0);
    for row in block.iter_mut() {
        let padding = width - line_width(row, style);
        row.extend(std::iter::repeat_n(TermCell::Space, padding));
    }
}

pub struct PlainTermStyle;

impl TermStyle for PlainTermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> Cow<'a, str> {
        Cow::Borrowed(match cell {
            TermCell::Empty => "  ",
            TermCell::Block(_) => "[]",
            TermCell::BorderVertical => "|",
            TermCell::BorderTopLeft => "+",
            TermCell::BorderTopRight => "+",
            TermCell::BorderBottomLeft => "+",
            TermCell::BorderHorizontal => "--",
            TermCell::BorderBottomRight => "+",
            TermCell::Space => " ",
            TermCell::Message(s) => s.as_str(),
        })
    }
}

/// 24-bit ANSI colors taken straight from the piece colors
pub struct AnsiTermStyle;

impl TermStyle for AnsiTermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> Cow<'a, str> {
        match cell {
            TermCell::Block(color) => {
                let (r, g, b) = color.rgb();
                Cow::Owned(format!("\x1b[38;2;{r};{g};{b}m[]\x1b[0m"))
            }
            TermCell::Empty => Cow::Borrowed("\x1b[0m  "),
            TermCell::BorderVertical => Cow::Borrowed("\x1b[0m│"),
            TermCell::BorderTopLeft => Cow::Borrowed("\x1b[0m┌"),
            TermCell::BorderTopRight => Cow::Borrowed("\x1b[0m┐"),
            TermCell::BorderBottomLeft => Cow::Borrowed("\x1b[0m└"),
            TermCell::BorderHorizontal => Cow::Borrowed("\x1b[0m──"),
            TermCell::BorderBottomRight => Cow::Borrowed("\x1b[0m┘"),
            TermCell::Space => Cow::Borrowed(" "),
            TermCell::Message(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

/// The well: open at the top, walls on the sides, floor at the bottom
pub struct WellField {
    rows: Vec<Vec<Cell>>,
    overlay: Option<String>,
}

impl WellField {
    pub fn new(rows: Vec<Vec<Cell>>, overlay: Option<String>) -> Self {
        Self { rows, overlay }
    }

    fn cols(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }
}

impl TermRender for WellField {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut lines: Vec<Vec<TermCell>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|&c| TermCell::from(c)).collect())
            .collect();

        if let Some(message) = &self.overlay
            && !lines.is_empty()
        {
            let inner = line_width(&lines[0], style);
            let message: String = message.chars().take(inner).collect();
            let left = (inner - message.chars().count()) / 2;
            let mut line = vec![TermCell::Space; left];
            line.push(TermCell::Message(message));
            let middle = lines.len() / 2;
            lines[middle] = line;
            pad_block_right(&mut lines, style);
        }

        for line in &mut lines {
            line.insert(0, TermCell::BorderVertical);
            line.push(TermCell::BorderVertical);
        }
        let mut line = vec![TermCell::BorderBottomLeft];
        line.extend(std::iter::repeat_n(TermCell::BorderHorizontal, self.cols()));
        line.push(TermCell::BorderBottomRight);
        lines.push(line);
        lines
    }
}

/// Boxed preview of the next piece, always 4x2 inside so the panel does not
/// jump around between shapes
pub struct PreviewField(Vec<Vec<Cell>>);

impl PreviewField {
    const COLS: usize = 4;
    const ROWS: usize = 2;

    pub fn new(mask: Vec<Vec<Cell>>) -> Self {
        let mut rows = vec![vec![Cell::Empty; Self::COLS]; Self::ROWS];
        for (y, row) in mask.iter().take(Self::ROWS).enumerate() {
            for (x, cell) in row.iter().take(Self::COLS).enumerate() {
                rows[y][x] = *cell;
            }
        }
        Self(rows)
    }
}

impl TermRender for PreviewField {
    fn output(&self, _style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut lines = Vec::new();

        let mut line = vec![TermCell::BorderTopLeft];
        line.extend(std::iter::repeat_n(TermCell::BorderHorizontal, Self::COLS));
        line.push(TermCell::BorderTopRight);
        lines.push(line);

        for row in &self.0 {
            let mut line = vec![TermCell::BorderVertical];
            line.extend(row.iter().map(|&c| TermCell::from(c)));
            line.push(TermCell::BorderVertical);
            lines.push(line);
        }

        let mut line = vec![TermCell::BorderBottomLeft];
        line.extend(std::iter::repeat_n(TermCell::BorderHorizontal, Self::COLS));
        line.push(TermCell::BorderBottomRight);
        lines.push(line);

        lines
    }
}

/// Well on the left, preview and stats on the right
pub struct GameView {
    well: WellField,
    preview: PreviewField,
    info: Vec<String>,
}

pub const HELP: [&str; 6] = [
    "←/→ move   ↑ rotate",
    "↓ soft drop",
    "Space hard drop",
    "Enter start   p pause",
    "r reset   +/- 1-0 speed",
    "q quit",
];

impl GameView {
    pub fn new(snapshot: &GameSnapshot) -> Self {
        let overlay = match snapshot.state {
            SessionState::Idle => Some("Press Enter".to_string()),
            SessionState::Paused => Some("Paused".to_string()),
            SessionState::GameOver => Some("Game Over".to_string()),
            SessionState::Running => None,
        };
        let mut info = vec![
            String::new(),
            format!("Score: {}", snapshot.score),
            format!("Lines: {}", snapshot.lines_cleared),
            format!("Speed: {}", snapshot.speed),
            format!("State: {}", snapshot.state),
            String::new(),
        ];
        info.extend(HELP.iter().map(|s| s.to_string()));
        Self {
            well: WellField::new(snapshot.well(), overlay),
            preview: PreviewField::new(snapshot.preview()),
            info,
        }
    }
}

impl TermRender for GameView {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut well_lines = self.well.output(style);
        let mut panel_lines = self.preview.output(style);
        for message in &self.info {
            panel_lines.push(vec![TermCell::Message(message.clone())]);
        }
        pad_block_right(&mut well_lines, style);

        let well_width = well_lines.first().map_or(0, |l| line_width(l, style));
        let total_lines = well_lines.len().max(panel_lines.len());

        let mut lines = Vec::with_capacity(total_lines);
        for i in 0..total_lines {
            let mut line = match well_lines.get(i) {
                Some(well) => well.clone(),
                None => vec![TermCell::Space; well_width],
            };
            line.push(TermCell::Space);
            line.push(TermCell::Space);
            if let Some(panel) = panel_lines.get(i) {
                line.extend(panel.iter().cloned());
            }
            lines.push(line);
        }
        lines
    }
}

/// Redraw the whole view from the top-left corner
pub fn draw(term: &Term, snapshot: &GameSnapshot, style: &impl TermStyle) -> std::io::Result<()> {
    term.move_cursor_to(0, 0)?;
    for line in GameView::new(snapshot).render(style) {
        term.write_line(&line)?;
    }
    term.flush()
}
