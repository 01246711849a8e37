use anyhow::{Context, bail};
use itertools::Itertools;

use super::pos::Position;

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    Alive,

    #[default]
    Dead,

    /// Transient marker for a dead cell adjacent to at least one alive cell,
    /// set by [`Board::mark_birth_candidates`] for the current generation
    /// only. Counts as dead everywhere except the birth test.
    Border,
}

const NEIGHBOR_OFFSETS: &[[isize; 2]] = &[
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];

/// The padded game grid: a one-cell always-dead ring surrounds the logical
/// `(width - 2) x (height - 2)` area so Moore-neighborhood lookups never
/// leave the allocation. All coordinates are padded coordinates; logical
/// cells live at `[1, width - 2] x [1, height - 2]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Board {
    /// Allocates an all-dead board with the given logical dimensions.
    pub fn new(logical_width: usize, logical_height: usize) -> Self {
        let width = logical_width + 2;
        let height = logical_height + 2;

        Self {
            width,
            height,
            cells: vec![CellState::default(); width * height],
        }
    }

    /// Parses a seed description: a `<rows> <cols>` header line, a line whose
    /// first character designates alive cells, then up to `rows` cell lines.
    /// Short rows are padded with dead cells and long rows are truncated at
    /// the declared column count. Returns the board and the alive character.
    pub fn from_seed(text: &str) -> anyhow::Result<(Self, char)> {
        let mut lines = text.lines();

        let header = lines.next().context("Seed description is empty")?;
        let mut dimensions = header.split_whitespace();

        let rows: usize = dimensions
            .next()
            .context("Seed header is missing the row count")?
            .parse()
            .with_context(|| format!("Bad row count in seed header {header:?}"))?;
        let cols: usize = dimensions
            .next()
            .context("Seed header is missing the column count")?
            .parse()
            .with_context(|| format!("Bad column count in seed header {header:?}"))?;

        if rows == 0 || cols == 0 {
            bail!("Seed dimensions {rows}x{cols} must be positive");
        }

        let alive_char = lines
            .next()
            .and_then(|line| line.chars().next())
            .context("Seed description is missing the alive-character line")?;

        let mut board = Self::new(cols, rows);

        for (y, line) in lines.take(rows).enumerate() {
            for (x, ch) in line.chars().take(cols).enumerate() {
                if ch == alive_char {
                    board.set([x + 1, y + 1], CellState::Alive);
                }
            }
        }

        Ok((board, alive_char))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn logical_width(&self) -> usize {
        self.width - 2
    }

    pub fn logical_height(&self) -> usize {
        self.height - 2
    }

    pub fn get<P>(&self, pos: P) -> CellState
    where
        P: Into<Position>,
    {
        self.cells[self.index_of(pos.into())]
    }

    pub fn set<P>(&mut self, pos: P, state: CellState)
    where
        P: Into<Position>,
    {
        let index = self.index_of(pos.into());
        self.cells[index] = state;
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn is_interior(&self, pos: Position) -> bool {
        (1..self.width - 1).contains(&pos.x) && (1..self.height - 1).contains(&pos.y)
    }

    /// Logical coordinates in row-major order.
    pub fn interior_positions(&self) -> Vec<Position> {
        (1..self.height - 1)
            .cartesian_product(1..self.width - 1)
            .map(|(y, x)| Position { x, y })
            .collect_vec()
    }

    /// Row slices of the logical area, top to bottom.
    pub fn logical_rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells
            .chunks_exact(self.width)
            .skip(1)
            .take(self.height - 2)
            .map(|row| &row[1..self.width - 1])
    }

    /// Alive cells among the 8 Moore neighbors. Meant for interior
    /// coordinates, where the whole neighborhood exists by construction.
    pub fn count_live_neighbors<P>(&self, pos: P) -> usize
    where
        P: Into<Position>,
    {
        self.neighbor_positions(pos.into())
            .filter(|neighbor| self.get(*neighbor) == CellState::Alive)
            .count()
    }

    /// Moore neighbors currently `Dead` (not alive, not marked).
    pub fn find_dead_neighbors<P>(&self, pos: P) -> Vec<Position>
    where
        P: Into<Position>,
    {
        self.neighbor_positions(pos.into())
            .filter(|neighbor| self.get(*neighbor) == CellState::Dead)
            .collect_vec()
    }

    /// Alive total over the logical area.
    pub fn count_alive_cells(&self) -> usize {
        self.logical_rows()
            .flatten()
            .filter(|cell| **cell == CellState::Alive)
            .count()
    }

    /// Fingerprint of the logical area in row-major order, `'1'` for alive
    /// and `'0'` for everything else. Birth-candidate marks never show up in
    /// the key, so two boards with the same alive layout always compare
    /// equal here.
    pub fn canonical_key(&self) -> String {
        self.logical_rows()
            .flatten()
            .map(|cell| match cell {
                CellState::Alive => '1',
                CellState::Dead | CellState::Border => '0',
            })
            .collect()
    }

    /// The border pre-pass: retags every dead interior cell adjacent to an
    /// alive cell as [`CellState::Border`]. Only those cells can be born next
    /// generation, so the transition pass skips the rest of the dead
    /// interior. The padding ring is never retagged.
    pub fn mark_birth_candidates(&mut self) {
        let mut candidates = Vec::new();

        for pos in self.interior_positions() {
            if self.get(pos) == CellState::Alive {
                candidates.extend(
                    self.find_dead_neighbors(pos)
                        .into_iter()
                        .filter(|neighbor| self.is_interior(*neighbor)),
                );
            }
        }

        for pos in candidates {
            self.set(pos, CellState::Border);
        }
    }

    fn neighbor_positions(&self, pos: Position) -> impl Iterator<Item = Position> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |[dx, dy]| pos.offset(*dx, *dy))
            .filter(|neighbor| self.contains(*neighbor))
    }

    fn index_of(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "cell ({}, {}) is outside the {}x{} board",
            pos.x,
            pos.y,
            self.width,
            self.height,
        );

        pos.x + pos.y * self.width
    }
}
