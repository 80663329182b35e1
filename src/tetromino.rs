use crate::grid::{Block, BlockColor, CellState, Grid, Position};

/// The seven catalogue shapes, in generator index order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TetrominoType {
    /// Square.
    O,
    /// Bar.
    I,
    J,
    L,
    T,
    S,
    Z,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::O,
        TetrominoType::I,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::T,
        TetrominoType::S,
        TetrominoType::Z,
    ];

    /// Catalogue entry for a generator index; indices wrap.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Cell offsets relative to the template origin (x grows right, y grows down).
    pub fn offsets(&self) -> [(i32, i32); 4] {
        match self {
            TetrominoType::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            TetrominoType::I => [(0, 0), (1, 0), (2, 0), (3, 0)],
            TetrominoType::J => [(0, 0), (0, 1), (1, 1), (2, 1)],
            TetrominoType::L => [(2, 0), (0, 1), (1, 1), (2, 1)],
            TetrominoType::T => [(1, 0), (0, 1), (1, 1), (2, 1)],
            TetrominoType::S => [(1, 0), (2, 0), (0, 1), (1, 1)],
            TetrominoType::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
        }
    }

    pub fn color(&self) -> BlockColor {
        match self {
            TetrominoType::O => BlockColor::Yellow,
            TetrominoType::I => BlockColor::Cyan,
            TetrominoType::J => BlockColor::Blue,
            TetrominoType::L => BlockColor::Orange,
            TetrominoType::T => BlockColor::Purple,
            TetrominoType::S => BlockColor::Green,
            TetrominoType::Z => BlockColor::Red,
        }
    }

    pub fn template(&self) -> Tetromino {
        Tetromino::new(
            self.color(),
            self.offsets()
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect(),
        )
    }
}

/// A one-colour set of cells relative to an origin. Catalogue shapes and rotated pieces are
/// both expressed this way; spawning copies the cells onto a grid as active blocks.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tetromino {
    color: BlockColor,
    cells: Vec<Position>,
}

impl Tetromino {
    pub fn new(color: BlockColor, cells: Vec<Position>) -> Self {
        Self { color, cells }
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Absolute coordinates of the cells when the origin sits at `origin`.
    pub fn positions_at(&self, origin: Position) -> Vec<Position> {
        self.cells
            .iter()
            .map(|cell| cell.offset(origin.x, origin.y))
            .collect()
    }

    /// Returns a copy of `grid` with this piece written at `origin`, every cell active.
    #[must_use]
    pub fn spawn(&self, grid: &Grid, origin: Position) -> Grid {
        let mut next = grid.clone();
        self.spawn_into(&mut next, origin);
        next
    }

    pub(crate) fn spawn_into(&self, grid: &mut Grid, origin: Position) {
        let cell = CellState::Filled(Block::active(self.color));
        for pos in self.positions_at(origin) {
            grid.put_at(pos, cell);
        }
    }
}
