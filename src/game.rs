use crate::config::{Options, SPAWN_X};
use crate::grid::{Block, BlockColor, CellState, Grid, Position};
use crate::lines::clear_lines;
use crate::movement::{move_active, rotate_active, Direction, Rotation};
use crate::rng::{provider_for, ClockSeededProvider, PieceProvider};
use crate::tetromino::TetrominoType;

// ============================================================================
// Types
// ============================================================================

/// Input to the reducer: a clock tick or a player command.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    Tick,
    Move(Direction),
    Rotate(Rotation),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PieceMoved,
    PieceRotated,
    PieceLocked,
    PieceSpawned(TetrominoType),
    LinesCleared(u32),
    LevelUp(u32),
    GameOver { score: u32 },
    GameRestarted,
}

/// One immutable snapshot of a session.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameState {
    pub grid: Grid,
    /// Shows the piece that spawns next; unrelated to the main grid.
    pub preview: Grid,
    /// Active cells of `grid`, recomputed after every structural change.
    pub active: Vec<Position>,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub high_score: Option<u32>,
    pub next: TetrominoType,
}

/// The snapshot produced by one event, with the journal entries it generated.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Step {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl Step {
    fn new(state: GameState, events: Vec<GameEvent>) -> Self {
        Self { state, events }
    }

    fn unchanged(state: &GameState) -> Self {
        Self::new(state.clone(), Vec::new())
    }
}

// ============================================================================
// Snapshot transitions
// ============================================================================

impl GameState {
    /// Empty playfield waiting for its first piece; the first tick spawns `next`.
    pub fn new(next: TetrominoType) -> Self {
        Self::with_grid(Grid::playfield(), next)
    }

    pub fn with_grid(grid: Grid, next: TetrominoType) -> Self {
        Self {
            active: grid.active_positions(),
            grid,
            preview: preview_of(next),
            game_over: false,
            score: 0,
            level: 1,
            high_score: None,
            next,
        }
    }

    /// Fresh session that remembers this one's high score.
    pub fn restarted(&self, next: TetrominoType) -> Self {
        Self {
            high_score: self.high_score,
            ..Self::new(next)
        }
    }

    pub fn active_positions(&self) -> &[Position] {
        &self.active
    }

    pub fn is_falling(&self) -> bool {
        !self.active.is_empty()
    }

    fn with_new_grid(&self, grid: Grid) -> Self {
        Self {
            active: grid.active_positions(),
            grid,
            ..self.clone()
        }
    }

    pub fn try_move(&self, direction: Direction) -> Option<GameState> {
        move_active(&self.grid, direction).map(|grid| self.with_new_grid(grid))
    }

    pub fn try_rotate(&self, rotation: Rotation) -> Option<GameState> {
        rotate_active(&self.grid, rotation).map(|grid| self.with_new_grid(grid))
    }

    /// Blocked moves leave the snapshot as it was.
    pub fn move_active_tetromino(&self, direction: Direction) -> GameState {
        self.try_move(direction).unwrap_or_else(|| self.clone())
    }

    pub fn rotate_tetromino(&self, rotation: Rotation) -> GameState {
        self.try_rotate(rotation).unwrap_or_else(|| self.clone())
    }

    /// Settles every active cell where it stands.
    pub fn lock_active(&self) -> GameState {
        let mut grid = self.grid.clone();
        for cell in grid.cells_mut() {
            if let CellState::Filled(block) = cell {
                *block = block.settled();
            }
        }
        self.with_new_grid(grid)
    }

    /// Game-over shading: every locked block turns grey.
    fn with_dead_blocks(&self) -> GameState {
        let mut grid = self.grid.clone();
        for cell in grid.cells_mut() {
            if cell.is_locked() {
                *cell = CellState::Filled(Block::locked(BlockColor::Dead));
            }
        }
        self.with_new_grid(grid)
    }

    /// Runs on the first tick after a lock: clear rows, then spawn `next` or end the game.
    fn settle_and_spawn(&self, provider: &mut dyn PieceProvider) -> Step {
        let cleared = clear_lines(&self.grid, self.score, self.level);
        let mut events = Vec::new();

        if cleared.rows_cleared > 0 {
            events.push(GameEvent::LinesCleared(cleared.rows_cleared));
        }
        if cleared.level > self.level {
            events.push(GameEvent::LevelUp(cleared.level));
        }

        let after_next = provider.next_piece();

        if cleared.grid.row_has_locked(0) {
            events.push(GameEvent::GameOver {
                score: cleared.score,
            });
            // High score is the final score of the last game, not the best one.
            let state = GameState {
                active: Vec::new(),
                grid: cleared.grid,
                game_over: true,
                score: cleared.score,
                level: cleared.level,
                high_score: Some(cleared.score),
                ..self.clone()
            };
            return Step::new(state, events);
        }

        let mut grid = cleared.grid;
        self.next
            .template()
            .spawn_into(&mut grid, Position::new(SPAWN_X, 0));
        events.push(GameEvent::PieceSpawned(self.next));

        let state = GameState {
            active: grid.active_positions(),
            grid,
            preview: preview_of(after_next),
            game_over: false,
            score: cleared.score,
            level: cleared.level,
            high_score: self.high_score,
            next: after_next,
        };
        Step::new(state, events)
    }
}

fn preview_of(piece: TetrominoType) -> Grid {
    piece.template().spawn(&Grid::preview(), Position::new(0, 0))
}

// ============================================================================
// Reducer
// ============================================================================

/// Folds one event into the next snapshot. Exactly one of gravity, movement or rotation runs.
pub fn reduce(state: &GameState, event: Event, provider: &mut dyn PieceProvider) -> Step {
    match event {
        Event::Tick => tick(state, provider),
        Event::Move(_) if state.game_over => Step::unchanged(state),
        Event::Move(direction) => match state.try_move(direction) {
            Some(next) => Step::new(next, vec![GameEvent::PieceMoved]),
            None => Step::unchanged(state),
        },
        Event::Rotate(_) if state.game_over => Step::new(
            state.restarted(provider.next_piece()),
            vec![GameEvent::GameRestarted],
        ),
        Event::Rotate(rotation) => match state.try_rotate(rotation) {
            Some(next) => Step::new(next, vec![GameEvent::PieceRotated]),
            None => Step::unchanged(state),
        },
    }
}

fn tick(state: &GameState, provider: &mut dyn PieceProvider) -> Step {
    if state.game_over {
        return Step::new(state.with_dead_blocks(), Vec::new());
    }
    if !state.is_falling() {
        return state.settle_and_spawn(provider);
    }
    match state.try_move(Direction::Down) {
        Some(next) => Step::new(next, vec![GameEvent::PieceMoved]),
        None => Step::new(state.lock_active(), vec![GameEvent::PieceLocked]),
    }
}

// ============================================================================
// Game
// ============================================================================

/// Owns the current snapshot, the piece supply and the event journal of a session.
pub struct Game {
    state: GameState,
    piece_provider: Box<dyn PieceProvider>,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_provider(Box::new(ClockSeededProvider))
    }

    pub fn with_options(options: &Options) -> Self {
        Self::with_provider(provider_for(options.seed))
    }

    pub fn with_provider(mut provider: Box<dyn PieceProvider>) -> Self {
        let next = provider.next_piece();
        Self::with_state(GameState::new(next), provider)
    }

    pub fn with_state(state: GameState, provider: Box<dyn PieceProvider>) -> Self {
        Self {
            state,
            piece_provider: provider,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn handle(&mut self, event: Event) {
        let step = reduce(&self.state, event, self.piece_provider.as_mut());
        self.state = step.state;
        self.events.extend(step.events);
    }

    pub fn handle_all(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.handle(event);
        }
    }

    pub fn tick(&mut self) {
        self.handle(Event::Tick);
    }

    pub fn move_piece(&mut self, direction: Direction) {
        self.handle(Event::Move(direction));
    }

    pub fn rotate_piece(&mut self, rotation: Rotation) {
        self.handle(Event::Rotate(rotation));
    }

    /// Takes and clears all pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if game is over
    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;

    pub fn empty_grid() -> Grid {
        Grid::playfield()
    }

    pub fn locked_cell() -> CellState {
        CellState::Filled(Block::locked(BlockColor::Purple))
    }

    pub fn fill_row(grid: &mut Grid, y: usize) {
        for x in 0..grid.width() {
            grid.put(x, y, locked_cell());
        }
    }

    pub fn fill_row_with_gap(grid: &mut Grid, y: usize, gap_x: usize) {
        for x in 0..grid.width() {
            if x != gap_x {
                grid.put(x, y, locked_cell());
            }
        }
    }

    /// Writes `piece` as the active piece with its template origin at `(x, y)`.
    pub fn place_active(grid: &mut Grid, piece: TetrominoType, x: i32, y: i32) {
        piece.template().spawn_into(grid, Position::new(x, y));
    }

    pub fn state_with_active(piece: TetrominoType, x: i32, y: i32) -> GameState {
        let mut grid = empty_grid();
        place_active(&mut grid, piece, x, y);
        GameState::with_grid(grid, TetrominoType::O)
    }
}
