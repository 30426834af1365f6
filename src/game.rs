//! Session controller: turns key presses into grid moves and drives the presenter.
//!
//! A `Game` owns the `Grid`, a `Presenter` and the session state. Every recognised
//! direction runs one full turn: move, win check, spawn, loss check. Input arriving
//! after the session has ended is ignored.
use crate::config::GameConfig;
use crate::engine::{Direction, Grid};
use crate::error::GameError;
use crate::input::direction_for_key;
use crate::presenter::Presenter;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The target tile has not appeared yet and moves are still possible.
    Playing,
    /// The target tile appeared. With `keep_playing` the session goes on, without it the
    /// session has ended.
    Won { keep_playing: bool },
    /// No move can change the board any more.
    Over,
}

/// What a single call to `Game::handle_direction` or `Game::handle_key` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Unknown key, or the session had already ended.
    Ignored,
    /// The move did not change the board, so nothing was spawned.
    Unchanged,
    /// The board changed and a new tile was spawned.
    Moved,
    /// The target was reached and the player chose to stop.
    Won,
    /// The board is locked; the session is over.
    Over,
}

/// One game session.
///
/// # Examples
/// ```
/// use tile2048::config::GameConfig;
/// use tile2048::game::{Game, SessionState};
/// use tile2048::presenter::HeadlessPresenter;
///
/// let config = GameConfig { seed: Some(42), ..GameConfig::default() };
/// let mut game = Game::new(config, HeadlessPresenter::new(true)).unwrap();
/// game.start().unwrap();
/// game.handle_key("a").unwrap();
/// game.handle_key("ArrowDown").unwrap();
/// assert_eq!(game.state(), SessionState::Playing);
/// ```
#[derive(Debug)]
pub struct Game<P: Presenter> {
    grid: Grid,
    presenter: P,
    config: GameConfig,
    state: SessionState,
    started_at: Instant,
    won_after: Option<Duration>,
    ended_after: Option<Duration>,
}

impl<P: Presenter> Game<P> {
    /// Creates a session with an empty board sized and seeded from `config`.
    ///
    /// Call `start` to place the opening tiles.
    pub fn new(config: GameConfig, presenter: P) -> Result<Self, GameError> {
        config.validate()?;
        let grid = match config.seed {
            Some(seed) => Grid::with_seed(config.size, seed)?,
            None => Grid::new(config.size)?,
        };
        Ok(Self::assemble(grid, presenter, config))
    }

    /// Creates a session around an existing board.
    ///
    /// The board's own size replaces `config.size`. If `config.seed` is set the board's
    /// spawn generator is reseeded with it.
    pub fn from_grid(
        mut grid: Grid,
        presenter: P,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        let config = GameConfig {
            size: grid.size(),
            ..config
        };
        config.validate()?;
        if let Some(seed) = config.seed {
            grid.reseed(seed);
        }
        Ok(Self::assemble(grid, presenter, config))
    }

    fn assemble(grid: Grid, presenter: P, config: GameConfig) -> Self {
        Game {
            grid,
            presenter,
            config,
            state: SessionState::Playing,
            started_at: Instant::now(),
            won_after: None,
            ended_after: None,
        }
    }

    /// Starts the clock, spawns the opening tiles and paints the first frame.
    ///
    /// # Errors
    /// Returns `GameError::NoEmptyCell` if the board cannot hold `config.start_tiles` more tiles.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.started_at = Instant::now();
        for _ in 0..self.config.start_tiles {
            self.grid.spawn_random_tile()?;
        }
        info!(
            "Started {}x{} game, target {}",
            self.grid.size(),
            self.grid.size(),
            self.config.target
        );
        self.presenter.repaint(&self.grid);
        Ok(())
    }

    /// Runs a turn for the direction bound to `key`. Unbound keys do nothing.
    pub fn handle_key(&mut self, key: &str) -> Result<TurnOutcome, GameError> {
        match direction_for_key(key) {
            Ok(direction) => self.handle_direction(direction),
            Err(err) => {
                debug!("Ignoring input: {}", err);
                Ok(TurnOutcome::Ignored)
            }
        }
    }

    /// Runs one full turn in `direction`.
    ///
    /// 1. Clear the move flags and slide the board, then repaint.
    /// 2. If the target tile is on the board for the first time, ask the presenter whether
    ///    to continue. Declining ends the turn and the session right here.
    /// 3. If the board changed, spawn a tile and repaint.
    /// 4. If no move is left, end the session and notify the presenter.
    ///
    /// # Errors
    /// Only a failed spawn, which a changed board rules out.
    pub fn handle_direction(&mut self, direction: Direction) -> Result<TurnOutcome, GameError> {
        if self.is_terminated() {
            return Ok(TurnOutcome::Ignored);
        }

        self.grid.clear_flags();
        let flags = self.grid.apply_move(direction);
        self.presenter.repaint(&self.grid);

        if self.grid.found_target(self.config.target) {
            if !self.has_won() {
                self.declare_win();
            }
            if self.is_terminated() {
                return Ok(TurnOutcome::Won);
            }
        }

        if flags.moved {
            self.grid.spawn_random_tile()?;
        }
        self.presenter.repaint(&self.grid);

        if !self.grid.can_move() {
            self.declare_game_over();
            return Ok(TurnOutcome::Over);
        }

        Ok(if flags.moved {
            TurnOutcome::Moved
        } else {
            TurnOutcome::Unchanged
        })
    }

    fn declare_win(&mut self) {
        let elapsed = self.started_at.elapsed();
        self.won_after = Some(elapsed);
        self.state = SessionState::Won {
            keep_playing: false,
        };
        info!(
            "Reached {} after {}s with score {}",
            self.config.target,
            rounded_secs(elapsed),
            self.grid.score()
        );

        let keep_playing = self.presenter.prompt_continue(elapsed);
        self.state = SessionState::Won { keep_playing };
        if !keep_playing {
            self.ended_after = Some(elapsed);
        }
    }

    fn declare_game_over(&mut self) {
        let elapsed = self.started_at.elapsed();
        self.state = SessionState::Over;
        self.ended_after = Some(elapsed);
        let secs = rounded_secs(elapsed);
        info!(
            "Game over after {}s, score {}, max tile {}",
            secs,
            self.grid.score(),
            self.grid.max_tile()
        );
        self.presenter.notify_game_over(secs);
    }

    /// `true` once the board is locked, or after the player stopped at the target.
    pub fn is_terminated(&self) -> bool {
        matches!(
            self.state,
            SessionState::Over
                | SessionState::Won {
                    keep_playing: false
                }
        )
    }

    /// Current position in the Playing / Won / Over state machine.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// `true` once the target tile has appeared, even if the game went on and ended later.
    pub fn has_won(&self) -> bool {
        self.won_after.is_some()
    }

    /// `true` once the board locked up. Takes precedence over a win the player played past.
    pub fn is_over(&self) -> bool {
        self.state == SessionState::Over
    }

    /// `true` while the player is continuing past the target.
    pub fn keep_playing(&self) -> bool {
        self.state
            == SessionState::Won {
                keep_playing: true,
            }
    }

    /// Read-only view of the board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The board's running score.
    pub fn score(&self) -> u32 {
        self.grid.score()
    }

    /// Settings the session was built with. `size` always matches the board.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Time from `start` until the session ended, or until now while it is still running.
    pub fn elapsed(&self) -> Duration {
        self.ended_after
            .unwrap_or_else(|| self.started_at.elapsed())
    }

    /// `elapsed` rounded to the nearest whole second.
    pub fn elapsed_seconds(&self) -> u64 {
        rounded_secs(self.elapsed())
    }

    /// Time from `start` until the target tile first appeared.
    pub fn won_after(&self) -> Option<Duration> {
        self.won_after
    }

    /// The front end this session paints to.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutable access to the front end, for state the controller does not manage.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Ends the session and hands back the front end.
    pub fn into_presenter(self) -> P {
        self.presenter
    }
}

/// Rounds `duration` to the nearest whole second, the unit front ends report times in.
pub fn rounded_secs(duration: Duration) -> u64 {
    duration.as_secs_f64().round() as u64
}
