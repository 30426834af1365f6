//! The narrow interface between the controller and whatever displays the game.
use crate::engine::Grid;
use std::time::Duration;

/// Display capabilities the controller needs from a front end.
///
/// The controller never reaches into a concrete UI; it only calls these three methods.
pub trait Presenter {
    /// Redraws the board. The grid exposes both the cells and the score.
    fn repaint(&mut self, grid: &Grid);

    /// Asks whether to keep playing after the target tile appears.
    ///
    /// `elapsed` is the time since the game started.
    fn prompt_continue(&mut self, elapsed: Duration) -> bool;

    /// Announces that no move is left. `elapsed_secs` is the rounded game duration.
    fn notify_game_over(&mut self, elapsed_secs: u64);
}

/// A presenter with no screen, used by the auto player and by tests.
///
/// It answers every continue prompt with the same configured choice and keeps a
/// record of what it was asked to show.
#[derive(Clone, Debug, Default)]
pub struct HeadlessPresenter {
    continue_after_win: bool,
    /// Number of `repaint` calls so far.
    pub repaints: usize,
    /// Number of times the continue prompt was shown.
    pub prompts: usize,
    /// Rounded game duration passed to `notify_game_over`, once the game has ended.
    pub game_over_secs: Option<u64>,
    /// Score seen on the most recent repaint.
    pub last_score: u32,
}

impl HeadlessPresenter {
    /// Creates a presenter that answers every continue prompt with `continue_after_win`.
    pub fn new(continue_after_win: bool) -> Self {
        HeadlessPresenter {
            continue_after_win,
            ..Default::default()
        }
    }
}

impl Presenter for HeadlessPresenter {
    fn repaint(&mut self, grid: &Grid) {
        self.repaints += 1;
        self.last_score = grid.score();
    }

    fn prompt_continue(&mut self, _elapsed: Duration) -> bool {
        self.prompts += 1;
        self.continue_after_win
    }

    fn notify_game_over(&mut self, elapsed_secs: u64) {
        self.game_over_secs = Some(elapsed_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_presenter_records_calls() {
        let mut presenter = HeadlessPresenter::new(true);
        let grid = Grid::with_seed(4, 1).unwrap();
        presenter.repaint(&grid);
        presenter.repaint(&grid);
        assert_eq!(presenter.repaints, 2);
        assert!(presenter.prompt_continue(Duration::from_secs(3)));
        assert_eq!(presenter.prompts, 1);
        presenter.notify_game_over(12);
        assert_eq!(presenter.game_over_secs, Some(12));
    }

    #[test]
    fn test_headless_presenter_can_decline() {
        let mut presenter = HeadlessPresenter::new(false);
        assert!(!presenter.prompt_continue(Duration::ZERO));
    }
}
