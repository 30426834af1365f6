use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::Env;
use log::{debug, warn};
use std::io::{self, Stdout, Write};
use std::time::Duration;
use tile2048::config::GameConfig;
use tile2048::engine::{Grid, DEFAULT_SIZE, DEFAULT_TARGET};
use tile2048::game::{rounded_secs, Game};
use tile2048::palette::{hex_to_rgb, tile_style, BOARD_BACKGROUND};
use tile2048::presenter::Presenter;

const CELL_WIDTH: usize = 8;
const CONTROLS: &str = "Arrows/WASD to move, q or Esc to quit";

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play 2048 in the terminal", long_about = None)]
struct Args {
    /// Width and height of the board
    #[clap(short, long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Tile value that wins the game
    #[clap(short, long, default_value_t = DEFAULT_TARGET)]
    target: u32,

    /// Seed for reproducible tile spawns
    #[clap(long)]
    seed: Option<u64>,
}

fn color(hex: &str) -> Color {
    hex_to_rgb(hex)
        .map(|(r, g, b)| Color::Rgb { r, g, b })
        .unwrap_or(Color::Reset)
}

/// Draws the board with crossterm and answers the continue prompt from the keyboard.
struct TerminalPresenter {
    out: Stdout,
    cells: Vec<Vec<u32>>,
    score: u32,
    message: String,
}

impl TerminalPresenter {
    fn new(out: Stdout) -> Self {
        TerminalPresenter {
            out,
            cells: Vec::new(),
            score: 0,
            message: CONTROLS.to_string(),
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let board_bg = color(BOARD_BACKGROUND);
        let width = self.cells.len() * CELL_WIDTH + 2;
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            Print(format!("2048    Score: {}\r\n\r\n", self.score))
        )?;

        queue!(
            self.out,
            SetBackgroundColor(board_bg),
            Print(" ".repeat(width)),
            ResetColor,
            Print("\r\n")
        )?;
        for row in &self.cells {
            // Three lines per row: padding, the number, padding.
            for line in 0..3 {
                queue!(self.out, SetBackgroundColor(board_bg), Print(" "))?;
                for &value in row {
                    let style = tile_style(value);
                    let text = if line == 1 && value != 0 {
                        value.to_string()
                    } else {
                        String::new()
                    };
                    queue!(
                        self.out,
                        SetBackgroundColor(color(style.background)),
                        SetForegroundColor(color(style.foreground)),
                        Print(format!("{:^w$}", text, w = CELL_WIDTH - 1)),
                        SetBackgroundColor(board_bg),
                        Print(" ")
                    )?;
                }
                queue!(self.out, Print(" "), ResetColor, Print("\r\n"))?;
            }
            queue!(
                self.out,
                SetBackgroundColor(board_bg),
                Print(" ".repeat(width)),
                ResetColor,
                Print("\r\n")
            )?;
        }

        queue!(self.out, Print(format!("\r\n{}\r\n", self.message)))?;
        self.out.flush()
    }

    fn redraw(&mut self) {
        if let Err(err) = self.draw() {
            warn!("Failed to draw the board: {}", err);
        }
    }
}

impl Presenter for TerminalPresenter {
    fn repaint(&mut self, grid: &Grid) {
        self.cells = grid.cells().to_vec();
        self.score = grid.score();
        self.redraw();
    }

    fn prompt_continue(&mut self, elapsed: Duration) -> bool {
        self.message = format!(
            "You won in {} seconds! Do you want to continue? (y/n)",
            rounded_secs(elapsed)
        );
        self.redraw();

        let keep_playing = loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => break true,
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => break false,
                    _ => {}
                },
                Ok(_) => {}
                Err(err) => {
                    warn!("Failed to read the continue answer: {}", err);
                    break false;
                }
            }
        };

        self.message = if keep_playing {
            CONTROLS.to_string()
        } else {
            "You won! Press any key to exit.".to_string()
        };
        self.redraw();
        keep_playing
    }

    fn notify_game_over(&mut self, elapsed_secs: u64) {
        self.message = format!(
            "Oops! Game over! You took {} seconds. Press any key to exit.",
            elapsed_secs
        );
        self.redraw();
    }
}

/// Maps a crossterm key to the symbolic name the key bindings use.
fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Up => Some("Up".to_string()),
        KeyCode::Down => Some("Down".to_string()),
        KeyCode::Left => Some("Left".to_string()),
        KeyCode::Right => Some("Right".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

struct Summary {
    score: u32,
    max_tile: u32,
    elapsed_secs: u64,
    won: bool,
}

fn run(config: GameConfig) -> Result<Summary> {
    let mut game = Game::new(config, TerminalPresenter::new(io::stdout()))?;
    game.start()?;

    loop {
        let Event::Key(key) = event::read().context("Failed to read terminal event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if game.is_terminated() {
            break;
        }
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
        ) {
            break;
        }
        let Some(name) = key_name(key.code) else {
            continue;
        };
        debug!("{} key pressed", name);
        game.handle_key(&name)?;
    }

    Ok(Summary {
        score: game.score(),
        max_tile: game.grid().max_tile(),
        elapsed_secs: game.elapsed_seconds(),
        won: game.has_won(),
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = GameConfig {
        size: args.size,
        target: args.target,
        seed: args.seed,
        ..GameConfig::default()
    };
    config.validate().context("Invalid game settings")?;

    let mut out = io::stdout();
    terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(out, EnterAlternateScreen, cursor::Hide)?;

    let result = run(config);

    // restore
    let _ = execute!(out, cursor::Show, LeaveAlternateScreen, ResetColor);
    let _ = terminal::disable_raw_mode();

    let summary = result?;
    println!("Final Score: {}", summary.score);
    println!("Max Tile: {}", summary.max_tile);
    println!("Time: {} seconds", summary.elapsed_secs);
    if summary.won {
        println!("You reached the target. Well played!");
    }
    Ok(())
}
