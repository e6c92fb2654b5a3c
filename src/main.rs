//! Spot Hit entry point
//!
//! Native builds run the game in the terminal. The browser build only uses
//! the library (see `highscores::LocalStorageStore`).

#[cfg(not(target_arch = "wasm32"))]
mod terminal_game {
    use std::io::{Stdout, Write, stdout};
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use crossterm::event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEventKind,
    };
    use crossterm::style::Print;
    use crossterm::terminal::{self, ClearType};
    use crossterm::{cursor, execute, queue};

    use spot_hit::platform::InputState;
    use spot_hit::sim::RunState;
    use spot_hit::{FileStore, Game, GameEvent, GameState, Settings};

    /// Restores the terminal even when the loop bails out
    struct TerminalGuard;

    impl TerminalGuard {
        fn enter(out: &mut Stdout) -> Result<Self> {
            terminal::enable_raw_mode()?;
            execute!(
                out,
                terminal::EnterAlternateScreen,
                EnableMouseCapture,
                cursor::Hide
            )?;
            Ok(Self)
        }
    }

    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = execute!(
                stdout(),
                cursor::Show,
                DisableMouseCapture,
                terminal::LeaveAlternateScreen
            );
            let _ = terminal::disable_raw_mode();
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        log::info!("Spot Hit (terminal) starting...");

        let settings_path = std::env::args().nth(1).map(PathBuf::from);
        let settings = Settings::load(settings_path.as_deref()).context("loading settings")?;

        let seed: u64 = rand::random();
        let run = RunState::new(settings.tuning.clone(), seed).context("invalid tuning")?;
        log::info!("Run seed: {}", run.seed);

        let store = FileStore::new(&settings.highscore_path);
        let mut game = Game::new(run, store).with_start_state(settings.start_state);

        let mut out = stdout();
        let guard = TerminalGuard::enter(&mut out)?;
        let result = game_loop(&mut out, &mut game, &settings);
        drop(guard);

        let scores = game.scores();
        println!("{}", scores.best_label());
        result
    }

    fn game_loop(out: &mut Stdout, game: &mut Game<FileStore>, settings: &Settings) -> Result<()> {
        let frame = Duration::from_secs_f64(1.0 / settings.max_fps as f64);
        let mut inputs = InputState::new();
        let mut last = Instant::now();
        let mut status = String::new();

        loop {
            let deadline = last + frame;
            while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
                if !event::poll(timeout)? {
                    break;
                }
                match event::read()? {
                    Event::Key(key) => handle_key(key, game, &mut inputs),
                    Event::Mouse(mouse) => match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => inputs.fire.set_level(true),
                        MouseEventKind::Up(MouseButton::Left) => inputs.fire.set_level(false),
                        _ => {}
                    },
                    _ => {}
                }
            }

            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;

            let input = inputs.sample();
            game.update(dt, &input);

            for ev in game.drain_events() {
                match ev {
                    GameEvent::Missed { hits } => status = format!("Missed! {hits} spots hit."),
                    GameEvent::StateChanged {
                        to: GameState::Playing,
                        ..
                    } => status.clear(),
                    _ => {}
                }
            }

            if game.quit_requested() {
                return Ok(());
            }
            draw(out, game, settings.track_cells, &status)?;
        }
    }

    fn handle_key(key: KeyEvent, game: &mut Game<FileStore>, inputs: &mut InputState) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char(' ') => inputs.fire.press(),
            KeyCode::Esc => inputs.pause.press(),
            KeyCode::Enter => {
                match game.state() {
                    GameState::MainMenu => game.on_play_pressed(),
                    GameState::PauseMenu => game.on_resume_pressed(),
                    GameState::Playing => {}
                }
                inputs.clear();
            }
            KeyCode::Char('m') => {
                game.on_main_menu_pressed();
                inputs.clear();
            }
            KeyCode::Char('q') => game.on_quit_pressed(),
            _ => {}
        }
    }

    /// Render the track as one row of cells: `#` dot, `=` spot, `-` bar
    fn track_row(game: &Game<FileStore>, cells: u16) -> String {
        let run = game.run();
        let cells = cells as usize;
        let dot_cell = ((run.marker.position + run.marker.width / 2.0) * cells as f32) as usize;
        let dot_cell = dot_cell.min(cells - 1);

        (0..cells)
            .map(|i| {
                let x = (i as f32 + 0.5) / cells as f32;
                if i == dot_cell {
                    '#'
                } else if x >= run.target.start && x <= run.target.end() {
                    '='
                } else {
                    '-'
                }
            })
            .collect()
    }

    fn draw(out: &mut Stdout, game: &Game<FileStore>, cells: u16, status: &str) -> Result<()> {
        let scores = game.scores();
        let hint = match game.state() {
            GameState::MainMenu => "[Enter] Play   [q] Quit",
            GameState::Playing => "[Space/Click] Fire   [Esc] Pause",
            GameState::PauseMenu => "[Enter] Resume   [m] Main Menu   [q] Quit",
        };

        let lines = [
            "SPOT HIT".to_string(),
            String::new(),
            format!("[{}]", track_row(game, cells)),
            String::new(),
            format!("{}    {}", scores.hits_label(), scores.best_label()),
            String::new(),
            hint.to_string(),
            status.to_string(),
        ];

        for (row, line) in lines.iter().enumerate() {
            queue!(
                out,
                cursor::MoveTo(0, row as u16),
                terminal::Clear(ClearType::CurrentLine),
                Print(line)
            )?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    terminal_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM builds use the library directly; this is just to satisfy the compiler
}
