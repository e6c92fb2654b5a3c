//! Game state machine
//!
//! Owns the current run, the best score and the score store. The host calls
//! [`Game::update`] once per frame and the `on_*_pressed` methods from its
//! menu buttons; everything it needs to draw is exposed as plain data and
//! change notifications.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::highscores::HighScoreStore;
use crate::sim::{HitOutcome, RunState, TickInput, tick};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
    PauseMenu,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::MainMenu => "MainMenu",
            GameState::Playing => "Playing",
            GameState::PauseMenu => "PauseMenu",
        }
    }
}

/// Score shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    pub hits: u64,
    pub best: u64,
}

impl ScoreBoard {
    pub fn hits_label(&self) -> String {
        format!("Spots Hit: {}", self.hits)
    }

    pub fn best_label(&self) -> String {
        format!("Best: {}", self.best)
    }
}

impl fmt::Display for ScoreBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.hits_label(), self.best_label())
    }
}

/// Things the host may want to react to (redraw HUD, play a sound, exit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    StateChanged { from: GameState, to: GameState },
    ScoreChanged(ScoreBoard),
    Hit { hits: u64 },
    Missed { hits: u64 },
    QuitRequested,
}

/// Menu/playing/pause state machine around a run
pub struct Game<S: HighScoreStore> {
    run: RunState,
    store: S,
    state: GameState,
    best_hit_count: u64,
    quit_requested: bool,
    shown_scores: ScoreBoard,
    events: Vec<GameEvent>,
}

impl<S: HighScoreStore> Game<S> {
    /// Wire up a run and a store; reads the best score once and resets the run
    pub fn new(run: RunState, store: S) -> Self {
        let best_hit_count = store.load();
        let mut game = Self {
            run,
            store,
            state: GameState::MainMenu,
            best_hit_count,
            quit_requested: false,
            shown_scores: ScoreBoard::default(),
            events: Vec::new(),
        };
        game.run.reset();
        game.publish_scores();
        game
    }

    /// Start on a screen other than the main menu
    pub fn with_start_state(mut self, state: GameState) -> Self {
        self.set_state(state);
        self
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn hit_count(&self) -> u64 {
        self.run.hit_count
    }

    pub fn best_hit_count(&self) -> u64 {
        self.best_hit_count
    }

    pub fn scores(&self) -> ScoreBoard {
        ScoreBoard {
            hits: self.run.hit_count,
            best: self.best_hit_count,
        }
    }

    /// Set once quit has been pressed; the host should exit
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Take all notifications raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Per-frame update
    ///
    /// Only the Playing state does anything: pause leaves for the pause menu,
    /// fire is resolved against the dot, and the dot moves. Input in the menus
    /// is dropped.
    pub fn update(&mut self, dt: f32, input: &TickInput) {
        if self.quit_requested || self.state != GameState::Playing {
            return;
        }

        if input.pause {
            self.set_state(GameState::PauseMenu);
            return;
        }

        match tick(&mut self.run, input, dt) {
            Some(HitOutcome::Success) => {
                let hits = self.run.hit_count;
                if hits > self.best_hit_count {
                    self.best_hit_count = hits;
                }
                log::debug!(
                    "Hit #{} (speed {:.3}, spot width {:.4})",
                    hits,
                    self.run.difficulty.speed,
                    self.run.difficulty.target_width
                );
                self.events.push(GameEvent::Hit { hits });
            }
            Some(HitOutcome::Failure) => self.game_over(),
            None => {}
        }

        self.publish_scores();
    }

    /// Play button
    pub fn on_play_pressed(&mut self) {
        match self.state {
            GameState::MainMenu => {
                self.run.reset();
                self.set_state(GameState::Playing);
            }
            GameState::PauseMenu => self.set_state(GameState::Playing),
            GameState::Playing => {}
        }
        self.publish_scores();
    }

    /// Resume button; from the main menu it starts a run like Play
    pub fn on_resume_pressed(&mut self) {
        self.on_play_pressed();
    }

    /// Main menu button: abandons the run without saving
    pub fn on_main_menu_pressed(&mut self) {
        if self.state == GameState::MainMenu {
            return;
        }
        self.run.reset();
        self.set_state(GameState::MainMenu);
        self.publish_scores();
    }

    /// Quit button: save and ask the host to exit
    pub fn on_quit_pressed(&mut self) {
        if self.quit_requested {
            return;
        }
        self.save_best();
        self.quit_requested = true;
        log::info!("Quit requested");
        self.events.push(GameEvent::QuitRequested);
    }

    fn game_over(&mut self) {
        let hits = self.run.hit_count;
        log::info!("Missed after {} hits (best {})", hits, self.best_hit_count);
        self.events.push(GameEvent::Missed { hits });
        self.save_best();
        self.set_state(GameState::MainMenu);
        self.run.reset();
    }

    /// Write the best score; a failure is logged and otherwise ignored
    fn save_best(&mut self) {
        if let Err(err) = self.store.save(self.best_hit_count) {
            log::warn!(
                "Could not save best score {} ({}): {}",
                self.best_hit_count,
                err.as_str(),
                err
            );
        }
    }

    fn set_state(&mut self, to: GameState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        log::info!("{} -> {}", from.as_str(), to.as_str());
        self.events.push(GameEvent::StateChanged { from, to });
    }

    fn publish_scores(&mut self) {
        let scores = self.scores();
        if scores != self.shown_scores {
            self.shown_scores = scores;
            self.events.push(GameEvent::ScoreChanged(scores));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::persistence::StoreError;
    use crate::tuning::Tuning;

    const FIRE: TickInput = TickInput {
        fire: true,
        pause: false,
    };
    const PAUSE: TickInput = TickInput {
        fire: false,
        pause: true,
    };
    const IDLE: TickInput = TickInput {
        fire: false,
        pause: false,
    };

    fn new_run() -> RunState {
        let tuning = Tuning {
            starting_speed: 0.5,
            starting_target_width: 0.5,
            marker_width: 0.0,
            seed: Some(12345),
            ..Default::default()
        };
        RunState::new(tuning, 0).unwrap()
    }

    fn new_game(store: MemoryStore) -> Game<MemoryStore> {
        Game::new(new_run(), store)
    }

    /// Put the dot inside the spot so the next fire hits
    fn aim(game: &mut Game<MemoryStore>) {
        game.run.marker.position = game.run.target.start + game.run.target.width / 2.0;
    }

    /// Put the dot outside the spot so the next fire misses
    fn miss_aim(game: &mut Game<MemoryStore>) {
        let target = game.run.target;
        game.run.marker.position = if target.start > 0.1 {
            0.0
        } else {
            1.0
        };
    }

    #[derive(Default)]
    struct BrokenStore {
        attempts: usize,
    }

    impl HighScoreStore for BrokenStore {
        fn load(&self) -> u64 {
            0
        }

        fn save(&mut self, _score: u64) -> Result<(), StoreError> {
            self.attempts += 1;
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_starts_in_main_menu_with_loaded_best() {
        let game = new_game(MemoryStore::with_score(17));
        assert_eq!(game.state(), GameState::MainMenu);
        assert_eq!(game.best_hit_count(), 17);
        assert_eq!(game.hit_count(), 0);
    }

    #[test]
    fn test_empty_store_loads_zero() {
        let game = new_game(MemoryStore::new());
        assert_eq!(game.best_hit_count(), 0);
    }

    #[test]
    fn test_menu_ignores_input_and_time() {
        let mut game = new_game(MemoryStore::new());
        let before = game.run().marker;
        game.update(0.5, &FIRE);
        game.update(0.5, &PAUSE);
        assert_eq!(game.state(), GameState::MainMenu);
        assert_eq!(game.run().marker, before);
        assert_eq!(game.store().save_count(), 0);
    }

    #[test]
    fn test_play_starts_fresh_run() {
        let mut game = new_game(MemoryStore::new());
        game.on_play_pressed();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.hit_count(), 0);
        assert_eq!(game.run().difficulty.speed, 0.5);

        game.update(0.1, &IDLE);
        assert!((game.run().marker.position - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_hit_keeps_playing_and_raises_best() {
        let mut game = new_game(MemoryStore::new());
        game.on_play_pressed();
        aim(&mut game);
        game.update(0.0, &FIRE);

        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.hit_count(), 1);
        assert_eq!(game.best_hit_count(), 1);
        assert!((game.run().difficulty.target_width - 0.45).abs() < 1e-6);
        assert!((game.run().difficulty.speed - 0.5125).abs() < 1e-6);
        let target = game.run().target;
        assert!(target.start >= 0.0 && target.start <= 0.55);
    }

    #[test]
    fn test_miss_goes_to_menu_saves_and_resets() {
        let mut game = new_game(MemoryStore::with_score(1));
        game.on_play_pressed();
        for _ in 0..3 {
            aim(&mut game);
            game.update(0.0, &FIRE);
        }
        assert_eq!(game.best_hit_count(), 3);

        miss_aim(&mut game);
        game.update(0.016, &FIRE);

        assert_eq!(game.state(), GameState::MainMenu);
        assert_eq!(game.store().stored(), Some(3));
        assert_eq!(game.hit_count(), 0);
        assert_eq!(game.best_hit_count(), 3);
        assert_eq!(game.run().difficulty.speed, 0.5);
        assert_eq!(game.run().difficulty.target_width, 0.5);
        assert_eq!(game.run().marker.position, 0.0);
    }

    #[test]
    fn test_miss_below_best_keeps_best() {
        let mut game = new_game(MemoryStore::with_score(10));
        game.on_play_pressed();
        aim(&mut game);
        game.update(0.0, &FIRE);
        miss_aim(&mut game);
        game.update(0.0, &FIRE);

        assert_eq!(game.best_hit_count(), 10);
        assert_eq!(game.store().stored(), Some(10));
    }

    #[test]
    fn test_pause_and_resume_keep_run() {
        let mut game = new_game(MemoryStore::new());
        game.on_play_pressed();
        aim(&mut game);
        game.update(0.0, &FIRE);
        let marker = game.run().marker;

        game.update(0.1, &PAUSE);
        assert_eq!(game.state(), GameState::PauseMenu);
        assert_eq!(game.run().marker, marker);

        // Frames while paused do nothing, pause again stays paused
        game.update(0.1, &IDLE);
        game.update(0.1, &PAUSE);
        game.update(0.1, &FIRE);
        assert_eq!(game.state(), GameState::PauseMenu);
        assert_eq!(game.run().marker, marker);

        game.on_resume_pressed();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.hit_count(), 1);
    }

    #[test]
    fn test_main_menu_from_pause_resets_without_saving() {
        let mut game = new_game(MemoryStore::new());
        game.on_play_pressed();
        aim(&mut game);
        game.update(0.0, &FIRE);
        game.update(0.0, &PAUSE);

        game.on_main_menu_pressed();
        assert_eq!(game.state(), GameState::MainMenu);
        assert_eq!(game.hit_count(), 0);
        assert_eq!(game.best_hit_count(), 1);
        assert_eq!(game.store().save_count(), 0);
    }

    #[test]
    fn test_quit_saves_and_stops_updates() {
        let mut game = new_game(MemoryStore::new());
        game.on_play_pressed();
        aim(&mut game);
        game.update(0.0, &FIRE);

        game.on_quit_pressed();
        assert!(game.quit_requested());
        assert_eq!(game.store().stored(), Some(1));

        let marker = game.run().marker;
        game.update(0.5, &IDLE);
        assert_eq!(game.run().marker, marker);
        assert!(game.drain_events().contains(&GameEvent::QuitRequested));
    }

    #[test]
    fn test_save_failure_does_not_block_play() {
        let mut game = Game::new(new_run(), BrokenStore::default());
        game.on_play_pressed();
        game.run.marker.position = game.run.target.start;
        game.update(0.0, &FIRE);
        game.run.marker.position = if game.run.target.start > 0.1 { 0.0 } else { 1.0 };
        game.update(0.0, &FIRE);

        assert_eq!(game.store().attempts, 1);
        assert_eq!(game.state(), GameState::MainMenu);
        assert_eq!(game.best_hit_count(), 1);

        game.on_play_pressed();
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_events_follow_score_changes() {
        let mut game = new_game(MemoryStore::with_score(5));
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::ScoreChanged(ScoreBoard { hits: 0, best: 5 })]
        );

        game.on_play_pressed();
        aim(&mut game);
        game.update(0.0, &FIRE);
        assert_eq!(
            game.drain_events(),
            vec![
                GameEvent::StateChanged {
                    from: GameState::MainMenu,
                    to: GameState::Playing
                },
                GameEvent::Hit { hits: 1 },
                GameEvent::ScoreChanged(ScoreBoard { hits: 1, best: 5 }),
            ]
        );

        game.update(0.016, &IDLE);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_start_state_override() {
        let game = new_game(MemoryStore::new()).with_start_state(GameState::Playing);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_score_labels() {
        let scores = ScoreBoard { hits: 4, best: 12 };
        assert_eq!(scores.hits_label(), "Spots Hit: 4");
        assert_eq!(scores.best_label(), "Best: 12");
        assert_eq!(scores.to_string(), "Spots Hit: 4  Best: 12");
    }

    #[test]
    fn test_best_never_decreases_over_random_play() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let mut game = new_game(MemoryStore::with_score(2));
        let mut last_best = game.best_hit_count();

        for _ in 0..2000 {
            match rng.random_range(0..6) {
                0 => game.on_play_pressed(),
                1 => game.update(0.01, &PAUSE),
                2 => game.on_resume_pressed(),
                3 => game.on_main_menu_pressed(),
                4 => {
                    if rng.random_bool(0.8) {
                        aim(&mut game);
                    }
                    game.update(0.01, &FIRE);
                }
                _ => game.update(rng.random_range(0.0..0.1), &IDLE),
            }
            assert!(game.best_hit_count() >= last_best);
            assert!(game.best_hit_count() >= game.hit_count());
            last_best = game.best_hit_count();
        }
    }
}
