use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Direction, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::stats::SessionStats;
use crate::storage::{self, KvStore};

/// Where the session is in its lifecycle. Ticks only advance the game in
/// `Playing`, so reaching `GameOver` stops the logical timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the first round
    Idle,
    /// A round is running
    Playing,
    /// Round ended; waiting for replay or quit
    GameOver,
}

pub struct App<S: KvStore> {
    engine: GameEngine,
    state: GameState,
    phase: Phase,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    store: S,
    high_score: u32,
    /// Whether the round that just ended beat the persisted high score
    new_high_score: bool,
    pending_direction: Option<Direction>,
    should_quit: bool,
}

impl<S: KvStore> App<S> {
    pub fn new(config: GameConfig, store: S) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        let high_score = storage::load_high_score(&store);

        Self {
            engine,
            state,
            phase: Phase::Idle,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            store,
            high_score,
            new_high_score: false,
            pending_direction: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick; inert outside of a running round
                _ = tick_timer.tick() => {
                    if self.phase == Phase::Playing {
                        self.advance()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.phase == Phase::Playing {
                        self.stats.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            self.phase,
                            &self.state,
                            self.high_score,
                            self.new_high_score,
                            &self.stats,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => {
                    // Only the pending direction changes here; the next
                    // tick reads it. Last key before the tick wins.
                    if self.phase == Phase::Playing {
                        self.pending_direction = Some(direction);
                    }
                }
                KeyAction::Play => {
                    self.play();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    /// Start a round: reset the game state and re-enter `Playing`.
    fn play(&mut self) {
        self.state = self.engine.reset();
        self.pending_direction = None;
        self.new_high_score = false;
        self.phase = Phase::Playing;
        self.stats.on_game_start();
    }

    /// One game tick. On game over, reconcile the persisted high score.
    fn advance(&mut self) -> Result<()> {
        let result = self.engine.step(&mut self.state, self.pending_direction.take());

        if result.terminated {
            self.phase = Phase::GameOver;
            self.stats.on_game_over();

            // Tying the stored high score is not a new one; only an actual
            // write counts.
            self.new_high_score = storage::record_high_score(&mut self.store, self.state.score)
                .context("Failed to persist high score")?;
            if self.new_high_score {
                self.high_score = self.state.score;
            }
        }

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Snake};
    use crate::storage::{HIGH_SCORE_KEY, MemoryStore};
    use std::collections::VecDeque;

    fn app() -> App<MemoryStore> {
        App::new(GameConfig::default(), MemoryStore::new())
    }

    /// Park the snake against the left wall so the next tick ends the round.
    fn force_imminent_death(app: &mut App<MemoryStore>, score: u32) {
        app.state.snake = Snake {
            body: VecDeque::from([Cell::new(0, 10), Cell::new(1, 10)]),
        };
        app.state.direction = Direction::Left;
        app.state.score = score;
    }

    #[test]
    fn test_starts_idle() {
        let app = app();
        assert_eq!(app.phase, Phase::Idle);
        assert_eq!(app.state.score, 0);
        assert_eq!(app.high_score, 0);
    }

    #[test]
    fn test_play_enters_playing() {
        let mut app = app();
        app.play();
        assert_eq!(app.phase, Phase::Playing);
        assert!(app.state.alive);
        assert_eq!(app.state.snake.len(), 2);
    }

    #[test]
    fn test_game_over_records_high_score() {
        let mut app = app();
        app.play();
        force_imminent_death(&mut app, 5);

        app.advance().unwrap();

        assert_eq!(app.phase, Phase::GameOver);
        assert_eq!(app.high_score, 5);
        assert!(app.new_high_score);
        assert_eq!(
            app.store.get(HIGH_SCORE_KEY).unwrap().as_deref(),
            Some("5")
        );
        assert_eq!(app.stats.games_played, 1);
    }

    #[test]
    fn test_tying_stored_high_score_is_not_a_new_high() {
        // A score equal to one persisted by an earlier session is not
        // written and must not read as a fresh record.
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "5").unwrap();
        let mut app = App::new(GameConfig::default(), store);

        app.play();
        force_imminent_death(&mut app, 5);
        app.advance().unwrap();

        assert_eq!(app.phase, Phase::GameOver);
        assert_eq!(app.high_score, 5);
        assert!(!app.new_high_score);
    }

    #[test]
    fn test_lower_score_keeps_stored_high_score() {
        let mut app = app();
        app.play();
        force_imminent_death(&mut app, 8);
        app.advance().unwrap();

        app.play();
        force_imminent_death(&mut app, 3);
        app.advance().unwrap();

        assert_eq!(app.high_score, 8);
        assert!(!app.new_high_score);
        assert_eq!(
            app.store.get(HIGH_SCORE_KEY).unwrap().as_deref(),
            Some("8")
        );
    }

    #[test]
    fn test_high_score_loaded_from_store() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "12").unwrap();
        let app = App::new(GameConfig::default(), store);
        assert_eq!(app.high_score, 12);
    }

    #[test]
    fn test_replay_after_game_over() {
        let mut app = app();
        app.play();
        force_imminent_death(&mut app, 5);
        app.advance().unwrap();
        assert_eq!(app.phase, Phase::GameOver);

        app.play();

        assert_eq!(app.phase, Phase::Playing);
        assert_eq!(app.state.score, 0);
        assert!(app.state.alive);
        assert!(!app.new_high_score);
        // The persisted high score survives the reset.
        assert_eq!(app.high_score, 5);
    }

    #[test]
    fn test_pending_direction_consumed_by_tick() {
        let mut app = app();
        app.play();
        app.pending_direction = Some(Direction::Down);

        app.advance().unwrap();

        assert_eq!(app.state.direction, Direction::Down);
        assert_eq!(app.pending_direction, None);
    }
}
