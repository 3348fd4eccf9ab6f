//! Interactive terminal play
//!
//! Owns the tick timer: the engine is only ticked while a game is running and
//! not paused, one tick at a time from the same task that handles input.

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
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::game::{GameConfig, GameError, GameStatus, SnakeEngine, Snapshot};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render at 30 FPS
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct HumanMode {
    engine: SnakeEngine,
    snapshot: Snapshot,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    should_quit: bool,
    paused: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let tick_interval = Duration::from_millis(config.tick_interval_ms);
        let renderer = Renderer::new(config.cell_pixel_size);
        let engine = SnakeEngine::new(config).context("Invalid game configuration")?;
        let snapshot = engine.snapshot();

        Ok(Self {
            engine,
            snapshot,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            tick_interval,
            should_quit: false,
            paused: false,
        })
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

        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(RENDER_INTERVAL);

        info!(tick_ms = self.tick_interval.as_millis() as u64, "game loop started");

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.snapshot.is_running() && !self.paused {
                        self.update_game()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.snapshot, &self.metrics, self.paused);
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

        info!(games = self.metrics.games_played, best = self.metrics.high_score, "quitting");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action)?;
        }

        Ok(())
    }

    fn apply(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Turn(direction) => {
                if !self.paused {
                    self.engine.request_direction(direction);
                    self.snapshot.direction = self.engine.direction();
                }
            }
            KeyAction::Start => {
                if !self.snapshot.is_running() {
                    self.start_game()?;
                }
            }
            KeyAction::Restart => self.start_game()?,
            KeyAction::TogglePause => self.toggle_pause(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        match self.engine.tick() {
            Ok(snapshot) => self.snapshot = snapshot,
            Err(GameError::GridFull { side }) => {
                info!(side, "board filled");
                self.snapshot = self.engine.snapshot();
            }
            Err(err) => return Err(err).context("Game tick failed"),
        }

        if self.snapshot.status == GameStatus::GameOver {
            self.metrics.on_game_over(self.snapshot.score);
        }

        Ok(())
    }

    fn start_game(&mut self) -> Result<()> {
        if self.snapshot.is_running() {
            // Restarting mid-game still counts the abandoned game
            self.metrics.on_game_over(self.snapshot.score);
        }
        self.paused = false;
        self.snapshot = self.engine.start().context("Failed to start game")?;
        self.metrics.on_game_start();
        Ok(())
    }

    fn toggle_pause(&mut self) {
        if !self.snapshot.is_running() {
            return;
        }
        self.paused = !self.paused;
        if self.paused {
            self.metrics.on_pause();
        } else {
            self.metrics.on_resume();
        }
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
