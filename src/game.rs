use std::time::Instant;

use crate::apple::Apple;
use crate::audio::{Audio, Effect};
use crate::clock::TickClock;
use crate::conf::Conf;
use crate::error::GameResult;
use crate::grid::{Field, Position};
use crate::snake::{Snake, Direction::{*, self}};
use crate::term::Screen;

use crossterm::event::{KeyEvent, KeyModifiers, KeyCode};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Why a run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    SelfCollision,
    Wall,
}

/// What happened during one simulation step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    AteApple,
    GameOver(Crash),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Resume,
    Turn(Direction),
}

pub struct SnakeGame<S, A> {
    field: Field,
    snake: Snake,
    apple: Apple,
    rng: StdRng,
    clock: TickClock,
    screen: S,
    audio: A,
    paused: bool,
    running: bool,
}

impl<S: Screen, A: Audio> SnakeGame<S, A> {
    pub fn new(conf: &Conf, screen: S, audio: A) -> Self {
        Self::with_rng(conf, screen, audio, StdRng::from_entropy())
    }

    pub fn with_rng(conf: &Conf, screen: S, audio: A, rng: StdRng) -> Self {
        let field = conf.field;
        SnakeGame {
            field,
            snake: new_snake(&field),
            apple: new_apple(&field),
            rng,
            clock: TickClock::new(conf.tick_interval()),
            screen,
            audio,
            paused: false,
            running: true,
        }
    }

    pub fn score(&self) -> usize {
        self.snake.len() - 1
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Runs until the player quits. Losing a round pauses the game behind
    /// the game over screen; ENTER starts the next round.
    pub fn run(&mut self) -> GameResult {
        info!("Starting, one tick every {:?}", self.clock.interval());
        self.audio.play_music();
        self.screen.draw_frame(&self.snake, &self.apple, self.score())?;

        let mut last = Instant::now();
        while self.running {
            for key_ev in self.screen.poll_events(self.clock.time_until_next())? {
                if let Some(command) = command_for(&key_ev) {
                    self.handle_command(command);
                }
            }

            let now = Instant::now();
            self.clock.accumulate(now - last);
            last = now;

            while self.clock.check_update_time() {
                self.update()?;
            }
        }

        info!("Quitting after {} ticks", self.clock.ticks());
        Ok(())
    }

    /// Stops the music and hands the terminal back.
    pub fn shutdown(mut self) -> GameResult {
        self.audio.stop();
        self.screen.teardown()
    }

    /// Advances one step unless paused, and turns a lost round into the
    /// game over screen plus a fresh session.
    fn update(&mut self) -> GameResult {
        if self.paused {
            return Ok(());
        }

        if let TickOutcome::GameOver(crash) = self.tick()? {
            let score = self.score();
            info!("Game over ({:?}), score {}", crash, score);

            self.screen.show_game_over(score)?;
            self.paused = true;
            self.reset();
        }
        Ok(())
    }

    pub fn tick(&mut self) -> GameResult<TickOutcome> {
        self.snake.advance();
        self.screen.draw_frame(&self.snake, &self.apple, self.score())?;

        let cell = self.field.cell_size;
        let head = self.snake.head();
        let mut outcome = TickOutcome::Continue;

        if head.collides(&self.apple.position(), cell) {
            self.snake.grow();
            self.apple.relocate(&mut self.rng, cell);
            self.audio.play_effect(Effect::Ding);
            debug!("Apple eaten at {:?}, next one at {:?}", head, self.apple.position());
            outcome = TickOutcome::AteApple;
        }

        if self.snake.bites_itself() {
            return Ok(self.crash(Crash::SelfCollision));
        }

        if !self.field.contains(&head) {
            return Ok(self.crash(Crash::Wall));
        }

        Ok(outcome)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn crash(&mut self, crash: Crash) -> TickOutcome {
        self.audio.play_effect(Effect::Crash);
        self.audio.pause_music();
        TickOutcome::GameOver(crash)
    }

    fn reset(&mut self) {
        self.snake = new_snake(&self.field);
        self.apple = new_apple(&self.field);
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Quit => self.running = false,
            Command::Resume => {
                if self.is_paused() {
                    info!("Resuming");
                }
                self.paused = false;
                self.audio.resume_music();
            }
            // Accepted while paused too, it applies to the next round.
            Command::Turn(dir) => self.snake.set_heading(dir),
        }
    }
}

fn new_snake(field: &Field) -> Snake {
    Snake::new(Position::at_cell(1, 1, field.cell_size), field.cell_size)
}

fn new_apple(field: &Field) -> Apple {
    Apple::new(Position::at_cell(3, 3, field.cell_size))
}

fn command_for(key_ev: &KeyEvent) -> Option<Command> {
    match key_ev {
        ev if is_ctrl_c(ev) => Some(Command::Quit),
        KeyEvent { code, modifiers: _ } => match code {
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Enter => Some(Command::Resume),
            KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Right)),
            _ => None,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
