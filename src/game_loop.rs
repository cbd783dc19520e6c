//! Fixed-rate game loop
//!
//! Each tick drains input events, advances the simulation, runs the render
//! pass and then checks for loss. Two phases only: `Running` until a quit
//! request or health <= 0, then `Terminated` for good.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::input::{InputEvent, InputSource};
use crate::renderer::{Canvas, RenderError, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameState, tick};

/// Loop state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopPhase {
    Running,
    /// Absorbing; the loop exits and the window is released
    Terminated,
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    QuitRequested,
    /// Avatar health reached zero or below
    Defeated,
}

/// End-of-run statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub kills: u32,
    pub contacts: u32,
    pub final_health: i32,
    pub reason: Option<ExitReason>,
}

impl RunSummary {
    /// Emit the summary as a single JSON log line
    pub fn log(&self) {
        match serde_json::to_string(self) {
            Ok(json) => log::info!("Run summary: {json}"),
            Err(err) => log::warn!("Could not serialize run summary: {err}"),
        }
    }
}

/// Drives the simulation one tick at a time
#[derive(Debug)]
pub struct GameLoop {
    state: GameState,
    phase: LoopPhase,
    exit_reason: Option<ExitReason>,
}

impl GameLoop {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::from_state(GameState::new(settings, seed))
    }

    /// Wrap an existing state (starts `Running`)
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            phase: LoopPhase::Running,
            exit_reason: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.exit_reason
    }

    pub fn is_running(&self) -> bool {
        self.phase == LoopPhase::Running
    }

    /// Run one full tick: events, update, render, loss check.
    ///
    /// A quit request ends the tick immediately without updating or
    /// rendering. Once terminated, further calls do nothing. Only fatal
    /// render errors are returned; a dropped frame is logged and skipped.
    pub fn step<I, C>(&mut self, input: &mut I, canvas: &mut C) -> Result<LoopPhase, RenderError>
    where
        I: InputSource + ?Sized,
        C: Canvas + ?Sized,
    {
        if self.phase == LoopPhase::Terminated {
            return Ok(self.phase);
        }

        for event in input.drain_events() {
            match event {
                InputEvent::Quit => {
                    self.terminate(ExitReason::QuitRequested);
                    return Ok(self.phase);
                }
                InputEvent::PointerMoved(target) => self.state.avatar.set_facing(target),
                InputEvent::PrimaryPressed => self.state.fire(),
            }
        }

        let report = tick(&mut self.state, input.held());
        if report.collisions.contacts > 0 {
            log::debug!(
                "Tick {}: {} contact(s), health {}",
                self.state.time_ticks,
                report.collisions.contacts,
                self.state.avatar.health
            );
        }

        match draw_frame(&self.state, canvas) {
            Ok(()) => {}
            Err(err) if !err.is_fatal() => log::warn!("Dropped frame: {err}"),
            Err(err) => return Err(err),
        }

        if self.state.is_defeated() {
            self.terminate(ExitReason::Defeated);
        }

        Ok(self.phase)
    }

    fn terminate(&mut self, reason: ExitReason) {
        if self.phase == LoopPhase::Terminated {
            return;
        }
        log::info!(
            "Terminating after {} ticks: {:?}",
            self.state.time_ticks,
            reason
        );
        self.phase = LoopPhase::Terminated;
        self.exit_reason = Some(reason);
    }

    /// Step once if `clock` says a tick is due at `now`, then move the
    /// deadline on. Between deadlines this only reports the current phase.
    pub fn step_when_due<I, C>(
        &mut self,
        input: &mut I,
        canvas: &mut C,
        clock: &mut TickClock,
        now: Instant,
    ) -> Result<LoopPhase, RenderError>
    where
        I: InputSource + ?Sized,
        C: Canvas + ?Sized,
    {
        if self.phase == LoopPhase::Running && clock.is_due(now) {
            self.step(input, canvas)?;
            clock.advance(now);
        }
        Ok(self.phase)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.state.time_ticks,
            kills: self.state.kills,
            contacts: self.state.contacts,
            final_health: self.state.avatar.health,
            reason: self.exit_reason,
        }
    }
}

/// Deadline clock for a fixed tick rate
///
/// Falls back to "one period from now" when a tick overruns, so a slow
/// frame never causes a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    next: Instant,
}

impl TickClock {
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    pub fn starting_at(period: Duration, start: Instant) -> Self {
        Self {
            period,
            next: start + period,
        }
    }

    pub fn for_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_duration())
    }

    /// When the next tick is due
    pub fn deadline(&self) -> Instant {
        self.next
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Move the deadline forward one period after a tick ran at `now`
    pub fn advance(&mut self, now: Instant) {
        self.next += self.period;
        if self.next < now {
            self.next = now + self.period;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Direction, HeldKeys, QueuedInput};
    use crate::renderer::Color;
    use crate::sim::Adversary;
    use glam::Vec2;
    use std::collections::VecDeque;

    /// Counts frames; can be told to fail
    #[derive(Default)]
    struct FrameCounter {
        frames: u32,
        fail_with: Option<wgpu::SurfaceError>,
    }

    impl Canvas for FrameCounter {
        fn clear(&mut self, _color: Color) {}
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
        fn line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Color) {}
        fn fill_rect(&mut self, _origin: Vec2, _size: Vec2, _color: Color) {}
        fn present(&mut self) -> Result<(), RenderError> {
            self.frames += 1;
            match &self.fail_with {
                Some(err) => Err(RenderError::Surface(err.clone())),
                None => Ok(()),
            }
        }
    }

    /// Hands out one batch of events per tick
    struct ScriptedInput {
        held: HeldKeys,
        ticks: VecDeque<Vec<InputEvent>>,
    }

    impl InputSource for ScriptedInput {
        fn held(&self) -> HeldKeys {
            self.held
        }
        fn drain_events(&mut self) -> Vec<InputEvent> {
            self.ticks.pop_front().unwrap_or_default()
        }
    }

    fn quiet_settings() -> Settings {
        Settings {
            max_adversaries: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_phase_running() {
        let game = GameLoop::new(Settings::default(), 1);
        assert_eq!(game.phase(), LoopPhase::Running);
        assert_eq!(game.exit_reason(), None);
    }

    #[test]
    fn test_quit_terminates_without_update() {
        let mut game = GameLoop::new(Settings::default(), 1);
        let mut input = QueuedInput::new();
        let mut canvas = FrameCounter::default();
        input.push(InputEvent::Quit);

        let phase = game.step(&mut input, &mut canvas).unwrap();

        assert_eq!(phase, LoopPhase::Terminated);
        assert_eq!(game.exit_reason(), Some(ExitReason::QuitRequested));
        assert_eq!(game.state().time_ticks, 0);
        assert_eq!(canvas.frames, 0);
    }

    #[test]
    fn test_terminated_is_absorbing() {
        let mut game = GameLoop::new(Settings::default(), 1);
        let mut input = QueuedInput::new();
        let mut canvas = FrameCounter::default();
        input.push(InputEvent::Quit);
        game.step(&mut input, &mut canvas).unwrap();

        input.press(Direction::Right);
        for _ in 0..3 {
            assert_eq!(game.step(&mut input, &mut canvas).unwrap(), LoopPhase::Terminated);
        }
        assert_eq!(game.state().time_ticks, 0);
        assert_eq!(game.state().avatar.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_loss_after_contact() {
        let mut state = GameState::new(quiet_settings(), 1);
        state.avatar.health = 5;
        state.adversaries.push(Adversary::new(Vec2::new(405.0, 300.0)));
        let mut game = GameLoop::from_state(state);
        let mut canvas = FrameCounter::default();

        let phase = game.step(&mut QueuedInput::new(), &mut canvas).unwrap();

        assert_eq!(phase, LoopPhase::Terminated);
        assert_eq!(game.exit_reason(), Some(ExitReason::Defeated));
        assert_eq!(game.state().avatar.health, -5);
        // Final frame still rendered before the check
        assert_eq!(canvas.frames, 1);
    }

    #[test]
    fn test_survives_while_health_positive() {
        let mut state = GameState::new(quiet_settings(), 1);
        state.avatar.health = 15;
        state.adversaries.push(Adversary::new(Vec2::new(405.0, 300.0)));
        let mut game = GameLoop::from_state(state);

        let phase = game
            .step(&mut QueuedInput::new(), &mut FrameCounter::default())
            .unwrap();

        assert_eq!(phase, LoopPhase::Running);
        assert_eq!(game.state().avatar.health, 5);
    }

    #[test]
    fn test_fire_uses_facing_at_press_time() {
        let mut game = GameLoop::new(quiet_settings(), 1);
        let mut input = QueuedInput::new();
        input.push(InputEvent::PointerMoved(Vec2::new(400.0, 200.0)));
        input.push(InputEvent::PrimaryPressed);
        input.push(InputEvent::PointerMoved(Vec2::new(500.0, 300.0)));

        game.step(&mut input, &mut FrameCounter::default()).unwrap();

        let state = game.state();
        assert_eq!(state.projectiles.len(), 1);
        let vel = state.projectiles[0].vel;
        assert!((vel - Vec2::new(0.0, -10.0)).length() < 1e-4);
        // Already flown one tick
        assert!((state.projectiles[0].pos - Vec2::new(400.0, 290.0)).length() < 1e-4);
        assert!(state.avatar.facing.abs() < 1e-6);
    }

    #[test]
    fn test_held_keys_move_avatar() {
        let mut game = GameLoop::new(quiet_settings(), 1);
        let mut input = QueuedInput::new();
        input.press(Direction::Up);
        input.press(Direction::Left);

        game.step(&mut input, &mut FrameCounter::default()).unwrap();

        assert_eq!(game.state().avatar.pos, Vec2::new(398.0, 298.0));
    }

    #[test]
    fn test_dropped_frame_keeps_running() {
        let mut game = GameLoop::new(quiet_settings(), 1);
        let mut canvas = FrameCounter {
            fail_with: Some(wgpu::SurfaceError::Outdated),
            ..Default::default()
        };

        let phase = game.step(&mut QueuedInput::new(), &mut canvas).unwrap();

        assert_eq!(phase, LoopPhase::Running);
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_fatal_render_error_propagates() {
        let mut game = GameLoop::new(quiet_settings(), 1);
        let mut canvas = FrameCounter {
            fail_with: Some(wgpu::SurfaceError::OutOfMemory),
            ..Default::default()
        };

        let result = game.step(&mut QueuedInput::new(), &mut canvas);

        assert!(matches!(
            result,
            Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory))
        ));
    }

    /// Step on every deadline until the game ends, like the window's
    /// `about_to_wait`, counting the polls that found nothing due
    fn drive(
        game: &mut GameLoop,
        input: &mut impl InputSource,
        canvas: &mut FrameCounter,
    ) -> u32 {
        let period = Duration::from_millis(16);
        let start = Instant::now();
        let mut clock = TickClock::starting_at(period, start);
        let mut idle = 0;
        let mut now = start;
        while game.is_running() {
            // Early poll: nothing is due yet
            let phase = game
                .step_when_due(input, canvas, &mut clock, now)
                .unwrap();
            assert_eq!(phase, LoopPhase::Running);
            idle += 1;
            now = clock.deadline();
            game.step_when_due(input, canvas, &mut clock, now).unwrap();
        }
        idle
    }

    #[test]
    fn test_step_when_due_waits_for_deadline() {
        let mut game = GameLoop::new(quiet_settings(), 1);
        let mut input = QueuedInput::new();
        let mut canvas = FrameCounter::default();
        let start = Instant::now();
        let period = Duration::from_millis(16);
        let mut clock = TickClock::starting_at(period, start);

        game.step_when_due(&mut input, &mut canvas, &mut clock, start).unwrap();
        assert_eq!(game.state().time_ticks, 0);
        assert_eq!(canvas.frames, 0);

        game
            .step_when_due(&mut input, &mut canvas, &mut clock, start + period)
            .unwrap();
        assert_eq!(game.state().time_ticks, 1);
        assert_eq!(clock.deadline(), start + period * 2);
    }

    #[test]
    fn test_step_when_due_late_tick_does_not_burst() {
        let mut game = GameLoop::new(quiet_settings(), 1);
        let mut input = QueuedInput::new();
        let mut canvas = FrameCounter::default();
        let start = Instant::now();
        let period = Duration::from_millis(16);
        let mut clock = TickClock::starting_at(period, start);
        let late = start + Duration::from_millis(500);

        game.step_when_due(&mut input, &mut canvas, &mut clock, late).unwrap();
        game.step_when_due(&mut input, &mut canvas, &mut clock, late).unwrap();

        assert_eq!(game.state().time_ticks, 1);
        assert_eq!(clock.deadline(), late + period);
    }

    #[test]
    fn test_run_until_quit() {
        let mut game = GameLoop::new(quiet_settings(), 1);
        let mut input = ScriptedInput {
            held: HeldKeys {
                right: true,
                ..Default::default()
            },
            ticks: VecDeque::from(vec![vec![], vec![], vec![], vec![InputEvent::Quit]]),
        };
        let mut canvas = FrameCounter::default();

        let polls = drive(&mut game, &mut input, &mut canvas);

        let summary = game.summary();
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.reason, Some(ExitReason::QuitRequested));
        assert_eq!(canvas.frames, 3);
        assert_eq!(polls, 4);
        assert_eq!(game.state().avatar.pos, Vec2::new(406.0, 300.0));
    }

    #[test]
    fn test_run_until_defeated() {
        let mut state = GameState::new(quiet_settings(), 1);
        state.avatar.health = 10;
        state.adversaries.push(Adversary::new(Vec2::new(400.0, 301.0)));
        let mut game = GameLoop::from_state(state);
        let mut canvas = FrameCounter::default();

        drive(&mut game, &mut QueuedInput::new(), &mut canvas);

        assert_eq!(
            game.summary(),
            RunSummary {
                ticks: 1,
                kills: 0,
                contacts: 1,
                final_health: 0,
                reason: Some(ExitReason::Defeated),
            }
        );
        // Terminated stays put even when more deadlines pass
        let mut clock = TickClock::starting_at(Duration::from_millis(16), Instant::now());
        let later = clock.deadline() + Duration::from_secs(1);
        let phase = game
            .step_when_due(&mut QueuedInput::new(), &mut canvas, &mut clock, later)
            .unwrap();
        assert_eq!(phase, LoopPhase::Terminated);
        assert_eq!(canvas.frames, 1);
    }

    #[test]
    fn test_summary_serializes() {
        let game = GameLoop::new(Settings::default(), 1);
        let json = serde_json::to_value(game.summary()).unwrap();
        assert_eq!(json["final_health"], 100);
        assert_eq!(json["reason"], serde_json::Value::Null);
    }

    #[test]
    fn test_tick_clock_advances_by_period() {
        let start = Instant::now();
        let period = Duration::from_millis(16);
        let mut clock = TickClock::starting_at(period, start);

        assert!(!clock.is_due(start));
        assert!(clock.is_due(start + period));

        clock.advance(start + period);
        assert_eq!(clock.deadline(), start + period * 2);
    }

    #[test]
    fn test_tick_clock_resyncs_when_behind() {
        let start = Instant::now();
        let period = Duration::from_millis(16);
        let mut clock = TickClock::starting_at(period, start);

        let late = start + Duration::from_millis(500);
        clock.advance(late);
        assert_eq!(clock.deadline(), late + period);
    }
}
