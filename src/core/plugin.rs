//! CorePlugin wires simulation timing, settings, input sampling, the prompt surface, and the event log.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

use super::{
    event_log::{flush_event_log, EventLog},
    input::{read_action_input, ActionInput},
    prompt::PromptService,
    settings::GameplaySettings,
};

const DEFAULT_TIME_SCALE: f32 = 1.0;
const MIN_TIME_SCALE: f32 = 0.001;
const SESSION_BANNER: &str = "Cellmate session started";
#[cfg(feature = "core_debug")]
const TIME_SCALE_STEP: f32 = 2.0;

/// Frame phases every gameplay plugin slots its `Update` systems into.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Keyboard sampling and actor resolution.
    Input,
    /// Proximity, zone, and platform detection.
    Sense,
    /// State changes driven by what was sensed.
    Act,
    /// Visual feedback: highlights, labels, HUD.
    Present,
}

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Tracks scaled simulation time derived from real frame deltas.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    time_scale: f32,
    last_real_delta: Duration,
    last_scaled_delta: Duration,
    elapsed: Duration,
}

impl SimulationClock {
    /// Creates a new clock with the provided time-scale multiplier.
    pub fn new(time_scale: f32) -> Self {
        let clamped = time_scale.max(MIN_TIME_SCALE);
        Self {
            time_scale: clamped,
            last_real_delta: Duration::ZERO,
            last_scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    /// Sets the time-scale multiplier (clamped to a small positive minimum).
    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(MIN_TIME_SCALE);
    }

    /// Returns the current time-scale multiplier.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Last real (unscaled) delta reported by Bevy's Time resource.
    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn last_real_delta(&self) -> Duration {
        self.last_real_delta
    }

    /// Last scaled delta after applying the multiplier.
    pub fn last_scaled_delta(&self) -> Duration {
        self.last_scaled_delta
    }

    /// Scaled frame delta in seconds.
    pub fn delta_secs(&self) -> f32 {
        self.last_scaled_delta.as_secs_f32()
    }

    /// Total scaled duration elapsed since the clock was initialised.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Scaled timestamp used for cooldowns.
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Applies a real delta to the clock, storing both the real and scaled durations.
    pub fn tick(&mut self, real_delta: Duration) {
        self.last_real_delta = real_delta;
        self.last_scaled_delta = real_delta.mul_f32(self.time_scale);
        self.elapsed += self.last_scaled_delta;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

/// Registers timing, settings, input, prompt, and event-log resources.
#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    time_scale: f32,
}

impl CorePlugin {
    /// Creates a CorePlugin with the provided time-scale multiplier.
    pub const fn with_time_scale(time_scale: f32) -> Self {
        Self { time_scale }
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self::with_time_scale(DEFAULT_TIME_SCALE)
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let settings = GameplaySettings::load_or_default();
        info!(
            "Gameplay settings loaded: interaction radius {:.2}, drop cooldown {:.2}s, chat endpoint {}",
            settings.interaction.radius, settings.carry.drop_cooldown_secs, settings.chat.url
        );

        let mut event_log = EventLog::new(settings.log.path());
        event_log.banner(SESSION_BANNER);

        app.insert_resource(SimulationClock::new(self.time_scale))
            .insert_resource(settings.actor)
            .insert_resource(settings.interaction)
            .insert_resource(settings.carry)
            .insert_resource(settings.camera)
            .insert_resource(settings.chat)
            .insert_resource(settings.log)
            .insert_resource(event_log)
            .init_resource::<ActionInput>()
            .init_resource::<PromptService>()
            .configure_sets(
                Update,
                (
                    GameplaySet::Input,
                    GameplaySet::Sense,
                    GameplaySet::Act,
                    GameplaySet::Present,
                )
                    .chain(),
            )
            .add_systems(Startup, log_startup_time_scale)
            .add_systems(First, update_simulation_clock)
            .add_systems(Update, read_action_input.in_set(GameplaySet::Input))
            .add_systems(Last, flush_event_log);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_scaled_ticks)
                .add_systems(
                    Update,
                    adjust_time_scale_on_hotkey.in_set(GameplaySet::Input),
                );
        }
    }
}

fn update_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_startup_time_scale(clock: Res<SimulationClock>, log: Res<EventLog>) {
    info!(
        "CorePlugin initialised with time scale: {:.3} (event log: {:?})",
        clock.time_scale(),
        log.path()
    );
}

#[cfg(feature = "core_debug")]
fn log_scaled_ticks(mut timer: ResMut<DebugTickTimer>, clock: Res<SimulationClock>) {
    if timer.timer.tick(clock.last_scaled_delta()).just_finished() {
        info!(
            target: "core_debug",
            "Sim elapsed: {:.2}s | scale: {:.3} | real dt: {:.4}s | scaled dt: {:.4}s",
            clock.elapsed().as_secs_f32(),
            clock.time_scale(),
            clock.last_real_delta().as_secs_f32(),
            clock.last_scaled_delta().as_secs_f32(),
        );
    }
}

/// `[` halves and `]` doubles the simulation speed.
#[cfg(feature = "core_debug")]
fn adjust_time_scale_on_hotkey(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut clock: ResMut<SimulationClock>,
) {
    let scale = clock.time_scale();
    let next = if keyboard.just_pressed(KeyCode::BracketLeft) {
        scale / TIME_SCALE_STEP
    } else if keyboard.just_pressed(KeyCode::BracketRight) {
        scale * TIME_SCALE_STEP
    } else {
        return;
    };
    clock.set_time_scale(next);
    info!(target: "core_debug", "Time scale set to {:.3}", clock.time_scale());
}
