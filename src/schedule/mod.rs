// Copyright 2016-2018 Matthew D. Michelotti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed-timestep loop driver.
//!
//! Simulation advances in steps of constant duration, decoupled from how often the
//! host polls and how often frames are drawn.  Real time is accumulated and drained
//! one fixed step at a time; whatever is left over carries into the next poll and is
//! reported to the renderer as an interpolation fraction.

mod clock;

pub use self::clock::{Clock, ManualClock, SystemClock};

use log::{debug, trace};
use thiserror::Error;

/// Error returned when a loop interval is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// The fixed step duration was zero or negative.
    #[error("fixed step duration must be positive, got {0}")]
    NonPositiveFixedStep(f64),
    /// The render step duration was negative.
    #[error("render step duration must not be negative, got {0}")]
    NegativeRenderStep(f64),
    /// The per-poll delta clamp was zero or negative.
    #[error("maximum poll delta must be positive, got {0}")]
    NonPositiveMaxDelta(f64),
    /// The per-poll delta clamp was shorter than one fixed step, so no step could
    /// ever run.
    #[error("maximum poll delta {max_delta} is shorter than the fixed step {fixed_step}")]
    MaxDeltaBelowFixedStep { max_delta: f64, fixed_step: f64 },
    /// An interval was NaN or infinite.
    #[error("loop intervals must be finite, got {0}")]
    NonFiniteInterval(f64),
}

/// When the edge-triggered input check runs.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum TriggerPolicy {
    /// Once at the start of every poll, for hosts that refresh input once per frame
    /// callback.
    OncePerPoll,
    /// Right after each draw, for hosts that refresh input while presenting a frame.
    /// Edges are then checked only when they can have changed.
    AfterDraw,
    /// After every fixed update, so edges are seen at the simulation rate.
    PerFixedUpdate,
}

/// Loop timing configuration.  All durations are in seconds.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct LoopConfig {
    /// Duration of one fixed step.
    pub fixed_step: f64,
    /// Minimum time between draws.  Zero means draws are not capped.
    pub render_step: f64,
    /// Largest amount of real time a single poll may feed to the simulation.
    ///
    /// After a long stall (a breakpoint, a dragged window) the loop runs at most
    /// this much simulation instead of catching up on all of it.  Must be at
    /// least `fixed_step`.
    pub max_delta: f64,
    /// When to check edge-triggered input.
    pub triggers: TriggerPolicy,
}

impl Default for LoopConfig {
    fn default() -> LoopConfig {
        LoopConfig {
            fixed_step: 1.0 / 60.0,
            render_step: 0.0,
            max_delta: 0.1,
            triggers: TriggerPolicy::AfterDraw,
        }
    }
}

impl LoopConfig {
    /// Configuration running fixed updates at `fixed_hz`, drawing at most
    /// `max_render_hz` times per second (or uncapped if `None`).  The delta clamp
    /// is the default one, raised to a single fixed step for slow rates.
    pub fn from_rates(fixed_hz: f64, max_render_hz: Option<f64>) -> LoopConfig {
        let fixed_step = 1.0 / fixed_hz;
        let defaults = LoopConfig::default();
        LoopConfig {
            fixed_step,
            render_step: max_render_hz.map_or(0.0, |hz| 1.0 / hz),
            max_delta: defaults.max_delta.max(fixed_step),
            ..defaults
        }
    }

    /// Checks that every interval is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for &interval in &[self.fixed_step, self.render_step, self.max_delta] {
            if !interval.is_finite() {
                return Err(ConfigError::NonFiniteInterval(interval));
            }
        }
        if self.fixed_step <= 0.0 {
            Err(ConfigError::NonPositiveFixedStep(self.fixed_step))
        } else if self.render_step < 0.0 {
            Err(ConfigError::NegativeRenderStep(self.render_step))
        } else if self.max_delta <= 0.0 {
            Err(ConfigError::NonPositiveMaxDelta(self.max_delta))
        } else if self.max_delta < self.fixed_step {
            Err(ConfigError::MaxDeltaBelowFixedStep {
                max_delta: self.max_delta,
                fixed_step: self.fixed_step,
            })
        } else {
            Ok(())
        }
    }
}

/// The callbacks a host plugs into the loop.
pub trait LoopHandler {
    /// Advances the simulation by one fixed step.  Only this callback may move things.
    fn fixed_update(&mut self);

    /// Called once before each draw with the real time since the previous draw,
    /// clamped to the configured maximum delta.
    fn update(&mut self, _elapsed: f64) {}

    /// Draws the current state.  `alpha` in `[0, 1)` is how far the loop is into the
    /// next fixed step, for interpolating between the last two fixed states.
    fn draw(&mut self, alpha: f64);

    /// Checks edge-triggered input such as key presses.
    fn check_triggers(&mut self) {}

    /// Returns `true` when the main loop should stop.
    fn should_quit(&mut self) -> bool;
}

/// What happened during one poll of the loop.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Frame {
    /// Number of fixed updates run.
    pub fixed_updates: u32,
    /// Whether the frame was drawn.
    pub drew: bool,
    /// The interpolation fraction after the fixed updates.
    pub alpha: f64,
}

/// Drives fixed updates at a constant simulated rate and draws at most once per poll.
pub struct FixedStepScheduler<C: Clock = SystemClock> {
    clock: C,
    config: LoopConfig,
    simulated_time: f64,
    last_poll: f64,
    accumulator: f64,
    alpha: f64,
    last_draw: f64,
}

impl<C: Clock> FixedStepScheduler<C> {
    /// Creates a scheduler whose timing starts at the clock's current time.
    pub fn new(config: LoopConfig, clock: C) -> Result<FixedStepScheduler<C>, ConfigError> {
        config.validate()?;
        let now = clock.now();
        Ok(FixedStepScheduler {
            clock,
            config,
            simulated_time: 0.0,
            last_poll: now,
            accumulator: 0.0,
            alpha: 0.0,
            last_draw: now,
        })
    }

    /// Total simulated time, the sum of all fixed steps taken.
    #[inline]
    pub fn simulated_time(&self) -> f64 {
        self.simulated_time
    }

    /// Interpolation fraction computed by the most recent poll.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Real time received but not yet consumed by a fixed step.
    #[inline]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    #[inline]
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Changes the fixed step duration.
    pub fn set_fixed_step(&mut self, seconds: f64) -> Result<(), ConfigError> {
        let config = LoopConfig { fixed_step: seconds, ..self.config };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Changes the minimum time between draws.  Zero uncaps drawing.
    pub fn set_render_step(&mut self, seconds: f64) -> Result<(), ConfigError> {
        let config = LoopConfig { render_step: seconds, ..self.config };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Polls the clock once: runs any fixed updates that are due, then updates and
    /// draws if the render interval has passed.
    pub fn frame<H: LoopHandler + ?Sized>(&mut self, handler: &mut H) -> Frame {
        if self.config.triggers == TriggerPolicy::OncePerPoll {
            handler.check_triggers();
        }

        let now = self.clock.now();
        let elapsed = (now - self.last_poll).max(0.0);
        let delta = elapsed.min(self.config.max_delta);
        if elapsed > delta {
            debug!("poll gap of {:.3}s clamped to {:.3}s", elapsed, delta);
        }
        self.last_poll = now;
        // Unconsumed time counts toward the clamp too, so one poll never runs
        // more than max_delta / fixed_step updates.
        self.accumulator = (self.accumulator + delta).min(self.config.max_delta);

        let mut fixed_updates = 0;
        while self.accumulator >= self.config.fixed_step {
            handler.fixed_update();
            if self.config.triggers == TriggerPolicy::PerFixedUpdate {
                handler.check_triggers();
            }
            self.simulated_time += self.config.fixed_step;
            self.accumulator -= self.config.fixed_step;
            fixed_updates += 1;
        }
        self.alpha = self.accumulator / self.config.fixed_step;
        trace!(
            "{} fixed updates, simulated time {:.4}s, alpha {:.3}",
            fixed_updates,
            self.simulated_time,
            self.alpha
        );

        let now = self.clock.now();
        let since_draw = now - self.last_draw;
        let drew = since_draw >= self.config.render_step;
        if drew {
            handler.update(since_draw.max(0.0).min(self.config.max_delta));
            handler.draw(self.alpha);
            self.last_draw = now;
            if self.config.triggers == TriggerPolicy::AfterDraw {
                handler.check_triggers();
            }
        }

        Frame { fixed_updates, drew, alpha: self.alpha }
    }

    /// Polls repeatedly until the handler asks to quit.  The quit check runs before
    /// every poll.
    pub fn run_main_loop<H: LoopHandler + ?Sized>(&mut self, handler: &mut H) {
        while !handler.should_quit() {
            self.frame(handler);
        }
        debug!("main loop finished at simulated time {:.3}s", self.simulated_time);
    }
}
