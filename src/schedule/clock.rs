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

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic source of wall-clock time, in seconds.
pub trait Clock {
    /// Returns the current time in seconds.  Successive calls never decrease.
    fn now(&self) -> f64;
}

/// A `Clock` reading the system's monotonic timer, starting at zero when created.
#[derive(Copy, Clone, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Creates a clock that reads zero now.
    pub fn new() -> SystemClock {
        SystemClock { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> SystemClock {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// A `Clock` that only moves when told to.
///
/// Clones share the same time, so a host (or a test) can keep one handle and give
/// another to the scheduler.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    time: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Creates a clock reading `time`.
    pub fn new(time: f64) -> ManualClock {
        ManualClock { time: Rc::new(Cell::new(time)) }
    }

    /// Sets the current time.  Time must not go backwards.
    pub fn set(&self, time: f64) {
        assert!(time >= self.time.get(), "clock must not go backwards");
        self.time.set(time);
    }

    /// Moves the current time forward by `seconds`.
    pub fn advance(&self, seconds: f64) {
        self.set(self.time.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.time.get()
    }
}
