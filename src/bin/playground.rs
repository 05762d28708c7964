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

// Runs the collision playground headless for a while and logs what a renderer
// would have shown.  Usage: playground [seconds] [seed]
// Set RUST_LOG=info (or debug/trace) to see the output.

use std::env;
use std::error::Error;
use std::thread;
use std::time::Duration;

use log::info;
use sweepstep::playground;
use sweepstep::{Clock, FixedStepScheduler, LoopConfig, LoopHandler, Scene, SystemClock};

struct Playground {
    scene: Scene,
    clock: SystemClock,
    run_for: f64,
    elapsed: f64,
    next_report: f64,
    steps: u32,
    frames: u32,
    hits: usize,
}

impl LoopHandler for Playground {
    fn fixed_update(&mut self) {
        self.scene.fixed_update();
        self.steps += 1;
    }

    fn update(&mut self, elapsed: f64) {
        self.elapsed += elapsed;
    }

    fn draw(&mut self, alpha: f64) {
        let area = playground::AREA;
        let on_screen = self
            .scene
            .live()
            .map(|(_, object)| object.render_position(alpha))
            .filter(|pos| pos.x >= 0.0 && pos.x <= area.x && pos.y >= 0.0 && pos.y <= area.y)
            .count();
        self.hits += self.scene.hit_count();
        self.frames += 1;
        self.scene.clear_hits();

        if self.elapsed >= self.next_report {
            info!(
                "{:.0}s: {} fixed steps, {} frames, {} hits drawn, {} of {} objects on screen",
                self.next_report,
                self.steps,
                self.frames,
                self.hits,
                on_screen,
                self.scene.live_count()
            );
            self.next_report += 1.0;
            self.steps = 0;
            self.frames = 0;
            self.hits = 0;
        }

        // stands in for the time a real renderer would spend
        thread::sleep(Duration::from_millis(1));
    }

    fn should_quit(&mut self) -> bool {
        self.clock.now() >= self.run_for
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let run_for = match args.next() {
        Some(arg) => arg.parse::<f64>()?,
        None => 5.0,
    };
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => 1,
    };
    info!("running playground for {}s with seed {}", run_for, seed);

    let clock = SystemClock::new();
    let mut scheduler = FixedStepScheduler::new(LoopConfig::from_rates(60.0, Some(120.0)), clock)?;
    let mut handler = Playground {
        scene: playground::scene(seed),
        clock,
        run_for,
        elapsed: 0.0,
        next_report: 1.0,
        steps: 0,
        frames: 0,
        hits: 0,
    };
    scheduler.run_main_loop(&mut handler);
    info!("simulated {:.2}s", scheduler.simulated_time());
    Ok(())
}
