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

//! A seeded scene of boxes converging on the centre of the play area, with
//! fast thin bullets crossing it.  Bullets travel far enough per step to pass
//! through the boxes, which makes the scene a workout for the swept test.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::geom::{v2, Vec2};
use crate::scene::{Boundary, BroadPhase, HitResponse, MovingObject, PairMode, Profile, Scene, SceneConfig};

/// Default play area.
pub const AREA: Vec2 = Vec2 { x: 2048.0, y: 1024.0 };

/// Default number of objects.
pub const ITEM_COUNT: usize = 128;

/// Speed of the bullets, in units per fixed step.
pub const BULLET_SPEED: f64 = 16.0;

/// The configuration the playground runs with: every ordered pair is tested,
/// objects are flagged rather than killed and never leave the open plane.
pub fn config(count: usize) -> SceneConfig {
    SceneConfig {
        pairs: PairMode::Ordered,
        boundary: Boundary::Open,
        broad_phase: BroadPhase::BruteForce,
        on_hit: HitResponse::Flag,
        capacity: count,
    }
}

/// Adds `count` objects to `scene`, laid out in `area` by a generator seeded
/// with `seed`.  Returns the number of objects the scene accepted.
pub fn populate<P: Profile + Default>(scene: &mut Scene<P>, area: Vec2, count: usize, seed: u64) -> usize {
    let mut rng = Pcg32::seed_from_u64(seed);
    let centre = area * 0.5;
    let max_x = area.x as i64;
    let max_y = area.y as i64;
    let mut added = 0;
    for i in 0..count {
        let object = if i % 8 != 0 {
            let position = v2(rng.random_range(0..=max_x) as f64, rng.random_range(0..=max_y) as f64);
            let half_extents = v2(rng.random_range(4..=40) as f64, rng.random_range(4..=40) as f64);
            let speed = 0.1 * (1 + i) as f64;
            let velocity = (position.move_towards(centre, 1.0) - position) * speed;
            MovingObject::rect(position, half_extents, P::default()).with_velocity(velocity)
        } else {
            let position = v2(0.0, rng.random_range(0..=max_y) as f64);
            MovingObject::rect(position, v2(2.0, 2.0), P::default()).with_velocity(v2(BULLET_SPEED, 0.0))
        };
        if scene.add(object).is_some() {
            added += 1;
        }
    }
    added
}

/// Builds the default playground scene.
pub fn scene(seed: u64) -> Scene {
    let mut scene = Scene::new(config(ITEM_COUNT));
    populate(&mut scene, AREA, ITEM_COUNT, seed);
    scene
}
