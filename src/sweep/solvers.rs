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

use std::cmp;
use std::f64;

use crate::float::{n64, N64};
use crate::geom::{Axis, Vec2};

// Slab solver for rays against a box centered on the origin. Every interval
// endpoint goes through N64, so a NaN can never slip into a comparison.

// Parametric interval [entry, exit] of a ray. Empty when entry > exit.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Interval {
    pub entry: N64,
    pub exit: N64,
}

impl Interval {
    pub fn full() -> Interval {
        Interval { entry: n64(f64::NEG_INFINITY), exit: n64(f64::INFINITY) }
    }

    pub fn empty() -> Interval {
        Interval { entry: n64(f64::INFINITY), exit: n64(f64::NEG_INFINITY) }
    }

    pub fn intersect(self, other: Interval) -> Interval {
        Interval {
            entry: cmp::max(self.entry, other.entry),
            exit: cmp::min(self.exit, other.exit),
        }
    }

    // Restricts the interval to a single step, t in [0, 1]. Both ends are
    // inclusive, so contact at exactly t = 0 or t = 1 is kept.
    pub fn clamp_to_step(self) -> Option<Interval> {
        let result = self.intersect(Interval { entry: n64(0.0), exit: n64(1.0) });
        if result.entry <= result.exit {
            Some(result)
        } else {
            None
        }
    }
}

// Values of t for which `origin + dir * t` lies within [-half, half].
//
// A zero `dir` means the ray is parallel to the slab: it is inside for every t
// or for none, and the division is never performed.
pub fn slab_interval(origin: f64, dir: f64, half: f64) -> Interval {
    if dir == 0.0 {
        if -half <= origin && origin <= half {
            Interval::full()
        } else {
            Interval::empty()
        }
    } else {
        let t_1 = (-half - origin) / dir;
        let t_2 = (half - origin) / dir;
        Interval { entry: n64(t_1.min(t_2)), exit: n64(t_1.max(t_2)) }
    }
}

pub fn ray_interval(origin: Vec2, dir: Vec2, half_extents: Vec2) -> Interval {
    Axis::values()
        .iter()
        .map(|&axis| slab_interval(origin[axis], dir[axis], half_extents[axis]))
        .fold(Interval::full(), Interval::intersect)
}
