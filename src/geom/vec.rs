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

use std::ops::{Add, AddAssign, Index, Mul, Sub};

use crate::geom::Axis;

/// Shorthand for `Vec2::new(x, y)`.
#[inline]
pub fn v2(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

/// A 2-D vector, used for positions, velocities and box extents.
#[derive(PartialEq, Copy, Clone, Debug, Default)]
pub struct Vec2 {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

impl Vec2 {
    /// Constructs a new vector.
    #[inline]
    pub fn new(x: f64, y: f64) -> Vec2 {
        Vec2 { x, y }
    }

    /// The zero vector.
    #[inline]
    pub fn zero() -> Vec2 {
        Vec2::default()
    }

    /// Returns the squared length of the vector.
    pub fn len_sq(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Returns the length of the vector.
    pub fn len(self) -> f64 {
        self.len_sq().sqrt()
    }

    /// Returns the squared distance between `self` and `other`.
    pub fn dist_sq(self, other: Vec2) -> f64 {
        (self - other).len_sq()
    }

    /// Returns the distance between `self` and `other`.
    pub fn dist(self, other: Vec2) -> f64 {
        (self - other).len()
    }

    /// Linearly interpolates from `self` (at `t = 0`) to `other` (at `t = 1`).
    pub fn lerp(self, other: Vec2, t: f64) -> Vec2 {
        self + (other - self) * t
    }

    /// Moves `self` toward `target` by at most `max_dist`, never overshooting.
    pub fn move_towards(self, target: Vec2, max_dist: f64) -> Vec2 {
        let delta = target - self;
        let dist = delta.len();
        if dist <= max_dist || dist == 0.0 {
            target
        } else {
            self + delta * (max_dist / dist)
        }
    }
}

impl Index<Axis> for Vec2 {
    type Output = f64;

    #[inline]
    fn index(&self, axis: Axis) -> &f64 {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        v2(self.x * rhs, self.y * rhs)
    }
}

// dot product
impl Mul<Vec2> for Vec2 {
    type Output = f64;
    fn mul(self, rhs: Vec2) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        v2(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        v2(self.x - rhs.x, self.y - rhs.y)
    }
}
