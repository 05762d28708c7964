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

//! Continuous collision detection between moving axis-aligned boxes.
//!
//! Each box translates by a constant velocity over one fixed step, parameterized by
//! `t` in `[0, 1]`.  Two boxes collide during the step if they overlap at *any* `t`
//! in that range, not only at its start or end, so small fast objects cannot tunnel
//! through each other.
//!
//! The box-vs-box sweep is reduced to a ray-vs-box test: box `B` is grown by the
//! half extents of box `A`, and a ray is cast from the center of `A` along the
//! relative displacement `vel_a - vel_b`.  The ray is then intersected with the
//! grown box one axis at a time (the slab method).
//!
//! All comparisons are inclusive: boxes whose edges only touch, at any `t` in
//! `[0, 1]` including the very end of the step, are reported as colliding.
//!
//! An axis with zero relative velocity never divides by zero.  The ray is
//! parallel to that pair of slab boundaries, so the axis either permits every `t`
//! (the origin lies within the slab, boundaries included) or no `t` at all.

mod solvers;
#[cfg(test)]
mod tests;

use crate::float::raw;
use crate::geom::{Aabb, Vec2};

/// The portion of a fixed step during which two swept boxes overlap.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Sweep {
    entry: f64,
    exit: f64,
}

impl Sweep {
    /// The earliest time in `[0, 1]` at which the boxes are in contact.
    #[inline]
    pub fn entry(&self) -> f64 {
        self.entry
    }

    /// The latest time in `[0, 1]` at which the boxes are in contact.
    #[inline]
    pub fn exit(&self) -> f64 {
        self.exit
    }
}

/// Returns the contact interval of two boxes moving by `vel_a` and `vel_b` over one
/// step, or `None` if they do not meet during the step.
pub fn sweep(box_a: &Aabb, vel_a: Vec2, box_b: &Aabb, vel_b: Vec2) -> Option<Sweep> {
    // Expressing the ray relative to B keeps the result identical when A and B
    // are swapped: both the origin and the direction are exactly negated.
    let grown = box_b.minkowski_sum(box_a);
    let origin = box_a.center - grown.center;
    let dir = vel_a - vel_b;
    solvers::ray_interval(origin, dir, grown.half_extents)
        .clamp_to_step()
        .map(|interval| Sweep { entry: raw(interval.entry), exit: raw(interval.exit) })
}

/// Returns `true` if the two boxes, moving by `vel_a` and `vel_b` over one step,
/// overlap at any point during the step.
///
/// This only reports the collision; resolving it is up to the caller.
pub fn swept_collision(box_a: &Aabb, vel_a: Vec2, box_b: &Aabb, vel_b: Vec2) -> bool {
    sweep(box_a, vel_a, box_b, vel_b).is_some()
}

/// A line segment from `start` to `end`.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Segment {
    /// Where the segment begins.
    pub start: Vec2,
    /// Where the segment ends.
    pub end: Vec2,
}

impl Segment {
    /// Constructs a new segment.
    pub fn new(start: Vec2, end: Vec2) -> Segment {
        Segment { start, end }
    }

    /// Returns `true` if any point of the segment, endpoints included, lies in `aabb`.
    pub fn intersects(&self, aabb: &Aabb) -> bool {
        solvers::ray_interval(self.start - aabb.center, self.end - self.start, aabb.half_extents)
            .clamp_to_step()
            .is_some()
    }
}
