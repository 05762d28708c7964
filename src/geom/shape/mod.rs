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

use crate::geom::{v2, Axis, Vec2};

mod overlap;

/// Enumeration of kinds of collision shapes.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum ShapeKind {
    /// Circle.  Requires both half extents to match; the radius is the x half extent.
    Circle,
    /// Axis-aligned rectangle.
    Rect,
}

/// An axis-aligned box, described by its center and half extents.
///
/// The box spans `[center - half_extents, center + half_extents]` on both axes,
/// boundaries included.
#[derive(PartialEq, Copy, Clone, Debug, Default)]
pub struct Aabb {
    /// The position of the center of the box.
    pub center: Vec2,
    /// Half of the width and height of the box.
    pub half_extents: Vec2,
}

impl Aabb {
    /// Constructs a new box.  Half extents must be non-negative.
    pub fn new(center: Vec2, half_extents: Vec2) -> Aabb {
        assert!(
            half_extents.x >= 0.0 && half_extents.y >= 0.0,
            "half extents must be non-negative"
        );
        Aabb { center, half_extents }
    }

    /// Constructs a box centered on the origin, typically used as a local-space
    /// collision box.
    #[inline]
    pub fn centered(half_extents: Vec2) -> Aabb {
        Aabb::new(Vec2::zero(), half_extents)
    }

    /// Constructs a square box centered on the origin.
    #[inline]
    pub fn square(half_width: f64) -> Aabb {
        Aabb::centered(v2(half_width, half_width))
    }

    /// Returns the lowest x coordinate of the box.
    pub fn left(&self) -> f64 {
        self.center.x - self.half_extents.x
    }

    /// Returns the highest x coordinate of the box.
    pub fn right(&self) -> f64 {
        self.center.x + self.half_extents.x
    }

    /// Returns the lowest y coordinate of the box.
    pub fn bottom(&self) -> f64 {
        self.center.y - self.half_extents.y
    }

    /// Returns the highest y coordinate of the box.
    pub fn top(&self) -> f64 {
        self.center.y + self.half_extents.y
    }

    /// Returns the box moved by `offset`.
    ///
    /// This is how a local-space collision box is placed at an object's position.
    pub fn translate(&self, offset: Vec2) -> Aabb {
        Aabb { center: self.center + offset, half_extents: self.half_extents }
    }

    /// Returns a box with the same center as `self` whose half extents are the sum
    /// of both boxes' half extents.
    ///
    /// A point lies in the result exactly when a box shaped like `other` centered on
    /// that point would overlap `self`.
    pub fn minkowski_sum(&self, other: &Aabb) -> Aabb {
        Aabb { center: self.center, half_extents: self.half_extents + other.half_extents }
    }

    /// Returns the smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        let left = self.left().min(other.left());
        let right = self.right().max(other.right());
        let bottom = self.bottom().min(other.bottom());
        let top = self.top().max(other.top());
        let half_extents = v2((right - left) * 0.5, (top - bottom) * 0.5);
        Aabb::new(v2(left + half_extents.x, bottom + half_extents.y), half_extents)
    }

    /// Returns the area covered by the box while it moves by `displacement`.
    pub fn swept(&self, displacement: Vec2) -> Aabb {
        self.union(&self.translate(displacement))
    }

    /// Returns `true` if the two boxes overlap.  Touching edges count as overlapping.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        Axis::values().iter().all(|&axis| {
            let dist = self.center[axis] - other.center[axis];
            dist.abs() <= self.half_extents[axis] + other.half_extents[axis]
        })
    }

    /// Returns `true` if `point` lies inside or on the boundary of the box.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left() && point.x <= self.right() && point.y >= self.bottom() && point.y <= self.top()
    }
}

/// A circle, described by its center and radius.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Circle {
    /// The position of the center of the circle.
    pub center: Vec2,
    /// The radius of the circle.
    pub radius: f64,
}

impl Circle {
    /// Constructs a new circle.  The radius must be non-negative.
    pub fn new(center: Vec2, radius: f64) -> Circle {
        assert!(radius >= 0.0, "radius must be non-negative");
        Circle { center, radius }
    }

    /// Returns `true` if the two circles overlap.  Touching counts as overlapping.
    pub fn overlaps(&self, other: &Circle) -> bool {
        overlap::circle_circle(self, other)
    }

    /// Returns `true` if the circle overlaps `rect`.  Touching counts as overlapping.
    pub fn overlaps_box(&self, rect: &Aabb) -> bool {
        overlap::rect_circle(rect, self)
    }
}
