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

use crate::geom::{v2, Aabb, Circle};

// Discrete (single instant) overlap tests involving circles. These are what
// the arcade games use for ships, tanks and shots; boxes moving against boxes
// go through the swept test instead.

pub fn circle_circle(a: &Circle, b: &Circle) -> bool {
    let net_rad = a.radius + b.radius;
    a.center.dist_sq(b.center) <= net_rad * net_rad
}

pub fn rect_circle(rect: &Aabb, circle: &Circle) -> bool {
    let closest = v2(
        circle.center.x.max(rect.left()).min(rect.right()),
        circle.center.y.max(rect.bottom()).min(rect.top()),
    );
    closest.dist_sq(circle.center) <= circle.radius * circle.radius
}
