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

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f64;

use super::{sweep, swept_collision, Segment};
use crate::geom::{v2, Aabb, Axis, Vec2};

struct Case {
    name: &'static str,
    box_a: Aabb,
    vel_a: Vec2,
    box_b: Aabb,
    vel_b: Vec2,
    expected: bool,
}

fn case(name: &'static str, a: (Vec2, Vec2, Vec2), b: (Vec2, Vec2, Vec2), expected: bool) -> Case {
    Case {
        name,
        box_a: Aabb::new(a.0, a.1),
        vel_a: a.2,
        box_b: Aabb::new(b.0, b.1),
        vel_b: b.2,
        expected,
    }
}

fn shared_cases() -> Vec<Case> {
    let unit = v2(1.0, 1.0);
    vec![
        case("head-on tunneling", (v2(0.0, 0.0), unit, v2(20.0, 0.0)), (v2(10.0, 0.0), unit, v2(-20.0, 0.0)), true),
        case("diverging", (v2(0.0, 0.0), unit, v2(-1.0, 0.0)), (v2(5.0, 0.0), unit, v2(1.0, 0.0)), false),
        case("edge contact at end of step", (v2(0.0, 0.0), unit, v2(1.0, 0.0)), (v2(4.0, 0.0), unit, v2(-1.0, 0.0)), true),
        case("stops just short", (v2(0.0, 0.0), unit, v2(1.0, 0.0)), (v2(4.5, 0.0), unit, v2(-1.0, 0.0)), false),
        case("edge contact at start of step", (v2(0.0, 0.0), unit, v2(-1.0, 0.0)), (v2(2.0, 0.0), unit, Vec2::zero()), true),
        case("parallel and outside", (v2(0.0, 0.0), unit, v2(5.0, 0.0)), (v2(3.0, 3.0), unit, Vec2::zero()), false),
        case("parallel grazing", (v2(0.0, 0.0), unit, v2(5.0, 0.0)), (v2(4.0, 2.0), unit, Vec2::zero()), true),
        case(
            "axes overlap at different times",
            (v2(0.0, 0.0), v2(0.5, 0.5), v2(8.0, 2.0)),
            (v2(5.0, 3.0), v2(0.5, 0.5), Vec2::zero()),
            false,
        ),
        case("static overlap", (v2(0.0, 0.0), v2(2.0, 2.0), Vec2::zero()), (v2(1.0, 1.0), unit, Vec2::zero()), true),
        case("moving together apart", (v2(0.0, 0.0), unit, v2(100.0, 100.0)), (v2(5.0, 0.0), unit, v2(100.0, 100.0)), false),
        case("overlapping and passing through", (v2(0.0, 0.0), unit, v2(3.0, 0.0)), (v2(0.5, 0.0), unit, Vec2::zero()), true),
        case("contact only after this step", (v2(0.0, 0.0), unit, v2(1.0, 0.0)), (v2(10.0, 0.0), unit, Vec2::zero()), false),
        case(
            "diagonal bullet through a wall",
            (v2(0.0, 0.0), v2(2.0, 2.0), v2(16.0, 4.0)),
            (v2(8.0, 2.0), v2(0.5, 40.0), Vec2::zero()),
            true,
        ),
    ]
}

// The reciprocal-and-sign formulation of the same test, kept as an independent
// oracle. It multiplies by precomputed reciprocals and picks the near and far
// slab boundary from the sign of the direction, instead of sorting the two
// crossing times.
fn reciprocal_collision(box_a: &Aabb, vel_a: Vec2, box_b: &Aabb, vel_b: Vec2) -> bool {
    let grown = box_b.minkowski_sum(box_a);
    let start = box_a.center;
    let delta = vel_a - vel_b;
    let mut near = [0.0; 2];
    let mut far = [0.0; 2];
    for (i, &axis) in Axis::values().iter().enumerate() {
        if delta[axis] == 0.0 {
            if (start[axis] - grown.center[axis]).abs() <= grown.half_extents[axis] {
                near[i] = f64::NEG_INFINITY;
                far[i] = f64::INFINITY;
            } else {
                return false;
            }
        } else {
            let scale = 1.0 / delta[axis];
            let sign = scale.signum();
            near[i] = (grown.center[axis] - sign * grown.half_extents[axis] - start[axis]) * scale;
            far[i] = (grown.center[axis] + sign * grown.half_extents[axis] - start[axis]) * scale;
        }
    }
    if near[0] > far[1] || near[1] > far[0] {
        return false;
    }
    let near_time = near[0].max(near[1]);
    let far_time = far[0].min(far[1]);
    !(near_time > 1.0 || far_time < 0.0)
}

#[test]
fn test_shared_cases() {
    for case in shared_cases() {
        let result = swept_collision(&case.box_a, case.vel_a, &case.box_b, case.vel_b);
        assert_eq!(result, case.expected, "case: {}", case.name);
    }
}

#[test]
fn test_reciprocal_formulation_agrees() {
    for case in shared_cases() {
        let result = reciprocal_collision(&case.box_a, case.vel_a, &case.box_b, case.vel_b);
        assert_eq!(result, case.expected, "case: {}", case.name);
    }

    let mut rng = Pcg32::seed_from_u64(11);
    let mut hits = 0;
    for _ in 0..10_000 {
        let box_a = random_box(&mut rng);
        let box_b = random_box(&mut rng);
        let vel_a = random_vec(&mut rng, 30.0);
        let vel_b = random_vec(&mut rng, 30.0);
        let result = swept_collision(&box_a, vel_a, &box_b, vel_b);
        assert_eq!(
            result,
            reciprocal_collision(&box_a, vel_a, &box_b, vel_b),
            "{:?} {:?} {:?} {:?}",
            box_a,
            vel_a,
            box_b,
            vel_b
        );
        if result {
            hits += 1;
        }
    }
    // both verdicts show up
    assert!(hits > 0 && hits < 10_000);
}

#[test]
fn test_tunneling_contact_interval() {
    let box_a = Aabb::square(1.0);
    let box_b = Aabb::square(1.0).translate(v2(10.0, 0.0));
    assert!(!box_a.overlaps(&box_b));
    assert!(!box_a.translate(v2(20.0, 0.0)).overlaps(&box_b.translate(v2(-20.0, 0.0))));

    let result = sweep(&box_a, v2(20.0, 0.0), &box_b, v2(-20.0, 0.0)).unwrap();
    assert_eq!(result.entry(), 0.2);
    assert_eq!(result.exit(), 0.3);
}

#[test]
fn test_contact_interval_is_clamped_to_step() {
    let box_a = Aabb::square(1.0);
    let box_b = Aabb::square(1.0).translate(v2(0.5, 0.0));
    let result = sweep(&box_a, v2(1.0, 0.0), &box_b, Vec2::zero()).unwrap();
    assert_eq!(result.entry(), 0.0);
    assert_eq!(result.exit(), 1.0);

    let box_b = Aabb::square(1.0).translate(v2(4.0, 0.0));
    let result = sweep(&box_a, v2(1.0, 0.0), &box_b, v2(-1.0, 0.0)).unwrap();
    assert_eq!(result.entry(), 1.0);
    assert_eq!(result.exit(), 1.0);
}

#[test]
fn test_symmetry() {
    for case in shared_cases() {
        assert_eq!(
            swept_collision(&case.box_a, case.vel_a, &case.box_b, case.vel_b),
            swept_collision(&case.box_b, case.vel_b, &case.box_a, case.vel_a),
            "case: {}",
            case.name
        );
    }

    let mut rng = Pcg32::seed_from_u64(7);
    for _ in 0..10_000 {
        let box_a = random_box(&mut rng);
        let box_b = random_box(&mut rng);
        let vel_a = random_vec(&mut rng, 30.0);
        let vel_b = random_vec(&mut rng, 30.0);
        assert_eq!(
            swept_collision(&box_a, vel_a, &box_b, vel_b),
            swept_collision(&box_b, vel_b, &box_a, vel_a),
            "{:?} {:?} {:?} {:?}",
            box_a,
            vel_a,
            box_b,
            vel_b
        );
    }
}

#[test]
fn test_zero_relative_velocity_matches_static_overlap() {
    let mut rng = Pcg32::seed_from_u64(11);
    for _ in 0..10_000 {
        let box_a = random_box(&mut rng);
        let box_b = random_box(&mut rng);
        let vel = random_vec(&mut rng, 30.0);
        assert_eq!(swept_collision(&box_a, vel, &box_b, vel), box_a.overlaps(&box_b));
    }

    // exact edge contact along one axis and both axes
    let box_a = Aabb::square(1.0);
    assert!(swept_collision(&box_a, v2(3.0, 3.0), &Aabb::square(1.0).translate(v2(2.0, 0.0)), v2(3.0, 3.0)));
    assert!(swept_collision(&box_a, Vec2::zero(), &Aabb::square(1.0).translate(v2(-2.0, 2.0)), Vec2::zero()));
    assert!(!swept_collision(&box_a, Vec2::zero(), &Aabb::square(1.0).translate(v2(-2.0, 2.5)), Vec2::zero()));
}

#[test]
fn test_zero_size_boxes() {
    let point = Aabb::square(0.0);
    let target = Aabb::square(0.0).translate(v2(3.0, 3.0));
    assert!(swept_collision(&point, v2(4.0, 4.0), &target, Vec2::zero()));
    assert!(!swept_collision(&point, v2(4.0, 4.1), &target, Vec2::zero()));
}

#[test]
fn test_segment_intersects() {
    let aabb = Aabb::new(v2(5.0, 0.0), v2(1.0, 1.0));
    assert!(Segment::new(v2(0.0, 0.0), v2(10.0, 0.0)).intersects(&aabb));
    assert!(Segment::new(v2(0.0, 0.0), v2(4.0, 0.0)).intersects(&aabb));
    assert!(!Segment::new(v2(0.0, 0.0), v2(3.5, 0.0)).intersects(&aabb));
    assert!(Segment::new(v2(5.0, 0.0), v2(5.0, 0.0)).intersects(&aabb));
    assert!(!Segment::new(v2(0.0, 2.0), v2(10.0, 2.5)).intersects(&aabb));
    assert!(Segment::new(v2(0.0, 1.0), v2(10.0, 1.0)).intersects(&aabb));
}

fn random_box(rng: &mut Pcg32) -> Aabb {
    Aabb::new(random_vec(rng, 50.0), v2(rng.random_range(0.0..10.0), rng.random_range(0.0..10.0)))
}

fn random_vec(rng: &mut Pcg32, max: f64) -> Vec2 {
    v2(rng.random_range(-max..max), rng.random_range(-max..max))
}
