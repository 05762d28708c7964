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

//! A pool of moving objects stepped at a fixed rate.
//!
//! A `Scene` owns every object of a simulation.  Each call to
//! `Scene::fixed_update` first runs a collision pass over the state at the start
//! of the step, then moves every live object by its velocity.  Colliding objects
//! are flagged, and the flags stay set until `Scene::clear_hits` is called,
//! normally right after drawing, so a hit is visible for at least one frame.

mod cells;
mod grid;

use log::{debug, trace};

use self::grid::Grid;
use crate::geom::{Aabb, Circle, ShapeKind, Vec2};
use crate::sweep::swept_collision;

/// Index of an object within a `Scene`.
///
/// Slots of dead objects are reused by `Scene::add`, so an id only stays
/// meaningful while its object is alive.
pub type ObjectId = usize;

/// Used to determine which pairs of objects are tested for collisions.
///
/// Both objects of a pair must agree that they interact.  The unit type
/// interacts with everything.
pub trait Profile: Copy {
    /// Returns `true` if `self` should be tested against `other`.
    fn can_interact(&self, other: &Self) -> bool;
}

impl Profile for () {
    fn can_interact(&self, _other: &()) -> bool {
        true
    }
}

/// Which pairs the collision pass visits.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum PairMode {
    /// Every ordered pair `(i, j)` with `i != j`, so each pair is tested twice.
    Ordered,
    /// Every pair once, `i < j`.
    Unordered,
}

/// What happens to an object that moves past the edge of the play area.
#[derive(PartialEq, Copy, Clone, Debug)]
pub enum Boundary {
    /// Nothing; objects may travel anywhere.
    Open,
    /// Positions wrap around into `[0, width) × [0, height)`.
    Wrap { width: f64, height: f64 },
    /// Positions are clamped into `[0, width] × [0, height]`.
    Clamp { width: f64, height: f64 },
}

impl Boundary {
    // returns true if the position teleported
    fn apply(&self, pos: &mut Vec2) -> bool {
        match *self {
            Boundary::Open => false,
            Boundary::Wrap { width, height } => {
                let old = *pos;
                pos.x = wrap(pos.x, width);
                pos.y = wrap(pos.y, height);
                old != *pos
            }
            Boundary::Clamp { width, height } => {
                pos.x = pos.x.max(0.0).min(width);
                pos.y = pos.y.max(0.0).min(height);
                false
            }
        }
    }

    fn validate(&self) {
        match *self {
            Boundary::Open => (),
            Boundary::Wrap { width, height } | Boundary::Clamp { width, height } => assert!(
                width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite(),
                "play area must have a positive, finite size"
            ),
        }
    }
}

fn wrap(val: f64, size: f64) -> f64 {
    let mut result = val % size;
    if result < 0.0 {
        result += size;
    }
    if result >= size {
        result -= size;
    }
    result
}

/// How candidate pairs are found before the narrow phase.
#[derive(PartialEq, Copy, Clone, Debug)]
pub enum BroadPhase {
    /// Every pair of live objects is tested.
    BruteForce,
    /// Only objects whose swept bounds share a cell of a sparse grid are tested.
    /// `cell_width` should be somewhat larger than a typical object.
    Grid { cell_width: f64 },
}

/// What happens to objects found colliding.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum HitResponse {
    /// The objects are flagged as colliding and keep moving.
    Flag,
    /// The objects are flagged and then killed.
    Kill,
}

/// Init-time configuration of a `Scene`.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct SceneConfig {
    pub pairs: PairMode,
    pub boundary: Boundary,
    pub broad_phase: BroadPhase,
    pub on_hit: HitResponse,
    /// Maximum number of object slots.
    pub capacity: usize,
}

impl Default for SceneConfig {
    fn default() -> SceneConfig {
        SceneConfig {
            pairs: PairMode::Unordered,
            boundary: Boundary::Open,
            broad_phase: BroadPhase::BruteForce,
            on_hit: HitResponse::Flag,
            capacity: usize::MAX,
        }
    }
}

/// An object with a position, a constant-per-step velocity and a collision box.
#[derive(Clone, Debug)]
pub struct MovingObject<P = ()> {
    /// Position of the object; the collision box is relative to it.
    pub position: Vec2,
    /// Displacement applied on each fixed step.
    pub velocity: Vec2,
    /// Remaining fixed steps before the object dies, or `None` to live forever.
    pub lifetime: Option<u32>,
    /// User data consulted by `Profile::can_interact`.
    pub profile: P,
    collision_box: Aabb,
    kind: ShapeKind,
    prev_position: Vec2,
    colliding: bool,
    alive: bool,
    wrapped: bool,
}

impl<P: Profile> MovingObject<P> {
    /// Constructs a stationary object.  `collision_box` is relative to
    /// `position`.  Circles must have equal half extents.
    pub fn new(position: Vec2, collision_box: Aabb, kind: ShapeKind, profile: P) -> MovingObject<P> {
        if kind == ShapeKind::Circle {
            assert!(
                collision_box.half_extents.x == collision_box.half_extents.y,
                "circle requires equal half extents"
            );
        }
        MovingObject {
            position,
            velocity: Vec2::zero(),
            lifetime: None,
            profile,
            collision_box,
            kind,
            prev_position: position,
            colliding: false,
            alive: true,
            wrapped: false,
        }
    }

    /// Constructs a rectangle centered on `position`.
    pub fn rect(position: Vec2, half_extents: Vec2, profile: P) -> MovingObject<P> {
        MovingObject::new(position, Aabb::centered(half_extents), ShapeKind::Rect, profile)
    }

    /// Constructs a circle centered on `position`.
    pub fn circle(position: Vec2, radius: f64, profile: P) -> MovingObject<P> {
        MovingObject::new(position, Aabb::square(radius), ShapeKind::Circle, profile)
    }

    /// Sets the velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> MovingObject<P> {
        self.velocity = velocity;
        self
    }

    /// Sets the number of fixed steps the object lives for.
    pub fn with_lifetime(mut self, steps: u32) -> MovingObject<P> {
        self.lifetime = Some(steps);
        self
    }

    /// The collision box relative to `position`.
    pub fn collision_box(&self) -> &Aabb {
        &self.collision_box
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// The collision box placed at the current position.
    pub fn world_box(&self) -> Aabb {
        self.collision_box.translate(self.position)
    }

    fn world_circle(&self) -> Circle {
        let bounds = self.world_box();
        Circle::new(bounds.center, bounds.half_extents.x)
    }

    /// Position before the most recent fixed step.
    pub fn previous_position(&self) -> Vec2 {
        self.prev_position
    }

    /// Returns `true` if the object was hit since the last `Scene::clear_hits`.
    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Position to draw at, `alpha` of the way from the previous to the current
    /// fixed-step position.  If the last step wrapped around the play area the
    /// current position is returned.
    pub fn render_position(&self, alpha: f64) -> Vec2 {
        if self.wrapped {
            self.position
        } else {
            self.prev_position.lerp(self.position, alpha)
        }
    }

    fn interacts(&self, other: &MovingObject<P>) -> bool {
        self.alive && other.alive && self.profile.can_interact(&other.profile) && other.profile.can_interact(&self.profile)
    }

    // Rect pairs are swept over the coming step, anything involving a circle is
    // tested for overlap at the current position.
    fn collides(&self, other: &MovingObject<P>) -> bool {
        match (self.kind, other.kind) {
            (ShapeKind::Rect, ShapeKind::Rect) => {
                swept_collision(&self.world_box(), self.velocity, &other.world_box(), other.velocity)
            }
            (ShapeKind::Circle, ShapeKind::Circle) => self.world_circle().overlaps(&other.world_circle()),
            (ShapeKind::Circle, ShapeKind::Rect) => self.world_circle().overlaps_box(&other.world_box()),
            (ShapeKind::Rect, ShapeKind::Circle) => other.world_circle().overlaps_box(&self.world_box()),
        }
    }
}

/// A pool of `MovingObject`s and the rules they are stepped by.
pub struct Scene<P: Profile = ()> {
    config: SceneConfig,
    objects: Vec<MovingObject<P>>,
    grid: Option<Grid>,
    pair_tests: usize,
}

impl<P: Profile> Scene<P> {
    /// Constructs an empty scene.
    ///
    /// Panics if the boundary has a non-positive size or the grid cell width is
    /// not positive.
    pub fn new(config: SceneConfig) -> Scene<P> {
        config.boundary.validate();
        let grid = match config.broad_phase {
            BroadPhase::BruteForce => None,
            BroadPhase::Grid { cell_width } => Some(Grid::new(cell_width)),
        };
        Scene {
            config,
            objects: Vec::new(),
            grid,
            pair_tests: 0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Adds an object, reusing the slot of a dead object if there is one.
    /// Returns `None` if every slot is taken and the scene is at capacity.
    pub fn add(&mut self, mut object: MovingObject<P>) -> Option<ObjectId> {
        object.prev_position = object.position;
        object.colliding = false;
        object.alive = true;
        object.wrapped = false;
        if let Some(id) = self.objects.iter().position(|o| !o.alive) {
            self.objects[id] = object;
            Some(id)
        } else if self.objects.len() < self.config.capacity {
            self.objects.push(object);
            Some(self.objects.len() - 1)
        } else {
            debug!("object pool full at {} objects, dropping new object", self.objects.len());
            None
        }
    }

    /// Returns the object with the given id.  Panics on an unknown id.
    pub fn get(&self, id: ObjectId) -> &MovingObject<P> {
        &self.objects[id]
    }

    /// Returns the object with the given id.  Panics on an unknown id.
    pub fn get_mut(&mut self, id: ObjectId) -> &mut MovingObject<P> {
        &mut self.objects[id]
    }

    /// Kills an object, freeing its slot.
    pub fn kill(&mut self, id: ObjectId) {
        self.objects[id].alive = false;
    }

    /// All slots, dead or alive.
    pub fn objects(&self) -> &[MovingObject<P>] {
        &self.objects
    }

    /// Iterates over the live objects.
    pub fn live(&self) -> impl Iterator<Item = (ObjectId, &MovingObject<P>)> {
        self.objects.iter().enumerate().filter(|(_, o)| o.alive)
    }

    /// Number of slots in use, dead or alive.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    /// Number of objects currently flagged as colliding.
    pub fn hit_count(&self) -> usize {
        self.objects.iter().filter(|o| o.colliding).count()
    }

    /// Number of narrow-phase tests run by the most recent `fixed_update`.
    pub fn pair_tests(&self) -> usize {
        self.pair_tests
    }

    /// Advances the scene by one fixed step: collision pass, then movement.
    pub fn fixed_update(&mut self) {
        let hits = self.detect_collisions();
        for &id in &hits {
            let object = &mut self.objects[id];
            object.colliding = true;
            if self.config.on_hit == HitResponse::Kill {
                object.alive = false;
            }
        }
        self.integrate();
        trace!("fixed update: {} pair tests, {} objects hit", self.pair_tests, hits.len());
    }

    /// Clears every colliding flag.  Call after drawing.
    pub fn clear_hits(&mut self) {
        for object in &mut self.objects {
            object.colliding = false;
        }
    }

    fn detect_collisions(&mut self) -> Vec<ObjectId> {
        let pairs = self.candidate_pairs();
        let mut hit = vec![false; self.objects.len()];
        let mut tests = 0;
        for (i, j) in pairs {
            let (a, b) = (&self.objects[i], &self.objects[j]);
            if !a.interacts(b) {
                continue;
            }
            tests += 1;
            if a.collides(b) {
                hit[i] = true;
                hit[j] = true;
            }
        }
        self.pair_tests = tests;
        hit.iter().enumerate().filter(|&(_, &h)| h).map(|(id, _)| id).collect()
    }

    fn candidate_pairs(&mut self) -> Vec<(ObjectId, ObjectId)> {
        let objects = &self.objects;
        let unordered: Vec<(ObjectId, ObjectId)> = match self.grid {
            Some(ref mut grid) => {
                grid.clear();
                for (id, object) in objects.iter().enumerate().filter(|(_, o)| o.alive) {
                    grid.insert(id, &object.world_box().swept(object.velocity));
                }
                grid.candidate_pairs()
            }
            None => (0..objects.len())
                .flat_map(|i| (i + 1..objects.len()).map(move |j| (i, j)))
                .collect(),
        };
        match self.config.pairs {
            PairMode::Unordered => unordered,
            PairMode::Ordered => {
                let mut ordered: Vec<(ObjectId, ObjectId)> =
                    unordered.into_iter().flat_map(|(i, j)| vec![(i, j), (j, i)]).collect();
                ordered.sort_unstable();
                ordered
            }
        }
    }

    fn integrate(&mut self) {
        let boundary = self.config.boundary;
        for object in self.objects.iter_mut().filter(|o| o.alive) {
            object.prev_position = object.position;
            object.position += object.velocity;
            object.wrapped = boundary.apply(&mut object.position);
            if let Some(ref mut steps) = object.lifetime {
                *steps = steps.saturating_sub(1);
                if *steps == 0 {
                    object.alive = false;
                }
            }
        }
    }
}
