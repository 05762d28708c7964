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

//! Fixed-timestep loop driving and swept AABB collision detection for small 2D
//! games.
//!
//! `swept_collision` tells whether two moving boxes touch at any point during
//! one step, so fast objects cannot pass through each other between frames.
//! `FixedStepScheduler` decouples simulation rate from frame rate: it runs
//! fixed-size simulation steps from an accumulator of real time and hands the
//! drawing callback the fraction of a step left over, for interpolation.
//! `Scene` ties the two together for a pool of moving objects.

mod float;
pub mod geom;
pub mod playground;
pub mod scene;
pub mod schedule;
pub mod sweep;

pub use crate::scene::{MovingObject, ObjectId, Profile, Scene, SceneConfig};
pub use crate::schedule::{Clock, FixedStepScheduler, LoopConfig, LoopHandler, ManualClock, SystemClock};
pub use crate::sweep::{sweep, swept_collision, Sweep};
