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

use fnv::{FnvHashMap, FnvHashSet};

use super::cells::CellSpan;
use crate::geom::Aabb;

// Grid is a sparse 2D grid implemented as a HashMap. It is rebuilt every fixed
// step from the swept bounds of the live objects and used to decide which
// pairs are worth handing to the narrow phase. Objects too large to index are
// kept aside and paired with everything.

pub struct Grid {
    map: FnvHashMap<(i32, i32), Vec<usize>>,
    ids: Vec<usize>,
    oversized: Vec<usize>,
    cell_width: f64,
}

impl Grid {
    pub fn new(cell_width: f64) -> Grid {
        assert!(
            cell_width > 0.0 && cell_width.is_finite(),
            "grid cell width must be positive and finite"
        );
        Grid {
            map: FnvHashMap::default(),
            ids: Vec::new(),
            oversized: Vec::new(),
            cell_width,
        }
    }

    // Drops every cell, so the map only ever holds cells touched this step.
    pub fn clear(&mut self) {
        self.map.clear();
        self.ids.clear();
        self.oversized.clear();
    }

    pub fn insert(&mut self, id: usize, bounds: &Aabb) {
        self.ids.push(id);
        match CellSpan::covering(bounds, self.cell_width) {
            Some(span) => {
                for coord in span.cells() {
                    self.map.entry(coord).or_insert_with(Vec::new).push(id);
                }
            }
            None => self.oversized.push(id),
        }
    }

    // Every pair of ids sharing at least one cell, as (lower, higher), sorted.
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = FnvHashSet::default();
        for ids in self.map.values() {
            for (n, &a) in ids.iter().enumerate() {
                for &b in &ids[n + 1..] {
                    if a != b {
                        pairs.insert(if a < b { (a, b) } else { (b, a) });
                    }
                }
            }
        }
        for &a in &self.oversized {
            for &b in &self.ids {
                if a != b {
                    pairs.insert(if a < b { (a, b) } else { (b, a) });
                }
            }
        }
        let mut result: Vec<(usize, usize)> = pairs.into_iter().collect();
        result.sort_unstable();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::v2;

    #[test]
    fn test_neighbours_share_cells() {
        let mut grid = Grid::new(10.0);
        grid.insert(0, &Aabb::new(v2(5.0, 5.0), v2(1.0, 1.0)));
        grid.insert(1, &Aabb::new(v2(7.0, 5.0), v2(1.0, 1.0)));
        grid.insert(2, &Aabb::new(v2(55.0, 5.0), v2(1.0, 1.0)));
        assert_eq!(grid.candidate_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn test_touching_across_cell_boundary() {
        let mut grid = Grid::new(10.0);
        grid.insert(3, &Aabb::new(v2(8.0, 5.0), v2(2.0, 2.0)));
        grid.insert(1, &Aabb::new(v2(12.0, 5.0), v2(2.0, 2.0)));
        assert_eq!(grid.candidate_pairs(), vec![(1, 3)]);
    }

    #[test]
    fn test_pair_reported_once() {
        let mut grid = Grid::new(1.0);
        grid.insert(0, &Aabb::new(v2(0.0, 0.0), v2(3.0, 3.0)));
        grid.insert(1, &Aabb::new(v2(0.5, 0.5), v2(3.0, 3.0)));
        assert_eq!(grid.candidate_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::new(10.0);
        grid.insert(0, &Aabb::new(v2(5.0, 5.0), v2(1.0, 1.0)));
        grid.insert(1, &Aabb::new(v2(5.0, 5.0), v2(1.0, 1.0)));
        grid.clear();
        assert!(grid.candidate_pairs().is_empty());
        grid.insert(2, &Aabb::new(v2(-5.0, -5.0), v2(1.0, 1.0)));
        grid.insert(0, &Aabb::new(v2(-4.0, -5.0), v2(1.0, 1.0)));
        assert_eq!(grid.candidate_pairs(), vec![(0, 2)]);
    }

    #[test]
    fn test_cells_do_not_pile_up() {
        let mut grid = Grid::new(64.0);
        let mut pos = v2(0.0, 0.0);
        let vel = v2(16.0, 0.0);
        for _ in 0..10_000 {
            grid.clear();
            grid.insert(0, &Aabb::new(pos, v2(2.0, 2.0)).swept(vel));
            assert!(grid.map.len() <= 4, "{} cells", grid.map.len());
            pos = pos + vel;
        }
    }

    #[test]
    fn test_oversized_pairs_with_everything() {
        let mut grid = Grid::new(10.0);
        grid.insert(0, &Aabb::new(v2(5.0, 5.0), v2(1.0, 1.0)));
        grid.insert(1, &Aabb::new(v2(0.0, 0.0), v2(1.0, 1.0)).swept(v2(1e10, 0.0)));
        grid.insert(2, &Aabb::new(v2(-505.0, 905.0), v2(1.0, 1.0)));
        assert_eq!(grid.map.len(), 2);
        assert_eq!(grid.candidate_pairs(), vec![(0, 1), (1, 2)]);
        grid.clear();
        assert!(grid.candidate_pairs().is_empty());
    }

    #[test]
    #[should_panic]
    fn test_zero_cell_width() {
        Grid::new(0.0);
    }
}
