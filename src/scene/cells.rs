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

use crate::geom::Aabb;

pub const MAX_SPAN: i32 = 64;

// CellSpan is the non-empty block of grid cells touched by a box. Both corners
// are inclusive.

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct CellSpan {
    min: (i32, i32),
    max: (i32, i32),
}

impl CellSpan {
    pub fn new(min: (i32, i32), max: (i32, i32)) -> CellSpan {
        assert!(min.0 <= max.0 && min.1 <= max.1, "CellSpan corners out of order");
        CellSpan { min, max }
    }

    // A box edge lying exactly on a cell boundary touches the cells on both
    // sides of it. Returns None for boxes wider than MAX_SPAN cells on either
    // axis, or too far out to index.
    pub fn covering(bounds: &Aabb, cell_width: f64) -> Option<CellSpan> {
        let cell = |val: f64| (val / cell_width).floor();
        let (min_x, min_y) = (cell(bounds.left()), cell(bounds.bottom()));
        let (max_x, max_y) = (cell(bounds.right()), cell(bounds.top()));
        let fits = |lo: f64, hi: f64| {
            lo >= f64::from(i32::MIN) && hi <= f64::from(i32::MAX) && hi - lo < f64::from(MAX_SPAN)
        };
        if fits(min_x, max_x) && fits(min_y, max_y) {
            Some(CellSpan::new((min_x as i32, min_y as i32), (max_x as i32, max_y as i32)))
        } else {
            None
        }
    }

    pub fn cells(self) -> Cells {
        Cells { span: self, next: Some(self.min) }
    }
}

// row-major walk over a span
pub struct Cells {
    span: CellSpan,
    next: Option<(i32, i32)>,
}

impl Iterator for Cells {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        let current = self.next?;
        let (x, y) = current;
        self.next = if x < self.span.max.0 {
            Some((x + 1, y))
        } else if y < self.span.max.1 {
            Some((self.span.min.0, y + 1))
        } else {
            None
        };
        Some(current)
    }
}
