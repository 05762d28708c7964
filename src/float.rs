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

// N64 wraps a non-NaN f64 value and implements Ord. Infinities are allowed,
// since empty and unbounded slab intervals are expressed with them.

#[cfg(feature = "noisy-floats")]
pub use noisy_float::types::{n64, N64};

#[cfg(not(feature = "noisy-floats"))]
pub use self::plain::{n64, N64};

#[cfg(feature = "noisy-floats")]
#[inline]
pub fn raw(val: N64) -> f64 {
    val.raw()
}

#[cfg(not(feature = "noisy-floats"))]
#[inline]
pub fn raw(val: N64) -> f64 {
    val.val
}

#[cfg(not(feature = "noisy-floats"))]
mod plain {
    use std::cmp::Ordering;

    pub fn n64(val: f64) -> N64 {
        N64::new(val)
    }

    #[derive(PartialEq, PartialOrd, Copy, Clone, Debug, Default)]
    pub struct N64 {
        pub(super) val: f64,
    }

    impl N64 {
        fn new(val: f64) -> N64 {
            assert!(!val.is_nan(), "unexpected NaN");
            N64 { val }
        }
    }

    impl Eq for N64 {}

    impl Ord for N64 {
        fn cmp(&self, other: &Self) -> Ordering {
            self.val.partial_cmp(&other.val).unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp;
    use std::f64;

    #[test]
    fn test_ordering_with_infinities() {
        assert!(n64(f64::NEG_INFINITY) < n64(-1e300));
        assert!(n64(1e300) < n64(f64::INFINITY));
        assert_eq!(cmp::max(n64(0.0), n64(f64::NEG_INFINITY)), n64(0.0));
        assert_eq!(cmp::min(n64(1.0), n64(f64::INFINITY)), n64(1.0));
        assert_eq!(raw(n64(-2.5)), -2.5);
    }

    #[test]
    #[should_panic]
    fn test_nan_rejected() {
        n64(f64::NAN);
    }
}
