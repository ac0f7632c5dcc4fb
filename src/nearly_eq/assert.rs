//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/.

macro_rules! assert_nearly_eq {
    ($a:expr, $b:expr) => {{
        let (a, b) = ($a, $b);
        assert!(
            $crate::nearly_eq::NearlyEq::nearly_eq(a, b),
            "assertion failed: `(left ~= right)` (left: `{:?}`, right: `{:?}`)",
            a,
            b
        );
    }};
}
