//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/.

use super::NearlyEq;
use num_complex::Complex;

impl<T: NearlyEq> NearlyEq for Complex<T> {
    fn nearly_eq(&self, other: &Complex<T>) -> bool {
        self.re.nearly_eq(&other.re) && self.im.nearly_eq(&other.im)
    }
}
