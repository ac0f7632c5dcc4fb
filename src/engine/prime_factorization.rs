//! Radix decomposition of transform lengths.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

/// One radix stage group: `count` consecutive butterflies of size `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Factor {
    pub value: usize,
    pub count: usize,
}

fn push(factors: &mut Vec<Factor>, value: usize, count: usize) {
    if count > 0 {
        factors.push(Factor { value, count });
    }
}

/// Splits `len` into radix stages: fours first, then a lone two, then odd
/// primes in ascending order.
///
/// Returns `None` when a prime factor exceeds `max_prime`; the caller is then
/// expected to fall back to the chirp-z path.
pub fn factorize(len: usize, max_prime: usize) -> Option<Vec<Factor>> {
    debug_assert!(len >= 2);
    let mut factors = Vec::new();

    let twos = len.trailing_zeros() as usize;
    let mut rest = len >> twos;
    push(&mut factors, 4, twos >> 1);
    push(&mut factors, 2, twos & 1);

    let mut prime = 3;
    while prime * prime <= rest {
        let mut count = 0;
        while rest % prime == 0 {
            rest /= prime;
            count += 1;
        }
        if count > 0 {
            if prime > max_prime {
                return None;
            }
            push(&mut factors, prime, count);
        }
        prime += 2;
    }
    if rest > 1 {
        if rest > max_prime {
            return None;
        }
        push(&mut factors, rest, 1);
    }
    Some(factors)
}
