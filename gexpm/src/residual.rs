// SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later

//! The sparse residual store (spec component C).
//!
//! Keys are composite indices `k = v + j*n` encoding a (node, Taylor-step)
//! pair, following spec.md §9's recommendation over a nested map: a single
//! integer key avoids hashing a pair and lets the indexed heap (component D)
//! back its key→slot table with a flat array.

use std::collections::HashMap;

/// Encodes `(node, step)` into the composite residual key `node + step*n`.
#[inline]
pub fn encode(node: usize, step: usize, n: usize) -> usize {
    node + step * n
}

/// Decodes a composite residual key back into `(node, step)`.
#[inline]
pub fn decode(key: usize, n: usize) -> (usize, usize) {
    (key % n, key / n)
}

/// A sparse map from a composite residual key to a nonnegative value.
///
/// Absent keys read as `0.0`; writing `0.0` does not remove the entry
/// eagerly (that would cost an extra branch on every push for no
/// observable benefit), but the contract treats it as logically absent.
#[derive(Debug, Default, Clone)]
pub struct ResidualStore {
    values: HashMap<usize, f64>,
}

impl ResidualStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value at `key`, or `0.0` if absent.
    #[inline]
    pub fn get(&self, key: usize) -> f64 {
        self.values.get(&key).copied().unwrap_or(0.0)
    }

    /// Sets the value at `key` directly.
    #[inline]
    pub fn set(&mut self, key: usize, value: f64) {
        self.values.insert(key, value);
    }

    /// Adds `delta` to the value at `key`, returning `(new, old)`.
    #[inline]
    pub fn add(&mut self, key: usize, delta: f64) -> (f64, f64) {
        let old = self.get(key);
        let new = old + delta;
        self.set(key, new);
        (new, old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_reads_as_zero() {
        let r = ResidualStore::new();
        assert_eq!(r.get(42), 0.0);
    }

    #[test]
    fn add_returns_new_and_old() {
        let mut r = ResidualStore::new();
        let (new, old) = r.add(7, 1.5);
        assert_eq!(old, 0.0);
        assert_eq!(new, 1.5);
        let (new2, old2) = r.add(7, 0.5);
        assert_eq!(old2, 1.5);
        assert_eq!(new2, 2.0);
    }

    #[test]
    fn encode_decode_round_trips() {
        let n = 7;
        for node in 0..n {
            for step in 0..5 {
                let k = encode(node, step, n);
                assert_eq!(decode(k, n), (node, step));
            }
        }
    }
}
