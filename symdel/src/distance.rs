//! String distance metrics used to verify lookup candidates.
//!
//! The lookup only needs to know whether a candidate lies within the current
//! distance bound, so every metric is asked for its distance with an early
//! stop: `None` means the true distance is larger than the given bound.
//! Distances are counted in `char`s, never in bytes.

use std::cmp::{max, min};

/// Strategy for computing a bounded edit distance between two strings.
///
/// Implementations must be symmetric, return `Some(0)` for identical strings
/// and return `None` exactly when the distance exceeds `max_distance`.
/// Distances are never negative.
pub trait StringDistance {
    /// Calculates the distance between `a` and `b`, giving up as soon as it
    /// is certain to exceed `max_distance`.
    fn distance_with_early_stop(&self, a: &str, b: &str, max_distance: usize) -> Option<usize>;

    /// Calculates the distance between `a` and `b` bounded only by the length
    /// of the longer string. A metric that refuses the pair still yields that
    /// bound.
    fn distance(&self, a: &str, b: &str) -> usize {
        let bound = max(a.chars().count(), b.chars().count());
        self.distance_with_early_stop(a, b, bound).unwrap_or(bound)
    }
}

/// Damerau-Levenshtein distance restricted to adjacent transpositions
/// (optimal string alignment), with early termination.
#[derive(Debug, Default, Clone, Copy)]
pub struct DamerauOsa;

impl StringDistance for DamerauOsa {
    fn distance_with_early_stop(&self, a: &str, b: &str, max_distance: usize) -> Option<usize> {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        osa_with_early_stop(&a, &b, max_distance)
    }
}

/// Plain Levenshtein distance without transpositions.
#[derive(Debug, Default, Clone, Copy)]
pub struct Levenshtein;

impl StringDistance for Levenshtein {
    fn distance_with_early_stop(&self, a: &str, b: &str, max_distance: usize) -> Option<usize> {
        let len_a = a.chars().count();
        let len_b = b.chars().count();
        if max(len_a, len_b) - min(len_a, len_b) > max_distance {
            return None;
        }

        let distance = strsim::levenshtein(a, b);
        if distance <= max_distance {
            Some(distance)
        } else {
            None
        }
    }
}

fn osa_with_early_stop(a: &[char], b: &[char], max_distance: usize) -> Option<usize> {
    let (mut s1, mut s2) = if a.len() > b.len() { (b, a) } else { (a, b) };

    while let (Some(x), Some(y)) = (s1.last(), s2.last()) {
        if x != y {
            break;
        }
        s1 = &s1[..s1.len() - 1];
        s2 = &s2[..s2.len() - 1];
    }

    let common_prefix = s1.iter().zip(s2.iter()).take_while(|(x, y)| x == y).count();
    let s1 = &s1[common_prefix..];
    let s2 = &s2[common_prefix..];

    // s1 is never longer than s2
    if s2.len() - s1.len() > max_distance {
        return None;
    }
    if s1.is_empty() {
        return Some(s2.len());
    }

    let width = s2.len() + 1;
    let mut before_previous = vec![0usize; width];
    let mut previous: Vec<usize> = (0..width).collect();
    let mut current = vec![0usize; width];

    for i in 1..=s1.len() {
        current[0] = i;
        let mut row_min = current[0];

        for j in 1..width {
            let cost = if s1[i - 1] == s2[j - 1] { 0 } else { 1 };
            let mut value = min(
                min(previous[j] + 1, current[j - 1] + 1),
                previous[j - 1] + cost,
            );

            if i > 1 && j > 1 && s1[i - 1] == s2[j - 2] && s1[i - 2] == s2[j - 1] {
                value = min(value, before_previous[j - 2] + 1);
            }

            current[j] = value;
            row_min = min(row_min, value);
        }

        if row_min > max_distance {
            return None;
        }

        std::mem::swap(&mut before_previous, &mut previous);
        std::mem::swap(&mut previous, &mut current);
    }

    let distance = previous[width - 1];
    if distance <= max_distance {
        Some(distance)
    } else {
        None
    }
}
