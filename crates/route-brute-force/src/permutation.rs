//! Lexicographic permutation enumeration and ranking over `0..n`.
//!
//! The sequential order is the one produced by repeatedly calling
//! [`next_permutation`] from the identity; the rank of a permutation is its
//! index in that sequence. [`nth_permutation`] inverts ranking, which is what
//! lets workers start in the middle of the sequence.

use route_core::config::MAX_ENUMERABLE_STOPS;

const FACTORIALS: [u64; MAX_ENUMERABLE_STOPS + 1] = {
    let mut table = [1u64; MAX_ENUMERABLE_STOPS + 1];
    let mut i = 1;
    while i <= MAX_ENUMERABLE_STOPS {
        table[i] = table[i - 1] * i as u64;
        i += 1;
    }
    table
};

/// `n!`, or `None` once it no longer fits in a `u64`.
#[inline]
pub fn factorial(n: usize) -> Option<u64> {
    FACTORIALS.get(n).copied()
}

/// Advances `order` to its lexicographic successor. Returns `false` and leaves
/// `order` untouched when it is already the last permutation.
pub fn next_permutation(order: &mut [usize]) -> bool {
    let len = order.len();
    if len < 2 {
        return false;
    }

    // Rightmost ascent
    let mut i = len - 1;
    while i > 0 && order[i - 1] >= order[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let pivot = i - 1;

    let mut j = len - 1;
    while order[j] <= order[pivot] {
        j -= 1;
    }
    order.swap(pivot, j);
    order[i..].reverse();
    true
}

/// The permutation of `0..n` with the given rank, or `None` if `rank >= n!`
/// or `n!` overflows.
pub fn nth_permutation(n: usize, rank: u64) -> Option<Vec<usize>> {
    if rank >= factorial(n)? {
        return None;
    }

    let mut pool: Vec<usize> = (0..n).collect();
    let mut order = Vec::with_capacity(n);
    let mut rest = rank;
    for remaining in (0..n).rev() {
        let block = FACTORIALS[remaining];
        let idx = (rest / block) as usize;
        rest %= block;
        order.push(pool.remove(idx));
    }
    Some(order)
}
