use crossbeam_channel::unbounded;
use route_core::config::MAX_ENUMERABLE_STOPS;
use route_core::{Error, Result, SearchControl};

use crate::context::SearchContext;
use crate::permutation::{next_permutation, nth_permutation};
use crate::types::Candidate;

/// Scores `count` consecutive permutations starting at rank `start`, keeping
/// only the first strictly shortest one.
pub(crate) fn scan_range(
    ctx: &SearchContext,
    control: &SearchControl,
    start: u64,
    count: u64,
) -> Result<Option<Candidate>> {
    let n = ctx.n_stops();
    let mut order = nth_permutation(n, start).ok_or(Error::CapacityExceeded {
        stops: n,
        limit: MAX_ENUMERABLE_STOPS,
    })?;

    let mut best_order = order.clone();
    let mut best_dist = f64::INFINITY;
    let mut best_rank: Option<u64> = None;

    for offset in 0..count {
        control.checkpoint(offset)?;

        let dist = ctx.score(&order);
        if best_rank.is_none() || dist < best_dist {
            best_dist = dist;
            best_rank = Some(start + offset);
            best_order.copy_from_slice(&order);
            log::trace!("brute_force: improved rank={} dist={dist}", start + offset);
        }

        if offset + 1 < count && !next_permutation(&mut order) {
            break;
        }
    }

    Ok(best_rank.map(|rank| Candidate {
        distance: best_dist,
        rank,
        order: best_order,
    }))
}

/// Splits `[0, total)` into contiguous rank ranges, one per worker, and
/// reduces the local winners by `(distance, rank)`.
///
/// If any worker was cancelled the whole scan is `Cancelled`. A deadline
/// reports the permutations scored by all workers together.
pub(crate) fn scan_parallel(
    ctx: &SearchContext,
    control: &SearchControl,
    total: u64,
    workers: usize,
) -> Result<Option<Candidate>> {
    let workers = (workers as u64).clamp(1, total.max(1));
    let chunk = total / workers;
    let extra = total % workers;

    let (tx, rx) = unbounded();
    std::thread::scope(|scope| {
        let mut start = 0;
        for w in 0..workers {
            let count = chunk + u64::from(w < extra);
            let tx = tx.clone();
            scope.spawn(move || {
                let res = scan_range(ctx, control, start, count);
                // Receiver outlives the scope
                let _ = tx.send((count, res));
            });
            start += count;
        }
    });
    drop(tx);

    let mut best: Option<Candidate> = None;
    let mut evaluated = 0u64;
    let mut cancelled = false;
    let mut timed_out = false;
    for (count, res) in rx.iter() {
        match res {
            Ok(Some(candidate)) => {
                evaluated += count;
                best = match best {
                    Some(current) if !candidate.beats(&current) => Some(current),
                    _ => Some(candidate),
                };
            }
            Ok(None) => evaluated += count,
            Err(Error::DeadlineExceeded { evaluated: partial }) => {
                evaluated += partial;
                timed_out = true;
            }
            Err(Error::Cancelled) => cancelled = true,
            Err(err) => return Err(err),
        }
    }

    if cancelled {
        return Err(Error::Cancelled);
    }
    if timed_out {
        return Err(Error::DeadlineExceeded { evaluated });
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use route_core::{CancelHandle, Error, Euclidean, Point, SearchControl};

    use super::{scan_parallel, scan_range};
    use crate::context::SearchContext;

    fn stops() -> Vec<Point> {
        vec![
            Point::new(2.0, 2.0),
            Point::new(2.0, 1.0),
            Point::new(5.0, 3.0),
            Point::new(8.0, 3.0),
        ]
    }

    #[test]
    fn full_range_finds_pinned_optimum() {
        let stops = stops();
        let ctx = SearchContext::new(&Euclidean, Point::new(0.0, 0.0), Point::new(4.0, 4.0), &stops)
            .unwrap();
        let best = scan_range(&ctx, &SearchControl::new(), 0, 24).unwrap().unwrap();
        assert_eq!(best.order, vec![1, 0, 2, 3]);
        assert_eq!(best.rank, 6);
    }

    #[test]
    fn parallel_matches_sequential_for_any_worker_count() {
        let stops = stops();
        let ctx = SearchContext::new(&Euclidean, Point::new(0.0, 0.0), Point::new(4.0, 4.0), &stops)
            .unwrap();
        let control = SearchControl::new();
        let sequential = scan_range(&ctx, &control, 0, 24).unwrap();
        for workers in [1, 2, 3, 5, 24, 64] {
            assert_eq!(scan_parallel(&ctx, &control, 24, workers).unwrap(), sequential);
        }
    }

    #[test]
    fn sub_range_only_sees_its_ranks() {
        let stops = stops();
        let ctx = SearchContext::new(&Euclidean, Point::new(0.0, 0.0), Point::new(4.0, 4.0), &stops)
            .unwrap();
        let best = scan_range(&ctx, &SearchControl::new(), 12, 6).unwrap().unwrap();
        assert!((12..18).contains(&best.rank));
        assert_eq!(best.order[0], 2);
    }

    #[test]
    fn cancelled_scan_returns_no_candidate() {
        let stops = stops();
        let ctx = SearchContext::new(&Euclidean, Point::new(0.0, 0.0), Point::new(4.0, 4.0), &stops)
            .unwrap();
        let handle = CancelHandle::new();
        handle.cancel();
        let control = SearchControl::new().with_cancel(handle);
        assert!(matches!(scan_range(&ctx, &control, 0, 24), Err(Error::Cancelled)));
        assert!(matches!(scan_parallel(&ctx, &control, 24, 4), Err(Error::Cancelled)));
    }

    #[test]
    fn parallel_deadline_sums_worker_counts() {
        let stops = stops();
        let ctx = SearchContext::new(&Euclidean, Point::new(0.0, 0.0), Point::new(4.0, 4.0), &stops)
            .unwrap();
        // Every worker trips on its first checkpoint, before scoring anything.
        let control = SearchControl::new().with_deadline(Instant::now());
        match scan_parallel(&ctx, &control, 24, 4) {
            Err(Error::DeadlineExceeded { evaluated }) => assert_eq!(evaluated, 0),
            other => panic!("expected deadline, got {other:?}"),
        }
    }
}
