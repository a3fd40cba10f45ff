use route_core::{Error, Metric, Point, Result};

/// Read-only search state shared by every worker of one solve.
///
/// Node numbering: `0` is the origin, `1..=n` are the stops in input order and
/// `n + 1` is the destination.
pub struct SearchContext {
    n_stops: usize,

    // Flattened matrix for cache locality
    dist_mat: Vec<f64>,
    num_nodes: usize,
}

impl SearchContext {
    /// Fails with `InvalidInput` if the metric yields a non-finite length for
    /// any edge a route can use, so no such score ever reaches the scan.
    pub fn new<M: Metric + ?Sized>(
        metric: &M,
        origin: Point,
        destination: Point,
        stops: &[Point],
    ) -> Result<Self> {
        let n_stops = stops.len();
        let num_nodes = n_stops + 2;
        let dest = num_nodes - 1;

        let get_point = |idx: usize| -> Point {
            if idx == 0 {
                origin
            } else if idx == dest {
                destination
            } else {
                stops[idx - 1]
            }
        };

        // Edges into the origin or out of the destination never occur, and
        // origin -> destination only when there are no stops.
        let usable = |i: usize, j: usize| -> bool {
            i != j && j != 0 && i != dest && !(i == 0 && j == dest && n_stops > 0)
        };

        let mut dist_mat = vec![0.0; num_nodes * num_nodes];
        for i in 0..num_nodes {
            for j in 0..num_nodes {
                if !usable(i, j) {
                    continue;
                }
                let (a, b) = (get_point(i), get_point(j));
                let d = metric.distance(a, b);
                if !d.is_finite() {
                    return Err(Error::invalid_input(format!(
                        "metric returned {d} for edge {a} -> {b}"
                    )));
                }
                dist_mat[i * num_nodes + j] = d;
            }
        }

        Ok(SearchContext {
            n_stops,
            dist_mat,
            num_nodes,
        })
    }

    pub fn n_stops(&self) -> usize {
        self.n_stops
    }

    #[inline(always)]
    fn leg(&self, from: usize, to: usize) -> f64 {
        self.dist_mat[from * self.num_nodes + to]
    }

    /// Length of origin -> `order` -> destination, where `order` indexes
    /// `stops`. Summed in route order, so it matches `route_distance` on the
    /// materialized route bit for bit.
    #[inline]
    pub fn score(&self, order: &[usize]) -> f64 {
        let mut total = 0.0;
        let mut prev = 0;
        for &stop in order {
            let node = stop + 1;
            total += self.leg(prev, node);
            prev = node;
        }
        total + self.leg(prev, self.num_nodes - 1)
    }
}
