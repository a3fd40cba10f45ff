/// Best permutation seen by one scan, tagged with its rank for tie-breaking.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub distance: f64,
    pub rank: u64,
    pub order: Vec<usize>,
}

impl Candidate {
    /// Shorter wins; equal distances go to the earlier rank.
    #[inline]
    pub fn beats(&self, other: &Candidate) -> bool {
        self.distance < other.distance || (self.distance == other.distance && self.rank < other.rank)
    }
}
