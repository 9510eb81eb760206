use serde::{Deserialize, Serialize};

/// Heritable tag carried by a lineage.
///
/// Biallelic models use [`ALLELE_A`] and [`ALLELE_B`]; under infinite-allele
/// mutation every new label is issued by a [`LabelCounter`].
pub type AlleleLabel = u64;

/// Label of allele A in biallelic models.
pub const ALLELE_A: AlleleLabel = 0;

/// Label of allele B in biallelic models.
pub const ALLELE_B: AlleleLabel = 1;

/// Monotonically increasing source of never-before-seen labels.
///
/// The counter belongs to one run and only moves forward, once per mutation
/// event. It is never recomputed from the labels currently present. Once
/// `AlleleLabel::MAX` has been issued the counter is exhausted and never
/// wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounter {
    next: Option<AlleleLabel>,
}

impl LabelCounter {
    /// Counter whose first issued label is `next`.
    pub fn starting_at(next: AlleleLabel) -> Self {
        Self { next: Some(next) }
    }

    /// Counter that issues labels above every label in `labels`.
    pub fn after(labels: &[AlleleLabel]) -> Self {
        let next = match labels.iter().max() {
            Some(&max) => max.checked_add(1),
            None => Some(0),
        };
        Self { next }
    }

    /// Issue a fresh label, or `None` once the label space is used up.
    #[inline]
    pub fn issue(&mut self) -> Option<AlleleLabel> {
        let label = self.next?;
        self.next = label.checked_add(1);
        Some(label)
    }

    /// The label the next call to [`issue`](Self::issue) will return.
    pub fn peek(&self) -> Option<AlleleLabel> {
        self.next
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_after_labels() {
        let counter = LabelCounter::after(&[3, 0, 7, 2]);
        assert_eq!(counter.peek(), Some(8));

        let empty = LabelCounter::after(&[]);
        assert_eq!(empty.peek(), Some(0));
    }

    #[test]
    fn test_counter_is_monotonic() {
        let mut counter = LabelCounter::starting_at(5);
        let issued: Vec<_> = (0..4).map(|_| counter.issue().unwrap()).collect();

        assert_eq!(issued, vec![5, 6, 7, 8]);
        assert_eq!(counter.peek(), Some(9));
    }

    #[test]
    fn test_counter_never_wraps() {
        let mut counter = LabelCounter::starting_at(AlleleLabel::MAX - 1);
        assert_eq!(counter.issue(), Some(AlleleLabel::MAX - 1));
        assert_eq!(counter.issue(), Some(AlleleLabel::MAX));
        assert!(counter.is_exhausted());
        assert_eq!(counter.issue(), None);
        assert_eq!(counter.issue(), None);

        let saturated = LabelCounter::after(&[0, AlleleLabel::MAX]);
        assert!(saturated.is_exhausted());
    }
}
