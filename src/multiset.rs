//! Counted multiset with weighted random draws.
//!
//! Items are stored once each, in insertion order, together with a count.
//! [`Multiset::get`] draws a stored item with probability proportional to
//! `count^exponent`; items whose count is zero stay in the collection but are
//! never drawn.
//!
//! ```text
//!   index   0      1      2      3
//!   item    "a"    "b"    "c"    "d"
//!   count   1      0      2      3
//!
//!   get(1):  positions [0, 2, 3], weights ∝ [1, 2, 3]   -> P = 1/6, 0, 2/6, 3/6
//!   get(2):  positions [0, 2, 3], weights ∝ [1, 4, 9]   -> P = 1/14, 0, 4/14, 9/14
//! ```
//!
//! Counts are divided by the largest positive count (the smallest one for a
//! negative exponent) before the power is taken, so the top weight is always
//! 1 and large exponents cannot overflow. As the exponent grows, the draw
//! tends to uniform over the entries holding the largest count.
//!
//! ## Sentinels
//!
//! Nothing here returns an error for missing data:
//!
//! | operation   | not found / out of range |
//! |-------------|--------------------------|
//! | `remove`    | `None` (found at zero is `Some(0)`) |
//! | `purge`     | `None`                   |
//! | `delete`    | `None`                   |
//! | `index_of`  | `None`                   |
//! | `at`        | `None`                   |
//! | `count_of`  | `0`                      |
//! | `count_at`  | `0`                      |
//! | `get`       | `None` (empty, all counts zero, or NaN exponent) |
//!
//! Identity lookups are linear scans through the configured [`Equivalence`].

use rand::prelude::*;

use crate::equivalence::{DeepEqual, Equivalence};
use crate::sampler::{CumulativeWeights, SampleError};

/// One stored item and its multiplicity.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    item: T,
    count: u64,
}

impl<T> Entry<T> {
    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// When the cumulative distribution used by `get` is rebuilt.
///
/// The mode never changes which item a given RNG stream selects.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Recalibration {
    /// Build the distribution on every draw.
    #[default]
    Lazy,
    /// Rebuild the distribution for `exponent` after every mutation and reuse
    /// it for draws with that exponent. Draws with any other exponent fall
    /// back to lazy building.
    Eager { exponent: f64 },
}

/// Entries eligible for sampling and their weights, as parallel arrays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightVector {
    positions: Vec<usize>,
    weights: Vec<f64>,
}

impl WeightVector {
    /// Collection index of each eligible entry.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// `(count / scale)^exponent` for each eligible entry, where `scale` is
    /// the largest count (smallest for a negative exponent).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Cumulative distribution over [`weights`](Self::weights).
    pub fn cumulative(&self) -> Result<CumulativeWeights, SampleError> {
        CumulativeWeights::from_weights(&self.weights)
    }
}

#[derive(Debug, Clone)]
struct Calibration {
    exponent: f64,
    positions: Vec<usize>,
    cumulative: Option<CumulativeWeights>,
}

/// An insertion-ordered multiset drawing items in proportion to their counts.
///
/// `E` decides item identity; the default is [`DeepEqual`] over
/// [`Value`](crate::Value).
#[derive(Debug, Clone)]
pub struct Multiset<T, E = DeepEqual> {
    entries: Vec<Entry<T>>,
    equivalence: E,
    recalibration: Recalibration,
    calibration: Option<Calibration>,
}

impl<T> Multiset<T, DeepEqual>
where
    DeepEqual: Equivalence<T>,
{
    /// Create an empty multiset using structural deep equality.
    pub fn new() -> Self {
        Self::with_equivalence(DeepEqual)
    }
}

impl<T, E: Default> Default for Multiset<T, E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            equivalence: E::default(),
            recalibration: Recalibration::Lazy,
            calibration: None,
        }
    }
}

impl<T, E: Equivalence<T>> Multiset<T, E> {
    /// Create an empty multiset with a custom identity relation.
    pub fn with_equivalence(equivalence: E) -> Self {
        Self {
            entries: Vec::new(),
            equivalence,
            recalibration: Recalibration::Lazy,
            calibration: None,
        }
    }

    /// Set the recalibration mode.
    pub fn with_recalibration(mut self, recalibration: Recalibration) -> Self {
        self.recalibration = recalibration;
        self.recalibrate();
        self
    }

    pub fn recalibration(&self) -> Recalibration {
        self.recalibration
    }

    /// Number of stored entries, zero-count ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0, |acc, e| acc.saturating_add(e.count))
    }

    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    /// `(item, count)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, u64)> + '_ {
        self.entries.iter().map(|e| (&e.item, e.count))
    }

    /// Position of the entry equivalent to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| self.equivalence.equivalent(&e.item, item))
    }

    /// Whether an entry equivalent to `item` is stored, whatever its count.
    #[inline]
    pub fn has(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    /// Item stored at `index`.
    pub fn at(&self, index: usize) -> Option<&T> {
        self.entries.get(index).map(|e| &e.item)
    }

    /// Count of the entry equivalent to `item`, or 0 when absent.
    pub fn count_of(&self, item: &T) -> u64 {
        self.index_of(item).map_or(0, |i| self.entries[i].count)
    }

    /// Count at `index`, or 0 when out of range.
    pub fn count_at(&self, index: usize) -> u64 {
        self.entries.get(index).map_or(0, |e| e.count)
    }

    /// Add one occurrence of `item` and return its new count.
    ///
    /// An unseen item is appended at index `len()` with count 1.
    pub fn add(&mut self, item: T) -> u64 {
        let count = match self.index_of(&item) {
            Some(i) => {
                let entry = &mut self.entries[i];
                entry.count = entry.count.saturating_add(1);
                entry.count
            }
            None => {
                log::trace!("add: new entry at index {}", self.entries.len());
                self.entries.push(Entry { item, count: 1 });
                1
            }
        };
        self.recalibrate();
        count
    }

    /// Remove one occurrence of `item`.
    ///
    /// Returns the new count, floored at 0, or `None` if `item` is not
    /// stored. The entry stays in place when its count reaches 0.
    pub fn remove(&mut self, item: &T) -> Option<u64> {
        let i = self.index_of(item)?;
        let entry = &mut self.entries[i];
        entry.count = entry.count.saturating_sub(1);
        let count = entry.count;
        self.recalibrate();
        Some(count)
    }

    /// Set the count of `item` to 0, keeping the entry. Returns its index.
    pub fn purge(&mut self, item: &T) -> Option<usize> {
        let i = self.index_of(item)?;
        self.entries[i].count = 0;
        log::trace!("purge: zeroed entry at index {i}");
        self.recalibrate();
        Some(i)
    }

    /// Remove the entry for `item` and return the index it occupied.
    ///
    /// Every later entry moves down by one position.
    pub fn delete(&mut self, item: &T) -> Option<usize> {
        let i = self.index_of(item)?;
        self.entries.remove(i);
        log::trace!("delete: removed entry at index {i}");
        self.recalibrate();
        Some(i)
    }

    /// Project entries with a positive count onto weights proportional to
    /// `count^exponent`.
    ///
    /// The largest weight is 1; weights too small for `f64` become 0.
    pub fn weights(&self, exponent: f64) -> WeightVector {
        let mut projection = WeightVector::default();
        let positive = || self.entries.iter().map(|e| e.count).filter(|&c| c > 0);
        let scale = if exponent < 0.0 {
            positive().min()
        } else {
            positive().max()
        };
        let Some(scale) = scale else {
            return projection;
        };
        let scale = scale as f64;

        for (i, entry) in self.entries.iter().enumerate() {
            if entry.count == 0 {
                continue;
            }
            projection.positions.push(i);
            projection
                .weights
                .push((entry.count as f64 / scale).powf(exponent));
        }
        projection
    }

    /// Draw an item with probability proportional to `count^exponent`.
    ///
    /// Returns `None` when no entry has a positive count or `exponent` is NaN.
    pub fn get(&self, exponent: f64) -> Option<&T> {
        let mut rng = rand::rng();
        self.get_with_rng(exponent, &mut rng)
    }

    /// Draw an item in proportion to its count (`get(1.0)`).
    pub fn sample(&self) -> Option<&T> {
        self.get(1.0)
    }

    /// [`get`](Self::get) with a caller-supplied RNG.
    pub fn get_with_rng<R: Rng + ?Sized>(&self, exponent: f64, rng: &mut R) -> Option<&T> {
        let position = match &self.calibration {
            Some(cal) if cal.exponent.to_bits() == exponent.to_bits() => {
                let cumulative = cal.cumulative.as_ref()?;
                cal.positions[cumulative.sample_with_rng(rng)]
            }
            _ => {
                let projection = self.weights(exponent);
                let cumulative = calibrate(&projection, exponent)?;
                projection.positions[cumulative.sample_with_rng(rng)]
            }
        };
        Some(&self.entries[position].item)
    }

    fn recalibrate(&mut self) {
        let Recalibration::Eager { exponent } = self.recalibration else {
            self.calibration = None;
            return;
        };
        let projection = self.weights(exponent);
        let cumulative = calibrate(&projection, exponent);
        self.calibration = Some(Calibration {
            exponent,
            positions: projection.positions,
            cumulative,
        });
    }
}

/// Cumulative distribution for a projection, or `None` if nothing can be drawn.
fn calibrate(projection: &WeightVector, exponent: f64) -> Option<CumulativeWeights> {
    if projection.is_empty() {
        log::debug!("no entry with a positive count, nothing to draw");
        return None;
    }
    if exponent.is_nan() {
        log::warn!("exponent is NaN, nothing to draw");
        return None;
    }
    match projection.cumulative() {
        Ok(cumulative) => Some(cumulative),
        Err(err) => {
            log::warn!("exponent {exponent} gives unusable weights: {err}");
            None
        }
    }
}

impl<T, E: Equivalence<T>> Extend<T> for Multiset<T, E> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T, E: Equivalence<T> + Default> FromIterator<T> for Multiset<T, E> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut multiset = Self::default();
        multiset.extend(iter);
        multiset
    }
}
