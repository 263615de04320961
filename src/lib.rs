//! `kujibako`: a lottery box of counted items.
//!
//! A [`Multiset`] stores distinct items with integer multiplicities and draws
//! an item with probability proportional to its count, optionally raised to
//! an exponent. Identity is decided by a pluggable [`Equivalence`]; the
//! default is structural deep equality over [`Value`].
//!
//! Exposed modules:
//! - `multiset`: the counted collection and its weighted draw.
//! - `sampler`: cumulative-weight index sampling over plain `f64` weights.
//! - `equivalence`: identity relations (`DeepEqual`, `NativeEq`, closures).
//! - `value`: tagged value model (primitive / sequence / keyed structure).
//!
//! ```
//! use kujibako::{Multiset, Value};
//!
//! let mut bag = Multiset::new();
//! bag.add(Value::from("a"));
//! bag.add(Value::from("b"));
//! bag.add(Value::from("b"));
//! assert_eq!(bag.count_of(&Value::from("b")), 2);
//! assert!(bag.get(1.0).is_some());
//! ```

#![forbid(unsafe_code)]

pub mod equivalence;
pub mod multiset;
pub mod sampler;
pub mod value;

pub use equivalence::{deep_equal, DeepEqual, Equivalence, NativeEq};
pub use multiset::{Entry, Multiset, Recalibration, WeightVector};
pub use sampler::{sample_index, sample_index_with_rng, CumulativeWeights, SampleError};
pub use value::Value;
