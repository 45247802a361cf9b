//! A compressed prefix tree (PATRICIA-style radix tree) mapping
//! byte-comparable keys to values: exact lookup, longest-prefix match,
//! prefix enumeration, and ordered iteration.

mod arena;
mod children;
mod fragment;
mod node;

pub mod iter;
pub mod keys;
pub mod stats;
pub mod tree;

pub use iter::{Iter, Keys, Matches, Values};
pub use keys::RadixKey;
pub use stats::TreeStats;
pub use tree::{Cursor, RadixMap};
