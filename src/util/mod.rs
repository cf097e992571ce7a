/// Order-preserving map (de)serialization for transition tables.
pub mod ordered;

pub use ordered::OrderedEntries;
