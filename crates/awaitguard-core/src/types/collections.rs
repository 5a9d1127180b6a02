//! Re-exports of performance-oriented collection types.

pub use rustc_hash::FxHashSet;
pub use smallvec::SmallVec;

/// SmallVec sized for assembly-level attribute lists (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
