//! Shared data types: collections, identifiers, source spans.

pub mod collections;
pub mod identifiers;
pub mod span;

pub use collections::{FxHashSet, SmallVec4};
pub use identifiers::CompilationId;
pub use span::SourceSpan;
