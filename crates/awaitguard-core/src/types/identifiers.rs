//! Compilation identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

/// Identity of a compilation.
///
/// Two handles with the same id are treated as the same compilation: the
/// policy resolved for one is reused for the other. Hosts that derive the id
/// with [`CompilationId::derive`] get a new id whenever the declared
/// configuration changes, which is what invalidates a cached policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompilationId(pub u64);

impl CompilationId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Derive an id from the compilation name and the parts of its declared
    /// configuration. Parts are length-prefixed, so `["ab", "c"]` and
    /// `["a", "bc"]` hash differently.
    pub fn derive<I, P>(name: &str, parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut hasher = Xxh3::new();
        write_part(&mut hasher, name.as_bytes());
        for part in parts {
            write_part(&mut hasher, part.as_ref());
        }
        Self(hasher.digest())
    }
}

fn write_part(hasher: &mut Xxh3, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

impl fmt::Display for CompilationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
