use core::hash::BuildHasher;
use core::hash::Hasher;

/// A hasher that sums the bytes written to it.
///
/// The digest of a key is the wrapping sum of its bytes. This distributes
/// poorly (any permutation of the same bytes collides) and exists to make
/// collision handling observable: feed it keys whose byte sums are equal or
/// congruent modulo the bucket count and the table's chains grow in a
/// predictable way.
///
/// Integer writes go through the byte sum as well, so the digest of an
/// integer is the sum of its bytes regardless of endianness.
///
/// # Examples
///
/// ```rust
/// use core::hash::Hasher;
///
/// use chain_hash::hasher::AdditiveHasher;
///
/// let mut hasher = AdditiveHasher::default();
/// hasher.write(b"abc");
/// assert_eq!(hasher.finish(), 97 + 98 + 99);
///
/// let mut ab = AdditiveHasher::default();
/// ab.write(b"ab");
/// let mut ba = AdditiveHasher::default();
/// ba.write(b"ba");
/// assert_eq!(ab.finish(), ba.finish());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AdditiveHasher {
    sum: u64,
}

impl Hasher for AdditiveHasher {
    fn finish(&self) -> u64 {
        self.sum
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.sum = self.sum.wrapping_add(u64::from(byte));
        }
    }
}

/// A [`BuildHasher`] producing [`AdditiveHasher`]s.
///
/// Useful as the hasher of a map or set when demonstrating or testing
/// collision behavior; see [`AdditiveHasher`] for the digest definition. Not
/// suitable as a general-purpose hasher.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashMap;
/// use chain_hash::hasher::AdditiveState;
///
/// let mut map = HashMap::with_hasher(AdditiveState::new());
/// map.insert("listen", 1);
/// map.insert("silent", 2);
///
/// // The keys share a digest but remain distinct entries.
/// assert_eq!(map.get(&"listen"), Some(&1));
/// assert_eq!(map.get(&"silent"), Some(&2));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AdditiveState;

impl AdditiveState {
    /// Creates a new `AdditiveState`.
    pub const fn new() -> Self {
        AdditiveState
    }
}

impl BuildHasher for AdditiveState {
    type Hasher = AdditiveHasher;

    fn build_hasher(&self) -> Self::Hasher {
        AdditiveHasher::default()
    }
}
