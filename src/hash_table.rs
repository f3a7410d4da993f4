use alloc::vec::Vec;
use core::fmt::Debug;

/// Number of buckets allocated by [`HashTable::new`].
pub const DEFAULT_CAPACITY: usize = 8;

/// Numerator of the load factor limit.
///
/// Together with [`MAX_LOAD_DENOMINATOR`] this fixes the growth threshold:
/// the table grows as soon as `len / capacity` exceeds 7/10 after an insert
/// that added an entry.
pub const MAX_LOAD_NUMERATOR: usize = 7;

/// Denominator of the load factor limit. See [`MAX_LOAD_NUMERATOR`].
pub const MAX_LOAD_DENOMINATOR: usize = 10;

/// Factor applied to the bucket count each time the table grows.
pub const GROWTH_FACTOR: usize = 2;

#[inline(always)]
fn bucket_index(hash: u64, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0);
    (hash % bucket_count as u64) as usize
}

#[inline(always)]
fn over_load_factor(populated: usize, bucket_count: usize) -> bool {
    populated as u128 * MAX_LOAD_DENOMINATOR as u128
        > bucket_count as u128 * MAX_LOAD_NUMERATOR as u128
}

fn empty_buckets<V>(count: usize) -> Vec<Vec<(u64, V)>> {
    let mut buckets = Vec::with_capacity(count);
    buckets.resize_with(count, Vec::new);
    buckets
}

/// Chain and utilization statistics for a [`HashTable`].
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct TableStats {
    /// Number of entries currently in the table
    pub populated: usize,
    /// Number of buckets in the table
    pub buckets: usize,
    /// Number of buckets holding at least one entry
    pub occupied_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Load factor (populated / buckets)
    pub load_factor: f64,
    /// Mean entries per occupied bucket
    pub mean_occupied_chain: f64,
    /// Total memory in bytes used by the bucket store
    pub total_bytes: usize,
    /// Estimated wasted memory in bytes
    pub wasted_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl TableStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Statistics ===");
        println!(
            "Population: {} entries in {} buckets ({:.2} load factor)",
            self.populated, self.buckets, self.load_factor
        );
        println!(
            "Buckets: {}/{} occupied ({:.2} entries per occupied bucket)",
            self.occupied_buckets, self.buckets, self.mean_occupied_chain
        );
        println!("Longest Chain: {} entries", self.longest_chain);
        println!("Total Allocated: {} bytes", self.total_bytes);
        println!(
            "Wasted: {} bytes ({:.2}% of allocation)",
            self.wasted_bytes,
            if self.total_bytes == 0 {
                0.0
            } else {
                (self.wasted_bytes as f64 / self.total_bytes as f64) * 100.0
            }
        );
    }
}

/// A hash table using separate chaining with load-factor-driven growth.
///
/// `HashTable<V>` stores values of type `V` in an array of buckets, each
/// holding a chain of entries. Unlike standard hash maps, this implementation
/// requires you to provide both the hash value and an equality predicate for
/// each operation; the table never hashes values itself.
///
/// Each entry's bucket is its hash modulo the bucket count. Entries whose
/// hashes are equal, or merely congruent modulo the bucket count, share a
/// chain; lookups scan the home chain and use the stored hash as a cheap
/// filter before calling the equality predicate. Once the number of entries
/// exceeds [`MAX_LOAD_NUMERATOR`]/[`MAX_LOAD_DENOMINATOR`] of the bucket
/// count, the bucket array grows by [`GROWTH_FACTOR`] and every entry is
/// rehomed by its stored hash. Capacity never shrinks.
///
/// ## Costs
///
/// Each entry stores a `u64` hash alongside `V`, and each bucket carries a
/// `Vec` header. Lookups are expected constant time, worst case linear in the
/// length of a single chain.
///
/// ## Example
///
/// ```rust
/// # use core::hash::BuildHasher;
/// #
/// # use chain_hash::hash_table::HashTable;
/// # use chain_hash::hasher::AdditiveState;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # let state = AdditiveState::new();
///
/// let mut table = HashTable::with_capacity(100);
/// let hash = state.hash_one(123u64);
///
/// // Insert a person
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     chain_hash::hash_table::Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     chain_hash::hash_table::Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    buckets: Vec<Vec<(u64, V)>>,
    populated: usize,
}

impl<V> Debug for HashTable<V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("populated", &self.populated)
            .field("buckets", &self.buckets)
            .finish()
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates a new hash table with [`DEFAULT_CAPACITY`] buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::new();
    /// assert_eq!(table.capacity(), 8);
    /// assert!(table.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a new hash table with the specified number of buckets.
    ///
    /// The bucket count is kept at least 1; a request for zero buckets is
    /// rounded up. Any bucket count works, not just powers of two.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 100);
    ///
    /// let tiny: HashTable<String> = HashTable::with_capacity(0);
    /// assert_eq!(tiny.capacity(), 1);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(1)),
            populated: 0,
        }
    }

    /// Returns an iterator over all values in the table.
    ///
    /// The iterator yields `&V` references in an arbitrary order.
    /// The iteration order is not specified and may change between versions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table
    ///     .entry(state.hash_one("key1"), |s: &String| s == "key1")
    ///     .or_insert("key1".to_string());
    /// table
    ///     .entry(state.hash_one("key2"), |s: &String| s == "key2")
    ///     .or_insert("key2".to_string());
    ///
    /// for value in table.iter() {
    ///     println!("Value: {}", value);
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: [].iter(),
        }
    }

    /// Returns an iterator that removes and yields all values from the table.
    ///
    /// After calling `drain()`, the table will be empty. The iterator yields
    /// owned values in an arbitrary order. Dropping the iterator before it is
    /// exhausted removes the remaining values; the bucket count is preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table
    ///     .entry(state.hash_one("key1"), |s: &String| s == "key1")
    ///     .or_insert("key1".to_string());
    ///
    /// let values: Vec<String> = table.drain().collect();
    /// assert!(table.is_empty());
    /// assert_eq!(values.len(), 1);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        Drain {
            table: self,
            bucket_index: 0,
        }
    }

    /// Returns `true` if the table contains no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<i32> = HashTable::with_capacity(10);
    /// assert!(table.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of elements in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// assert_eq!(table.len(), 0);
    ///
    /// table.entry(state.hash_one(1), |&n: &u64| n == 1).or_insert(1);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns the current capacity of the table, measured in buckets.
    ///
    /// The capacity only grows. The table holds up to
    /// [`MAX_LOAD_NUMERATOR`]/[`MAX_LOAD_DENOMINATOR`] of this many entries
    /// before the next insert doubles it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<i32> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 100);
    /// ```
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Removes all elements from the table.
    ///
    /// This operation preserves the table's bucket count. All values are
    /// properly dropped if they implement `Drop`. After calling `clear()`, the
    /// table will be empty but maintain its current capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(state.hash_one(1), |&n: &u64| n == 1).or_insert(1);
    /// table.entry(state.hash_one(2), |&n: &u64| n == 2).or_insert(2);
    /// assert_eq!(table.len(), 2);
    ///
    /// table.clear();
    /// assert_eq!(table.len(), 0);
    /// assert_eq!(table.capacity(), 10);
    /// ```
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.populated = 0;
    }

    /// Reserves capacity for at least `additional` more elements.
    ///
    /// Grows the bucket count by doubling, with a single rehash, until
    /// `self.len() + additional` entries fit without crossing the load factor
    /// limit. Does nothing if the current capacity is already sufficient.
    ///
    /// # Arguments
    ///
    /// * `additional` - The number of additional elements the table should be
    ///   able to hold without growing
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table: HashTable<i32> = HashTable::new();
    /// table.reserve(100);
    /// assert!(table.capacity() >= 100);
    ///
    /// // The reserved table absorbs 100 inserts without growing again.
    /// let capacity = table.capacity();
    /// for i in 0..100 {
    ///     table.entry(state.hash_one(i as u64), |&n: &i32| n == i).or_insert(i);
    /// }
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let required = self.populated.saturating_add(additional);
        if !over_load_factor(required, self.buckets.len()) {
            return;
        }

        let mut new_count = self.buckets.len();
        while over_load_factor(required, new_count) {
            new_count = new_count
                .checked_mul(GROWTH_FACTOR)
                .expect("bucket count overflow");
        }
        self.rehash(new_count);
    }

    /// Retains only the values matching the predicate.
    ///
    /// Removes every value `v` for which `f(&mut v)` returns `false`. The
    /// bucket count is preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table: HashTable<u64> = HashTable::new();
    /// for k in 0..10u64 {
    ///     table.entry(state.hash_one(k), |&n: &u64| n == k).or_insert(k);
    /// }
    ///
    /// table.retain(|&mut n| n % 2 == 0);
    /// assert_eq!(table.len(), 5);
    /// assert!(table.find(state.hash_one(3), |&n| n == 3).is_none());
    /// assert!(table.find(state.hash_one(4), |&n| n == 4).is_some());
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&mut V) -> bool) {
        let mut kept = 0;
        for chain in &mut self.buckets {
            chain.retain_mut(|(_, value)| f(value));
            kept += chain.len();
        }
        self.populated = kept;
    }

    /// Finds a value in the table by hash and equality predicate.
    ///
    /// Returns a reference to the value if found, or `None` if no matching
    /// value exists. This method does not modify the table and can be
    /// called on shared references.
    ///
    /// # Arguments
    ///
    /// * `hash` - The hash value to search for
    /// * `eq` - A predicate function that returns `true` for the desired value
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(state.hash_one(42), |&n: &u64| n == 42).or_insert(42);
    ///
    /// // Hit
    /// let found = table.find(state.hash_one(42), |&n| n == 42);
    /// assert_eq!(found, Some(&42));
    ///
    /// // Miss
    /// let not_found = table.find(state.hash_one(99), |&n| n == 99);
    /// assert_eq!(not_found, None);
    /// ```
    #[inline]
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        if self.populated == 0 {
            return None;
        }

        let bucket = bucket_index(hash, self.buckets.len());
        self.buckets[bucket]
            .iter()
            .find(|(stored, value)| *stored == hash && eq(value))
            .map(|(_, value)| value)
    }

    /// Finds a value in the table by hash and equality predicate, returning a
    /// mutable reference.
    ///
    /// Returns a mutable reference to the value if found, or `None` if no
    /// matching value exists. This method allows modification of values
    /// in-place without removing and re-inserting them.
    ///
    /// # Arguments
    ///
    /// * `hash` - The hash value to search for
    /// * `eq` - A predicate function that returns `true` for the desired value
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(state.hash_one(42), |&n: &u64| n == 42).or_insert(42);
    ///
    /// // Modify in place
    /// if let Some(value) = table.find_mut(state.hash_one(42), |&n| n == 42) {
    ///     *value = 100;
    /// }
    ///
    /// let found = table.find(state.hash_one(42), |&n| n == 100);
    /// assert_eq!(found, Some(&100));
    ///
    /// // Miss
    /// let not_found = table.find_mut(state.hash_one(99), |&n| n == 99);
    /// assert_eq!(not_found, None);
    /// ```
    #[inline]
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        if self.populated == 0 {
            return None;
        }

        let bucket = bucket_index(hash, self.buckets.len());
        self.buckets[bucket]
            .iter_mut()
            .find(|(stored, value)| *stored == hash && eq(value))
            .map(|(_, value)| value)
    }

    /// Removes and returns a value from the table.
    ///
    /// The value is identified by its hash and an equality predicate. If the
    /// value is found, it is removed from the table and returned.
    /// Otherwise, `None` is returned. Removal never shrinks the table.
    ///
    /// # Arguments
    ///
    /// * `hash` - The hash value of the entry to remove
    /// * `eq` - A predicate function that returns `true` for the value to
    ///   remove
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(state.hash_one(42), |&n: &u64| n == 42).or_insert(42);
    ///
    /// let removed = table.remove(state.hash_one(42), |&n| n == 42);
    /// assert_eq!(removed, Some(42));
    /// assert!(table.is_empty());
    ///
    /// // A second remove misses
    /// let not_found = table.remove(state.hash_one(99), |&n| n == 99);
    /// assert_eq!(not_found, None);
    /// ```
    #[inline]
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        if self.populated == 0 {
            return None;
        }

        let bucket = bucket_index(hash, self.buckets.len());
        let index = self.buckets[bucket]
            .iter()
            .position(|(stored, value)| *stored == hash && eq(value))?;

        self.populated -= 1;
        // Chain order is not part of the contract, so the cheap removal is
        // fine.
        let (_, value) = self.buckets[bucket].swap_remove(index);
        Some(value)
    }

    /// Gets an entry for the given hash and equality predicate.
    ///
    /// This method returns an `Entry` enum that allows for efficient insertion
    /// or modification of values. The entry API provides zero-cost abstractions
    /// for common patterns like "insert if not exists" or "update if exists".
    ///
    /// Inserting through a vacant entry may grow the table; see
    /// [`VacantEntry::insert`].
    ///
    /// # Arguments
    ///
    /// * `hash` - The hash value for the entry
    /// * `eq` - A predicate function that returns `true` for matching values
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = state.hash_one("hello");
    ///
    /// // Upsert by matching on the entry
    /// match table.entry(hash, |s: &String| s == "hello") {
    ///     chain_hash::hash_table::Entry::Vacant(entry) => {
    ///         entry.insert("world".to_string());
    ///     }
    ///     chain_hash::hash_table::Entry::Occupied(mut entry) => {
    ///         *entry.get_mut() = "updated".to_string();
    ///     }
    /// }
    ///
    /// // Or collapse the match with or_insert
    /// table
    ///     .entry(hash, |s: &String| s == "hello")
    ///     .or_insert("hello".to_string());
    /// ```
    #[inline(always)]
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        let bucket = bucket_index(hash, self.buckets.len());
        match self.buckets[bucket]
            .iter()
            .position(|(stored, value)| *stored == hash && eq(value))
        {
            Some(index) => Entry::Occupied(OccupiedEntry {
                table: self,
                bucket,
                index,
            }),
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    #[cold]
    fn grow(&mut self) {
        let new_count = self
            .buckets
            .len()
            .checked_mul(GROWTH_FACTOR)
            .expect("bucket count overflow");
        self.rehash(new_count);
    }

    /// Rebuild the bucket store at `new_count` buckets, rehoming every entry
    /// by its stored hash. The new store replaces the old one only after all
    /// entries have moved.
    fn rehash(&mut self, new_count: usize) {
        let old_buckets = core::mem::take(&mut self.buckets);
        let mut new_buckets = empty_buckets(new_count);
        for chain in old_buckets {
            for (hash, value) in chain {
                new_buckets[bucket_index(hash, new_count)].push((hash, value));
            }
        }
        self.buckets = new_buckets;
    }

    /// Computes a histogram of chain lengths for the current table state.
    ///
    /// Index `i` of the returned vector counts the buckets whose chain holds
    /// exactly `i` entries, so index 0 counts empty buckets and the final
    /// index is the length of the longest chain.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> Vec<usize> {
        let longest = self.buckets.iter().map(Vec::len).max().unwrap_or(0);
        let mut hist = alloc::vec![0usize; longest + 1];
        for chain in &self.buckets {
            hist[chain.len()] += 1;
        }
        hist
    }

    /// Returns chain and utilization statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn stats(&self) -> TableStats {
        let occupied_buckets = self
            .buckets
            .iter()
            .filter(|chain| !chain.is_empty())
            .count();
        let entry_slots: usize = self.buckets.iter().map(Vec::capacity).sum();

        TableStats {
            populated: self.populated,
            buckets: self.buckets.len(),
            occupied_buckets,
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
            load_factor: self.populated as f64 / self.buckets.len() as f64,
            mean_occupied_chain: if occupied_buckets == 0 {
                0.0
            } else {
                self.populated as f64 / occupied_buckets as f64
            },
            total_bytes: self.buckets.capacity() * core::mem::size_of::<Vec<(u64, V)>>()
                + entry_slots * core::mem::size_of::<(u64, V)>(),
            wasted_bytes: (entry_slots - self.populated) * core::mem::size_of::<(u64, V)>(),
        }
    }

    /// Pretty-prints the chain-length histogram horizontally using stdout.
    ///
    /// Requires the `std` feature. Produces a horizontal bar chart with one
    /// row per chain length occurring in the table.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_chain_histogram(&self) {
        let hist = self.chain_histogram();
        let max = *hist.iter().max().unwrap_or(&0);
        if max == 0 {
            println!("chain histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("chain histogram ({} entries):", self.populated);

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let full = units / 8;
            let rem = units % 8;
            let mut bar = "█".repeat(full);
            if rem > 0 {
                let ch = match rem {
                    1 => '▏',
                    2 => '▎',
                    3 => '▍',
                    4 => '▌',
                    5 => '▋',
                    6 => '▊',
                    7 => '▉',
                    _ => unreachable!(),
                };
                bar.push(ch);
            }
            bar
        };

        for (len, &count) in hist.iter().enumerate() {
            println!("{:>3} | {} ({})", len, make_bar(count), count);
        }
    }
}

/// A view into a single entry in the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
/// It provides efficient APIs for insertion and modification operations.
///
/// [`entry`]: HashTable::entry
///
/// # Examples
///
/// ```rust
/// # use core::hash::BuildHasher;
/// #
/// # use chain_hash::hash_table::Entry;
/// # use chain_hash::hash_table::HashTable;
/// # use chain_hash::hasher::AdditiveState;
/// #
/// # let state = AdditiveState::new();
///
/// let mut table = HashTable::with_capacity(10);
/// let hash = state.hash_one("key");
///
/// match table.entry(hash, |s: &String| s == "key") {
///     Entry::Vacant(entry) => {
///         entry.insert("value".to_string());
///     }
///     Entry::Occupied(entry) => {
///         println!("Key already exists with value: {}", entry.get());
///     }
/// }
/// ```
pub enum Entry<'a, V> {
    /// A vacant entry - the key is not present in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - the key is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    ///
    /// If the entry is occupied, returns a mutable reference to the existing
    /// value. This method provides a convenient way to implement "insert or
    /// get" semantics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = state.hash_one("key");
    ///
    /// // First call inserts
    /// let value = table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    /// assert_eq!(value, "key");
    ///
    /// // Second call returns the stored value
    /// let existing = table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("other".to_string());
    /// assert_eq!(existing, "key");
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    ///
    /// If the entry is occupied, returns a mutable reference to the existing
    /// value. If the entry is vacant, calls the provided closure to compute
    /// the value and inserts it.
    ///
    /// # Arguments
    ///
    /// * `default` - A closure that returns the value to insert if the entry is
    ///   vacant
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = state.hash_one("key");
    ///
    /// // The closure runs only on a miss
    /// let value = table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert_with(|| "key".to_string());
    /// assert_eq!(value, "key");
    ///
    /// // Second call returns the stored value without running the closure
    /// let existing = table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert_with(|| panic!("Should not be called"));
    /// assert_eq!(existing, "key");
    /// ```
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the table.
    ///
    /// If the entry is occupied, applies the provided closure to the existing
    /// value and returns a mutable reference to it. If the entry is vacant,
    /// returns `None` without inserting anything.
    ///
    /// # Arguments
    ///
    /// * `f` - A closure that modifies the existing value
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = state.hash_one(42);
    ///
    /// // Nothing stored yet, so and_modify is a no-op
    /// let result = table
    ///     .entry(hash, |&n: &u64| n == 42)
    ///     .and_modify(|v| *v += 1);
    /// assert_eq!(result, None);
    ///
    /// // Store something
    /// table.entry(hash, |&n: &u64| n == 42).or_insert(42);
    ///
    /// // Present now, so the closure runs
    /// let result = table
    ///     .entry(hash, |&n: &u64| n == 42)
    ///     .and_modify(|v| *v += 1);
    /// assert_eq!(result, Some(&mut 43));
    /// ```
    ///
    /// This method is useful for implementing "update if exists" semantics
    /// without inserting a default value when the key is not present.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Option<&'a mut V> {
        match self {
            Entry::Occupied(entry) => {
                let value = entry.into_mut();
                f(value);
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    ///
    /// If the entry is occupied, returns a mutable reference to the existing
    /// value. If the entry is vacant, inserts the default value for type `V`
    /// and returns a mutable reference to it.
    ///
    /// This method requires that `V` implements the `Default` trait.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table: HashTable<Vec<i32>> = HashTable::with_capacity(10);
    /// let hash = state.hash_one("key");
    ///
    /// // A vacant entry materializes the default
    /// let vec_ref = table.entry(hash, |v: &Vec<i32>| v.is_empty()).or_default();
    /// vec_ref.push(1);
    /// vec_ref.push(2);
    ///
    /// assert_eq!(
    ///     table.find(hash, |v: &Vec<i32>| !v.is_empty()),
    ///     Some(&vec![1, 2])
    /// );
    /// ```
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the hash table.
///
/// This struct is created by the [`entry`] method on [`HashTable`] when the
/// requested key is not present in the table. It provides methods to insert
/// a value into the vacant slot.
///
/// [`entry`]: HashTable::entry
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value into the vacant entry and returns a mutable reference to
    /// it.
    ///
    /// The value is appended to the chain of its home bucket. If the new entry
    /// pushes the load factor over
    /// [`MAX_LOAD_NUMERATOR`]/[`MAX_LOAD_DENOMINATOR`], the table grows by
    /// [`GROWTH_FACTOR`] and rehashes before this method returns, so the
    /// returned reference always points into the current bucket store.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = state.hash_one("key");
    ///
    /// match table.entry(hash, |s: &String| s == "key") {
    ///     Entry::Vacant(entry) => {
    ///         let value_ref = entry.insert("value".to_string());
    ///         assert_eq!(value_ref, "value");
    ///     }
    ///     Entry::Occupied(_) => unreachable!("Entry should be vacant"),
    /// }
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        let hash = self.hash;

        let bucket = bucket_index(hash, table.buckets.len());
        table.buckets[bucket].push((hash, value));
        table.populated += 1;

        if !over_load_factor(table.populated, table.buckets.len()) {
            let index = table.buckets[bucket].len() - 1;
            return &mut table.buckets[bucket][index].1;
        }

        table.grow();

        // Rehashing preserves chain order and the new entry went in behind
        // every older entry sharing its hash, so it is the last hash match in
        // its new chain.
        let bucket = bucket_index(hash, table.buckets.len());
        let index = table.buckets[bucket]
            .iter()
            .rposition(|(stored, _)| *stored == hash)
            .expect("entry relocated by rehash");
        &mut table.buckets[bucket][index].1
    }
}

/// A view into an occupied entry in the hash table.
///
/// This struct is created by the [`entry`] method on [`HashTable`] when the
/// requested key is present in the table. It provides methods to access,
/// modify, or remove the existing value.
///
/// [`entry`]: HashTable::entry
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    bucket: usize,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = state.hash_one("key");
    /// table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    ///
    /// match table.entry(hash, |s: &String| s == "key") {
    ///     Entry::Occupied(entry) => {
    ///         assert_eq!(entry.get(), "key");
    ///     }
    ///     Entry::Vacant(_) => unreachable!(),
    /// }
    /// ```
    pub fn get(&self) -> &V {
        &self.table.buckets[self.bucket][self.index].1
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = state.hash_one(1);
    /// table.entry(hash, |&n: &u64| n == 1).or_insert(1);
    ///
    /// if let Entry::Occupied(mut entry) = table.entry(hash, |&n: &u64| n == 1) {
    ///     *entry.get_mut() += 10;
    /// }
    ///
    /// assert_eq!(table.find(hash, |&n| n == 11), Some(&11));
    /// ```
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.buckets[self.bucket][self.index].1
    }

    /// Converts the entry into a mutable reference with the lifetime of the
    /// table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = state.hash_one("key");
    /// table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    ///
    /// let value_ref = match table.entry(hash, |s: &String| s == "key") {
    ///     Entry::Occupied(entry) => entry.into_mut(),
    ///     Entry::Vacant(_) => unreachable!(),
    /// };
    /// *value_ref = "new_value".to_string();
    /// ```
    pub fn into_mut(self) -> &'a mut V {
        &mut self.table.buckets[self.bucket][self.index].1
    }

    /// Removes the entry from the table and returns its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use chain_hash::hasher::AdditiveState;
    /// #
    /// # let state = AdditiveState::new();
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = state.hash_one(42);
    /// table.entry(hash, |&n: &u64| n == 42).or_insert(42);
    ///
    /// if let Entry::Occupied(entry) = table.entry(hash, |&n: &u64| n == 42) {
    ///     assert_eq!(entry.remove(), 42);
    /// }
    /// assert!(table.is_empty());
    /// ```
    pub fn remove(self) -> V {
        self.table.populated -= 1;
        self.table.buckets[self.bucket].swap_remove(self.index).1
    }
}

/// An iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`iter`] method on [`HashTable`].
/// It yields `&V` references in an arbitrary order.
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Vec<(u64, V)>>,
    chain: core::slice::Iter<'a, (u64, V)>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, value)) = self.chain.next() {
                return Some(value);
            }

            self.chain = self.buckets.next()?.iter();
        }
    }
}

/// A draining iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`].
/// It yields owned `V` values and empties the table as it iterates. Dropping
/// the iterator removes any values it has not yielded yet.
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, V> {
    table: &'a mut HashTable<V>,
    bucket_index: usize,
}

impl<V> Drop for Drain<'_, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        while self.bucket_index < self.table.buckets.len() {
            if let Some((_, value)) = self.table.buckets[self.bucket_index].pop() {
                self.table.populated -= 1;
                return Some(value);
            }

            self.bucket_index += 1;
        }

        None
    }
}

/// An owning iterator over the values in a [`HashTable`].
///
/// This struct is created by the `into_iter` method on [`HashTable`].
/// It yields owned `V` values in an arbitrary order.
pub struct IntoIter<V> {
    buckets: alloc::vec::IntoIter<Vec<(u64, V)>>,
    chain: alloc::vec::IntoIter<(u64, V)>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, value)) = self.chain.next() {
                return Some(value);
            }

            self.chain = self.buckets.next()?.into_iter();
        }
    }
}

impl<V> IntoIterator for HashTable<V> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_iter(),
            chain: Vec::new().into_iter(),
        }
    }
}
