//! HashTable: fixed slot array with separately chained buckets.

use crate::error::TableError;
use crate::hash_function::{HashFunction, Sdbm};
use crate::reentry::ReentryCheck;
use core::borrow::Borrow;
use core::fmt::{self, Display};
use log::{debug, trace};

/// Slot count used by [`HashTable::new`].
pub const DEFAULT_TABLE_SIZE: usize = 4096;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Entries whose keys reduce to the same slot, in insertion order.
type Bucket<K, V> = Vec<Entry<K, V>>;

/// A hash table with a fixed number of slots and one chain per slot.
///
/// Keys are placed by the [`HashFunction`] of their `Display` text and
/// compared with `Eq`. A borrowed lookup form `Q` (for example `str` for
/// `String` keys) must render the same text as the owned key.
pub struct HashTable<K, V, H = Sdbm> {
    hasher: H,
    slots: Box<[Option<Bucket<K, V>>]>,
    len: usize,
    reentry: ReentryCheck,
}

impl<K, V> HashTable<K, V>
where
    K: Display + Eq,
{
    /// An empty table with [`DEFAULT_TABLE_SIZE`] slots.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_TABLE_SIZE)
    }

    /// An empty table with `table_size` slots.
    ///
    /// # Panics
    ///
    /// Panics if `table_size` is zero; use [`HashTable::try_with_size`] to
    /// get an error instead.
    pub fn with_size(table_size: usize) -> Self {
        Self::with_size_and_hasher(table_size, Sdbm)
    }

    /// Like [`HashTable::with_size`], but a zero size is an error.
    ///
    /// # Errors
    ///
    /// [`TableError::ZeroTableSize`] if `table_size` is zero.
    pub fn try_with_size(table_size: usize) -> Result<Self, TableError> {
        Self::try_with_size_and_hasher(table_size, Sdbm)
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Display + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> HashTable<K, V, H>
where
    K: Display + Eq,
    H: HashFunction,
{
    /// # Panics
    ///
    /// Panics if `table_size` is zero.
    pub fn with_size_and_hasher(table_size: usize, hasher: H) -> Self {
        assert!(table_size > 0, "{}", TableError::ZeroTableSize);
        let slots = std::iter::repeat_with(|| None).take(table_size).collect();
        Self {
            hasher,
            slots,
            len: 0,
            reentry: ReentryCheck::new(),
        }
    }

    /// Like [`HashTable::with_size_and_hasher`], but a zero size is an error.
    pub fn try_with_size_and_hasher(table_size: usize, hasher: H) -> Result<Self, TableError> {
        if table_size == 0 {
            return Err(TableError::ZeroTableSize);
        }
        Ok(Self::with_size_and_hasher(table_size, hasher))
    }

    // Renders the key once; the text is kept for `KeyNotFound`. The hasher's
    // slot is reduced again so an out-of-range `HashFunction::slot` cannot
    // index past the table.
    fn locate<Q>(&self, q: &Q) -> (usize, String)
    where
        Q: ?Sized + Display,
    {
        let text = q.to_string();
        let slot = self.hasher.slot(text.as_bytes(), self.slots.len()) % self.slots.len();
        (slot, text)
    }

    fn position<Q>(&self, slot: usize, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.slots[slot]
            .as_ref()?
            .iter()
            .position(|e| e.key.borrow() == q)
    }

    /// Number of slots; fixed at construction.
    pub fn table_size(&self) -> usize {
        self.slots.len()
    }

    /// Number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.len
    }
    /// True when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot index `key` maps to.
    pub fn slot_of<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Display,
    {
        let _op = self.reentry.enter("slot_of");
        self.locate(key).0
    }

    /// Number of entries chained at `slot`; zero for an empty or
    /// out-of-range slot.
    pub fn bucket_len(&self, slot: usize) -> usize {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .map_or(0, Vec::len)
    }

    /// Associate `value` with `key`.
    ///
    /// An existing entry with an equal key keeps its position in the chain
    /// and has only its value replaced; the stored key is not swapped for
    /// `key`.
    pub fn set(&mut self, key: K, value: V) {
        let _op = self.reentry.enter("set");
        let (slot, text) = self.locate(&key);
        let bucket = self.slots[slot].get_or_insert_with(|| {
            debug!("allocating bucket at slot {slot}");
            Vec::new()
        });
        match bucket.iter().position(|e| e.key == key) {
            Some(i) => {
                trace!("set {text:?}: replacing value at slot {slot}, position {i}");
                bucket[i].value = value;
            }
            None => {
                trace!("set {text:?}: appending to slot {slot}");
                bucket.push(Entry { key, value });
                self.len += 1;
            }
        }
    }

    /// Shared reference to the value stored for `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if the key's slot is empty or its chain
    /// holds no equal key.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Display + Eq,
    {
        let _op = self.reentry.enter("get");
        let (slot, text) = self.locate(key);
        trace!("get {text:?} at slot {slot}");
        self.slots[slot]
            .as_ref()
            .and_then(|bucket| bucket.iter().find(|e| e.key.borrow() == key))
            .map(|e| &e.value)
            .ok_or(TableError::KeyNotFound { key: text })
    }

    /// Mutable reference to the value stored for `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if no entry has this key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Display + Eq,
    {
        let _op = self.reentry.enter("get_mut");
        let (slot, text) = self.locate(key);
        trace!("get_mut {text:?} at slot {slot}");
        self.slots[slot]
            .as_mut()
            .and_then(|bucket| bucket.iter_mut().find(|e| e.key.borrow() == key))
            .map(|e| &mut e.value)
            .ok_or(TableError::KeyNotFound { key: text })
    }

    /// Whether an entry with this key exists.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Display + Eq,
    {
        let _op = self.reentry.enter("contains_key");
        let (slot, _) = self.locate(key);
        self.position(slot, key).is_some()
    }

    /// Remove the entry for `key` and return its value.
    ///
    /// Other entries in the same bucket keep their order, and no other slot
    /// moves. A bucket left empty is released.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if no entry has this key; the table is
    /// left unchanged.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Display + Eq,
    {
        let _op = self.reentry.enter("remove");
        let (slot, text) = self.locate(key);
        let found = self.slots[slot]
            .as_mut()
            .and_then(|bucket| Some((bucket.iter().position(|e| e.key.borrow() == key)?, bucket)));
        let Some((i, bucket)) = found else {
            trace!("remove {text:?}: absent from slot {slot}");
            return Err(TableError::KeyNotFound { key: text });
        };
        let entry = bucket.remove(i);
        if bucket.is_empty() {
            debug!("releasing empty bucket at slot {slot}");
            self.slots[slot] = None;
        }
        self.len -= 1;
        trace!("remove {text:?}: taken from slot {slot}, position {i}");
        Ok(entry.value)
    }
}

impl<K, V, H> fmt::Debug for HashTable<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupied = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("HashTable")
            .field("table_size", &self.slots.len())
            .field("len", &self.len)
            .field("occupied_slots", &occupied)
            .finish()
    }
}
