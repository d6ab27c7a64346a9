//! sdbm-table: a fixed-size hash table that places keys by the modified
//! SDBM hash of their text and resolves collisions by separate chaining.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a textbook hash table whose slot placement is reproducible
//!   bit-for-bit from a key's `Display` text.
//! - Layers:
//!   - `HashFunction`: maps the UTF-8 bytes of a key's text to a `u64`
//!     hash code and reduces a hash to a slot. `Sdbm` is the default.
//!   - `HashTable<K, V, H>`: a boxed slice of optional buckets; each bucket
//!     is the insertion-ordered chain of entries for one slot.
//!
//! Constraints
//! - Slot count is fixed at construction (default 4096); no rehashing.
//! - A bucket is allocated on the first insert into its slot and released
//!   when its last entry is removed. No other slot is touched.
//! - At most one entry per key within a bucket; `set` on an existing key
//!   replaces only that entry's value.
//! - Single-threaded: the table is `Send` but `!Sync`. Callers needing
//!   shared access wrap it in a lock.
//! - Reentrancy: operations run `K: Display` and `K: Eq`; re-entering the
//!   same table from those is a bug and panics in debug builds.
//!
//! Hashing
//! - `hashcode` returns the low 64 bits of the unbounded recurrence.
//! - `Sdbm::slot` reduces the unbounded value, not its low 64 bits, so a
//!   key's slot matches tables built with arbitrary-precision hashes for
//!   every table size. For power-of-two sizes the two reductions agree.
//! - The `byte << 8` term makes every hash a multiple of 256. Tables whose
//!   size divides 256 therefore chain every key in slot 0.
//!
//! Errors
//! - `get`, `get_mut` and `remove` report a missing key as
//!   `TableError::KeyNotFound`, whether the slot is empty or its chain
//!   lacks the key. A failed call leaves the table unchanged.
//!
//! Logging
//! - Operations log through the `log` facade: `trace` per operation with
//!   the slot index, `debug` when a bucket is allocated or released. The
//!   crate never installs a logger.
//!
//! Notes and non-goals
//! - No iteration, persistence, or resizing.
//! - The hash is not cryptographic; adversarial keys can pile into one
//!   chain.

mod error;
pub mod hash_function;
mod hash_table;
mod hash_table_proptest;
mod reentry;

// Public surface
pub use error::TableError;
pub use hash_function::{hashcode, HashFunction, Sdbm};
pub use hash_table::{HashTable, DEFAULT_TABLE_SIZE};
