#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check
// bucket layout, which the public API does not expose.

use crate::error::TableError;
use crate::hash_function::HashFunction;
use crate::hash_table::tests::ZeroHash;
use crate::hash_table::HashTable;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashMap;
use std::fmt;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct Key(String);
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations so shrinking moves toward earlier keys.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Get(usize),
    GetMut(usize, i32),
    Remove(usize),
    Contains(String),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z0-9]{0,6}", 1..=10).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            1 => idx.clone().prop_map(OpI::Get),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::GetMut(i, d)),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => "[a-z0-9]{0,6}".prop_map(OpI::Contains),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap.
// After every op:
// - values, presence and KeyNotFound agree with the model;
// - every entry sits in the slot its key maps to, once per bucket;
// - no empty bucket is left allocated and len matches the chains;
// - the slot count never changes.
fn run_scenario<H: HashFunction>(
    mut sut: HashTable<Key, i32, H>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let size = sut.table_size();
    let mut model: HashMap<Key, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Set(i, v) => {
                let k = Key(pool[i].clone());
                let slot = sut.slot_of(&k);
                let before = sut.bucket_len(slot);
                let existed = model.insert(k.clone(), v).is_some();
                sut.set(k, v);
                let expected = if existed { before } else { before + 1 };
                prop_assert_eq!(sut.bucket_len(slot), expected);
            }
            OpI::Get(i) => {
                let k = pool[i].as_str();
                match model.get(k) {
                    Some(mv) => prop_assert_eq!(sut.get(k), Ok(mv)),
                    None => prop_assert_eq!(
                        sut.get(k),
                        Err(TableError::KeyNotFound { key: k.to_string() })
                    ),
                }
            }
            OpI::GetMut(i, d) => {
                let k = pool[i].as_str();
                match (sut.get_mut(k), model.get_mut(k)) {
                    (Ok(sv), Some(mv)) => {
                        *sv = sv.wrapping_add(d);
                        *mv = mv.wrapping_add(d);
                    }
                    (Err(TableError::KeyNotFound { .. }), None) => {}
                    (s, m) => prop_assert!(false, "get_mut diverged: {:?} vs {:?}", s, m),
                }
            }
            OpI::Remove(i) => {
                let k = pool[i].as_str();
                let slot = sut.slot_of(k);
                let neighbours: Vec<String> = sut
                    .chain_keys(slot)
                    .into_iter()
                    .filter(|n| n != k)
                    .collect();
                match model.remove(k) {
                    Some(mv) => prop_assert_eq!(sut.remove(k), Ok(mv)),
                    None => prop_assert!(sut.remove(k).is_err()),
                }
                // Same-bucket entries survive in their original order.
                prop_assert_eq!(sut.chain_keys(slot), neighbours);
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(s.as_str()));
            }
        }

        sut.assert_consistent();
        prop_assert_eq!(sut.table_size(), size);
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), size in 1usize..=40) {
        run_scenario(HashTable::with_size(size), &pool, ops)?;
    }
}

// Worst case: every key in slot 0, so every op walks one shared chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(HashTable::with_size_and_hasher(8, ZeroHash), &pool, ops)?;
    }
}
