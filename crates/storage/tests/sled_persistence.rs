//! Sled backend behind module keyspaces.

use ippan_storage::{KvStore, KvStoreExt, PrefixStore, SledKvStore};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn records_are_readable_after_flush() {
    let dir = TempDir::new().unwrap();
    let store = PrefixStore::new(SledKvStore::open(dir.path(), "modules").unwrap(), "mint");

    store.set_json(&[0x01], &vec![1u32, 2, 3]).unwrap();
    store.inner().flush().unwrap();

    assert_eq!(store.get_json::<Vec<u32>>(&[0x01]).unwrap(), Some(vec![1, 2, 3]));
    assert!(store.get(&[0x00]).unwrap().is_none());
}

#[test]
fn delete_removes_only_namespaced_key() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(SledKvStore::open(dir.path(), "modules").unwrap());
    let mint = PrefixStore::new(backend.clone(), "mint");
    let distr = PrefixStore::new(backend.clone(), "distr");

    mint.set(b"k", b"mint".to_vec()).unwrap();
    distr.set(b"k", b"distr".to_vec()).unwrap();
    mint.delete(b"k").unwrap();

    assert!(!mint.has(b"k").unwrap());
    assert_eq!(distr.get(b"k").unwrap(), Some(b"distr".to_vec()));
}
