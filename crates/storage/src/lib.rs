use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use sled::{Db, Tree};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Storage errors
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Byte-oriented key-value store.
///
/// Commit and rollback belong to whoever owns the backend; handles only
/// read and write through it.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()>;
    fn delete(&self, key: &[u8]) -> Result<()>;

    fn has(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }
    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        (**self).set(key, value)
    }
    fn delete(&self, key: &[u8]) -> Result<()> {
        (**self).delete(key)
    }
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }
    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        (**self).set(key, value)
    }
    fn delete(&self, key: &[u8]) -> Result<()> {
        (**self).delete(key)
    }
}

/// JSON record helpers on top of any [`KvStore`].
pub trait KvStoreExt: KvStore {
    fn get_json<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>> {
        match self.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &[u8], value: &T) -> Result<()> {
        self.set(key, serde_json::to_vec(value)?)
    }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}

/// Keyspace owned by a single module: every key is stored as `prefix/key`.
#[derive(Debug, Clone)]
pub struct PrefixStore<S> {
    inner: S,
    prefix: Vec<u8>,
}

impl<S: KvStore> PrefixStore<S> {
    pub fn new(inner: S, namespace: &str) -> Self {
        let mut prefix = namespace.as_bytes().to_vec();
        prefix.push(b'/');
        Self { inner, prefix }
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        let mut full = Vec::with_capacity(self.prefix.len() + key.len());
        full.extend_from_slice(&self.prefix);
        full.extend_from_slice(key);
        full
    }
}

impl<S: KvStore> KvStore for PrefixStore<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.inner.get(&self.full_key(key))
    }

    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        self.inner.set(&self.full_key(key), value)
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.inner.delete(&self.full_key(key))
    }
}

/// Sled-backed implementation
pub struct SledKvStore {
    db: Db,
    tree: Tree,
}

impl SledKvStore {
    pub fn open<P: AsRef<Path>>(path: P, tree_name: &str) -> Result<Self> {
        let db = sled::open(path)?;
        let tree = db.open_tree(tree_name)?;
        tracing::debug!(target: "storage", "opened sled tree {}", tree_name);
        Ok(Self { db, tree })
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

impl KvStore for SledKvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.tree.get(key)?.map(|v| v.to_vec()))
    }

    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        self.tree.insert(key, value)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.tree.remove(key)?;
        Ok(())
    }
}

/// In-memory testing backend. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.entries.read().keys().cloned().collect()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<()> {
        self.entries.write().insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}
