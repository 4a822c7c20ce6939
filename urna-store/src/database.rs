use rocksdb::{ColumnFamilyDescriptor, IteratorMode, Options, DB};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const CF_VOTERS: &str = "voters";
pub const CF_CANDIDATES: &str = "candidates";
pub const CF_ELECTIONS: &str = "elections";

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("rocksdb error: {0}")]
    RocksDb(#[from] rocksdb::Error),
    #[error("column family not found: {0}")]
    ColumnFamilyNotFound(String),
}

/// RocksDB handle with one column family per entity kind.
pub struct RocksDb {
    db: DB,
}

impl RocksDb {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = vec![
            ColumnFamilyDescriptor::new(CF_VOTERS, Options::default()),
            ColumnFamilyDescriptor::new(CF_CANDIDATES, Options::default()),
            ColumnFamilyDescriptor::new(CF_ELECTIONS, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&opts, path, cfs)?;
        debug!("database opened");

        Ok(Self { db })
    }

    pub fn put(&self, cf_name: &str, key: &[u8], value: &[u8]) -> Result<(), DatabaseError> {
        let cf = self
            .db
            .cf_handle(cf_name)
            .ok_or_else(|| DatabaseError::ColumnFamilyNotFound(cf_name.to_string()))?;
        self.db.put_cf(cf, key, value)?;
        Ok(())
    }

    pub fn get(&self, cf_name: &str, key: &[u8]) -> Result<Option<Vec<u8>>, DatabaseError> {
        let cf = self
            .db
            .cf_handle(cf_name)
            .ok_or_else(|| DatabaseError::ColumnFamilyNotFound(cf_name.to_string()))?;
        let value = self.db.get_cf(cf, key)?;
        Ok(value)
    }

    pub fn delete(&self, cf_name: &str, key: &[u8]) -> Result<(), DatabaseError> {
        let cf = self
            .db
            .cf_handle(cf_name)
            .ok_or_else(|| DatabaseError::ColumnFamilyNotFound(cf_name.to_string()))?;
        self.db.delete_cf(cf, key)?;
        Ok(())
    }

    /// All values in a column family, in key order.
    pub fn list(&self, cf_name: &str) -> Result<Vec<Vec<u8>>, DatabaseError> {
        let cf = self
            .db
            .cf_handle(cf_name)
            .ok_or_else(|| DatabaseError::ColumnFamilyNotFound(cf_name.to_string()))?;

        let mut values = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            values.push(value.to_vec());
        }
        Ok(values)
    }

    pub fn inner(&self) -> &DB {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open() {
        let tmp_dir = TempDir::new().unwrap();
        assert!(RocksDb::new(tmp_dir.path()).is_ok());
    }

    #[test]
    fn test_put_and_get() {
        let tmp_dir = TempDir::new().unwrap();
        let db = RocksDb::new(tmp_dir.path()).unwrap();

        db.put(CF_VOTERS, b"v1", b"value").unwrap();
        assert_eq!(db.get(CF_VOTERS, b"v1").unwrap(), Some(b"value".to_vec()));
        assert_eq!(db.get(CF_VOTERS, b"missing").unwrap(), None);
    }

    #[test]
    fn test_delete() {
        let tmp_dir = TempDir::new().unwrap();
        let db = RocksDb::new(tmp_dir.path()).unwrap();

        db.put(CF_ELECTIONS, b"e1", b"value").unwrap();
        db.delete(CF_ELECTIONS, b"e1").unwrap();
        assert_eq!(db.get(CF_ELECTIONS, b"e1").unwrap(), None);
    }

    #[test]
    fn test_column_families_are_isolated() {
        let tmp_dir = TempDir::new().unwrap();
        let db = RocksDb::new(tmp_dir.path()).unwrap();

        db.put(CF_VOTERS, b"id", b"voter").unwrap();
        db.put(CF_CANDIDATES, b"id", b"candidate").unwrap();
        db.put(CF_ELECTIONS, b"id", b"election").unwrap();

        assert_eq!(db.get(CF_VOTERS, b"id").unwrap(), Some(b"voter".to_vec()));
        assert_eq!(
            db.get(CF_CANDIDATES, b"id").unwrap(),
            Some(b"candidate".to_vec())
        );
        assert_eq!(
            db.get(CF_ELECTIONS, b"id").unwrap(),
            Some(b"election".to_vec())
        );
    }

    #[test]
    fn test_list_returns_all_values() {
        let tmp_dir = TempDir::new().unwrap();
        let db = RocksDb::new(tmp_dir.path()).unwrap();

        db.put(CF_CANDIDATES, b"c1", b"one").unwrap();
        db.put(CF_CANDIDATES, b"c2", b"two").unwrap();

        let values = db.list(CF_CANDIDATES).unwrap();
        assert_eq!(values, vec![b"one".to_vec(), b"two".to_vec()]);

        assert!(db.list(CF_VOTERS).unwrap().is_empty());
    }
}
