use crate::domain::cart::Cart;
use crate::domain::ports::{CartSlot, CartStore};
use crate::error::{BookingError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding every cart slot.
pub const CF_CARTS: &str = "carts";

/// A persistent cart store backed by RocksDB.
///
/// Each slot is one key in the `carts` column family; values are the JSON
/// encoding of the cart.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `carts` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_carts = ColumnFamilyDescriptor::new(CF_CARTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_carts])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn carts(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_CARTS).ok_or_else(|| {
            BookingError::InternalError(Box::new(std::io::Error::other(
                "Carts column family not found",
            )))
        })
    }
}

#[async_trait]
impl CartStore for RocksDBStore {
    async fn load(&self, slot: CartSlot) -> Result<Option<Cart>> {
        let cf = self.carts()?;
        match self.db.get_cf(cf, slot.key())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, slot: CartSlot, cart: &Cart) -> Result<()> {
        let cf = self.carts()?;
        let value = serde_json::to_vec(cart)?;
        self.db.put_cf(cf, slot.key(), value)?;
        Ok(())
    }

    async fn remove(&self, slot: CartSlot) -> Result<()> {
        let cf = self.carts()?;
        self.db.delete_cf(cf, slot.key())?;
        Ok(())
    }
}
