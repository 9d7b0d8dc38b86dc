use crate::domain::cart::Cart;
use crate::domain::ports::{CartSlot, CartStore};
use crate::error::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A cart store that keeps one `<key>.json` file per slot in a directory.
///
/// This is the default back end of the command-line front end: it outlives the
/// process the same way a browser's local storage outlives a page.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    dir: PathBuf,
}

impl FileCartStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub async fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, slot: CartSlot) -> PathBuf {
        self.dir.join(format!("{}.json", slot.key()))
    }
}

#[async_trait]
impl CartStore for FileCartStore {
    async fn load(&self, slot: CartSlot) -> Result<Option<Cart>> {
        let path = self.path(slot);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!(path = %path.display(), "loaded cart");
                Ok(Some(serde_json::from_slice(&bytes)?))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, slot: CartSlot, cart: &Cart) -> Result<()> {
        let path = self.path(slot);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec(cart)?).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(path = %path.display(), items = cart.len(), "saved cart");
        Ok(())
    }

    async fn remove(&self, slot: CartSlot) -> Result<()> {
        match tokio::fs::remove_file(self.path(slot)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_cart_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileCartStore::open(dir.path().join("data")).await.unwrap();

        let mut cart = Cart::new();
        cart.add_or_merge("Movie X", 2, Some(dec!(10))).unwrap();
        store.save(CartSlot::Live, &cart).await.unwrap();

        assert!(store.dir().join("cart.json").exists());
        assert_eq!(store.load(CartSlot::Live).await.unwrap(), Some(cart));
        assert!(store.load(CartSlot::Favorite).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let dir = tempdir().unwrap();
        let store = FileCartStore::open(dir.path()).await.unwrap();
        store.remove(CartSlot::Favorite).await.unwrap();
    }

    #[tokio::test]
    async fn test_reads_hand_written_json() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("favoriteCart.json"),
            r#"[{"movie":"Movie X","seats":2,"price":7.5,"total":15}]"#,
        )
        .unwrap();

        let store = FileCartStore::open(dir.path()).await.unwrap();
        let cart = store.load(CartSlot::Favorite).await.unwrap().unwrap();
        assert_eq!(cart.total_seats(), 2);
        assert_eq!(cart.get("Movie X").unwrap().price().value(), dec!(7.5));
    }
}
