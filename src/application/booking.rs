use crate::domain::cart::Cart;
use crate::domain::money::Money;
use crate::domain::ports::{CartSlot, CartStoreBox};
use crate::error::{BookingError, Result};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// One booking session: the cart being filled before checkout.
///
/// `BookingSession` owns the live cart and the store it is handed over
/// through. Every successful mutation is written to the store before the
/// call returns, so a checkout opened afterwards sees the latest cart.
/// Failed operations leave both the cart and the store untouched.
pub struct BookingSession {
    store: CartStoreBox,
    cart: Cart,
}

impl BookingSession {
    /// Starts a fresh session.
    ///
    /// Any cart left in the store by an earlier session is discarded; only the
    /// favorite snapshot survives across sessions.
    pub async fn start(store: CartStoreBox) -> Result<Self> {
        store.remove(CartSlot::Live).await?;
        info!("booking session started with an empty cart");
        Ok(Self {
            store,
            cart: Cart::new(),
        })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn grand_total(&self) -> Result<Money> {
        self.cart.grand_total()
    }

    /// Adds tickets for `movie`, merging with any line already in the cart.
    pub async fn add_or_merge(
        &mut self,
        movie: &str,
        seats: i64,
        price: Option<Decimal>,
    ) -> Result<()> {
        let mut next = self.cart.clone();
        next.add_or_merge(movie, seats, price)?;
        self.commit(next).await?;
        debug!(movie, seats, items = self.cart.len(), "added tickets");
        Ok(())
    }

    pub async fn clear(&mut self) -> Result<()> {
        self.commit(Cart::new()).await?;
        debug!("cart cleared");
        Ok(())
    }

    /// Saves a copy of the live cart as the favorite.
    pub async fn save_favorite(&self) -> Result<()> {
        if self.cart.is_empty() {
            return Err(BookingError::EmptyFavoriteSave);
        }
        self.store.save(CartSlot::Favorite, &self.cart).await?;
        debug!(items = self.cart.len(), "favorite cart saved");
        Ok(())
    }

    /// Replaces the live cart with the saved favorite.
    pub async fn apply_favorite(&mut self) -> Result<()> {
        let favorite = self
            .store
            .load(CartSlot::Favorite)
            .await?
            .ok_or(BookingError::NoFavoriteToApply)?;
        self.commit(favorite).await?;
        debug!(items = self.cart.len(), "favorite cart applied");
        Ok(())
    }

    /// Consumes the session and returns the final cart.
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    // Persist first so a storage failure leaves the in-memory cart unchanged.
    async fn commit(&mut self, cart: Cart) -> Result<()> {
        self.store.save(CartSlot::Live, &cart).await?;
        self.cart = cart;
        Ok(())
    }
}
