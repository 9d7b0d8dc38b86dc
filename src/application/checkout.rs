use crate::domain::cart::{Cart, LineItem};
use crate::domain::confirmation::{BookingConfirmation, BookingReference};
use crate::domain::money::Money;
use crate::domain::payment::PaymentSubmission;
use crate::domain::ports::{CartSlot, CartStoreBox, Clock};
use crate::domain::seating::{SeatMap, SeatSelection};
use crate::error::{BookingError, Result};
use rand::Rng;
use tracing::{info, warn};

/// Order totals shown before payment.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSummary {
    pub items: Vec<LineItem>,
    /// `Σ price × seats`, recomputed rather than read from stored totals.
    pub grand_total: Money,
    pub total_seats_to_select: u64,
}

impl CheckoutSummary {
    pub fn from_cart(cart: &Cart) -> Result<Self> {
        let grand_total = cart.recomputed_total()?;
        let stored_total = cart.grand_total().ok();
        if stored_total != Some(grand_total) {
            warn!(
                stored = ?stored_total,
                recomputed = %grand_total,
                "stored line totals disagree with price x seats"
            );
        }
        Ok(Self {
            items: cart.items().to_vec(),
            grand_total,
            total_seats_to_select: cart.total_seats(),
        })
    }

    /// Number of seat labels shown at once by the seat picker.
    pub fn visible_seats(&self) -> u64 {
        SeatMap::visible_window(self.total_seats_to_select)
    }

    pub fn seat_placeholder(&self) -> String {
        format!("Select {} seats", self.total_seats_to_select)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    /// Nothing to pay for. Terminal.
    EmptyCart,
    /// Waiting for a valid payment.
    Loaded { cart: Cart, summary: CheckoutSummary },
    /// Payment accepted and the stored cart removed. Terminal.
    Confirmed,
}

/// A checkout session over the cart handed over by the booking session.
///
/// The stored cart is read once, when the session opens. A rejected payment
/// keeps the session loaded with the cart unchanged; an accepted one removes
/// the stored cart and closes the session.
pub struct CheckoutSession<C: Clock> {
    store: CartStoreBox,
    clock: C,
    seat_map: SeatMap,
    state: CheckoutState,
}

impl<C: Clock> CheckoutSession<C> {
    pub async fn open(store: CartStoreBox, clock: C) -> Result<Self> {
        let state = match store.load(CartSlot::Live).await? {
            Some(cart) if !cart.is_empty() => {
                let summary = CheckoutSummary::from_cart(&cart)?;
                info!(
                    items = cart.len(),
                    seats = summary.total_seats_to_select,
                    total = %summary.grand_total,
                    "checkout opened"
                );
                CheckoutState::Loaded { cart, summary }
            }
            _ => {
                info!("checkout opened with an empty cart");
                CheckoutState::EmptyCart
            }
        };
        Ok(Self {
            store,
            clock,
            seat_map: SeatMap::new(),
            state,
        })
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The order summary, absent unless the session holds a cart.
    pub fn summary(&self) -> Option<&CheckoutSummary> {
        match &self.state {
            CheckoutState::Loaded { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn seat_map(&self) -> &SeatMap {
        &self.seat_map
    }

    /// Whether a payment can still be submitted.
    pub fn accepts_payment(&self) -> bool {
        matches!(self.state, CheckoutState::Loaded { .. })
    }

    /// Checks a payment without submitting it.
    pub fn validate(&self, submission: &PaymentSubmission) -> Result<()> {
        self.ensure_loaded()?;
        submission.validate(self.clock.today())
    }

    /// Validates `submission` and, on success, confirms the booking.
    ///
    /// On failure the session stays loaded and the stored cart is untouched.
    /// On success the stored cart is removed and the session is closed.
    pub async fn submit<R: Rng + ?Sized>(
        &mut self,
        submission: &PaymentSubmission,
        seats: &SeatSelection,
        rng: &mut R,
    ) -> Result<BookingConfirmation> {
        self.validate(submission)?;
        let CheckoutState::Loaded { cart, summary } = &self.state else {
            return Err(BookingError::SessionClosed);
        };

        let reference = BookingReference::generate(rng);
        let confirmation = BookingConfirmation::new(cart, seats, summary.grand_total, reference);

        self.store.remove(CartSlot::Live).await?;
        self.state = CheckoutState::Confirmed;
        info!(reference = %confirmation.reference, "booking confirmed");
        Ok(confirmation)
    }

    fn ensure_loaded(&self) -> Result<()> {
        match self.state {
            CheckoutState::Loaded { .. } => Ok(()),
            CheckoutState::EmptyCart => Err(BookingError::EmptyCartCheckout),
            CheckoutState::Confirmed => Err(BookingError::SessionClosed),
        }
    }
}
