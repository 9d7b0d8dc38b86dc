use crate::domain::cart::LineItem;
use crate::error::Result;
use std::io::Write;

/// Writes cart lines as CSV (`movie,seats,price,total`).
///
/// Amounts are rendered the way the booking pages show them, e.g. `$12.50`.
pub struct CartWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CartWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_items<'a, I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        self.writer
            .write_record(["movie", "seats", "price", "total"])?;
        for item in items {
            self.writer.write_record([
                item.movie().to_string(),
                item.seats().to_string(),
                item.price().to_string(),
                item.total().to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::Cart;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_items() {
        let mut cart = Cart::new();
        cart.add_or_merge("Movie X", 5, Some(dec!(10))).unwrap();
        cart.add_or_merge("Late, Night", 1, Some(dec!(7.5))).unwrap();

        let mut out = Vec::new();
        CartWriter::new(&mut out).write_items(cart.items()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "movie,seats,price,total\nMovie X,5,$10.00,$50.00\n\"Late, Night\",1,$7.50,$7.50\n"
        );
    }

    #[test]
    fn test_write_empty_cart_has_header_only() {
        let mut out = Vec::new();
        CartWriter::new(&mut out).write_items(Cart::new().items()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "movie,seats,price,total\n");
    }
}
