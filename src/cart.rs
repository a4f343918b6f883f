// Cart of rooms, dining and spa items collected before checkout

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartItemKind {
    Room,
    Dining,
    Spa,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(rename = "type")]
    pub kind: CartItemKind,
    pub id: String,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl CartItem {
    pub fn new(kind: CartItemKind, id: impl Into<String>, name: impl Into<String>, price: u64) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
            price,
            quantity: 1,
            date: None,
            options: BTreeMap::new(),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    fn same_line(&self, other: &CartItem) -> bool {
        self.id == other.id && self.kind == other.kind && self.date == other.date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartSummary {
    pub nights: u32,
    pub subtotal: u64,
    pub tax: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    // Same id, kind and date merge into one line by summing quantities
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.same_line(&item)) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            debug!(id = %existing.id, quantity = existing.quantity, "merged cart item");
        } else {
            debug!(id = %item.id, "added cart item");
            self.items.push(item);
        }
    }

    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        for item in self.items.iter_mut().filter(|i| i.id == id) {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn total_price(&self) -> u64 {
        self.items
            .iter()
            .map(|item| item.price.saturating_mul(item.quantity as u64))
            .fold(0, u64::saturating_add)
    }

    /// Checkout summary. Rooms are charged per night, everything else per unit.
    /// Unknown or non-positive stays count as one night.
    pub fn summary(&self, nights: Option<u32>, tax_rate_pct: u32) -> CartSummary {
        let nights = nights.filter(|n| *n > 0).unwrap_or(1);
        let subtotal = self
            .items
            .iter()
            .map(|item| match item.kind {
                CartItemKind::Room => item.price.saturating_mul(nights as u64),
                _ => item.price.saturating_mul(item.quantity as u64),
            })
            .fold(0, u64::saturating_add);
        let tax = (subtotal as u128 * tax_rate_pct as u128 + 50) / 100;
        let tax = u64::try_from(tax).unwrap_or(u64::MAX);

        CartSummary {
            nights,
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> CartItem {
        CartItem::new(CartItemKind::Room, "deluxe-room", "Deluxe Room", 350_000)
            .with_date("2024-03-10")
    }

    fn dinner() -> CartItem {
        CartItem::new(CartItemKind::Dining, "la-lumiere", "La Lumière", 180_000)
            .with_date("2024-03-11")
            .with_option("time", "19:00")
    }

    #[test]
    fn test_add_merges_matching_lines() {
        let mut cart = Cart::new();
        cart.add_item(dinner());
        cart.add_item(dinner().with_quantity(2));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);

        // Different date is a different line
        cart.add_item(dinner().with_date("2024-03-12"));
        assert_eq!(cart.len(), 2);

        // Same id but different kind is a different line
        cart.add_item(CartItem::new(CartItemKind::Spa, "la-lumiere", "Spa", 1).with_date("2024-03-11"));
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_update_quantity_and_remove() {
        let mut cart = Cart::new();
        cart.add_item(room());
        cart.add_item(dinner());

        cart.update_quantity("la-lumiere", 4);
        assert_eq!(cart.items[1].quantity, 4);

        cart.update_quantity("la-lumiere", 0);
        assert_eq!(cart.len(), 1);

        cart.update_quantity("deluxe-room", -3);
        assert!(cart.is_empty());

        // Unknown ids are ignored
        cart.update_quantity("nothing", 2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_price() {
        let mut cart = Cart::new();
        cart.add_item(room());
        cart.add_item(dinner().with_quantity(2));
        assert_eq!(cart.total_price(), 350_000 + 360_000);

        cart.clear();
        assert_eq!(cart.total_price(), 0);
    }

    #[test]
    fn test_summary_charges_rooms_per_night() {
        let mut cart = Cart::new();
        cart.add_item(room());
        cart.add_item(dinner().with_quantity(2));

        let summary = cart.summary(Some(3), 10);
        assert_eq!(summary.nights, 3);
        assert_eq!(summary.subtotal, 1_050_000 + 360_000);
        assert_eq!(summary.tax, 141_000);
        assert_eq!(summary.total, 1_551_000);

        // Unknown stay length counts as one night
        assert_eq!(cart.summary(None, 10).subtotal, 710_000);
        assert_eq!(cart.summary(Some(0), 10).nights, 1);
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = Cart::new();
        cart.add_item(dinner());
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["items"][0]["type"], "dining");
        assert_eq!(json["items"][0]["options"]["time"], "19:00");

        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }
}
