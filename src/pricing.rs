// Derived price breakdown for the reservation flow
//
// All arithmetic is done on scaled integers. Percentages are whole numbers, so
// a subtotal times a tier percentage is exact in hundredths of a currency unit,
// and the promo percentage on top of that is exact in ten-thousandths. The
// combined discount is rounded half-up exactly once, to a whole unit.

use crate::catalog::{Catalog, Multiplier};
use crate::selection::BookingSelection;
use serde::{Deserialize, Serialize};

pub const LONG_STAY_NIGHTS: u32 = 7;
pub const LONG_STAY_DISCOUNT_PCT: u32 = 15;
pub const MID_STAY_NIGHTS: u32 = 3;
pub const MID_STAY_DISCOUNT_PCT: u32 = 10;
pub const PROMO_DISCOUNT_PCT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_price: u64,
    pub package_multiplier: Multiplier,
    pub nights: u32,
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
}

impl PriceBreakdown {
    /// Taxes and fees on the discounted total, rounded half-up.
    pub fn taxes_and_fees(&self, tax_rate_pct: u32) -> u64 {
        to_u64(round_half_up(
            self.total as u128 * tax_rate_pct as u128,
            100,
        ))
    }

    pub fn total_with_tax(&self, tax_rate_pct: u32) -> u64 {
        self.total.saturating_add(self.taxes_and_fees(tax_rate_pct))
    }

    // Extra charged per night by the selected package
    pub fn package_surcharge(&self) -> u64 {
        let extra_pct = self.package_multiplier.percent().saturating_sub(100);
        to_u64(round_half_up(
            self.base_price as u128 * extra_pct as u128,
            100,
        ))
    }

    pub fn is_payable(&self) -> bool {
        self.total > 0
    }
}

/// Length-of-stay discount tier. A step function: no interpolation and no
/// stacking between tiers.
pub fn length_of_stay_discount_pct(nights: u32) -> u32 {
    if nights >= LONG_STAY_NIGHTS {
        LONG_STAY_DISCOUNT_PCT
    } else if nights >= MID_STAY_NIGHTS {
        MID_STAY_DISCOUNT_PCT
    } else {
        0
    }
}

pub fn calculate_price(selection: &BookingSelection, catalog: &Catalog) -> PriceBreakdown {
    let base_price = selection
        .selected_room
        .as_deref()
        .map_or(0, |room| catalog.rates.base_price(room));
    let package_multiplier = catalog.packages.multiplier(&selection.selected_package);
    let nights = selection.nights();
    let promo_applied = catalog.promo_codes.matches(&selection.promo_code);

    price_stay(base_price, package_multiplier, nights, promo_applied)
}

/// Pure pricing core, independent of the selection and catalog types.
pub fn price_stay(
    base_price: u64,
    package_multiplier: Multiplier,
    nights: u32,
    promo_applied: bool,
) -> PriceBreakdown {
    let subtotal = to_u64(round_half_up(
        base_price as u128 * package_multiplier.percent() as u128 * nights as u128,
        100,
    ));

    // Hundredths of a unit
    let tier_amount = subtotal as u128 * length_of_stay_discount_pct(nights) as u128;
    // Ten-thousandths of a unit
    let promo_amount = if promo_applied {
        (subtotal as u128 * 100 - tier_amount) * PROMO_DISCOUNT_PCT as u128
    } else {
        0
    };
    let discount = to_u64(round_half_up(tier_amount * 100 + promo_amount, 10_000));

    PriceBreakdown {
        base_price,
        package_multiplier,
        nights,
        subtotal,
        discount,
        total: subtotal.saturating_sub(discount),
    }
}

/// Korean-won display string, e.g. `₩1,720,687`.
pub fn format_price(amount: u64) -> String {
    format!("₩{}", group_digits(amount))
}

/// Thousands grouping with commas, e.g. `1,720,687`.
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn round_half_up(numerator: u128, denominator: u128) -> u128 {
    (numerator + denominator / 2) / denominator
}

fn to_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
