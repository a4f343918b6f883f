// Booking selection state for the reservation flow
// Mutated field by field from user input; pricing and validation derive from it

use crate::catalog::DEFAULT_PACKAGE;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingSelection {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub adults: u32,
    pub children: u32,
    pub selected_room: Option<String>,
    pub selected_package: String,
    pub promo_code: String,
}

impl Default for BookingSelection {
    fn default() -> Self {
        Self {
            check_in: None,
            check_out: None,
            adults: 2,
            children: 0,
            selected_room: None,
            selected_package: DEFAULT_PACKAGE.to_string(),
            promo_code: String::new(),
        }
    }
}

impl BookingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dates(&mut self, check_in: NaiveDate, check_out: NaiveDate) {
        self.check_in = Some(check_in);
        self.check_out = Some(check_out);
    }

    pub fn set_guests(&mut self, adults: u32, children: u32) {
        self.adults = adults;
        self.children = children;
    }

    pub fn set_room(&mut self, room_key: impl Into<String>) {
        self.selected_room = Some(room_key.into());
    }

    pub fn clear_room(&mut self) {
        self.selected_room = None;
    }

    pub fn set_package(&mut self, package_key: impl Into<String>) {
        self.selected_package = package_key.into();
    }

    pub fn set_promo_code(&mut self, code: impl Into<String>) {
        self.promo_code = code.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total_guests(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    /// Whole nights between the two dates; 0 while either is missing or the
    /// range is inverted.
    pub fn nights(&self) -> u32 {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => {
                let days = check_out.signed_duration_since(check_in).num_days();
                u32::try_from(days.max(0)).unwrap_or(u32::MAX)
            }
            _ => 0,
        }
    }
}
