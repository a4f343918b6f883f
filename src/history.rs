// Reservation history for the member's account page

use crate::pricing::PriceBreakdown;
use crate::session::{BookingError, GuestInfo};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReservationFilter {
    #[default]
    All,
    Only(ReservationStatus),
}

impl ReservationFilter {
    pub fn matches(&self, status: ReservationStatus) -> bool {
        match self {
            ReservationFilter::All => true,
            ReservationFilter::Only(wanted) => *wanted == status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub room: String,
    pub package: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub pricing: PriceBreakdown,
    pub taxes_and_fees: u64,
    pub amount_due: u64,
    pub points_earned: u64,
    pub guest: GuestInfo,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Booked reservations, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationHistory {
    entries: Vec<Reservation>,
}

impl ReservationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reservation: Reservation) {
        self.entries.insert(0, reservation);
    }

    pub fn get(&self, id: &str) -> Option<&Reservation> {
        self.entries.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reservation> {
        self.entries.iter()
    }

    /// Entries passing the status filter whose number or room contains
    /// `query`, ignoring case. An empty query matches everything.
    pub fn filter(&self, status: ReservationFilter, query: &str) -> Vec<&Reservation> {
        let query = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|r| status.matches(r.status))
            .filter(|r| {
                query.is_empty()
                    || r.id.to_lowercase().contains(&query)
                    || r.room.to_lowercase().contains(&query)
            })
            .collect()
    }

    // Only confirmed stays can be cancelled
    pub fn cancel(&mut self, id: &str) -> Result<&Reservation, BookingError> {
        let reservation = self
            .entries
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| BookingError::ReservationNotFound(id.to_string()))?;
        if reservation.status != ReservationStatus::Confirmed {
            return Err(BookingError::NotCancellable {
                id: id.to_string(),
                status: reservation.status,
            });
        }
        reservation.status = ReservationStatus::Cancelled;
        info!(reservation_id = %reservation.id, "reservation cancelled");
        Ok(reservation)
    }

    /// Marks confirmed stays that checked out on or before `today` as completed.
    pub fn complete_past_stays(&mut self, today: NaiveDate) -> usize {
        let mut completed = 0;
        for reservation in self
            .entries
            .iter_mut()
            .filter(|r| r.status == ReservationStatus::Confirmed && r.check_out <= today)
        {
            reservation.status = ReservationStatus::Completed;
            completed += 1;
        }
        completed
    }
}
