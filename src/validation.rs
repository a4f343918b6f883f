// Validation of the booking selection
// Pure functions, recomputed on every state change to gate the search/book actions

use crate::config::BookingLimits;
use crate::selection::BookingSelection;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("Please select a check-in date")]
    CheckInMissing,

    #[error("Check-in date must be today or later")]
    CheckInInPast,

    #[error("Please select a check-out date")]
    CheckOutMissing,

    #[error("Check-out must be after check-in")]
    CheckOutNotAfterCheckIn,

    #[error("Stays are limited to {max_nights} nights")]
    StayTooLong { max_nights: u32 },

    #[error("At least one adult is required")]
    NoAdults,

    #[error("Number of children cannot be negative")]
    NegativeChildren,

    #[error("Reservations are limited to {max_guests} guests")]
    TooManyGuests { max_guests: u32 },

    #[error("Please select a room")]
    NoRoomSelected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    pub fn contains(&self, issue: &ValidationIssue) -> bool {
        self.issues.contains(issue)
    }

    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.issues.extend(other.issues);
        self
    }
}

/// Checks the date range. `today` is compared by date only.
pub fn validate_dates(
    selection: &BookingSelection,
    today: NaiveDate,
    limits: &BookingLimits,
) -> ValidationResult {
    let mut issues = Vec::new();

    match selection.check_in {
        None => issues.push(ValidationIssue::CheckInMissing),
        Some(check_in) if check_in < today => issues.push(ValidationIssue::CheckInInPast),
        Some(_) => {}
    }

    if selection.check_out.is_none() {
        issues.push(ValidationIssue::CheckOutMissing);
    }

    if let (Some(check_in), Some(check_out)) = (selection.check_in, selection.check_out) {
        if check_out <= check_in {
            issues.push(ValidationIssue::CheckOutNotAfterCheckIn);
        }

        let days = check_out.signed_duration_since(check_in).num_days();
        if days > i64::from(limits.max_stay_nights) {
            issues.push(ValidationIssue::StayTooLong {
                max_nights: limits.max_stay_nights,
            });
        }
    }

    ValidationResult { issues }
}

// Signed counts so raw form input can be checked before it is stored
pub fn validate_guests(adults: i64, children: i64, limits: &BookingLimits) -> ValidationResult {
    let mut issues = Vec::new();

    if adults < 1 {
        issues.push(ValidationIssue::NoAdults);
    }
    if children < 0 {
        issues.push(ValidationIssue::NegativeChildren);
    }
    if adults.saturating_add(children) > i64::from(limits.max_guests) {
        issues.push(ValidationIssue::TooManyGuests {
            max_guests: limits.max_guests,
        });
    }

    ValidationResult { issues }
}

pub fn validate_selection_guests(
    selection: &BookingSelection,
    limits: &BookingLimits,
) -> ValidationResult {
    validate_guests(
        i64::from(selection.adults),
        i64::from(selection.children),
        limits,
    )
}

/// Every issue that blocks the "book" action, dates first.
pub fn validate_reservation(
    selection: &BookingSelection,
    today: NaiveDate,
    limits: &BookingLimits,
) -> ValidationResult {
    let mut result = validate_dates(selection, today, limits)
        .merge(validate_selection_guests(selection, limits));
    if selection.selected_room.is_none() {
        result.issues.push(ValidationIssue::NoRoomSelected);
    }
    result
}

pub fn is_reservation_valid(
    selection: &BookingSelection,
    today: NaiveDate,
    limits: &BookingLimits,
) -> bool {
    validate_reservation(selection, today, limits).is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 1, 1)
    }

    fn with_dates(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> BookingSelection {
        BookingSelection {
            check_in,
            check_out,
            ..BookingSelection::default()
        }
    }

    #[test]
    fn test_valid_two_night_stay() {
        let selection = with_dates(Some(date(2024, 3, 10)), Some(date(2024, 3, 12)));
        let result = validate_dates(&selection, today(), &BookingLimits::default());
        assert!(result.is_valid(), "{:?}", result.messages());
        assert_eq!(selection.nights(), 2);
    }

    #[test]
    fn test_check_out_before_check_in() {
        let selection = with_dates(Some(date(2024, 3, 10)), Some(date(2024, 3, 8)));
        let result = validate_dates(&selection, today(), &BookingLimits::default());
        assert_eq!(result.issues, vec![ValidationIssue::CheckOutNotAfterCheckIn]);
        assert_eq!(result.messages(), vec!["Check-out must be after check-in"]);
    }

    #[test]
    fn test_same_day_check_out_is_invalid() {
        let selection = with_dates(Some(date(2024, 3, 10)), Some(date(2024, 3, 10)));
        let result = validate_dates(&selection, today(), &BookingLimits::default());
        assert!(result.contains(&ValidationIssue::CheckOutNotAfterCheckIn));
    }

    #[test]
    fn test_stay_length_cap() {
        let selection = with_dates(Some(date(2024, 1, 1)), Some(date(2024, 2, 15)));
        let result = validate_dates(&selection, today(), &BookingLimits::default());
        assert_eq!(
            result.issues,
            vec![ValidationIssue::StayTooLong { max_nights: 30 }]
        );

        // Exactly the maximum is allowed
        let selection = with_dates(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)));
        assert!(validate_dates(&selection, today(), &BookingLimits::default()).is_valid());
    }

    #[test]
    fn test_missing_dates() {
        let result = validate_dates(&with_dates(None, None), today(), &BookingLimits::default());
        assert_eq!(
            result.issues,
            vec![ValidationIssue::CheckInMissing, ValidationIssue::CheckOutMissing]
        );
    }

    #[test]
    fn test_check_in_today_is_allowed_but_yesterday_is_not() {
        let limits = BookingLimits::default();
        let selection = with_dates(Some(today()), Some(date(2024, 1, 2)));
        assert!(validate_dates(&selection, today(), &limits).is_valid());

        let selection = with_dates(Some(date(2023, 12, 31)), Some(date(2024, 1, 2)));
        assert_eq!(
            validate_dates(&selection, today(), &limits).issues,
            vec![ValidationIssue::CheckInInPast]
        );
    }

    #[test_case(2, 0, vec![]; "#1 default party")]
    #[test_case(4, 0, vec![]; "#2 exactly at capacity")]
    #[test_case(3, 2, vec![ValidationIssue::TooManyGuests { max_guests: 4 }]; "#3 over capacity")]
    #[test_case(0, 1, vec![ValidationIssue::NoAdults]; "#4 no adults")]
    #[test_case(1, -1, vec![ValidationIssue::NegativeChildren]; "#5 negative children")]
    #[test_case(i64::MAX, 1, vec![ValidationIssue::TooManyGuests { max_guests: 4 }]; "#6 party size past integer range")]
    fn test_guest_rules(adults: i64, children: i64, expected: Vec<ValidationIssue>) {
        let result = validate_guests(adults, children, &BookingLimits::default());
        assert_eq!(result.issues, expected);
    }

    #[test]
    fn test_guest_cap_is_configurable() {
        let limits = BookingLimits {
            max_guests: 6,
            ..BookingLimits::default()
        };
        assert!(validate_guests(3, 2, &limits).is_valid());
    }

    #[test]
    fn test_reservation_requires_room() {
        let limits = BookingLimits::default();
        let mut selection = with_dates(Some(date(2024, 3, 10)), Some(date(2024, 3, 12)));
        assert!(!is_reservation_valid(&selection, today(), &limits));
        assert_eq!(
            validate_reservation(&selection, today(), &limits).issues,
            vec![ValidationIssue::NoRoomSelected]
        );

        selection.set_room("deluxe-room");
        assert!(is_reservation_valid(&selection, today(), &limits));

        selection.set_guests(3, 2);
        assert!(!is_reservation_valid(&selection, today(), &limits));
    }
}
