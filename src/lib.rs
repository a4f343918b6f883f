// Booking engine for the Luxe Haven hotel site

// Static data and configuration
pub mod catalog;
pub mod config;
pub mod listings;

// Reservation flow
pub mod availability;
pub mod pricing;
pub mod selection;
pub mod validation;

// Cart, membership and persisted session state
pub mod auth;
pub mod cart;
pub mod history;
pub mod session;
pub mod storage;

// Re-export key types for convenience
pub use availability::{
    check_rooms, AvailabilityChecker, FixedAvailabilityChecker, RandomAvailabilityChecker,
};
pub use catalog::{Catalog, Multiplier, PackageTable, PromoCodes, RateTable, RoomCatalog};
pub use config::{BookingConfig, BookingLimits, ConfigError, SimulatedDelays};
pub use listings::{EventCategory, Facility, FacilityCategory, HotelEvent, Listings, Offer, Restaurant};
pub use pricing::{calculate_price, format_price, group_digits, PriceBreakdown};
pub use selection::BookingSelection;
pub use validation::{
    is_reservation_valid, validate_dates, validate_guests, ValidationIssue, ValidationResult,
};
pub use auth::{
    format_points, login_redirect, AuthError, AuthService, AuthState, MembershipLevel, User,
};
pub use cart::{Cart, CartItem, CartItemKind, CartSummary};
pub use history::{Reservation, ReservationFilter, ReservationHistory, ReservationStatus};
pub use session::{BookingError, GuestInfo, Session};
pub use storage::{FileStore, MemoryStore, StateStore, StorageError};
