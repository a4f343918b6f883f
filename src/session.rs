// Application session: the single owner of the booking selection, cart and
// authentication state, with load/persist at the storage boundary

use crate::auth::{AuthError, AuthService, AuthState, RegistrationForm, UserPatch};
use crate::availability::AvailabilityChecker;
use crate::cart::{Cart, CartSummary};
use crate::catalog::Catalog;
use crate::config::BookingConfig;
use crate::history::{Reservation, ReservationFilter, ReservationHistory, ReservationStatus};
use crate::pricing::{calculate_price, PriceBreakdown};
use crate::selection::BookingSelection;
use crate::storage::{
    load_state_or_default, save_state, StateStore, StorageError, AUTH_KEY, CART_KEY,
    RESERVATIONS_KEY, RESERVATION_KEY,
};
use crate::validation::{self, ValidationResult};
use chrono::{Datelike, Local, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Reservation is not valid: {}", .0.join("; "))]
    InvalidReservation(Vec<String>),

    #[error("Room {0} is not offered")]
    UnknownRoom(String),

    #[error("Missing required field: {0}")]
    MissingGuestField(&'static str),

    #[error("Reservation {0} not found")]
    ReservationNotFound(String),

    #[error("Reservation {id} is {status:?} and cannot be cancelled")]
    NotCancellable { id: String, status: ReservationStatus },

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub special_requests: Option<String>,
}

impl GuestInfo {
    pub fn validate(&self) -> Result<(), BookingError> {
        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(BookingError::MissingGuestField(field));
            }
        }
        Ok(())
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn reservation_number(year: i32) -> String {
    format!("LH-{}-{:06}", year, rand::thread_rng().gen_range(0..1_000_000))
}

pub struct Session<S: StateStore> {
    config: BookingConfig,
    catalog: Catalog,
    store: S,
    auth_service: AuthService,
    selection: BookingSelection,
    cart: Cart,
    auth: AuthState,
    history: ReservationHistory,
}

impl<S: StateStore> Session<S> {
    /// Restores every cache from `store`, falling back to fresh state.
    pub fn load(store: S, config: BookingConfig) -> Self {
        Self::with_catalog(store, config, Catalog::default())
    }

    pub fn with_catalog(store: S, config: BookingConfig, catalog: Catalog) -> Self {
        let selection = load_state_or_default(&store, RESERVATION_KEY);
        let cart = load_state_or_default(&store, CART_KEY);
        let history = load_state_or_default(&store, RESERVATIONS_KEY);
        let mut auth: AuthState = load_state_or_default(&store, AUTH_KEY);
        if auth.is_authenticated != auth.user.is_some() {
            warn!("inconsistent persisted auth state, signing out");
            auth.logout();
        }

        Self {
            auth_service: AuthService::new(config.delays),
            config,
            catalog,
            store,
            selection,
            cart,
            auth,
            history,
        }
    }

    pub fn persist(&self) -> Result<(), StorageError> {
        save_state(&self.store, RESERVATION_KEY, &self.selection)?;
        save_state(&self.store, CART_KEY, &self.cart)?;
        save_state(&self.store, AUTH_KEY, &self.auth)?;
        save_state(&self.store, RESERVATIONS_KEY, &self.history)?;
        Ok(())
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut BookingSelection {
        &mut self.selection
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn history(&self) -> &ReservationHistory {
        &self.history
    }

    pub fn reservations(&self, filter: ReservationFilter, query: &str) -> Vec<&Reservation> {
        self.history.filter(filter, query)
    }

    pub fn cancel_reservation(&mut self, id: &str) -> Result<Reservation, BookingError> {
        let cancelled = self.history.cancel(id)?.clone();
        save_state(&self.store, RESERVATIONS_KEY, &self.history)?;
        Ok(cancelled)
    }

    /// Moves confirmed stays that have checked out into the completed list.
    pub fn complete_past_stays(&mut self, today: NaiveDate) -> Result<usize, StorageError> {
        let completed = self.history.complete_past_stays(today);
        if completed > 0 {
            save_state(&self.store, RESERVATIONS_KEY, &self.history)?;
        }
        Ok(completed)
    }

    pub fn is_auth_loading(&self) -> bool {
        self.auth_service.is_loading()
    }

    pub fn price(&self) -> PriceBreakdown {
        calculate_price(&self.selection, &self.catalog)
    }

    pub fn cart_summary(&self) -> CartSummary {
        let nights = Some(self.selection.nights());
        self.cart.summary(nights, self.config.tax_rate_pct)
    }

    pub fn validate_dates(&self, today: NaiveDate) -> ValidationResult {
        validation::validate_dates(&self.selection, today, &self.config.limits)
    }

    pub fn validate_guests(&self) -> ValidationResult {
        validation::validate_selection_guests(&self.selection, &self.config.limits)
    }

    pub fn validate(&self, today: NaiveDate) -> ValidationResult {
        validation::validate_reservation(&self.selection, today, &self.config.limits)
    }

    pub fn is_reservation_valid(&self, today: NaiveDate) -> bool {
        self.validate(today).is_valid()
    }

    // None until a room is selected
    pub async fn check_availability<C>(&self, checker: &C) -> Option<bool>
    where
        C: AvailabilityChecker + ?Sized,
    {
        let room = self.selection.selected_room.as_deref()?;
        Some(checker.is_available(room).await)
    }

    pub fn reset_reservation(&mut self) -> Result<(), StorageError> {
        self.selection.reset();
        save_state(&self.store, RESERVATION_KEY, &self.selection)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), BookingError> {
        let user = self.auth_service.login(email, password).await?;
        self.auth.sign_in(user);
        save_state(&self.store, AUTH_KEY, &self.auth)?;
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.auth.logout();
        save_state(&self.store, AUTH_KEY, &self.auth)
    }

    pub fn update_user(&mut self, patch: UserPatch) -> Result<(), StorageError> {
        self.auth.update_user(patch);
        save_state(&self.store, AUTH_KEY, &self.auth)
    }

    pub async fn register(&self, form: &RegistrationForm) -> Result<(), BookingError> {
        self.auth_service.register(form).await?;
        Ok(())
    }

    /// Simulated checkout. On success the reservation joins the history, the
    /// member is credited points and the selection is reset.
    pub async fn submit_booking(
        &mut self,
        guest: GuestInfo,
        today: NaiveDate,
    ) -> Result<Reservation, BookingError> {
        let validation = self.validate(today);
        if !validation.is_valid() {
            return Err(BookingError::InvalidReservation(validation.messages()));
        }
        guest.validate()?;

        let pricing = self.price();
        let (Some(room), Some(check_in), Some(check_out)) = (
            self.selection.selected_room.clone(),
            self.selection.check_in,
            self.selection.check_out,
        ) else {
            return Err(BookingError::InvalidReservation(validation.messages()));
        };
        if !self.catalog.rates.contains(&room) {
            return Err(BookingError::UnknownRoom(room));
        }

        sleep(self.config.delays.booking()).await;

        let taxes_and_fees = pricing.taxes_and_fees(self.config.tax_rate_pct);
        let points_earned = self.auth.points_earned(pricing.total);
        let reservation = Reservation {
            id: reservation_number(today.year()),
            room,
            package: self.selection.selected_package.clone(),
            check_in,
            check_out,
            adults: self.selection.adults,
            children: self.selection.children,
            pricing,
            taxes_and_fees,
            amount_due: pricing.total.saturating_add(taxes_and_fees),
            points_earned,
            guest,
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        };
        info!(
            reservation_id = %reservation.id,
            room = %reservation.room,
            nights = pricing.nights,
            total = pricing.total,
            "mock reservation confirmed"
        );

        self.auth.add_points(points_earned);
        self.history.record(reservation.clone());
        self.selection.reset();
        self.persist()?;
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MembershipLevel;
    use crate::availability::FixedAvailabilityChecker;
    use crate::cart::{CartItem, CartItemKind};
    use crate::storage::{FileStore, MemoryStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 1, 1)
    }

    fn config() -> BookingConfig {
        BookingConfig::default().without_delays()
    }

    fn guest() -> GuestInfo {
        GuestInfo {
            first_name: "Minji".to_string(),
            last_name: "Kim".to_string(),
            email: "minji@example.com".to_string(),
            phone: "010-1234-5678".to_string(),
            special_requests: Some("High floor".to_string()),
        }
    }

    fn booked_session() -> Session<MemoryStore> {
        let mut session = Session::load(MemoryStore::new(), config());
        let selection = session.selection_mut();
        selection.set_dates(date(2024, 3, 10), date(2024, 3, 15));
        selection.set_room("deluxe-room");
        selection.set_package("breakfast");
        selection.set_promo_code("luxe2024");
        session
    }

    #[test]
    fn test_fresh_session_defaults() {
        let session = Session::load(MemoryStore::new(), config());
        assert_eq!(session.selection(), &BookingSelection::default());
        assert!(session.cart().is_empty());
        assert!(!session.auth().is_authenticated);
        assert_eq!(session.price(), PriceBreakdown::default());
        assert!(!session.is_reservation_valid(today()));
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::load(FileStore::new(dir.path()), config());
        session.selection_mut().set_dates(date(2024, 3, 10), date(2024, 3, 12));
        session.selection_mut().set_room("premier-suite");
        session
            .cart_mut()
            .add_item(CartItem::new(CartItemKind::Dining, "la-lumiere", "La Lumière", 180_000));
        session.persist().unwrap();

        let reloaded = Session::load(FileStore::new(dir.path()), config());
        assert_eq!(reloaded.selection(), session.selection());
        assert_eq!(reloaded.cart(), session.cart());
        assert_eq!(reloaded.price().total, 1_100_000);
    }

    #[test]
    fn test_inconsistent_auth_state_is_signed_out() {
        let store = MemoryStore::new();
        store
            .set(AUTH_KEY, r#"{"state":{"user":null,"isAuthenticated":true},"version":0}"#)
            .unwrap();
        let session = Session::load(store, config());
        assert!(!session.auth().is_authenticated);
    }

    #[test]
    fn test_price_and_validation_follow_selection() {
        let mut session = booked_session();
        assert!(session.is_reservation_valid(today()));
        assert_eq!(session.price().total, 1_720_687);

        session.selection_mut().set_guests(3, 2);
        assert!(!session.validate_guests().is_valid());
        assert!(session.validate_dates(today()).is_valid());
        assert!(!session.is_reservation_valid(today()));
    }

    #[tokio::test]
    async fn test_check_availability() {
        let mut session = Session::load(MemoryStore::new(), config());
        let checker = FixedAvailabilityChecker::except(["presidential-suite"]);
        assert_eq!(session.check_availability(&checker).await, None);

        session.selection_mut().set_room("presidential-suite");
        assert_eq!(session.check_availability(&checker).await, Some(false));
        assert_eq!(checker.calls(), vec!["presidential-suite"]);
    }

    #[tokio::test]
    async fn test_login_logout_persisted() {
        let mut session = Session::load(MemoryStore::new(), config());
        session.login("minji@example.com", "secret").await.unwrap();
        assert!(session.auth().is_authenticated);
        assert!(session.store().get(AUTH_KEY).unwrap().unwrap().contains("minji@example.com"));

        session.logout().unwrap();
        assert!(!session.auth().is_authenticated);

        let err = session.login("", "").await.unwrap_err();
        assert!(matches!(err, BookingError::Auth(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_submit_booking_confirms_and_resets() {
        let mut session = booked_session();
        session.login("minji@example.com", "secret").await.unwrap();

        let reservation = session.submit_booking(guest(), today()).await.unwrap();
        assert!(reservation.id.starts_with("LH-2024-"));
        assert_eq!(reservation.id.len(), "LH-2024-000000".len());
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.pricing.total, 1_720_687);
        assert_eq!(reservation.taxes_and_fees, 172_069);
        assert_eq!(reservation.amount_due, 1_892_756);
        assert_eq!(reservation.points_earned, 120_448);

        // 15,000 + 120,448 crosses the gold and platinum thresholds
        let user = session.auth().user.clone().unwrap();
        assert_eq!(user.points, 135_448);
        assert_eq!(user.membership_level, MembershipLevel::Diamond);

        assert_eq!(session.selection(), &BookingSelection::default());
        let persisted: BookingSelection =
            load_state_or_default(session.store(), RESERVATION_KEY);
        assert_eq!(persisted, BookingSelection::default());
    }

    #[tokio::test]
    async fn test_booked_reservation_history_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::load(FileStore::new(dir.path()), config());
        for (check_in, check_out) in [(date(2024, 2, 15), date(2024, 2, 17)), (date(2024, 3, 20), date(2024, 3, 22))] {
            let selection = session.selection_mut();
            selection.set_dates(check_in, check_out);
            selection.set_room("premier-suite");
            session.submit_booking(guest(), today()).await.unwrap();
        }
        assert_eq!(session.history().len(), 2);
        let newest = session.history().iter().next().unwrap().clone();
        assert_eq!(newest.check_in, date(2024, 3, 20));

        let cancelled = session.cancel_reservation(&newest.id).unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert!(matches!(
            session.cancel_reservation(&newest.id),
            Err(BookingError::NotCancellable { .. })
        ));
        assert_eq!(session.complete_past_stays(date(2024, 3, 1)).unwrap(), 1);

        let mut reloaded = Session::load(FileStore::new(dir.path()), config());
        let only = |status| ReservationFilter::Only(status);
        assert_eq!(reloaded.reservations(ReservationFilter::All, "").len(), 2);
        assert_eq!(reloaded.reservations(only(ReservationStatus::Cancelled), "").len(), 1);
        assert_eq!(reloaded.reservations(only(ReservationStatus::Completed), "").len(), 1);
        assert_eq!(reloaded.reservations(only(ReservationStatus::Confirmed), "").len(), 0);
        assert!(matches!(
            reloaded.cancel_reservation("LH-0000-000000"),
            Err(BookingError::ReservationNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_booking_rejects_invalid_selection() {
        let mut session = booked_session();
        session.selection_mut().clear_room();

        let err = session.submit_booking(guest(), today()).await.unwrap_err();
        match err {
            BookingError::InvalidReservation(messages) => {
                assert_eq!(messages, vec!["Please select a room"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // Nothing was reset
        assert_eq!(session.selection().selected_package, "breakfast");
    }

    #[tokio::test]
    async fn test_submit_booking_rejects_unknown_room_and_missing_guest_fields() {
        let mut session = booked_session();
        let mut incomplete = guest();
        incomplete.phone.clear();
        assert!(matches!(
            session.submit_booking(incomplete, today()).await,
            Err(BookingError::MissingGuestField("phone"))
        ));

        session.selection_mut().set_room("broom-closet");
        assert!(matches!(
            session.submit_booking(guest(), today()).await,
            Err(BookingError::UnknownRoom(room)) if room == "broom-closet"
        ));
    }

    #[test]
    fn test_cart_summary_uses_selected_nights() {
        let mut session = booked_session();
        session
            .cart_mut()
            .add_item(CartItem::new(CartItemKind::Room, "deluxe-room", "Deluxe Room", 350_000));
        let summary = session.cart_summary();
        assert_eq!(summary.nights, 5);
        assert_eq!(summary.subtotal, 1_750_000);
        assert_eq!(summary.tax, 175_000);
    }

    #[test]
    fn test_reset_reservation_persists() {
        let mut session = booked_session();
        session.persist().unwrap();
        session.reset_reservation().unwrap();
        let persisted: BookingSelection = load_state_or_default(session.store(), RESERVATION_KEY);
        assert_eq!(persisted, BookingSelection::default());
    }
}
