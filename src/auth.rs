// Mock authentication and membership
// Login and registration only simulate latency; no credentials are checked against anything

use crate::config::SimulatedDelays;
use crate::pricing::group_digits;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info};
use uuid::Uuid;

pub const MOCK_MEMBER_POINTS: u64 = 15_000;

// Member-only paths; anonymous visitors are redirected to the login page
pub const PROTECTED_ROUTES: [&str; 4] = ["/my-account", "/reservations", "/booking/confirm", "/profile"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Terms of service and privacy policy must be accepted")]
    AgreementsMissing,

    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipLevel {
    Classic,
    Gold,
    Platinum,
    Diamond,
}

impl MembershipLevel {
    pub const ALL: [MembershipLevel; 4] = [
        MembershipLevel::Classic,
        MembershipLevel::Gold,
        MembershipLevel::Platinum,
        MembershipLevel::Diamond,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<MembershipLevel> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Points needed to leave this level; `None` for the top level.
    pub fn points_threshold(self) -> Option<u64> {
        match self {
            MembershipLevel::Classic => Some(20_000),
            MembershipLevel::Gold => Some(50_000),
            MembershipLevel::Platinum => Some(100_000),
            MembershipLevel::Diamond => None,
        }
    }

    pub fn earn_rate_pct(self) -> u32 {
        match self {
            MembershipLevel::Classic => 5,
            MembershipLevel::Gold => 7,
            MembershipLevel::Platinum => 10,
            MembershipLevel::Diamond => 15,
        }
    }

    pub fn benefits(self) -> &'static [&'static str] {
        match self {
            MembershipLevel::Classic => &["5% base points", "Birthday benefit"],
            MembershipLevel::Gold => &[
                "7% base points",
                "Birthday benefit",
                "Room upgrade (when available)",
                "Late checkout",
            ],
            MembershipLevel::Platinum => &[
                "10% base points",
                "Birthday benefit",
                "Priority room upgrade",
                "Late checkout",
                "Complimentary breakfast",
                "Lounge access",
            ],
            MembershipLevel::Diamond => &[
                "15% base points",
                "Birthday benefit",
                "Top-priority room upgrade",
                "Late checkout",
                "Complimentary breakfast",
                "Lounge access",
                "20% spa discount",
                "Dedicated concierge",
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub membership_level: MembershipLevel,
    pub points: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub membership_level: Option<MembershipLevel>,
    pub points: Option<u64>,
}

impl User {
    fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(level) = patch.membership_level {
            self.membership_level = level;
        }
        if let Some(points) = patch.points {
            self.points = points;
        }
    }
}

/// The persisted part of the authentication session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl AuthState {
    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
        self.is_authenticated = true;
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.is_authenticated = false;
    }

    // No-op while logged out
    pub fn update_user(&mut self, patch: UserPatch) {
        if let Some(user) = self.user.as_mut() {
            user.apply(patch);
        }
    }

    pub fn benefits(&self) -> &'static [&'static str] {
        self.user
            .as_ref()
            .map(|u| u.membership_level.benefits())
            .unwrap_or(&[])
    }

    pub fn points_to_next_level(&self) -> u64 {
        self.user.as_ref().map_or(0, |u| {
            u.membership_level
                .points_threshold()
                .map_or(0, |threshold| threshold.saturating_sub(u.points))
        })
    }

    pub fn next_level(&self) -> Option<MembershipLevel> {
        self.user.as_ref().and_then(|u| u.membership_level.next())
    }

    /// Credits points and promotes through every level whose threshold is met.
    pub fn add_points(&mut self, points: u64) {
        let Some(user) = self.user.as_mut() else {
            return;
        };
        user.points = user.points.saturating_add(points);

        let start = user.membership_level.index() + 1;
        for level in MembershipLevel::ALL.iter().skip(start) {
            let previous = MembershipLevel::ALL[level.index() - 1];
            if previous
                .points_threshold()
                .is_some_and(|threshold| user.points >= threshold)
            {
                info!(user_id = %user.id, from = ?user.membership_level, to = ?level, "membership upgraded");
                user.membership_level = *level;
            }
        }
    }

    // Points a booking of `amount` earns at the member's current level
    pub fn points_earned(&self, amount: u64) -> u64 {
        self.user.as_ref().map_or(0, |u| {
            let earned = (amount as u128 * u.membership_level.earn_rate_pct() as u128 + 50) / 100;
            u64::try_from(earned).unwrap_or(u64::MAX)
        })
    }
}

pub fn is_protected_route(path: &str) -> bool {
    PROTECTED_ROUTES.iter().any(|route| path.starts_with(route))
}

/// Login page URL that returns the visitor to `path` after signing in.
pub fn login_redirect(path: &str) -> String {
    let mut url = String::from("/login?returnUrl=");
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => url.push(char::from(byte)),
            _ => url.push_str(&format!("%{:02X}", byte)),
        }
    }
    url
}

pub fn format_points(points: u64) -> String {
    group_digits(points)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub agree_terms: bool,
    pub agree_privacy: bool,
    pub agree_marketing: bool,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() {
            return Err(AuthError::MissingRequiredField("email"));
        }
        if self.password.is_empty() {
            return Err(AuthError::MissingRequiredField("password"));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if !(self.agree_terms && self.agree_privacy) {
            return Err(AuthError::AgreementsMissing);
        }
        Ok(())
    }
}

// Holds the loading flag for as long as a request future is alive
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn set(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Simulated identity provider.
#[derive(Debug, Default)]
pub struct AuthService {
    delays: SimulatedDelays,
    loading: AtomicBool,
}

impl AuthService {
    pub fn new(delays: SimulatedDelays) -> Self {
        Self {
            delays,
            loading: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        {
            let _loading = LoadingGuard::set(&self.loading);
            sleep(self.delays.login()).await;
        }

        if email.is_empty() || password.is_empty() {
            debug!("rejected login with empty credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let name = email.split('@').next().unwrap_or(email).to_string();
        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            email: email.to_string(),
            membership_level: MembershipLevel::Gold,
            points: MOCK_MEMBER_POINTS,
        };
        info!(user_id = %user.id, "mock login succeeded");
        Ok(user)
    }

    /// Validates the form up front, then always succeeds after the delay.
    pub async fn register(&self, form: &RegistrationForm) -> Result<(), AuthError> {
        form.validate()?;

        {
            let _loading = LoadingGuard::set(&self.loading);
            sleep(self.delays.register()).await;
        }

        info!(email = %form.email, marketing = form.agree_marketing, "mock registration succeeded");
        Ok(())
    }
}
