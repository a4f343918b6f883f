// Mock room availability
// There is no inventory behind this; the checker only simulates an async round trip

use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

#[async_trait]
pub trait AvailabilityChecker: Send + Sync {
    // Resolves to true when the room can be booked
    async fn is_available(&self, room_key: &str) -> bool;
}

/// Waits a fixed delay, then reports availability with the given probability.
#[derive(Debug, Clone)]
pub struct RandomAvailabilityChecker {
    delay: Duration,
    availability_ratio: f64,
}

impl RandomAvailabilityChecker {
    pub fn new(delay: Duration, availability_ratio: f64) -> Self {
        Self {
            delay,
            availability_ratio: availability_ratio.clamp(0.0, 1.0),
        }
    }
}

impl Default for RandomAvailabilityChecker {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), 0.8)
    }
}

#[async_trait]
impl AvailabilityChecker for RandomAvailabilityChecker {
    async fn is_available(&self, room_key: &str) -> bool {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        let available = rand::random::<f64>() < self.availability_ratio;
        debug!(room_key, available, "mock availability check");
        available
    }
}

/// Deterministic checker for tests and demos. Records every room it was asked about.
#[derive(Debug, Default)]
pub struct FixedAvailabilityChecker {
    available: bool,
    unavailable_rooms: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FixedAvailabilityChecker {
    pub fn always(available: bool) -> Self {
        Self {
            available,
            ..Self::default()
        }
    }

    // Everything is available except the listed rooms
    pub fn except<I, S>(rooms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available: true,
            unavailable_rooms: rooms.into_iter().map(Into::into).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl AvailabilityChecker for FixedAvailabilityChecker {
    async fn is_available(&self, room_key: &str) -> bool {
        self.calls.lock().push(room_key.to_string());
        self.available && !self.unavailable_rooms.iter().any(|r| r == room_key)
    }
}

/// Checks several rooms concurrently; results keep the input order.
pub async fn check_rooms<C>(checker: &C, room_keys: &[&str]) -> Vec<(String, bool)>
where
    C: AvailabilityChecker + ?Sized,
{
    let checks = room_keys.iter().map(|key| async move {
        let available = checker.is_available(key).await;
        (key.to_string(), available)
    });
    join_all(checks).await
}
