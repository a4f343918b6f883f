// Static catalog data: room rates, package multipliers, the promo allow-list
// and the browsable listings
// These tables are built once at startup and never mutated

use crate::listings::{default_listings, Listings};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_PACKAGE: &str = "standard";

// Room categories as shown on the rooms page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    Deluxe,
    Suite,
    Villa,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub slug: String,
    pub name: String,
    pub name_en: String,
    pub category: RoomCategory,
    pub size_sqm: u32,
    pub max_guests: u32,
    pub price: u64,
}

// A package multiplier held as a whole percentage (115 == 1.15x)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Multiplier(u32);

impl Multiplier {
    pub const ONE: Multiplier = Multiplier(100);

    pub const fn from_percent(percent: u32) -> Self {
        Multiplier(percent)
    }

    pub fn percent(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Multiplier::ONE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub key: String,
    pub name: String,
    pub description: String,
    pub multiplier: Multiplier,
}

/// Nightly base price per room key.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<String, u64>,
}

impl RateTable {
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        Self {
            rates: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    // Unknown keys price at zero; the caller must refuse checkout in that case
    pub fn base_price(&self, room_key: &str) -> u64 {
        self.rates.get(room_key).copied().unwrap_or(0)
    }

    pub fn contains(&self, room_key: &str) -> bool {
        self.rates.contains_key(room_key)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PackageTable {
    packages: Vec<Package>,
}

impl PackageTable {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    pub fn get(&self, key: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.key == key)
    }

    /// Multiplier for `key`, falling back to 1x for unknown packages.
    pub fn multiplier(&self, key: &str) -> Multiplier {
        self.get(key).map_or(Multiplier::ONE, |p| p.multiplier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }
}

// Case-insensitive allow-list of promo codes
#[derive(Debug, Clone, Default)]
pub struct PromoCodes {
    codes: Vec<String>,
}

impl PromoCodes {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codes: codes
                .into_iter()
                .map(|c| c.as_ref().trim().to_uppercase())
                .collect(),
        }
    }

    pub fn matches(&self, code: &str) -> bool {
        let code = code.trim().to_uppercase();
        !code.is_empty() && self.codes.iter().any(|c| *c == code)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn get(&self, slug: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.slug == slug)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn rooms_for_guests(&self, guests: u32) -> Vec<&Room> {
        self.rooms.iter().filter(|r| r.max_guests >= guests).collect()
    }

    pub fn by_category(&self, category: RoomCategory) -> Vec<&Room> {
        self.rooms
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    pub fn rate_table(&self) -> RateTable {
        RateTable::new(self.rooms.iter().map(|r| (r.slug.clone(), r.price)))
    }
}

/// Everything the pricing path reads, plus the browsable listings.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub rooms: RoomCatalog,
    pub rates: RateTable,
    pub packages: PackageTable,
    pub promo_codes: PromoCodes,
    pub listings: Listings,
}

impl Catalog {
    pub fn new(rooms: RoomCatalog, packages: PackageTable, promo_codes: PromoCodes) -> Self {
        let rates = rooms.rate_table();
        Self {
            rooms,
            rates,
            packages,
            promo_codes,
            listings: Listings::default(),
        }
    }

    pub fn with_listings(mut self, listings: Listings) -> Self {
        self.listings = listings;
        self
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(default_rooms(), default_packages(), default_promo_codes())
            .with_listings(default_listings())
    }
}

fn room(
    slug: &str,
    name: &str,
    name_en: &str,
    category: RoomCategory,
    size_sqm: u32,
    max_guests: u32,
    price: u64,
) -> Room {
    Room {
        slug: slug.to_string(),
        name: name.to_string(),
        name_en: name_en.to_string(),
        category,
        size_sqm,
        max_guests,
        price,
    }
}

pub fn default_rooms() -> RoomCatalog {
    RoomCatalog::new(vec![
        room("deluxe-room", "디럭스 룸", "Deluxe Room", RoomCategory::Deluxe, 45, 3, 350_000),
        room("premier-suite", "프리미어 스위트", "Premier Suite", RoomCategory::Suite, 75, 3, 550_000),
        room("executive-suite", "이그제큐티브 스위트", "Executive Suite", RoomCategory::Suite, 110, 4, 850_000),
        room("presidential-suite", "프레지덴셜 스위트", "Presidential Suite", RoomCategory::Suite, 180, 4, 1_500_000),
    ])
}

fn package(key: &str, name: &str, description: &str, percent: u32) -> Package {
    Package {
        key: key.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        multiplier: Multiplier::from_percent(percent),
    }
}

pub fn default_packages() -> PackageTable {
    PackageTable::new(vec![
        package(DEFAULT_PACKAGE, "스탠다드", "객실만 제공", 100),
        package("breakfast", "조식 포함", "2인 조식 뷔페 포함", 115),
        package("premium", "프리미엄", "조식 + 스파 이용권 + 리조트 머니 10만원", 135),
        package("luxury", "럭셔리", "프리미엄 혜택 + 디너 코스 + 공항 픽업", 160),
    ])
}

pub fn default_promo_codes() -> PromoCodes {
    PromoCodes::new(["LUXE2024"])
}
