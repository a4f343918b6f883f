// Browsable hotel content: special offers, events, facilities and restaurants
// Filters take an optional criterion and pass everything through when it is None

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub slug: String,
    pub title: String,
    pub title_en: String,
    pub subtitle: String,
    pub description: String,
    pub price: u64,
    pub original_price: Option<u64>,
    pub discount: Option<u32>,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub includes: Vec<String>,
    pub room_types: Vec<String>,
    pub tags: Vec<String>,
    pub featured: bool,
}

impl Offer {
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && date <= self.valid_to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Promotion,
    Exhibition,
    Dining,
    Entertainment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelEvent {
    pub slug: String,
    pub title: String,
    pub title_en: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    pub category: EventCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityCategory {
    Spa,
    Fitness,
    Pool,
    Garden,
    Shopping,
    Kids,
    Wellness,
    Dining,
    Entertainment,
    Business,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub slug: String,
    pub name: String,
    pub name_en: String,
    pub description: String,
    pub hours: String,
    pub location: String,
    pub features: Vec<String>,
    pub category: FacilityCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub slug: String,
    pub name: String,
    pub name_en: String,
    pub cuisine: String,
    pub description: String,
    pub hours: String,
    pub price_range: String,
    pub location: String,
    pub capacity: u32,
    pub features: Vec<String>,
    pub specialties: Vec<String>,
    pub michelin_stars: Option<u8>,
    pub reservation_required: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Listings {
    pub offers: Vec<Offer>,
    pub events: Vec<HotelEvent>,
    pub facilities: Vec<Facility>,
    pub restaurants: Vec<Restaurant>,
}

impl Listings {
    pub fn offer(&self, slug: &str) -> Option<&Offer> {
        self.offers.iter().find(|o| o.slug == slug)
    }

    pub fn restaurant(&self, slug: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.slug == slug)
    }

    pub fn offers_by_tag(&self, tag: Option<&str>) -> Vec<&Offer> {
        self.offers
            .iter()
            .filter(|o| tag.map_or(true, |t| o.tags.iter().any(|own| own == t)))
            .collect()
    }

    pub fn featured_offers(&self) -> Vec<&Offer> {
        self.offers.iter().filter(|o| o.featured).collect()
    }

    pub fn offers_valid_on(&self, date: NaiveDate) -> Vec<&Offer> {
        self.offers.iter().filter(|o| o.is_valid_on(date)).collect()
    }

    /// Every tag in first-seen order, for the filter bar.
    pub fn offer_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.offers.iter().flat_map(|o| o.tags.iter()) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
        tags
    }

    pub fn restaurants_by_cuisine(&self, cuisine: Option<&str>) -> Vec<&Restaurant> {
        self.restaurants
            .iter()
            .filter(|r| cuisine.map_or(true, |c| r.cuisine == c))
            .collect()
    }

    pub fn cuisines(&self) -> Vec<&str> {
        let mut cuisines: Vec<&str> = Vec::new();
        for restaurant in &self.restaurants {
            if !cuisines.contains(&restaurant.cuisine.as_str()) {
                cuisines.push(&restaurant.cuisine);
            }
        }
        cuisines
    }

    pub fn events_by_category(&self, category: Option<EventCategory>) -> Vec<&HotelEvent> {
        self.events
            .iter()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .collect()
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<&HotelEvent> {
        self.events
            .iter()
            .filter(|e| e.start_date <= date && date <= e.end_date)
            .collect()
    }

    pub fn facilities_by_category(&self, category: Option<FacilityCategory>) -> Vec<&Facility> {
        self.facilities
            .iter()
            .filter(|f| category.map_or(true, |c| f.category == c))
            .collect()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn default_listings() -> Listings {
    Listings {
        offers: default_offers(),
        events: default_events(),
        facilities: default_facilities(),
        restaurants: default_restaurants(),
    }
}

fn default_offers() -> Vec<Offer> {
    vec![
        Offer {
            slug: "romantic-getaway".to_string(),
            title: "로맨틱 겟어웨이".to_string(),
            title_en: "Romantic Getaway".to_string(),
            subtitle: "연인을 위한 특별한 하룻밤".to_string(),
            description: "스위트 객실과 샴페인, 커플 스파로 완성하는 기념일".to_string(),
            price: 890_000,
            original_price: Some(1_100_000),
            discount: Some(19),
            valid_from: ymd(2024, 1, 1),
            valid_to: ymd(2024, 12, 31),
            includes: strings(&["Premier Suite 1박", "샴페인 1병", "커플 스파 60분", "2인 조식"]),
            room_types: strings(&["premier-suite", "executive-suite"]),
            tags: strings(&["커플", "스파", "기념일"]),
            featured: true,
        },
        Offer {
            slug: "family-staycation".to_string(),
            title: "패밀리 스테이케이션".to_string(),
            title_en: "Family Staycation".to_string(),
            subtitle: "온 가족이 함께하는 휴식".to_string(),
            description: "키즈 클럽과 수영장을 포함한 가족 패키지".to_string(),
            price: 650_000,
            original_price: Some(780_000),
            discount: Some(17),
            valid_from: ymd(2024, 6, 1),
            valid_to: ymd(2024, 8, 31),
            includes: strings(&["Deluxe Room 1박", "4인 조식", "키즈 클럽 이용권"]),
            room_types: strings(&["deluxe-room", "executive-suite"]),
            tags: strings(&["가족", "여름"]),
            featured: true,
        },
        Offer {
            slug: "gourmet-journey".to_string(),
            title: "고메 저니".to_string(),
            title_en: "Gourmet Journey".to_string(),
            subtitle: "미쉐린 레스토랑 디너 코스".to_string(),
            description: "객실 숙박과 파인 다이닝 디너를 함께 즐기는 패키지".to_string(),
            price: 720_000,
            original_price: None,
            discount: None,
            valid_from: ymd(2024, 3, 1),
            valid_to: ymd(2024, 11, 30),
            includes: strings(&["Deluxe Room 1박", "2인 디너 코스", "와인 페어링"]),
            room_types: strings(&["deluxe-room", "premier-suite"]),
            tags: strings(&["다이닝", "커플"]),
            featured: false,
        },
    ]
}

fn default_events() -> Vec<HotelEvent> {
    vec![
        HotelEvent {
            slug: "summer-pool-party".to_string(),
            title: "서머 풀 파티".to_string(),
            title_en: "Summer Pool Party".to_string(),
            description: "DJ 공연과 칵테일이 함께하는 루프탑 풀 파티".to_string(),
            start_date: ymd(2024, 7, 20),
            end_date: ymd(2024, 8, 17),
            location: "Rooftop Pool".to_string(),
            category: EventCategory::Entertainment,
        },
        HotelEvent {
            slug: "art-in-the-lobby".to_string(),
            title: "로비 아트 전시".to_string(),
            title_en: "Art in the Lobby".to_string(),
            description: "현대 작가들의 작품을 소개하는 로비 갤러리 전시".to_string(),
            start_date: ymd(2024, 3, 1),
            end_date: ymd(2024, 5, 31),
            location: "Main Lobby".to_string(),
            category: EventCategory::Exhibition,
        },
        HotelEvent {
            slug: "chefs-table-week".to_string(),
            title: "셰프스 테이블 위크".to_string(),
            title_en: "Chef's Table Week".to_string(),
            description: "게스트 셰프와 함께하는 한정 테이스팅 메뉴".to_string(),
            start_date: ymd(2024, 10, 7),
            end_date: ymd(2024, 10, 13),
            location: "La Lumière".to_string(),
            category: EventCategory::Dining,
        },
    ]
}

fn facility(
    slug: &str,
    name: &str,
    name_en: &str,
    hours: &str,
    location: &str,
    features: &[&str],
    category: FacilityCategory,
) -> Facility {
    Facility {
        slug: slug.to_string(),
        name: name.to_string(),
        name_en: name_en.to_string(),
        description: String::new(),
        hours: hours.to_string(),
        location: location.to_string(),
        features: strings(features),
        category,
    }
}

fn default_facilities() -> Vec<Facility> {
    vec![
        facility("spa", "스파", "Spa", "10:00 - 22:00", "B1", &["트리트먼트 룸 8실", "사우나"], FacilityCategory::Spa),
        facility("outdoor-pool", "야외 수영장", "Outdoor Pool", "07:00 - 21:00", "Rooftop", &["인피니티 풀", "카바나"], FacilityCategory::Pool),
        facility("fitness-center", "피트니스 센터", "Fitness Center", "24시간", "5F", &["퍼스널 트레이닝"], FacilityCategory::Fitness),
        facility("club-lounge", "클럽 라운지", "Club Lounge", "07:00 - 23:00", "35F", &["해피 아워", "비즈니스 코너"], FacilityCategory::Business),
        facility("kids-club", "키즈 클럽", "Kids Club", "09:00 - 18:00", "3F", &["전문 돌봄 교사"], FacilityCategory::Kids),
    ]
}

#[allow(clippy::too_many_arguments)]
fn restaurant(
    slug: &str,
    name: &str,
    name_en: &str,
    cuisine: &str,
    hours: &str,
    price_range: &str,
    capacity: u32,
    michelin_stars: Option<u8>,
    reservation_required: bool,
) -> Restaurant {
    Restaurant {
        slug: slug.to_string(),
        name: name.to_string(),
        name_en: name_en.to_string(),
        cuisine: cuisine.to_string(),
        description: String::new(),
        hours: hours.to_string(),
        price_range: price_range.to_string(),
        location: String::new(),
        capacity,
        features: Vec::new(),
        specialties: Vec::new(),
        michelin_stars,
        reservation_required,
    }
}

fn default_restaurants() -> Vec<Restaurant> {
    vec![
        restaurant("hanwoo", "한우리", "Hanwoori", "Korean Fine Dining", "18:00 - 22:00", "₩₩₩₩", 60, Some(2), true),
        restaurant("la-lumiere", "라 뤼미에르", "La Lumière", "Italian Fine Dining", "18:00 - 22:30", "₩₩₩₩", 48, Some(1), true),
        restaurant("sora", "소라", "Sora", "Japanese Omakase", "12:00 - 21:00", "₩₩₩₩", 14, None, true),
        restaurant("the-terrace", "더 테라스", "The Terrace", "All-Day Dining", "06:30 - 22:00", "₩₩", 180, None, false),
        restaurant("the-lounge", "더 라운지", "The Lounge", "Lounge & Bar", "11:00 - 01:00", "₩₩₩", 80, None, false),
        restaurant("patisserie", "파티세리", "Pâtisserie", "Bakery & Café", "08:00 - 20:00", "₩", 30, None, false),
    ]
}
