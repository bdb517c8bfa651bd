//! Place-type classification sets
//!
//! Type tags come back from the lookup provider as free-form strings; these
//! sets drive both validation (valid/reject) and category classification.

use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Types that classify as food venues
    pub static ref FOOD_TYPES: HashSet<&'static str> = [
        "restaurant",
        "food",
        "cafe",
        "bakery",
        "bar",
        "meal_takeaway",
        "meal_delivery",
        "night_club",
    ]
    .into_iter()
    .collect();

    /// Types that classify as attractions
    pub static ref ATTRACTION_TYPES: HashSet<&'static str> = [
        "tourist_attraction",
        "park",
        "museum",
        "amusement_park",
        "aquarium",
        "art_gallery",
        "zoo",
        "campground",
        "stadium",
        "bowling_alley",
        "church",
        "hindu_temple",
        "mosque",
        "synagogue",
    ]
    .into_iter()
    .collect();

    /// Types that classify as shopping venues
    pub static ref SHOPPING_TYPES: HashSet<&'static str> =
        ["shopping_mall", "department_store"].into_iter().collect();

    /// Types that classify as accommodation
    pub static ref LODGING_TYPES: HashSet<&'static str> = ["lodging"].into_iter().collect();

    /// Types that classify as spa/leisure venues
    pub static ref SPA_TYPES: HashSet<&'static str> =
        ["spa", "beauty_salon", "hair_care"].into_iter().collect();

    /// Whitelist: a hit must carry at least one of these to be considered
    pub static ref VALID_PLACE_TYPES: HashSet<&'static str> = FOOD_TYPES
        .iter()
        .chain(ATTRACTION_TYPES.iter())
        .chain(SHOPPING_TYPES.iter())
        .chain(LODGING_TYPES.iter())
        .chain(SPA_TYPES.iter())
        .copied()
        .chain(["point_of_interest", "establishment", "store"])
        .collect();

    /// Blacklist: a hit carrying any of these is never a venue we want
    /// (administrative areas, transit, infrastructure, offices, schools)
    pub static ref REJECT_PLACE_TYPES: HashSet<&'static str> = [
        "locality",
        "political",
        "administrative_area_level_1",
        "administrative_area_level_2",
        "administrative_area_level_3",
        "country",
        "postal_code",
        "route",
        "street_address",
        "transit_station",
        "bus_station",
        "train_station",
        "subway_station",
        "airport",
        "parking",
        "car_repair",
        "car_dealer",
        "car_wash",
        "gas_station",
        "insurance_agency",
        "lawyer",
        "local_government_office",
        "police",
        "fire_station",
        "hospital",
        "doctor",
        "dentist",
        "pharmacy",
        "veterinary_care",
        "cemetery",
        "funeral_home",
        "post_office",
        "bank",
        "atm",
        "accounting",
        "real_estate_agency",
        "moving_company",
        "storage",
        "plumber",
        "electrician",
        "roofing_contractor",
        "painter",
        "locksmith",
        "school",
        "university",
        "primary_school",
        "secondary_school",
        "library",
        "courthouse",
        "city_hall",
        "embassy",
    ]
    .into_iter()
    .collect();
}

/// Keyword substrings mapped to a provider type hint for direct search.
/// First matching entry wins, so more specific keywords come first.
pub const PLACE_TYPE_HINTS: &[(&str, &str)] = &[
    ("餐廳", "restaurant"),
    ("美食", "restaurant"),
    ("料理", "restaurant"),
    ("小吃", "restaurant"),
    ("火鍋", "restaurant"),
    ("拉麵", "restaurant"),
    ("牛排", "restaurant"),
    ("燒肉", "restaurant"),
    ("壽司", "restaurant"),
    ("早午餐", "restaurant"),
    ("素食", "restaurant"),
    ("咖啡", "cafe"),
    ("咖啡廳", "cafe"),
    ("cafe", "cafe"),
    ("coffee", "cafe"),
    ("甜點", "bakery"),
    ("蛋糕", "bakery"),
    ("麵包", "bakery"),
    ("酒吧", "bar"),
    ("餐酒館", "bar"),
    ("景點", "tourist_attraction"),
    ("觀光", "tourist_attraction"),
    ("公園", "park"),
    ("博物館", "museum"),
];

/// Provider type hint for a search keyword, if any keyword substring matches
pub fn place_type_hint(keyword: &str) -> Option<&'static str> {
    PLACE_TYPE_HINTS
        .iter()
        .find(|(kw, _)| keyword.contains(kw))
        .map(|(_, ty)| *ty)
}

/// Whether any tag in `types` is present in `set`
pub fn intersects(types: &[String], set: &HashSet<&'static str>) -> bool {
    types.iter().any(|t| set.contains(t.as_str()))
}
