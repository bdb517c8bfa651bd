//! Category classification for validated places
//!
//! Provider type tags are the primary signal; the venue name breaks ties and
//! covers hits that only carry generic tags (`point_of_interest`,
//! `establishment`).

use crate::models::Category;
use crate::places::types::{
    intersects, ATTRACTION_TYPES, FOOD_TYPES, LODGING_TYPES, SHOPPING_TYPES, SPA_TYPES,
};

/// Name fragments that mark a food venue
const FOOD_NAME_HINTS: &[&str] = &[
    "餐", "食", "麵", "飯", "鍋", "燒", "烤", "壽司", "拉麵", "cafe", "coffee", "kitchen",
    "bistro", "bar", "grill", "咖啡", "茶", "甜點", "蛋糕", "麵包", "小吃", "牛排", "披薩",
    "pizza", "pasta", "料理", "酒", "dining",
];

/// Name fragments that mark an attraction
const ATTRACTION_NAME_HINTS: &[&str] = &[
    "公園", "博物館", "紀念", "觀景", "文化", "園區", "美術館", "動物園", "水族", "遊樂",
    "museum", "park", "古蹟", "寺", "廟", "教堂", "步道", "瀑布",
];

fn name_has_hint(name_lower: &str, hints: &[&str]) -> bool {
    hints.iter().any(|hint| name_lower.contains(hint))
}

/// Classify a place from its provider type tags and name.
///
/// Pure and deterministic. Priority: food, attraction, the food/attraction
/// tie broken by name hints, shopping, spa, lodging, then name-hint
/// fallbacks, with Food as the final default.
pub fn classify(types: &[String], name: &str) -> Category {
    let name_lower = name.to_lowercase();

    let has_food = intersects(types, &FOOD_TYPES);
    let has_attraction = intersects(types, &ATTRACTION_TYPES);

    if has_food && !has_attraction {
        return Category::Food;
    }
    if has_attraction && !has_food {
        return Category::Attraction;
    }
    if has_food && has_attraction {
        // Both tag families present: the name decides
        if name_has_hint(&name_lower, FOOD_NAME_HINTS) {
            return Category::Food;
        }
        return Category::Attraction;
    }

    if intersects(types, &SHOPPING_TYPES) {
        return Category::Shopping;
    }
    if intersects(types, &SPA_TYPES) {
        return Category::Leisure;
    }
    if intersects(types, &LODGING_TYPES) {
        return Category::Accommodation;
    }

    // Only generic tags left: fall back to the name
    if name_has_hint(&name_lower, FOOD_NAME_HINTS) {
        return Category::Food;
    }
    if name_has_hint(&name_lower, ATTRACTION_NAME_HINTS) {
        return Category::Attraction;
    }
    if types.iter().any(|t| t == "store") {
        return Category::Shopping;
    }

    Category::Food
}
