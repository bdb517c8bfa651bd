// Core data structures for the tastemap pipeline

use serde::{Deserialize, Serialize};

/// Venue category, stored and served with its Chinese display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// 美食 - restaurants, cafes, bars, street food
    #[serde(rename = "美食")]
    Food,
    /// 景點 - sights, parks, museums, temples
    #[serde(rename = "景點")]
    Attraction,
    /// 購物 - malls, department stores
    #[serde(rename = "購物")]
    Shopping,
    /// 休閒 - spa, massage, beauty
    #[serde(rename = "休閒")]
    Leisure,
    /// 住宿 - hotels, guesthouses
    #[serde(rename = "住宿")]
    Accommodation,
}

impl Category {
    /// Display label used in the database and API responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "美食",
            Category::Attraction => "景點",
            Category::Shopping => "購物",
            Category::Leisure => "休閒",
            Category::Accommodation => "住宿",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "美食" => Ok(Category::Food),
            "景點" => Ok(Category::Attraction),
            "購物" => Ok(Category::Shopping),
            "休閒" => Ok(Category::Leisure),
            "住宿" => Ok(Category::Accommodation),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal affordability band derived from the place rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Upscale,
}

impl PriceTier {
    /// Derive the tier from a rating. Thresholds: below 4.0 -> `$`,
    /// below 4.5 -> `$$`, otherwise `$$$`.
    pub fn from_rating(rating: f64) -> Self {
        if rating < 4.0 {
            PriceTier::Budget
        } else if rating < 4.5 {
            PriceTier::Moderate
        } else {
            PriceTier::Upscale
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Budget => "$",
            PriceTier::Moderate => "$$",
            PriceTier::Upscale => "$$$",
        }
    }
}

impl std::str::FromStr for PriceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$" => Ok(PriceTier::Budget),
            "$$" => Ok(PriceTier::Moderate),
            "$$$" => Ok(PriceTier::Upscale),
            other => Err(format!("unknown price tier: {other}")),
        }
    }
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a web article returned by the search provider.
///
/// `url` is the dedup key within one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRef {
    pub url: String,
    pub title: String,
    pub site_label: String,
}

/// An unvalidated venue name scraped out of an article, with a nearby
/// supporting sentence.
#[derive(Debug, Clone)]
pub struct PlaceCandidate {
    pub name: String,
    pub quote: String,
    pub article_title: String,
    pub article_url: String,
    pub site_label: String,
}

/// A venue that passed place-lookup validation. This is the persisted and
/// API-served unit; field names match the stored schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub category: Category,
    /// Provider photo URL, or the fixed placeholder image
    pub image: String,
    /// Attribution: the article's site label, or the lookup provider
    pub influencer: String,
    pub quote: String,
    pub rating: f64,
    pub price_range: PriceTier,
    /// Canonical city the venue was validated against
    pub location: String,
    /// Map deep link
    pub source_url: String,
    pub article_url: String,
    pub address: String,
}
