//! Free-text query parsing
//!
//! Turns unsegmented, possibly bilingual user input into structured facets
//! (city, topics, categories, intents) plus two derived search queries.
//!
//! Matching is substring-based, not token-based: Chinese input has no word
//! boundaries, so each dictionary is walked in precomputed longest-first
//! order and every matched key is removed from the working text exactly once
//! before the next pass runs.
//!
//! ```
//! use tastemap::lexicon::Lexicon;
//! use tastemap::query::QueryParser;
//!
//! let parser = QueryParser::new(Lexicon::shared());
//! let parsed = parser.parse("東京好吃的拉麵");
//! assert_eq!(parsed.city, "東京");
//! assert_eq!(parsed.topics, vec!["拉麵"]);
//! ```

use crate::lexicon::{Lexicon, DEFAULT_CITY, DEFAULT_CITY_EN};

/// Structured result of query parsing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedQuery {
    /// Original input, trimmed
    pub original: String,
    /// Canonical Chinese city name; never empty after parsing
    pub city: String,
    /// English city name
    pub city_en: String,
    /// Food/topic keywords in discovery order
    pub topics: Vec<String>,
    /// English equivalents of `topics`
    pub topics_en: Vec<String>,
    /// Category keywords (景點, 購物, ...)
    pub categories: Vec<String>,
    pub categories_en: Vec<String>,
    /// Intent words (推薦, 必吃, ...)
    pub intents: Vec<String>,
    pub intents_en: Vec<String>,
    /// Leftover text after all facet extraction
    pub remainder: String,
}

impl ParsedQuery {
    /// Build the enhanced Chinese search query:
    /// city + topics + categories + intents (推薦 when none) + remainder.
    pub fn to_zh_query(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if !self.city.is_empty() {
            parts.push(&self.city);
        }
        parts.extend(self.topics.iter().map(String::as_str));
        parts.extend(self.categories.iter().map(String::as_str));
        if self.intents.is_empty() {
            parts.push("推薦");
        } else {
            parts.extend(self.intents.iter().map(String::as_str));
        }
        if self.remainder.chars().count() > 1 {
            parts.push(&self.remainder);
        }
        parts.join(" ")
    }

    /// Build the English search query for broader results. The remainder is
    /// only carried over when it is pure ASCII (Chinese leftovers would
    /// poison an English search).
    pub fn to_en_query(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if !self.city_en.is_empty() {
            parts.push(&self.city_en);
        } else if !self.city.is_empty() {
            parts.push(&self.city);
        }
        parts.extend(self.topics_en.iter().map(String::as_str));
        parts.extend(self.categories_en.iter().map(String::as_str));
        if self.intents_en.is_empty() {
            parts.push("best recommended");
        } else {
            parts.extend(self.intents_en.iter().map(String::as_str));
        }
        if self.remainder.chars().count() > 1 && self.remainder.is_ascii() {
            parts.push(&self.remainder);
        }
        parts.join(" ")
    }
}

/// Deterministic, pure facet extractor over a shared [`Lexicon`]
pub struct QueryParser {
    lexicon: &'static Lexicon,
}

/// Collapse runs of whitespace to single spaces and trim
fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl QueryParser {
    pub fn new(lexicon: &'static Lexicon) -> Self {
        Self { lexicon }
    }

    /// Parse raw user input into structured facets.
    ///
    /// Handles unsegmented Chinese ("東京好吃的拉麵"), mixed input
    /// ("巴黎 dessert"), and pure English ("New York pizza").
    pub fn parse(&self, raw: &str) -> ParsedQuery {
        let mut result = ParsedQuery {
            original: raw.trim().to_string(),
            ..Default::default()
        };
        let mut text = result.original.to_lowercase();

        // 1. Strip stop words, longest first so short fragments cannot
        //    shadow the longer phrases that contain them
        for &stop in self.lexicon.stop_words() {
            if text.contains(stop) {
                text = text.replace(stop, " ");
            }
        }
        text = collapse_ws(&text);

        // 2. City: first longest-first alias hit wins, removed once
        for &alias in self.lexicon.city_aliases() {
            if text.contains(alias) {
                let canonical = self
                    .lexicon
                    .canonical_city(alias)
                    .expect("sorted alias missing from table");
                result.city = canonical.to_string();
                result.city_en = self
                    .lexicon
                    .city_en(canonical)
                    .unwrap_or(canonical)
                    .to_string();
                text = text.replacen(alias, " ", 1);
                break;
            }
        }
        text = collapse_ws(&text);

        // 3. Intents: independent short tokens, all matches, each removed once
        for &(word, en) in self.lexicon.intent_words() {
            if text.contains(word) {
                result.intents.push(word.to_string());
                result.intents_en.push(en.to_string());
                text = text.replacen(word, " ", 1);
            }
        }
        text = collapse_ws(&text);

        // 4. Food/topic keywords, longest first, discovery order preserved
        for &keyword in self.lexicon.food_keywords() {
            if text.contains(keyword) {
                result.topics.push(keyword.to_string());
                result.topics_en.push(
                    self.lexicon
                        .food_en(keyword)
                        .unwrap_or(keyword)
                        .to_string(),
                );
                text = text.replacen(keyword, " ", 1);
            }
        }
        text = collapse_ws(&text);

        // 5. Category keywords, longest first
        for &keyword in self.lexicon.category_keywords() {
            if text.contains(keyword) {
                result.categories.push(keyword.to_string());
                result.categories_en.push(
                    self.lexicon
                        .category_en(keyword)
                        .unwrap_or(keyword)
                        .to_string(),
                );
                text = text.replacen(keyword, " ", 1);
            }
        }

        // 6. Whatever survived every removal is the remainder
        result.remainder = collapse_ws(&text);

        // 7. Default city when none was detected
        if result.city.is_empty() {
            result.city = DEFAULT_CITY.to_string();
            result.city_en = DEFAULT_CITY_EN.to_string();
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> QueryParser {
        QueryParser::new(Lexicon::shared())
    }

    #[test]
    fn test_unsegmented_chinese() {
        let parsed = parser().parse("東京好吃的拉麵");
        assert_eq!(parsed.city, "東京");
        assert_eq!(parsed.city_en, "Tokyo");
        assert_eq!(parsed.topics, vec!["拉麵"]);
        // 好 and 吃 are stop words, removed before intent extraction
        assert!(parsed.intents.is_empty());
        assert!(parsed.remainder.is_empty());
    }

    #[test]
    fn test_zh_query_default_intent() {
        let parsed = parser().parse("東京拉麵");
        // No intent matched: a default recommendation word is appended
        assert_eq!(parsed.to_zh_query(), "東京 拉麵 推薦");
    }

    #[test]
    fn test_stop_words_removed_before_facets() {
        let parsed = parser().parse("我想去大阪吃壽司");
        assert_eq!(parsed.city, "大阪");
        assert_eq!(parsed.topics, vec!["壽司"]);
        assert!(parsed.remainder.is_empty());
    }

    #[test]
    fn test_pure_english_input() {
        let parsed = parser().parse("New York pizza");
        assert_eq!(parsed.city, "紐約");
        assert_eq!(parsed.city_en, "New York");
        assert_eq!(parsed.topics, vec!["pizza"]);
    }

    #[test]
    fn test_longest_alias_wins() {
        // "las vegas" contains "la"; the longer alias must match first
        let parsed = parser().parse("las vegas buffet");
        assert_eq!(parsed.city, "拉斯維加斯");
        assert_eq!(parsed.topics, vec!["buffet"]);
    }

    #[test]
    fn test_default_city() {
        let parsed = parser().parse("somewhere nice");
        assert_eq!(parsed.city, DEFAULT_CITY);
        assert_eq!(parsed.city_en, DEFAULT_CITY_EN);
    }

    #[test]
    fn test_remainder_keeps_unmatched_text() {
        let parsed = parser().parse("東京 weird leftover");
        assert_eq!(parsed.remainder, "weird leftover");
        assert!(parsed.to_en_query().contains("weird leftover"));
    }

    #[test]
    fn test_non_ascii_remainder_excluded_from_english_query() {
        let parsed = parser().parse("東京 某某奇怪字詞");
        assert!(!parsed.remainder.is_empty());
        assert!(!parsed.to_en_query().contains(&parsed.remainder));
        assert!(parsed.to_zh_query().contains(&parsed.remainder));
    }

    #[test]
    fn test_intent_translation_carried_to_english_query() {
        let parsed = parser().parse("紐約人氣景點");
        assert_eq!(parsed.city, "紐約");
        assert_eq!(parsed.intents, vec!["人氣"]);
        assert_eq!(parsed.categories, vec!["景點"]);
        let en = parsed.to_en_query();
        assert!(en.starts_with("New York"));
        assert!(en.contains("popular"));
        assert!(en.contains("attractions sightseeing"));
    }

    #[test]
    fn test_intents_built_from_stop_word_chars_never_match() {
        // 必 and 去 are individually stop words, so the 必去 intent is
        // consumed in the stop-word pass and the default intent applies
        let parsed = parser().parse("紐約必去景點");
        assert!(parsed.intents.is_empty());
        assert!(parsed.to_zh_query().contains("推薦"));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let p = parser();
        assert_eq!(p.parse("台北咖啡廳推薦"), p.parse("台北咖啡廳推薦"));
    }
}
