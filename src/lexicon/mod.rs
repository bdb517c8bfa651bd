//! Static lookup tables for query parsing
//!
//! All tables are raw `&'static` data compiled into the binary. [`Lexicon`]
//! builds the derived structures (hash maps, longest-first key orders) once;
//! the shared instance is constructed on first use and never recomputed per
//! call. Longest-first ordering is what keeps a short alias from shadowing a
//! longer alias that contains it ("la" vs "las vegas").

mod cities;

pub use cities::{CityConfig, CityDirectory};

use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical city assigned when no alias matches the input
pub const DEFAULT_CITY: &str = "台北";
/// English name of the default city
pub const DEFAULT_CITY_EN: &str = "Taipei";

/// City aliases: lowercase alias -> canonical Chinese city name
const CITY_ALIASES: &[(&str, &str)] = &[
    // 台灣
    ("台北", "台北"),
    ("taipei", "台北"),
    ("台中", "台中"),
    ("taichung", "台中"),
    ("高雄", "高雄"),
    ("kaohsiung", "高雄"),
    ("台南", "台南"),
    ("tainan", "台南"),
    ("花蓮", "花蓮"),
    ("hualien", "花蓮"),
    ("宜蘭", "宜蘭"),
    ("yilan", "宜蘭"),
    // 日本
    ("東京", "東京"),
    ("tokyo", "東京"),
    ("大阪", "大阪"),
    ("osaka", "大阪"),
    ("京都", "京都"),
    ("kyoto", "京都"),
    ("北海道", "北海道"),
    ("hokkaido", "北海道"),
    ("沖繩", "沖繩"),
    ("okinawa", "沖繩"),
    ("福岡", "福岡"),
    ("fukuoka", "福岡"),
    ("名古屋", "名古屋"),
    ("nagoya", "名古屋"),
    // 韓國
    ("首爾", "首爾"),
    ("seoul", "首爾"),
    ("漢城", "首爾"),
    ("釜山", "釜山"),
    ("busan", "釜山"),
    // 東南亞
    ("曼谷", "曼谷"),
    ("bangkok", "曼谷"),
    ("新加坡", "新加坡"),
    ("singapore", "新加坡"),
    ("吉隆坡", "吉隆坡"),
    ("kuala lumpur", "吉隆坡"),
    ("峇里島", "峇里島"),
    ("bali", "峇里島"),
    ("巴里島", "峇里島"),
    ("河內", "河內"),
    ("hanoi", "河內"),
    ("胡志明", "胡志明"),
    ("ho chi minh", "胡志明"),
    ("清邁", "清邁"),
    ("chiang mai", "清邁"),
    ("馬尼拉", "馬尼拉"),
    ("manila", "馬尼拉"),
    // 港澳中國
    ("香港", "香港"),
    ("hong kong", "香港"),
    ("澳門", "澳門"),
    ("macau", "澳門"),
    ("macao", "澳門"),
    ("上海", "上海"),
    ("shanghai", "上海"),
    ("北京", "北京"),
    ("beijing", "北京"),
    ("廣州", "廣州"),
    ("guangzhou", "廣州"),
    ("深圳", "深圳"),
    ("shenzhen", "深圳"),
    ("成都", "成都"),
    ("chengdu", "成都"),
    // 歐洲
    ("巴黎", "巴黎"),
    ("paris", "巴黎"),
    ("倫敦", "倫敦"),
    ("london", "倫敦"),
    ("羅馬", "羅馬"),
    ("rome", "羅馬"),
    ("roma", "羅馬"),
    ("巴塞隆納", "巴塞隆納"),
    ("barcelona", "巴塞隆納"),
    ("米蘭", "米蘭"),
    ("milan", "米蘭"),
    ("milano", "米蘭"),
    ("阿姆斯特丹", "阿姆斯特丹"),
    ("amsterdam", "阿姆斯特丹"),
    ("柏林", "柏林"),
    ("berlin", "柏林"),
    ("維也納", "維也納"),
    ("vienna", "維也納"),
    ("布拉格", "布拉格"),
    ("prague", "布拉格"),
    ("伊斯坦堡", "伊斯坦堡"),
    ("istanbul", "伊斯坦堡"),
    ("蘇黎世", "蘇黎世"),
    ("zurich", "蘇黎世"),
    // 美洲
    ("紐約", "紐約"),
    ("new york", "紐約"),
    ("nyc", "紐約"),
    ("洛杉磯", "洛杉磯"),
    ("los angeles", "洛杉磯"),
    ("la", "洛杉磯"),
    ("舊金山", "舊金山"),
    ("san francisco", "舊金山"),
    ("sf", "舊金山"),
    ("芝加哥", "芝加哥"),
    ("chicago", "芝加哥"),
    ("拉斯維加斯", "拉斯維加斯"),
    ("las vegas", "拉斯維加斯"),
    ("溫哥華", "溫哥華"),
    ("vancouver", "溫哥華"),
    ("多倫多", "多倫多"),
    ("toronto", "多倫多"),
    // 大洋洲
    ("雪梨", "雪梨"),
    ("sydney", "雪梨"),
    ("墨爾本", "墨爾本"),
    ("melbourne", "墨爾本"),
    ("奧克蘭", "奧克蘭"),
    ("auckland", "奧克蘭"),
    // 中東
    ("杜拜", "杜拜"),
    ("dubai", "杜拜"),
];

/// Canonical Chinese city name -> English display name
const CITY_EN: &[(&str, &str)] = &[
    ("台北", "Taipei"),
    ("台中", "Taichung"),
    ("高雄", "Kaohsiung"),
    ("台南", "Tainan"),
    ("花蓮", "Hualien"),
    ("宜蘭", "Yilan"),
    ("東京", "Tokyo"),
    ("大阪", "Osaka"),
    ("京都", "Kyoto"),
    ("北海道", "Hokkaido"),
    ("沖繩", "Okinawa"),
    ("福岡", "Fukuoka"),
    ("名古屋", "Nagoya"),
    ("首爾", "Seoul"),
    ("釜山", "Busan"),
    ("曼谷", "Bangkok"),
    ("新加坡", "Singapore"),
    ("吉隆坡", "Kuala Lumpur"),
    ("峇里島", "Bali"),
    ("河內", "Hanoi"),
    ("胡志明", "Ho Chi Minh"),
    ("清邁", "Chiang Mai"),
    ("馬尼拉", "Manila"),
    ("香港", "Hong Kong"),
    ("澳門", "Macau"),
    ("上海", "Shanghai"),
    ("北京", "Beijing"),
    ("廣州", "Guangzhou"),
    ("深圳", "Shenzhen"),
    ("成都", "Chengdu"),
    ("巴黎", "Paris"),
    ("倫敦", "London"),
    ("羅馬", "Rome"),
    ("巴塞隆納", "Barcelona"),
    ("米蘭", "Milan"),
    ("阿姆斯特丹", "Amsterdam"),
    ("柏林", "Berlin"),
    ("維也納", "Vienna"),
    ("布拉格", "Prague"),
    ("伊斯坦堡", "Istanbul"),
    ("蘇黎世", "Zurich"),
    ("紐約", "New York"),
    ("洛杉磯", "Los Angeles"),
    ("舊金山", "San Francisco"),
    ("芝加哥", "Chicago"),
    ("拉斯維加斯", "Las Vegas"),
    ("溫哥華", "Vancouver"),
    ("多倫多", "Toronto"),
    ("雪梨", "Sydney"),
    ("墨爾本", "Melbourne"),
    ("奧克蘭", "Auckland"),
    ("杜拜", "Dubai"),
];

/// Food and topic keywords: keyword -> English search equivalent
const FOOD_KEYWORDS: &[(&str, &str)] = &[
    // 中文 -> English
    ("拉麵", "ramen"),
    ("壽司", "sushi"),
    ("甜點", "dessert"),
    ("咖啡", "coffee"),
    ("咖啡廳", "cafe"),
    ("火鍋", "hotpot"),
    ("燒肉", "yakiniku BBQ"),
    ("牛排", "steak"),
    ("披薩", "pizza"),
    ("素食", "vegetarian"),
    ("海鮮", "seafood"),
    ("早午餐", "brunch"),
    ("酒吧", "bar"),
    ("夜市", "night market"),
    ("小吃", "street food"),
    ("餐廳", "restaurant"),
    ("料理", "cuisine"),
    ("麵包", "bakery"),
    ("蛋糕", "cake"),
    ("冰淇淋", "ice cream"),
    ("居酒屋", "izakaya"),
    ("義大利麵", "pasta"),
    ("漢堡", "burger"),
    ("炸雞", "fried chicken"),
    ("鍋物", "hotpot"),
    ("燒烤", "grill BBQ"),
    ("串燒", "yakitori"),
    ("下午茶", "afternoon tea"),
    ("飲料", "drinks"),
    ("奶茶", "milk tea"),
    ("巧克力", "chocolate"),
    ("麻辣", "spicy"),
    ("丼飯", "donburi"),
    ("便當", "bento"),
    ("滷味", "braised snacks"),
    ("豆花", "tofu pudding"),
    ("粵菜", "cantonese"),
    ("川菜", "sichuan"),
    ("日式", "japanese"),
    ("韓式", "korean"),
    ("泰式", "thai"),
    ("越南", "vietnamese"),
    ("法式", "french"),
    ("義式", "italian"),
    ("美式", "american"),
    ("印度", "indian"),
    ("墨西哥", "mexican"),
    ("中式", "chinese"),
    // English keywords map to themselves
    ("ramen", "ramen"),
    ("sushi", "sushi"),
    ("pizza", "pizza"),
    ("steak", "steak"),
    ("burger", "burger"),
    ("pasta", "pasta"),
    ("brunch", "brunch"),
    ("cafe", "cafe"),
    ("coffee", "coffee"),
    ("dessert", "dessert"),
    ("seafood", "seafood"),
    ("bbq", "BBQ"),
    ("dim sum", "dim sum"),
    ("curry", "curry"),
    ("noodle", "noodle"),
    ("bakery", "bakery"),
    ("bar", "bar"),
    ("buffet", "buffet"),
    ("vegan", "vegan"),
    ("vegetarian", "vegetarian"),
];

/// Category and activity keywords: keyword -> English search equivalent
const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("景點", "attractions sightseeing"),
    ("觀光", "tourism sightseeing"),
    ("購物", "shopping"),
    ("逛街", "shopping"),
    ("住宿", "accommodation hotel"),
    ("飯店", "hotel"),
    ("旅館", "hotel"),
    ("民宿", "B&B guesthouse"),
    ("spa", "spa"),
    ("按摩", "massage spa"),
    ("溫泉", "hot spring onsen"),
];

/// Intent words stripped from the query and reused for search enhancement
const INTENT_WORDS: &[(&str, &str)] = &[
    ("推薦", "best recommended"),
    ("必吃", "must-try must-eat"),
    ("必去", "must-visit"),
    ("好吃", "delicious best"),
    ("好玩", "fun things to do"),
    ("熱門", "popular trending"),
    ("人氣", "popular"),
    ("排名", "top ranked"),
    ("排行", "top ranked"),
    ("評價", "best rated"),
    ("精選", "curated best"),
    ("網紅", "influencer trending"),
    ("攻略", "guide"),
    ("最好", "best"),
    ("便宜", "cheap affordable"),
    ("高級", "upscale fine dining"),
    ("平價", "affordable budget"),
];

/// Stop words removed before any facet extraction
const STOP_WORDS: &[&str] = &[
    "我想",
    "我要",
    "想去",
    "想吃",
    "想找",
    "有什麼",
    "有沒有",
    "哪裡有",
    "去哪",
    "去哪裡",
    "推薦一下",
    "幫我找",
    "幫我",
    "請問",
    "什麼",
    "哪些",
    "的",
    "在",
    "吃",
    "去",
    "找",
    "很",
    "超",
    "最",
    "比較",
    "一些",
    "一下",
    "一點",
    "到",
    "可以",
    "應該",
    "能不能",
    "有",
    "是",
    "了",
    "嗎",
    "好",
    "必",
    "i want",
    "i want to",
    "where to",
    "where can i",
    "best place",
    "looking for",
    "find me",
    "show me",
    "please",
    "recommend",
    "suggestion",
];

/// Immutable lookup tables with precomputed longest-first match orders.
///
/// Built once via [`Lexicon::shared`]; the query parser borrows it at
/// construction instead of re-deriving any ordering per call.
pub struct Lexicon {
    city_aliases: HashMap<&'static str, &'static str>,
    city_aliases_sorted: Vec<&'static str>,
    city_en: HashMap<&'static str, &'static str>,
    foods: HashMap<&'static str, &'static str>,
    foods_sorted: Vec<&'static str>,
    categories: HashMap<&'static str, &'static str>,
    categories_sorted: Vec<&'static str>,
    intents: &'static [(&'static str, &'static str)],
    stop_words_sorted: Vec<&'static str>,
    cities: CityDirectory,
}

/// Stable sort of table keys, longest first (in characters, to match how
/// the matcher measures CJK text).
fn sorted_longest_first(keys: impl Iterator<Item = &'static str>) -> Vec<&'static str> {
    let mut sorted: Vec<&'static str> = keys.collect();
    sorted.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
    sorted
}

impl Lexicon {
    /// Build the lexicon from the static tables.
    ///
    /// Sort orders come from the declared tables, not the maps, so ties in
    /// key length keep a stable, table-declared order.
    pub fn new() -> Self {
        Self {
            city_aliases_sorted: sorted_longest_first(CITY_ALIASES.iter().map(|(k, _)| *k)),
            city_aliases: CITY_ALIASES.iter().copied().collect(),
            city_en: CITY_EN.iter().copied().collect(),
            foods_sorted: sorted_longest_first(FOOD_KEYWORDS.iter().map(|(k, _)| *k)),
            foods: FOOD_KEYWORDS.iter().copied().collect(),
            categories_sorted: sorted_longest_first(CATEGORY_KEYWORDS.iter().map(|(k, _)| *k)),
            categories: CATEGORY_KEYWORDS.iter().copied().collect(),
            intents: INTENT_WORDS,
            stop_words_sorted: sorted_longest_first(STOP_WORDS.iter().copied()),
            cities: CityDirectory::new(),
        }
    }

    /// Shared instance, built on first use
    pub fn shared() -> &'static Lexicon {
        static SHARED: OnceLock<Lexicon> = OnceLock::new();
        SHARED.get_or_init(Lexicon::new)
    }

    /// Canonical city for an alias, if known
    pub fn canonical_city(&self, alias: &str) -> Option<&'static str> {
        self.city_aliases.get(alias).copied()
    }

    /// City aliases, longest first
    pub fn city_aliases(&self) -> &[&'static str] {
        &self.city_aliases_sorted
    }

    /// English display name for a canonical city
    pub fn city_en(&self, city: &str) -> Option<&'static str> {
        self.city_en.get(city).copied()
    }

    /// English equivalent for a food/topic keyword
    pub fn food_en(&self, keyword: &str) -> Option<&'static str> {
        self.foods.get(keyword).copied()
    }

    /// Food/topic keywords, longest first
    pub fn food_keywords(&self) -> &[&'static str] {
        &self.foods_sorted
    }

    /// English equivalent for a category keyword
    pub fn category_en(&self, keyword: &str) -> Option<&'static str> {
        self.categories.get(keyword).copied()
    }

    /// Category keywords, longest first
    pub fn category_keywords(&self) -> &[&'static str] {
        &self.categories_sorted
    }

    /// Intent words with their English equivalents, in table order.
    /// Intents are independent short tokens; no longest-first pass needed.
    pub fn intent_words(&self) -> &'static [(&'static str, &'static str)] {
        self.intents
    }

    /// Stop words, longest first
    pub fn stop_words(&self) -> &[&'static str] {
        &self.stop_words_sorted
    }

    /// Geo configuration directory
    pub fn cities(&self) -> &CityDirectory {
        &self.cities
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_first_ordering() {
        let lex = Lexicon::new();
        let aliases = lex.city_aliases();
        for pair in aliases.windows(2) {
            assert!(
                pair[0].chars().count() >= pair[1].chars().count(),
                "aliases not longest-first: {:?}",
                pair
            );
        }
        // "las vegas" must sort before "la"
        let la = aliases.iter().position(|a| *a == "la").unwrap();
        let vegas = aliases.iter().position(|a| *a == "las vegas").unwrap();
        assert!(vegas < la);
    }

    #[test]
    fn test_every_canonical_city_has_english_name() {
        let lex = Lexicon::new();
        for (_, canonical) in CITY_ALIASES {
            assert!(
                lex.city_en(canonical).is_some(),
                "missing English name for {canonical}"
            );
        }
    }

    #[test]
    fn test_alias_lookup() {
        let lex = Lexicon::new();
        assert_eq!(lex.canonical_city("tokyo"), Some("東京"));
        assert_eq!(lex.canonical_city("漢城"), Some("首爾"));
        assert_eq!(lex.canonical_city("unknown city"), None);
    }

    #[test]
    fn test_shared_is_singleton() {
        let a = Lexicon::shared() as *const Lexicon;
        let b = Lexicon::shared() as *const Lexicon;
        assert_eq!(a, b);
    }
}
