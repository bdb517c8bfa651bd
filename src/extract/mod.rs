//! Venue-name extraction from article HTML
//!
//! Listicle articles put venue names in sub-headings (and sometimes in
//! emphasized text inside paragraphs), followed by a few sentences of
//! commentary. The extractor harvests those headings, cleans the numbering
//! and decoration off, rejects boilerplate, and pairs each surviving name
//! with a nearby supporting sentence.
//!
//! Quote derivation is a cascade of strategies tried in order, each a pure
//! function of the heading node: following paragraphs first, then the
//! parent's following paragraphs, then a synthesized filler sentence.

pub mod fetcher;

pub use fetcher::PageFetcher;

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// A cleaned venue-name candidate with its supporting sentence
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPlace {
    pub name: String,
    pub quote: String,
}

lazy_static! {
    static ref HEADINGS: Selector =
        Selector::parse("h2, h3, h4").expect("Invalid CSS selector: h2, h3, h4");
    static ref EMPHASIS: Selector =
        Selector::parse("strong, b").expect("Invalid CSS selector: strong, b");

    /// Leading numbering, bullets and separators on heading text
    static ref LEADING_NOISE: Regex =
        Regex::new(r"^[\d#①②③④⑤⑥⑦⑧⑨⑩\.\)、\s：:]+").expect("invalid regex");
    /// Enclosing CJK/ASCII bracket punctuation
    static ref BRACKETS: Regex =
        Regex::new(r"[【】\[\]「」『』《》〈〉]+").expect("invalid regex");
    /// Trailing "| ..." or dash-separated suffix
    static ref TRAILING_SUFFIX: Regex =
        Regex::new(r"[\|｜\-–—]\s*.*$").expect("invalid regex");
    /// At least one CJK ideograph
    static ref CJK: Regex = Regex::new(r"[\x{4e00}-\x{9fff}]").expect("invalid regex");
    /// A capitalized Latin word start
    static ref LATIN_WORD: Regex = Regex::new(r"[A-Z][a-z]").expect("invalid regex");
    /// Sentence-ending punctuation, CJK and ASCII
    static ref SENTENCE_END: Regex = Regex::new(r"[。！？!?\n]").expect("invalid regex");
}

/// Structural elements whose subtrees never contain venue headings
const EXCLUDED_CONTAINERS: &[&str] = &[
    "script", "style", "nav", "footer", "aside", "header", "form", "iframe", "noscript",
];

/// Parent tags under which emphasized text counts as a heading candidate
const EMPHASIS_PARENTS: &[&str] = &["p", "li", "div", "td"];

/// Boilerplate/navigation/admin fragments that disqualify a candidate name
/// (checked case-insensitively)
const SKIP_PATTERNS: &[&str] = &[
    "推薦", "必吃", "攻略", "總整理", "懶人包", "目錄", "前言", "結語", "總結",
    "延伸閱讀", "相關文章", "留言", "分享", "目次", "營業時間", "結論",
    "地址", "電話", "價格", "菜單", "評價", "最新", "更新", "介紹",
    "分類", "近期文章", "搜尋", "標籤", "彙整", "關於", "首頁",
    "訂閱", "追蹤", "聯絡", "隱私權", "版權", "免責", "廣告",
    "側邊欄", "回到頂端", "上一篇", "下一篇", "熱門文章", "文章導覽",
    "more", "share", "comment", "copyright", "menu", "navigation",
    "sidebar", "footer", "header", "widget", "category",
    "recent", "popular", "archive", "tag", "about", "contact",
    "subscribe", "follow", "search", "login", "sign",
    "台灣", "交通", "怎麼去", "捷運", "公車", "停車",
    "咖啡廳推薦", "餐廳推薦", "景點推薦", "夜市推薦",
    "住宿", "飯店", "旅館", "民宿",
    "工作", "職缺", "薪資", "保險", "貸款", "投資", "理財",
    "新聞", "政治", "科技", "教育", "健康", "醫療",
    "店家資訊", "用餐資訊", "基本資訊", "注意事項",
    "閱讀更多", "更多", "看更多", "點我", "此文", "有幫助",
    "這裡去", "這裡看", "繼續閱讀", "回目錄", "回首頁",
    "喜歡", "收藏", "按讚", "複製連結", "檢舉", "回報",
    "相關推薦", "你可能也喜歡", "猜你喜歡", "也想看",
    "常見問題", "faq", "問答", "q&a",
];

/// City and district names that are never venue names by themselves
const CITY_NAME_SKIPS: &[&str] = &[
    "台北", "台中", "高雄", "台南", "新竹", "桃園", "花蓮", "宜蘭", "嘉義", "彰化",
    "屏東", "基隆", "苗栗", "南投", "信義區", "大安區", "中山區", "松山區", "中正區",
    "萬華區", "士林區", "內湖區", "南港區", "文山區", "北投區", "大同區",
];

/// Heuristic venue-name extractor
pub struct ArticleExtractor;

/// Concatenated, per-fragment-trimmed text of an element
fn element_text(el: &ElementRef) -> String {
    el.text().map(str::trim).collect::<String>()
}

/// Whether the element sits inside navigation/footer/script chrome
fn in_excluded_container(el: &ElementRef) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| EXCLUDED_CONTAINERS.contains(&ancestor.value().name()))
}

/// First `max_chars` characters, with an ellipsis when truncated
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

impl ArticleExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract up to `max_names` venue-name candidates from article HTML,
    /// in document order (headings first, then qualifying emphasized text).
    /// Returns an empty vec when nothing in the document qualifies.
    pub fn extract(&self, html: &str, max_names: usize) -> Vec<ExtractedPlace> {
        let document = Html::parse_document(html);
        let mut results: Vec<ExtractedPlace> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        let mut candidates: Vec<ElementRef> = Vec::new();
        for heading in document.select(&HEADINGS) {
            if in_excluded_container(&heading) {
                continue;
            }
            if !element_text(&heading).is_empty() {
                candidates.push(heading);
            }
        }
        for emphasis in document.select(&EMPHASIS) {
            if in_excluded_container(&emphasis) {
                continue;
            }
            let parent_name = emphasis
                .parent()
                .and_then(ElementRef::wrap)
                .map(|p| p.value().name().to_string());
            let Some(parent_name) = parent_name else {
                continue;
            };
            if !EMPHASIS_PARENTS.contains(&parent_name.as_str()) {
                continue;
            }
            let len = element_text(&emphasis).chars().count();
            if (4..=40).contains(&len) {
                candidates.push(emphasis);
            }
        }

        for candidate in candidates {
            if results.len() >= max_names {
                break;
            }

            let raw = element_text(&candidate);
            let Some(name) = clean_heading(&raw) else {
                continue;
            };
            if is_boilerplate(&name) {
                continue;
            }
            if !seen.insert(name.clone()) {
                continue;
            }

            let quote = following_paragraphs_quote(&candidate)
                .or_else(|| parent_paragraph_quote(&candidate))
                .unwrap_or_else(|| filler_quote(&name));

            results.push(ExtractedPlace { name, quote });
        }

        results
    }
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip numbering, brackets and trailing suffixes off heading text.
/// Returns `None` when the cleaned text falls outside the plausible
/// name-length range of 3 to 35 characters.
fn clean_heading(raw: &str) -> Option<String> {
    let cleaned = LEADING_NOISE.replace(raw, "");
    let cleaned = BRACKETS.replace_all(&cleaned, "");
    let cleaned = TRAILING_SUFFIX.replace(&cleaned, "");
    let cleaned = cleaned.trim();

    let len = cleaned.chars().count();
    if !(3..=35).contains(&len) {
        return None;
    }
    Some(cleaned.to_string())
}

/// Reject boilerplate phrases, bare city names, and strings without either
/// a CJK ideograph or a capitalized Latin word (stray punctuation and
/// numerals are not names).
fn is_boilerplate(name: &str) -> bool {
    let lower = name.to_lowercase();
    if SKIP_PATTERNS.iter().any(|skip| lower.contains(skip)) {
        return true;
    }
    if CITY_NAME_SKIPS.contains(&name) {
        return true;
    }
    if !CJK.is_match(name) && !LATIN_WORD.is_match(name) {
        return true;
    }
    false
}

/// Quote tier 1: scan following siblings for up to two paragraphs before
/// the next heading, then pick the first well-sized sentence.
fn following_paragraphs_quote(el: &ElementRef) -> Option<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    for sibling in el.next_siblings().filter_map(ElementRef::wrap) {
        match sibling.value().name() {
            "h2" | "h3" | "h4" => break,
            "p" => {
                let text = element_text(&sibling);
                if text.chars().count() > 10 {
                    paragraphs.push(text);
                    if paragraphs.len() >= 2 {
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    if paragraphs.is_empty() {
        return None;
    }

    let full_text = paragraphs.join(" ");
    for sentence in SENTENCE_END.split(&full_text) {
        let sentence = sentence.trim();
        let len = sentence.chars().count();
        if len > 10 && len < 120 {
            return Some(sentence.to_string());
        }
    }
    Some(truncate_chars(&full_text, 100))
}

/// Quote tier 2: no paragraph siblings at the heading's level, so scan the
/// parent's following siblings for the first paragraph.
fn parent_paragraph_quote(el: &ElementRef) -> Option<String> {
    let parent = el.parent().and_then(ElementRef::wrap)?;
    for sibling in parent.next_siblings().filter_map(ElementRef::wrap) {
        match sibling.value().name() {
            "p" => {
                let text = element_text(&sibling);
                if text.chars().count() > 10 {
                    return Some(truncate_chars(&text, 100));
                }
            }
            "h2" | "h3" | "h4" => break,
            _ => {}
        }
    }
    None
}

/// Quote tier 3: nothing nearby, synthesize a generic filler
fn filler_quote(name: &str) -> String {
    format!("來自部落客推薦的人氣{name}，值得一訪！")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<ExtractedPlace> {
        ArticleExtractor::new().extract(html, 5)
    }

    #[test]
    fn test_heading_with_following_paragraph() {
        let html = r#"
            <html><body><article>
            <h2>1. 一蘭拉麵 | 24小時營業</h2>
            <p>濃郁的豚骨湯頭配上特製辣醬，是深夜最療癒的一碗拉麵，店內還有一人座位設計。</p>
            </article></body></html>
        "#;
        let places = extract(html);
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "一蘭拉麵");
        assert!(places[0].quote.contains("豚骨湯頭"));
    }

    #[test]
    fn test_numbering_and_brackets_stripped() {
        let html = r#"
            <html><body>
            <h3>③【鼎泰豐】</h3><p>皮薄餡多的小籠包每天都大排長龍，建議平日提早前往現場候位。</p>
            </body></html>
        "#;
        let places = extract(html);
        assert_eq!(places[0].name, "鼎泰豐");
    }

    #[test]
    fn test_boilerplate_headings_rejected() {
        let html = r#"
            <html><body>
            <h2>延伸閱讀</h2>
            <h2>營業時間與地址</h2>
            <h2>Afuri 阿夫利柚子拉麵</h2>
            <p>清爽的柚子鹽味湯頭在拉麵圈獨樹一格，吸引不少排隊人潮與觀光客朝聖。</p>
            </body></html>
        "#;
        let places = extract(html);
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Afuri 阿夫利柚子拉麵");
    }

    #[test]
    fn test_bare_city_name_rejected() {
        let html = "<html><body><h2>台北</h2><h2>信義區</h2></body></html>";
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_numeric_only_heading_rejected() {
        let html = "<html><body><h2>12345678</h2><h2>!!! ???</h2></body></html>";
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_navigation_chrome_ignored() {
        let html = r#"
            <html><body>
            <nav><h2>美味餐廳導覽列</h2></nav>
            <footer><h2>頁尾好店連結</h2></footer>
            <h2>金峰魯肉飯</h2>
            <p>滷汁香氣濃厚的傳統小吃老店，在地人從小吃到大的默契首選。</p>
            </body></html>
        "#;
        let places = extract(html);
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "金峰魯肉飯");
    }

    #[test]
    fn test_emphasis_candidate_requires_block_parent() {
        let html = r#"
            <html><body>
            <p><strong>春水堂人文茶館</strong>珍珠奶茶的發源地，茶香與手搖的經典組合令人難忘。</p>
            <span><strong>不該被收的店名</strong></span>
            </body></html>
        "#;
        let places = extract(html);
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "春水堂人文茶館");
    }

    #[test]
    fn test_emphasis_length_bounds() {
        let html = r#"
            <html><body>
            <p><strong>短</strong></p>
            <p><strong>阿宗麵線西門町店</strong>湯頭用柴魚熬製，配上大腸與蚵仔是經典組合，永遠都在排隊。</p>
            </body></html>
        "#;
        let places = extract(html);
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "阿宗麵線西門町店");
    }

    #[test]
    fn test_duplicate_names_deduped() {
        let html = r#"
            <html><body>
            <h2>一蘭拉麵</h2>
            <p>濃郁的豚骨湯頭配上特製辣醬，是深夜最療癒的一碗拉麵，值得專程前往。</p>
            <h3>一蘭拉麵</h3>
            <p>另一段重複介紹同一間店的文字，不應該產生第二筆資料。</p>
            </body></html>
        "#;
        let places = extract(html);
        assert_eq!(places.len(), 1);
    }

    #[test]
    fn test_max_names_cap() {
        let mut body = String::new();
        for i in 0..10 {
            body.push_str(&format!(
                "<h2>好吃餐館{i}號店</h2><p>這是一段足夠長的介紹文字，描述了餐點特色與環境氣氛，讓人想立刻出發。</p>"
            ));
        }
        let html = format!("<html><body>{body}</body></html>");
        let places = ArticleExtractor::new().extract(&html, 5);
        assert_eq!(places.len(), 5);
    }

    #[test]
    fn test_quote_sentence_length_selection() {
        // First sentence too short; the second is within (10, 120)
        let html = r#"
            <html><body>
            <h2>貳樓餐廳</h2>
            <p>很棒。早午餐選擇豐富而且座位寬敞舒適，適合與朋友悠閒聚會一整個下午。</p>
            </body></html>
        "#;
        let places = extract(html);
        assert!(places[0].quote.starts_with("早午餐選擇豐富"));
    }

    #[test]
    fn test_quote_falls_back_to_parent_siblings() {
        let html = r#"
            <html><body>
            <div><h2>微熱山丘</h2></div>
            <p>鳳梨酥酸甜內餡加上酥鬆外皮，是最受歡迎的伴手禮之一，門市還提供奉茶服務。</p>
            </body></html>
        "#;
        let places = extract(html);
        assert_eq!(places.len(), 1);
        assert!(places[0].quote.contains("鳳梨酥"));
    }

    #[test]
    fn test_quote_filler_when_no_paragraphs() {
        let html = "<html><body><h2>神秘小店名</h2></body></html>";
        let places = extract(html);
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].quote, "來自部落客推薦的人氣神秘小店名，值得一訪！");
    }

    #[test]
    fn test_quote_stops_at_next_heading() {
        let html = r#"
            <html><body>
            <h2>店家甲號本鋪</h2>
            <h2>店家乙號本鋪</h2>
            <p>這段文字屬於乙店的介紹，描述了店內招牌餐點與來訪時的排隊情況。</p>
            </body></html>
        "#;
        let places = extract(html);
        assert_eq!(places.len(), 2);
        // 甲's sibling scan hits 乙's heading first: falls through to filler
        assert!(places[0].quote.contains("店家甲號本鋪"));
        assert!(places[1].quote.contains("乙店的介紹"));
    }

    #[test]
    fn test_returns_empty_for_empty_document() {
        assert!(extract("<html><body></body></html>").is_empty());
    }
}
