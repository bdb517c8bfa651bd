//! Article extractor integration tests using HTML fixture files

use std::fs;
use tastemap::extract::ArticleExtractor;

const FIXTURES_DIR: &str = "tests/fixtures/html";

fn load_fixture(filename: &str) -> String {
    let path = format!("{FIXTURES_DIR}/{filename}");
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"))
}

#[test]
fn test_listicle_extraction_order_and_names() {
    let html = load_fixture("listicle_zh.html");
    let places = ArticleExtractor::new().extract(&html, 10);

    let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "鳴龍拉麵",
            "麵屋一燈",
            // dash-suffix stripping truncates the romanized name
            "Oreryu Shio",
            "麵屋壹慶",
            "五之神製作所台灣店",
        ]
    );
}

#[test]
fn test_listicle_quotes() {
    let html = load_fixture("listicle_zh.html");
    let places = ArticleExtractor::new().extract(&html, 10);

    // First sentence of the following paragraph
    assert!(places[0].quote.contains("芝麻香氣"));
    assert!(!places[0].quote.contains("。"));

    // Too-short first sentence is skipped
    assert!(places[1].quote.starts_with("雞白湯沾麵"));

    // Heading wrapped in a div: quote comes from the parent's sibling
    let yikei = places.iter().find(|p| p.name == "麵屋壹慶").unwrap();
    assert!(yikei.quote.contains("每日限量"));

    // Emphasis candidate with no paragraph siblings: synthesized filler
    let gonokami = places.iter().find(|p| p.name == "五之神製作所台灣店").unwrap();
    assert_eq!(
        gonokami.quote,
        "來自部落客推薦的人氣五之神製作所台灣店，值得一訪！"
    );
}

#[test]
fn test_listicle_rejects_chrome_and_boilerplate() {
    let html = load_fixture("listicle_zh.html");
    let places = ArticleExtractor::new().extract(&html, 20);

    for place in &places {
        assert!(!place.name.contains("延伸閱讀"));
        assert!(!place.name.contains("營業時間"));
        assert!(!place.name.contains("導覽"));
        assert!(!place.name.contains("頁尾"));
        assert!(!place.name.contains("側邊欄"));
        assert_ne!(place.name, "台北");
    }
}

#[test]
fn test_listicle_max_names() {
    let html = load_fixture("listicle_zh.html");
    let places = ArticleExtractor::new().extract(&html, 2);
    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "鳴龍拉麵");
}

#[test]
fn test_sparse_article_quote_cascade() {
    let html = load_fixture("sparse_article.html");
    let places = ArticleExtractor::new().extract(&html, 10);

    let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["釜たけうどん本店", "福島金魚咖啡館", "心齋橋神座拉麵"]
    );

    // Back-to-back heading: the sibling scan hits the next heading first
    assert_eq!(
        places[0].quote,
        "來自部落客推薦的人氣釜たけうどん本店，值得一訪！"
    );
    // Heading with a real following paragraph
    assert!(places[1].quote.contains("老宅咖啡館"));
    // Trailing heading with nothing after it
    assert!(places[2].quote.contains("心齋橋神座拉麵"));
}

#[test]
fn test_garbage_input_yields_nothing() {
    let places = ArticleExtractor::new().extract("not html at all", 5);
    assert!(places.is_empty());

    let places = ArticleExtractor::new().extract("", 5);
    assert!(places.is_empty());
}
