use anyhow::Result;

use crate::lexicon::Lexicon;
use crate::query::QueryParser;

/// Show the facet breakdown and derived search queries for a raw query
pub fn parse(query: String) -> Result<()> {
    let parser = QueryParser::new(Lexicon::shared());
    let parsed = parser.parse(&query);

    println!("Input: {query}");
    println!("================================");
    println!("  City:       {} ({})", parsed.city, parsed.city_en);
    println!("  Topics:     {:?}", parsed.topics);
    println!("  Categories: {:?}", parsed.categories);
    println!("  Intents:    {:?}", parsed.intents);
    println!("  Remainder:  {:?}", parsed.remainder);
    println!();
    println!("  Chinese query: {}", parsed.to_zh_query());
    println!("  English query: {}", parsed.to_en_query());

    Ok(())
}
