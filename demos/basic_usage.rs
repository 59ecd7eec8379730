use devdocs_search::fuzzy::{DEFAULT_LIMIT, DEFAULT_MAX_DISTANCE};
use devdocs_search::{
    ApiRecord, Corpus, DocChunk, Platform, PlatformFilter, SearchEngine, SearchFilters, SearchOptions,
    SearchType,
};

fn main() -> anyhow::Result<()> {
    println!("=== devdocs-search Basic Usage Example ===\n");

    let corpus = Corpus::new(
        vec![
            ApiRecord::new("getBatteryLevel", "Get current battery level from 0.0 to 1.0")
                .with_category("battery-power")
                .with_signature("getBatteryLevel(): Promise<number>", "Promise<number>"),
            ApiRecord::new("getCarrier", "Get the carrier name of the mobile network")
                .with_category("network")
                .with_platform(Platform::AndroidOnly),
            ApiRecord::new("isTablet", "Tells whether the device is a tablet")
                .with_category("device-identity"),
        ],
        vec![
            DocChunk::new("readme-1", "Battery Info", "Use getBatteryLevel to read charge.")
                .with_platforms(&[Platform::Ios, Platform::Android]),
            DocChunk::new("readme-2", "Carrier on iOS", "The carrier name is not available on iOS.")
                .with_platforms(&[Platform::Ios]),
        ],
    );
    let engine = SearchEngine::from_corpus(corpus);
    println!("✓ Indexed {} documents\n", engine.stats().total_documents);

    println!("--- Example 1: Search for 'battery level' ---");
    for (i, result) in engine
        .search("battery level", &SearchOptions::default())
        .iter()
        .enumerate()
    {
        println!("{}. [Score: {:>3}] {}", i + 1, result.score, result.label());
    }

    println!("\n--- Example 2: Guides mentioning the carrier on iOS ---");
    let options = SearchOptions {
        limit: 5,
        filters: SearchFilters {
            search_type: SearchType::Guide,
            platform: Some(PlatformFilter::Ios),
            ..Default::default()
        },
    };
    for result in engine.search("carrier", &options) {
        println!("[{:>3}] {}", result.score, result.label());
        for highlight in &result.highlights {
            println!("      {}: {}", highlight.field, highlight.text);
        }
    }

    println!("\n--- Example 3: Did you mean? ---");
    for query in ["getBattryLevel", "getcarier", "tablet"] {
        let names: Vec<String> = engine
            .find_similar(query, DEFAULT_MAX_DISTANCE, DEFAULT_LIMIT)
            .iter()
            .map(|api| api.name.clone())
            .collect();
        println!("{} -> {:?}", query, names);
    }

    Ok(())
}
