//! Rendering of search results for LLM consumption

use std::fmt::Write;

use crate::models::or_na;
use crate::models::SearchResult;

/// Render ranked results into the fixed block layout the recommendation
/// prompt expects.
///
/// Pure and order-preserving: one block per result, in input order, no
/// filtering or deduplication. Missing metadata fields render as `N/A`.
pub fn format_results(results: &[SearchResult]) -> String {
    let mut formatted_items = Vec::with_capacity(results.len());

    for (i, result) in results.iter().enumerate() {
        let metadata = &result.metadata;
        let mut block = String::new();
        let _ = write!(
            block,
            "Item {index}:\n\
             - Name: {name}\n\
             - Category: {master} → {sub} → {article}\n\
             - Demographics: {gender}\n\
             - Usage: {usage} wear\n\
             - Color: {colour}\n\
             - Season: {season}\n\
             - Score: {score:.3}",
            index = i + 1,
            name = or_na(&metadata.product_display_name),
            master = or_na(&metadata.master_category),
            sub = or_na(&metadata.sub_category),
            article = or_na(&metadata.article_type),
            gender = or_na(&metadata.gender),
            usage = or_na(&metadata.usage),
            colour = or_na(&metadata.base_colour),
            season = or_na(&metadata.season),
            score = result.score,
        );
        formatted_items.push(block);
    }

    formatted_items.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemMetadata;

    fn result(name: &str, score: f32) -> SearchResult {
        SearchResult {
            metadata: ItemMetadata {
                product_display_name: Some(name.to_string()),
                master_category: Some("Apparel".to_string()),
                sub_category: Some("Topwear".to_string()),
                article_type: Some("Kurtas".to_string()),
                gender: Some("Women".to_string()),
                base_colour: Some("Blue".to_string()),
                season: Some("Summer".to_string()),
                usage: Some("Ethnic".to_string()),
                year: Some("2012".to_string()),
            },
            score,
        }
    }

    #[test]
    fn test_preserves_order_and_count() {
        let results = vec![result("First", 0.9), result("Second", 0.8), result("Third", 0.7)];
        let formatted = format_results(&results);

        let blocks: Vec<&str> = formatted
            .lines()
            .filter(|l| l.starts_with("Item "))
            .collect();
        assert_eq!(blocks, ["Item 1:", "Item 2:", "Item 3:"]);

        let first = formatted.find("First").unwrap();
        let second = formatted.find("Second").unwrap();
        let third = formatted.find("Third").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_score_rounded_to_three_decimals() {
        let formatted = format_results(&[result("Item", 0.912_345)]);
        assert!(formatted.contains("- Score: 0.912"));
    }

    #[test]
    fn test_missing_season_renders_na() {
        let mut r = result("Partial", 0.5);
        r.metadata.season = None;
        let formatted = format_results(&[r]);
        assert!(formatted.contains("- Season: N/A"));
        assert!(formatted.contains("- Color: Blue"));
        assert!(formatted.contains("- Usage: Ethnic wear"));
    }

    #[test]
    fn test_empty_results_render_empty() {
        assert_eq!(format_results(&[]), "");
    }

    #[test]
    fn test_category_path_uses_arrows() {
        let formatted = format_results(&[result("Item", 0.5)]);
        assert!(formatted.contains("- Category: Apparel → Topwear → Kurtas"));
    }
}
