//! Integration tests for the pipeline's pure stages: formatting, structured
//! output extraction, and product resolution. External collaborators are
//! replaced with local implementations.

use std::sync::Mutex;

use stylerag::errors::Result;
use stylerag::errors::StyleRagError;
use stylerag::lookup::ShoppingLookup;
use stylerag::models::ItemMetadata;
use stylerag::models::SearchResult;
use stylerag::reco::format_results;
use stylerag::reco::generator::extract_response;
use stylerag::reco::resolver::extract_product_names;
use stylerag::reco::ProductResolver;

struct RecordingLookup {
    calls: Mutex<Vec<String>>,
}

impl ShoppingLookup for &RecordingLookup {
    async fn search_product(&self, product_name: &str) -> Result<String> {
        self.calls.lock().unwrap().push(product_name.to_string());
        Ok(format!(
            "https://shop.example/{}",
            product_name.replace(' ', "+")
        ))
    }
}

fn catalog_results() -> Vec<SearchResult> {
    let items = [
        ("Global Desi Women Multi Coloured Kurta", "Apparel", "Topwear", "Multi"),
        ("Global Desi Women Solid Red Palazzo Pants", "Apparel", "Bottomwear", "Red"),
        ("Ethnic Mojari Flats in Gold", "Footwear", "Flats", "Gold"),
    ];
    items
        .iter()
        .enumerate()
        .map(|(i, (name, master, sub, colour))| SearchResult {
            metadata: ItemMetadata {
                product_display_name: Some((*name).to_string()),
                master_category: Some((*master).to_string()),
                sub_category: Some((*sub).to_string()),
                article_type: Some("Kurtas".to_string()),
                gender: Some("Women".to_string()),
                base_colour: Some((*colour).to_string()),
                season: Some("Summer".to_string()),
                usage: Some("Ethnic".to_string()),
                year: Some("2012".to_string()),
            },
            score: 0.9 - i as f32 * 0.1,
        })
        .collect()
}

#[test]
fn formatted_results_mirror_retrieval_order() {
    let results = catalog_results();
    let formatted = format_results(&results);

    let item_count = formatted
        .lines()
        .filter(|l| l.starts_with("Item "))
        .count();
    assert_eq!(item_count, results.len());

    let kurta = formatted.find("Multi Coloured Kurta").unwrap();
    let palazzo = formatted.find("Palazzo Pants").unwrap();
    let flats = formatted.find("Mojari Flats").unwrap();
    assert!(kurta < palazzo && palazzo < flats);
}

#[tokio::test]
async fn generated_output_flows_into_resolution() {
    let raw_model_output = "<outfit_analysis>\nupperwear: kurta; bottomwear: palazzo\n</outfit_analysis>\n\
         <response>\nPair the [Global Desi Women Multi Coloured Kurta] with the \
         [Global Desi Women Solid Red Palazzo Pants] and finish with \
         [Ethnic Mojari Flats in Gold].\n</response>";

    let recommendation = extract_response(raw_model_output).unwrap();
    assert!(recommendation.starts_with("Pair the ["));

    let mentions = extract_product_names(&recommendation);
    assert_eq!(mentions.len(), 3);

    let lookup = RecordingLookup {
        calls: Mutex::new(Vec::new()),
    };
    let resolver = ProductResolver::new(&lookup);
    let products = resolver
        .resolve(&recommendation, &catalog_results())
        .await
        .unwrap();

    assert_eq!(products.len(), 3);
    assert_eq!(products[0].category, "Apparel - Topwear");
    assert_eq!(products[1].category, "Apparel - Bottomwear");
    assert_eq!(products[2].category, "Footwear - Flats");
    assert!(products.iter().all(|p| p.url.is_some()));
    // One lookup round trip per mention, in mention order
    assert_eq!(
        *lookup.calls.lock().unwrap(),
        mentions
    );
}

#[test]
fn unmarked_model_output_is_rejected() {
    let err = extract_response("a recommendation with no structure").unwrap_err();
    assert!(matches!(err, StyleRagError::MalformedOutput(_)));
}

#[tokio::test]
async fn uncited_catalog_items_do_not_appear_in_products() {
    let lookup = RecordingLookup {
        calls: Mutex::new(Vec::new()),
    };
    let resolver = ProductResolver::new(&lookup);

    let products = resolver
        .resolve(
            "Just the [Ethnic Mojari Flats in Gold] today.",
            &catalog_results(),
        )
        .await
        .unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Ethnic Mojari Flats in Gold");
}
