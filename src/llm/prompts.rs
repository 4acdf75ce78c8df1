//! Prompt templates for the recommendation pipeline

use std::collections::HashMap;

use crate::taxonomy::Category;
use crate::taxonomy::Taxonomy;

/// Opening marker for the model's internal outfit analysis
pub const ANALYSIS_OPEN_MARKER: &str = "<outfit_analysis>";
/// Closing marker for the model's internal outfit analysis
pub const ANALYSIS_CLOSE_MARKER: &str = "</outfit_analysis>";
/// Opening marker for the user-facing response
pub const RESPONSE_OPEN_MARKER: &str = "<response>";
/// Closing marker for the user-facing response
pub const RESPONSE_CLOSE_MARKER: &str = "</response>";

/// Template for generating prompts
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Fill in the template with variables
    #[must_use]
    pub fn render(&self, values: &HashMap<String, String>) -> String {
        let mut result = self.template.clone();
        for var in &self.variables {
            if let Some(value) = values.get(var) {
                result = result.replace(&format!("{{{{{var}}}}}"), value);
            }
        }
        result
    }

    /// Get required variables
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// Extract variable names from template
fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '{' && chars.peek() == Some(&'{') {
            chars.next(); // skip second '{'
            let mut var_name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch == '}' {
                    chars.next();
                    if chars.peek() == Some(&'}') {
                        chars.next();
                        break;
                    }
                } else {
                    var_name.push(ch);
                    chars.next();
                }
            }
            if !var_name.is_empty() && !variables.contains(&var_name) {
                variables.push(var_name);
            }
        }
    }

    variables
}

/// Build the query-rewriting prompt.
///
/// The taxonomy value lists are embedded verbatim so the model can only pick
/// exact catalog terms; the output must follow the fixed sentence template.
pub fn rewrite_prompt(taxonomy: &Taxonomy, user_query: &str) -> String {
    format!(
        r#"Given this fashion-related query: "{user_query}"

Please rewrite it as a detailed product description that matches these exact metadata categories:

1. Core Categories (use exact terms):
- Master Category: {master}
- Sub Category: {sub}
- Article Type: {article}

2. Style Attributes (use exact terms):
- Gender: {gender}
- Usage: {usage}
- Season: {season}
- Base Color: {colour}

Guidelines:
- Use exact terms from the provided category lists
- Include as many relevant attributes as can be inferred from the query
- Maintain natural language flow while incorporating these specific terms
- Focus on attributes that will be most useful for vector similarity search

Format the rewritten query as a detailed product description following this pattern:
"Looking for a [Article Type] in the [Master Category] - [Sub Category] category. Ideal for [Gender] [Usage] wear, preferably in [Base Color] color, suitable for [Season] season."

Return only the rewritten description without any explanation."#,
        master = taxonomy.json_values(Category::MasterCategory),
        sub = taxonomy.json_values(Category::SubCategory),
        article = taxonomy.json_values(Category::ArticleType),
        gender = taxonomy.json_values(Category::Gender),
        usage = taxonomy.json_values(Category::Usage),
        season = taxonomy.json_values(Category::Season),
        colour = taxonomy.json_values(Category::BaseColour),
    )
}

/// System template for outfit recommendation generation.
///
/// The model must wrap its reasoning in analysis markers and the final
/// conversational answer in response markers, citing every recommended item's
/// exact display name in square brackets.
pub const RECOMMENDATION_TEMPLATE: &str = r#"You are an AI fashion recommender system designed to provide personalized outfit recommendations. Your task is to analyze user queries and retrieved catalog items to offer comprehensive and stylish outfit suggestions in a natural, conversational manner.

First, review the following information:

1. Catalog items retrieved for the user's query:
<search_results>
{{SEARCH_RESULTS}}
</search_results>

2. User query:
<user_query>
{{USER_QUERY}}
</user_query>

Now, follow these steps to process the query and provide a recommendation:

1. Analyze the user's query and the retrieved items:
   Wrap your analysis in <outfit_analysis> tags. Include the following steps:
   a. Identify key elements in the user's query (clothing type, color, occasion, season, gender preference, etc.)
   b. List all relevant items from the results, categorized by type (upperwear, bottomwear, footwear, accessories). For each item, note its key features (color, style, material) and suitability for the occasion/season.
   c. Consider color coordination by listing out potential color combinations among the items.
   d. Select the best matching items for a full outfit recommendation, including upperwear, bottomwear, footwear, and accessories when possible. Explain your reasoning for each piece selected.
   e. Determine any additional style tips or suggestions related to the outfit.

2. Formulate a conversational response:
   Based on your analysis, create a friendly and engaging response that includes:
   a. A greeting
   b. Acknowledgment of the user's specific request
   c. Your outfit recommendation with explanations for each piece
   d. Additional suggestions or style tips
   e. A closing remark

Important guidelines for your response:
- Use a natural, conversational tone throughout your recommendation.
- For each item in the outfit or accessory you recommend, include the exact product display name in [square brackets].
- Provide a complete outfit recommendation whenever possible, including upperwear, bottomwear, footwear, and accessories.
- Ensure that your response is tailored to the user's query and the available items from the search results.

Example output structure (do not copy the content, only the format):

<outfit_analysis>
[Your detailed analysis of the user query and retrieved items, following the steps outlined above]
</outfit_analysis>

<response>
Hi there! I understand you're looking for [brief description of user's request]. I've got a great outfit recommendation for you!

For your main piece, I suggest the [Product Display Name] which [brief explanation of why it's suitable]. To complete the look, pair it with [Product Display Name] for your bottoms and [Product Display Name] for your footwear.

To accessorize, I recommend adding [Product Display Name] which will [explanation of how it complements the outfit].

[Additional style tips or suggestions]

I hope this helps you create the perfect outfit for [occasion/purpose]. Let me know if you'd like any other recommendations!
</response>

Remember to maintain a natural flow in your response while including all necessary product information and recommendations."#;

/// Build the recommendation prompt from the user query and formatted results
pub fn recommendation_prompt(user_query: &str, formatted_results: &str) -> String {
    let template = PromptTemplate::new(RECOMMENDATION_TEMPLATE);
    let mut values = HashMap::new();
    values.insert("SEARCH_RESULTS".to_string(), formatted_results.to_string());
    values.insert("USER_QUERY".to_string(), user_query.to_string());
    template.render(&values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_variables() {
        let template = PromptTemplate::new("Hello {{NAME}}, see {{ITEMS}} and {{NAME}} again");
        assert_eq!(template.variables(), ["NAME", "ITEMS"]);
    }

    #[test]
    fn test_render_replaces_all_occurrences() {
        let template = PromptTemplate::new("{{A}} and {{A}}");
        let mut values = HashMap::new();
        values.insert("A".to_string(), "x".to_string());
        assert_eq!(template.render(&values), "x and x");
    }

    #[test]
    fn test_rewrite_prompt_embeds_taxonomy_verbatim() {
        let taxonomy = Taxonomy::default();
        let prompt = rewrite_prompt(&taxonomy, "red dress for summer");
        for category in [
            Category::MasterCategory,
            Category::SubCategory,
            Category::ArticleType,
            Category::Gender,
            Category::Usage,
            Category::Season,
            Category::BaseColour,
        ] {
            assert!(
                prompt.contains(&taxonomy.json_values(category)),
                "missing {category} list"
            );
        }
        assert!(prompt.contains("red dress for summer"));
    }

    #[test]
    fn test_recommendation_prompt_fills_both_slots() {
        let prompt = recommendation_prompt("diwali outfit", "Item 1:\n- Name: Blue Kurta");
        assert!(prompt.contains("diwali outfit"));
        assert!(prompt.contains("- Name: Blue Kurta"));
        assert!(!prompt.contains("{{"));
        assert!(prompt.contains(RESPONSE_OPEN_MARKER));
    }
}
