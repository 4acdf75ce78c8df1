//! Controlled vocabulary for catalog attributes
//!
//! The taxonomy is constructed once at process start and passed explicitly to
//! the components that need it (query rewriting, validation). It is never
//! mutated during serving.

use std::fmt;

/// Attribute categories covered by the taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Gender,
    MasterCategory,
    SubCategory,
    ArticleType,
    BaseColour,
    Season,
    Usage,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gender => "gender",
            Self::MasterCategory => "masterCategory",
            Self::SubCategory => "subCategory",
            Self::ArticleType => "articleType",
            Self::BaseColour => "baseColour",
            Self::Season => "season",
            Self::Usage => "usage",
        };
        write!(f, "{name}")
    }
}

const GENDERS: &[&str] = &["Men", "Women", "Boys", "Girls", "Unisex"];

const MASTER_CATEGORIES: &[&str] = &[
    "Apparel",
    "Accessories",
    "Footwear",
    "Personal Care",
    "Free Items",
    "Sporting Goods",
    "Home",
];

const SUB_CATEGORIES: &[&str] = &[
    "Topwear",
    "Bottomwear",
    "Dress",
    "Apparel Set",
    "Saree",
    "Innerwear",
    "Loungewear and Nightwear",
    "Shoes",
    "Sandal",
    "Flip Flops",
    "Watches",
    "Bags",
    "Belts",
    "Wallets",
    "Jewellery",
    "Eyewear",
    "Headwear",
    "Scarves",
    "Mufflers",
    "Ties",
    "Gloves",
    "Socks",
    "Fragrance",
    "Lips",
    "Eyes",
    "Nails",
    "Skin Care",
    "Makeup",
    "Bath and Body",
    "Hair",
    "Sports Accessories",
    "Sports Equipment",
    "Home Furnishing",
    "Free Gifts",
];

const ARTICLE_TYPES: &[&str] = &[
    "Tshirts",
    "Shirts",
    "Tops",
    "Kurtas",
    "Kurtis",
    "Tunics",
    "Sweatshirts",
    "Sweaters",
    "Jackets",
    "Blazers",
    "Waistcoat",
    "Dresses",
    "Sarees",
    "Dupatta",
    "Lehenga Choli",
    "Jeans",
    "Trousers",
    "Shorts",
    "Track Pants",
    "Leggings",
    "Capris",
    "Skirts",
    "Palazzos",
    "Churidar",
    "Salwar",
    "Casual Shoes",
    "Sports Shoes",
    "Formal Shoes",
    "Heels",
    "Flats",
    "Sandals",
    "Flip Flops",
    "Watches",
    "Handbags",
    "Clutches",
    "Backpacks",
    "Belts",
    "Wallets",
    "Sunglasses",
    "Caps",
    "Earrings",
    "Necklace and Chains",
    "Bracelet",
    "Ring",
    "Pendant",
    "Bangle",
    "Scarves",
    "Mufflers",
    "Ties",
    "Socks",
    "Ties and Cufflinks",
    "Perfume and Body Mist",
    "Deodorant",
    "Lipstick",
    "Nail Polish",
    "Kajal and Eyeliner",
];

const BASE_COLOURS: &[&str] = &[
    "Black",
    "White",
    "Off White",
    "Grey",
    "Grey Melange",
    "Charcoal",
    "Silver",
    "Navy Blue",
    "Blue",
    "Turquoise Blue",
    "Teal",
    "Green",
    "Sea Green",
    "Olive",
    "Lime Green",
    "Red",
    "Maroon",
    "Burgundy",
    "Rust",
    "Pink",
    "Rose",
    "Magenta",
    "Peach",
    "Purple",
    "Lavender",
    "Mauve",
    "Yellow",
    "Mustard",
    "Orange",
    "Brown",
    "Coffee Brown",
    "Bronze",
    "Copper",
    "Tan",
    "Khaki",
    "Beige",
    "Cream",
    "Skin",
    "Nude",
    "Gold",
    "Metallic",
    "Multi",
];

const SEASONS: &[&str] = &["Summer", "Fall", "Winter", "Spring"];

const USAGES: &[&str] = &[
    "Casual",
    "Formal",
    "Ethnic",
    "Sports",
    "Smart Casual",
    "Party",
    "Travel",
    "Home",
];

/// Fixed, ordered value lists for each attribute category
#[derive(Debug, Clone)]
pub struct Taxonomy {
    gender: Vec<String>,
    master_category: Vec<String>,
    sub_category: Vec<String>,
    article_type: Vec<String>,
    base_colour: Vec<String>,
    season: Vec<String>,
    usage: Vec<String>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        let to_owned = |values: &[&str]| values.iter().map(|v| (*v).to_string()).collect();
        Self {
            gender: to_owned(GENDERS),
            master_category: to_owned(MASTER_CATEGORIES),
            sub_category: to_owned(SUB_CATEGORIES),
            article_type: to_owned(ARTICLE_TYPES),
            base_colour: to_owned(BASE_COLOURS),
            season: to_owned(SEASONS),
            usage: to_owned(USAGES),
        }
    }
}

impl Taxonomy {
    /// Get the allowed values for a category, in their fixed order
    pub fn values(&self, category: Category) -> &[String] {
        match category {
            Category::Gender => &self.gender,
            Category::MasterCategory => &self.master_category,
            Category::SubCategory => &self.sub_category,
            Category::ArticleType => &self.article_type,
            Category::BaseColour => &self.base_colour,
            Category::Season => &self.season,
            Category::Usage => &self.usage,
        }
    }

    /// Exact-match membership check
    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.values(category).iter().any(|v| v == value)
    }

    /// Render a category's value list as a JSON array for prompt embedding
    pub fn json_values(&self, category: Category) -> String {
        serde_json::to_string(self.values(category)).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_nonempty_and_ordered() {
        let taxonomy = Taxonomy::default();
        for category in [
            Category::Gender,
            Category::MasterCategory,
            Category::SubCategory,
            Category::ArticleType,
            Category::BaseColour,
            Category::Season,
            Category::Usage,
        ] {
            assert!(!taxonomy.values(category).is_empty(), "{category} empty");
        }
        // Order is part of the contract
        assert_eq!(taxonomy.values(Category::Season)[0], "Summer");
    }

    #[test]
    fn test_contains_is_exact_match() {
        let taxonomy = Taxonomy::default();
        assert!(taxonomy.contains(Category::BaseColour, "Navy Blue"));
        assert!(!taxonomy.contains(Category::BaseColour, "navy blue"));
        assert!(!taxonomy.contains(Category::Season, "Monsoon"));
    }

    #[test]
    fn test_json_values_round_trip() {
        let taxonomy = Taxonomy::default();
        let json = taxonomy.json_values(Category::Gender);
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, taxonomy.values(Category::Gender));
    }
}
