use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Store section used to group a shopping list by aisle.
///
/// Declaration order matters twice:
/// - it is the tie-break order of [`CategorizationService::categorize`], an
///   ingredient matching keywords of several sections lands in the first one
///   declared here ("black pepper" is Produce, not Spices & Seasonings);
/// - it is the display order of an [`crate::OrganizedGroceryList`] (the
///   derived `Ord` follows it).
#[derive(
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
pub enum StoreSection {
    Produce,
    #[serde(rename = "Meat & Seafood")]
    #[strum(serialize = "Meat & Seafood")]
    MeatAndSeafood,
    #[serde(rename = "Dairy & Eggs")]
    #[strum(serialize = "Dairy & Eggs")]
    DairyAndEggs,
    #[serde(rename = "Grains & Pasta")]
    #[strum(serialize = "Grains & Pasta")]
    GrainsAndPasta,
    #[serde(rename = "Condiments & Sauces")]
    #[strum(serialize = "Condiments & Sauces")]
    CondimentsAndSauces,
    Pantry,
    #[serde(rename = "Spices & Seasonings")]
    #[strum(serialize = "Spices & Seasonings")]
    SpicesAndSeasonings,
    Other,
}

impl StoreSection {
    /// Lowercase keywords that place an ingredient in this section.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            StoreSection::Produce => &[
                "onion",
                "garlic",
                "ginger",
                "carrot",
                "celery",
                "lettuce",
                "tomato",
                "potato",
                "herb",
                "scallion",
                "green onion",
                "pepper",
                "chili",
                "mushroom",
                "vegetable",
                "cabbage",
                "spinach",
                "kale",
                "fruit",
                "lemon",
                "lime",
                "orange",
                "apple",
                "berry",
                "berries",
                "cucumber",
                "zucchini",
                "squash",
                "pumpkin",
                "eggplant",
                "cilantro",
                "parsley",
                "basil",
                "mint",
                "thyme",
                "rosemary",
                "sage",
                "banana",
                "avocado",
                "corn",
                "sprouts",
                "bean sprouts",
                "kimchi",
            ],
            StoreSection::MeatAndSeafood => &[
                "chicken",
                "beef",
                "pork",
                "lamb",
                "fish",
                "salmon",
                "shrimp",
                "seafood",
                "turkey",
                "meat",
                "steak",
                "ground",
                "bacon",
                "sausage",
                "ham",
                "tuna",
                "cod",
                "tilapia",
                "crab",
                "lobster",
                "duck",
                "veal",
                "guanciale",
                "pancetta",
                "prosciutto",
                "anchovy",
            ],
            StoreSection::DairyAndEggs => &[
                "milk",
                "cream",
                "cheese",
                "butter",
                "yogurt",
                "sour cream",
                "egg",
                "mozzarella",
                "cheddar",
                "parmesan",
                "ricotta",
                "cream cheese",
                "half and half",
                "heavy cream",
                "whipping cream",
                "pecorino",
                "romano",
                "mascarpone",
                "buttermilk",
            ],
            StoreSection::GrainsAndPasta => &[
                "rice",
                "pasta",
                "noodle",
                "spaghetti",
                "penne",
                "fettuccine",
                "linguine",
                "ramen",
                "udon",
                "soba",
                "quinoa",
                "couscous",
                "bread",
                "flour",
                "tortilla",
                "wrap",
                "pita",
                "bagel",
                "roll",
                "crumb",
                "panko",
            ],
            StoreSection::CondimentsAndSauces => &[
                "sauce",
                "oil",
                "vinegar",
                "soy sauce",
                "gochujang",
                "miso",
                "mustard",
                "ketchup",
                "mayonnaise",
                "hot sauce",
                "sriracha",
                "hoisin",
                "oyster sauce",
                "fish sauce",
                "worcestershire",
                "tahini",
                "pesto",
                "dressing",
                "marinade",
                "sesame oil",
                "olive oil",
                "vegetable oil",
                "coconut milk",
                "paste",
            ],
            StoreSection::Pantry => &[
                "sugar",
                "honey",
                "syrup",
                "chocolate",
                "cocoa",
                "vanilla",
                "bean",
                "lentil",
                "chickpea",
                "can",
                "broth",
                "stock",
                "tomato paste",
                "cereal",
                "oat",
                "nut",
                "seed",
                "dried",
                "raisin",
                "cranberry",
                "baking powder",
                "baking soda",
                "yeast",
                "cornstarch",
                "gelatin",
                "seaweed",
                "nori",
            ],
            StoreSection::SpicesAndSeasonings => &[
                "salt",
                "pepper",
                "spice",
                "seasoning",
                "cumin",
                "coriander",
                "paprika",
                "oregano",
                "bay leaf",
                "cinnamon",
                "nutmeg",
                "cardamom",
                "turmeric",
                "curry",
                "powder",
                "flake",
                "chili powder",
                "garlic powder",
                "onion powder",
                "red pepper flake",
                "cayenne",
                "allspice",
                "herb",
                "dried herb",
            ],
            StoreSection::Other => &[],
        }
    }

    /// Resolves a section name coming from outside (e.g. the cleanup
    /// service). Unknown names fall back to [`StoreSection::Other`].
    pub fn from_name(name: &str) -> StoreSection {
        name.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(section = %name, "unknown store section, filing under Other");
            StoreSection::Other
        })
    }
}

/// Categorization Service
///
/// Stateless domain service that maps free-text ingredient names to store
/// sections with two keyword passes: exact matches first, then substring
/// matches in either direction. Never fails, defaults to `Other`.
pub struct CategorizationService;

impl CategorizationService {
    pub fn categorize(ingredient_name: &str) -> StoreSection {
        let normalized = ingredient_name.trim().to_lowercase();

        for section in StoreSection::VARIANTS {
            if section.keywords().contains(&normalized.as_str()) {
                return *section;
            }
        }

        for section in StoreSection::VARIANTS {
            let keywords = section.keywords();

            if keywords.iter().any(|k| normalized.contains(k)) {
                return *section;
            }

            if keywords.iter().any(|k| k.contains(normalized.as_str())) {
                return *section;
            }
        }

        StoreSection::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_exact_keywords() {
        let ingredients = vec![
            ("tomato", StoreSection::Produce),
            ("cilantro", StoreSection::Produce),
            ("salmon", StoreSection::MeatAndSeafood),
            ("pancetta", StoreSection::MeatAndSeafood),
            ("milk", StoreSection::DairyAndEggs),
            ("parmesan", StoreSection::DairyAndEggs),
            ("flour", StoreSection::GrainsAndPasta),
            ("spaghetti", StoreSection::GrainsAndPasta),
            ("soy sauce", StoreSection::CondimentsAndSauces),
            ("olive oil", StoreSection::CondimentsAndSauces),
            ("honey", StoreSection::Pantry),
            ("baking soda", StoreSection::Pantry),
            ("salt", StoreSection::SpicesAndSeasonings),
            ("bay leaf", StoreSection::SpicesAndSeasonings),
        ];

        for (name, expected) in ingredients {
            assert_eq!(
                CategorizationService::categorize(name),
                expected,
                "unexpected section for {name}"
            );
        }
    }

    #[test]
    fn test_exact_match_beats_earlier_substring_match() {
        // "coconut milk" would hit Dairy & Eggs through "milk" in the substring
        // pass, but the exact pass runs over every section first.
        assert_eq!(
            CategorizationService::categorize("coconut milk"),
            StoreSection::CondimentsAndSauces
        );
        assert_eq!(
            CategorizationService::categorize("garlic powder"),
            StoreSection::SpicesAndSeasonings
        );
    }

    #[test]
    fn test_substring_match_follows_declaration_order() {
        assert_eq!(
            CategorizationService::categorize("black pepper"),
            StoreSection::Produce
        );
        assert_eq!(
            CategorizationService::categorize("chicken breast"),
            StoreSection::MeatAndSeafood
        );
        assert_eq!(
            CategorizationService::categorize("brown sugar"),
            StoreSection::Pantry
        );
        assert_eq!(
            CategorizationService::categorize("eggs"),
            StoreSection::DairyAndEggs
        );
    }

    #[test]
    fn test_name_contained_in_keyword() {
        assert_eq!(
            CategorizationService::categorize("sprout"),
            StoreSection::Produce
        );
        assert_eq!(
            CategorizationService::categorize("mozz"),
            StoreSection::DairyAndEggs
        );
    }

    #[test]
    fn test_categorize_unknown() {
        assert_eq!(
            CategorizationService::categorize("xyzzy123"),
            StoreSection::Other
        );
    }

    #[test]
    fn test_blank_name_matches_first_keyword() {
        // an empty name occurs in every keyword
        assert_eq!(CategorizationService::categorize(""), StoreSection::Produce);
        assert_eq!(
            CategorizationService::categorize("   "),
            StoreSection::Produce
        );
    }

    #[test]
    fn test_categorize_case_insensitive_and_trimmed() {
        assert_eq!(
            CategorizationService::categorize("  Heavy Cream "),
            StoreSection::DairyAndEggs
        );
        assert_eq!(
            CategorizationService::categorize("TOMATO"),
            StoreSection::Produce
        );
    }

    #[test]
    fn test_section_names() {
        assert_eq!(StoreSection::MeatAndSeafood.to_string(), "Meat & Seafood");
        assert_eq!(StoreSection::Pantry.as_ref(), "Pantry");
        assert_eq!(
            "Spices & Seasonings".parse::<StoreSection>().unwrap(),
            StoreSection::SpicesAndSeasonings
        );
        assert_eq!(StoreSection::from_name("Frozen"), StoreSection::Other);
        assert_eq!(
            serde_json::to_string(&StoreSection::DairyAndEggs).unwrap(),
            "\"Dairy & Eggs\""
        );
    }

    #[test]
    fn test_display_order_follows_declaration() {
        let mut sections = vec![
            StoreSection::Other,
            StoreSection::Pantry,
            StoreSection::Produce,
        ];
        sections.sort();

        assert_eq!(
            sections,
            vec![StoreSection::Produce, StoreSection::Pantry, StoreSection::Other]
        );
        assert!(StoreSection::Other.keywords().is_empty());
    }
}
