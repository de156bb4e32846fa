use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted skin analyses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(pub String);

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated shopper identifier forwarded by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

/// Catalog product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

/// Raised when a free-form value does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim().to_ascii_lowercase().replace(['-', '_'], " ");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.label() == normalized)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }
        }
    };
}

labelled_enum! {
    /// Skin type selected in the first quiz step.
    SkinType, "skin type" {
        Dry => "dry",
        Oily => "oily",
        Combination => "combination",
        Sensitive => "sensitive",
        Normal => "normal",
    }
}

labelled_enum! {
    /// Fixed concern vocabulary offered by the quiz.
    SkinConcern, "skin concern" {
        Acne => "acne",
        Aging => "aging",
        Hyperpigmentation => "hyperpigmentation",
        Redness => "redness",
        Dryness => "dryness",
        Oiliness => "oiliness",
        Sensitivity => "sensitivity",
        Dullness => "dullness",
        UnevenTexture => "uneven texture",
        LargePores => "large pores",
        Blackheads => "blackheads",
        Other => "other",
    }
}

labelled_enum! {
    /// Spend preference; the price bands live in the recommendation policy.
    Budget, "budget" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

labelled_enum! {
    RoutineComplexity, "routine complexity" {
        Simple => "simple",
        Moderate => "moderate",
        Comprehensive => "comprehensive",
    }
}

labelled_enum! {
    /// Storefront catalog categories.
    ProductCategory, "category" {
        Electronics => "electronics",
        Clothing => "clothing",
        Books => "books",
        Home => "home",
        Beauty => "beauty",
        Other => "other",
    }
}

impl Default for Budget {
    fn default() -> Self {
        Budget::Medium
    }
}

impl Default for RoutineComplexity {
    fn default() -> Self {
        RoutineComplexity::Moderate
    }
}

/// Read-only catalog record handed to the recommendation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
    #[serde(default)]
    pub image: String,
}

/// Validated quiz profile with every default applied at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinProfile {
    pub skin_type: SkinType,
    pub skin_concerns: Vec<SkinConcern>,
    pub preferred_ingredients: Vec<String>,
    pub avoid_ingredients: Vec<String>,
    pub budget: Budget,
    pub routine_complexity: RoutineComplexity,
    pub current_products: Vec<String>,
}

impl SkinProfile {
    pub fn new(skin_type: SkinType) -> Self {
        Self {
            skin_type,
            skin_concerns: Vec::new(),
            preferred_ingredients: Vec::new(),
            avoid_ingredients: Vec::new(),
            budget: Budget::default(),
            routine_complexity: RoutineComplexity::default(),
            current_products: Vec::new(),
        }
    }

    pub fn with_concerns<I>(mut self, concerns: I) -> Self
    where
        I: IntoIterator<Item = SkinConcern>,
    {
        self.skin_concerns = dedupe_concerns(concerns);
        self
    }

    pub fn with_preferred_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.preferred_ingredients = normalize_terms(ingredients);
        self
    }

    pub fn with_avoided_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.avoid_ingredients = normalize_terms(ingredients);
        self
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_routine_complexity(mut self, complexity: RoutineComplexity) -> Self {
        self.routine_complexity = complexity;
        self
    }

    pub fn with_current_products<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.current_products = products
            .into_iter()
            .map(|product| product.as_ref().trim().to_string())
            .filter(|product| !product.is_empty())
            .collect();
        self
    }
}

/// Trims, lower-cases, and de-duplicates ingredient terms while keeping first-seen order.
pub(crate) fn normalize_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for term in terms {
        let term = term.as_ref().trim().to_lowercase();
        if !term.is_empty() && !normalized.contains(&term) {
            normalized.push(term);
        }
    }
    normalized
}

pub(crate) fn dedupe_concerns<I>(concerns: I) -> Vec<SkinConcern>
where
    I: IntoIterator<Item = SkinConcern>,
{
    let mut unique = Vec::new();
    for concern in concerns {
        if !unique.contains(&concern) {
            unique.push(concern);
        }
    }
    unique
}

/// Inbound quiz payload as posted by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub skin_type: SkinType,
    pub skin_concerns: Vec<SkinConcern>,
    #[serde(default)]
    pub routine_preferences: RoutinePreferences,
    pub quiz_responses: Vec<QuizResponse>,
}

/// Optional routine answers from the final quiz step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutinePreferences {
    #[serde(default)]
    pub current_products: Option<Vec<String>>,
    #[serde(default)]
    pub preferred_ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub avoid_ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub routine_complexity: Option<RoutineComplexity>,
}

/// Raw answer captured for one quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub question_id: String,
    pub answer: QuizAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuizAnswer {
    Single(String),
    Multiple(Vec<String>),
}

impl QuizAnswer {
    pub fn is_blank(&self) -> bool {
        match self {
            QuizAnswer::Single(value) => value.trim().is_empty(),
            QuizAnswer::Multiple(values) => values.is_empty(),
        }
    }
}
