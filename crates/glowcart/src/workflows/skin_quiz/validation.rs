use super::domain::{
    dedupe_concerns, normalize_terms, QuizResponse, QuizSubmission, SkinProfile,
};

pub const MAX_INGREDIENTS_PER_LIST: usize = 50;

/// Validation errors raised before a submission reaches the scorer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizValidationError {
    #[error("quiz response #{index} is missing a question id")]
    BlankQuestionId { index: usize },
    #[error("quiz response '{question_id}' has no answer")]
    EmptyAnswer { question_id: String },
    #[error("{field} lists more than {max} ingredients")]
    TooManyIngredients { field: &'static str, max: usize },
}

/// Profile plus the raw answers kept alongside it in the analysis record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub profile: SkinProfile,
    pub quiz_responses: Vec<QuizResponse>,
}

/// Guard responsible for producing well-formed `SkinProfile` instances.
#[derive(Debug, Clone)]
pub struct QuizGuard {
    max_ingredients: usize,
}

impl Default for QuizGuard {
    fn default() -> Self {
        Self::with_max_ingredients(MAX_INGREDIENTS_PER_LIST)
    }
}

impl QuizGuard {
    pub fn with_max_ingredients(max_ingredients: usize) -> Self {
        Self { max_ingredients }
    }

    /// Convert an inbound quiz submission into a normalized skin profile.
    pub fn profile_from_submission(
        &self,
        submission: QuizSubmission,
    ) -> Result<ValidatedSubmission, QuizValidationError> {
        for (index, response) in submission.quiz_responses.iter().enumerate() {
            if response.question_id.trim().is_empty() {
                return Err(QuizValidationError::BlankQuestionId { index });
            }
            if response.answer.is_blank() {
                return Err(QuizValidationError::EmptyAnswer {
                    question_id: response.question_id.clone(),
                });
            }
        }

        let preferences = submission.routine_preferences;
        let preferred_ingredients = self.ingredient_list(
            "preferred_ingredients",
            preferences.preferred_ingredients.unwrap_or_default(),
        )?;
        let avoid_ingredients = self.ingredient_list(
            "avoid_ingredients",
            preferences.avoid_ingredients.unwrap_or_default(),
        )?;

        let mut profile = SkinProfile::new(submission.skin_type)
            .with_current_products(preferences.current_products.unwrap_or_default());
        profile.skin_concerns = dedupe_concerns(submission.skin_concerns);
        profile.preferred_ingredients = preferred_ingredients;
        profile.avoid_ingredients = avoid_ingredients;
        if let Some(budget) = preferences.budget {
            profile.budget = budget;
        }
        if let Some(complexity) = preferences.routine_complexity {
            profile.routine_complexity = complexity;
        }

        Ok(ValidatedSubmission {
            profile,
            quiz_responses: submission.quiz_responses,
        })
    }

    fn ingredient_list(
        &self,
        field: &'static str,
        raw: Vec<String>,
    ) -> Result<Vec<String>, QuizValidationError> {
        let normalized = normalize_terms(raw);
        if normalized.len() > self.max_ingredients {
            return Err(QuizValidationError::TooManyIngredients {
                field,
                max: self.max_ingredients,
            });
        }
        Ok(normalized)
    }
}
