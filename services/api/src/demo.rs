use crate::infra::{
    load_catalog, recommendation_config, InMemoryAnalysisRepository, InMemoryCatalog,
};
use clap::Args;
use glowcart::error::AppError;
use glowcart::workflows::catalog::CatalogImporter;
use glowcart::workflows::skin_quiz::recommendation::DEFAULT_RECOMMENDATION_LIMIT;
use glowcart::workflows::skin_quiz::{
    Budget, QuizAnswer, QuizGuard, QuizResponse, QuizSubmission, RecommendationEngine,
    RecommendationView, RoutineComplexity, RoutinePreferences, SkinAnalysisService, SkinConcern,
    SkinProfile, SkinType, UserId,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Catalog CSV export (id,name,description,price,category,image)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Skin type: dry, oily, combination, sensitive, or normal
    #[arg(long)]
    pub(crate) skin_type: SkinType,
    /// Skin concern to address (repeatable)
    #[arg(long = "concern")]
    pub(crate) concerns: Vec<SkinConcern>,
    /// Ingredient to favour (repeatable)
    #[arg(long)]
    pub(crate) prefer: Vec<String>,
    /// Ingredient to steer away from (repeatable)
    #[arg(long)]
    pub(crate) avoid: Vec<String>,
    /// Budget band: low, medium, or high (defaults to medium)
    #[arg(long)]
    pub(crate) budget: Option<Budget>,
    /// Maximum number of recommendations to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Emit recommendations as JSON instead of a text listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Catalog CSV export to use instead of the bundled sample catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Maximum number of recommendations per analysis
    #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT)]
    pub(crate) limit: usize,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        catalog,
        skin_type,
        concerns,
        prefer,
        avoid,
        budget,
        limit,
        json,
    } = args;

    let items = CatalogImporter::from_path(&catalog)?;
    let submission = QuizSubmission {
        skin_type,
        skin_concerns: concerns,
        routine_preferences: RoutinePreferences {
            preferred_ingredients: Some(prefer),
            avoid_ingredients: Some(avoid),
            budget,
            ..RoutinePreferences::default()
        },
        quiz_responses: Vec::new(),
    };
    let profile = QuizGuard::default()
        .profile_from_submission(submission)?
        .profile;

    let engine = RecommendationEngine::default();
    let limit = limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
    let recommendations: Vec<RecommendationView> = engine
        .recommend(&profile, &items, limit)
        .into_iter()
        .map(RecommendationView::from)
        .collect();

    if json {
        let rendered =
            serde_json::to_string_pretty(&recommendations).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    let eligible = items
        .iter()
        .filter(|item| item.category == engine.config().eligible_category)
        .count();
    println!(
        "Recommendations for {} skin ({} of {} {} products matched)",
        profile.skin_type,
        recommendations.len(),
        eligible,
        engine.config().eligible_category
    );
    render_profile(&profile);
    render_recommendations(&recommendations);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { catalog, limit } = args;

    let items = load_catalog(catalog.as_deref())?;
    println!("GlowCart skin quiz demo ({} catalog products)", items.len());

    let service = SkinAnalysisService::new(
        Arc::new(InMemoryAnalysisRepository::default()),
        Arc::new(InMemoryCatalog::with_items(items)),
        recommendation_config(limit),
    );
    let shopper = UserId("demo-shopper".to_string());

    let result = match service.submit(&shopper, demo_submission()) {
        Ok(result) => result,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    println!("\nStored analysis {}", result.analysis_id);
    render_recommendations(&result.recommendations);

    match service.get(&shopper, &result.analysis_id) {
        Ok(detail) => {
            println!(
                "\nAnalysis detail recorded {}",
                detail.created_at.format("%Y-%m-%d %H:%M UTC")
            );
            render_profile(&detail.profile);
            let names: Vec<&str> = detail
                .recommended_products
                .iter()
                .map(|product| product.name.as_str())
                .collect();
            println!("  Saved products: {}", names.join(", "));
        }
        Err(err) => println!("  Analysis lookup failed: {}", err),
    }

    let intruder = UserId("someone-else".to_string());
    match service.get(&intruder, &result.analysis_id) {
        Ok(_) => println!("  Access check: another shopper could read this analysis"),
        Err(err) => println!("  Access check for another shopper: {}", err),
    }

    match service.history(&shopper) {
        Ok(history) => println!("  History entries for {}: {}", shopper.0, history.len()),
        Err(err) => println!("  History unavailable: {}", err),
    }

    Ok(())
}

fn demo_submission() -> QuizSubmission {
    QuizSubmission {
        skin_type: SkinType::Oily,
        skin_concerns: vec![SkinConcern::Acne, SkinConcern::LargePores],
        routine_preferences: RoutinePreferences {
            current_products: Some(vec!["Foaming cleanser".to_string()]),
            preferred_ingredients: Some(vec![
                "Salicylic Acid".to_string(),
                "Niacinamide".to_string(),
            ]),
            avoid_ingredients: Some(vec!["fragrance".to_string()]),
            budget: Some(Budget::Medium),
            routine_complexity: Some(RoutineComplexity::Simple),
        },
        quiz_responses: vec![
            QuizResponse {
                question_id: "skinType".to_string(),
                answer: QuizAnswer::Single("oily".to_string()),
            },
            QuizResponse {
                question_id: "skinConcerns".to_string(),
                answer: QuizAnswer::Multiple(vec!["acne".to_string(), "large pores".to_string()]),
            },
        ],
    }
}

fn render_profile(profile: &SkinProfile) {
    let concerns: Vec<&str> = profile
        .skin_concerns
        .iter()
        .map(|concern| concern.label())
        .collect();
    println!(
        "  Profile: {} skin | concerns: {} | budget: {} | routine: {}",
        profile.skin_type,
        if concerns.is_empty() {
            "none".to_string()
        } else {
            concerns.join(", ")
        },
        profile.budget,
        profile.routine_complexity
    );
    if !profile.preferred_ingredients.is_empty() {
        println!("  Prefers: {}", profile.preferred_ingredients.join(", "));
    }
    if !profile.avoid_ingredients.is_empty() {
        println!("  Avoids: {}", profile.avoid_ingredients.join(", "));
    }
}

fn render_recommendations(recommendations: &[RecommendationView]) {
    if recommendations.is_empty() {
        println!("  No products matched this profile.");
        return;
    }

    for (rank, recommendation) in recommendations.iter().enumerate() {
        println!(
            "  {}. [{:>3}] {} (${:.2})",
            rank + 1,
            recommendation.score,
            recommendation.product.name,
            recommendation.product.price
        );
        for reason in &recommendation.match_reasons {
            println!("       - {}", reason);
        }
    }
}
