use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use larder_shared::{Ingredient, Recipe, RecipeSelection};
use larder_shopping::{
    CleanupError, CleanupOutcome, CleanupRequest, CleanupService, GroceryListOrganizer,
    ORGANIZE_MARKER, ShoppingSession, StoreSection,
};

/// Cleanup service double that records requests and replays a canned answer
struct ScriptedService {
    body: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedService {
    fn answering(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: Some(body.to_owned()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            body: None,
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CleanupService for ScriptedService {
    async fn organize(&self, request: &CleanupRequest) -> Result<String, CleanupError> {
        self.requests
            .lock()
            .unwrap()
            .push(request.recipe_text.clone());

        self.body
            .clone()
            .ok_or_else(|| CleanupError::Network("connection refused".to_owned()))
    }
}

fn selection() -> RecipeSelection {
    RecipeSelection::from(vec![
        Recipe::new("1", "Pasta")
            .ingredient(Ingredient::new("garlic", "2", "cloves"))
            .ingredient(Ingredient::new("water", "", "").with_notes("for boiling"))
            .ingredient(Ingredient::new("olive oil", "2", "tbsp")),
        Recipe::new("2", "Salad")
            .ingredient(Ingredient::new("garlic", "1", "cloves"))
            .ingredient(Ingredient::new("oregano", "1", "tsp")),
    ])
}

#[tokio::test]
async fn test_session_organize_applies_cleaned_list() {
    let service = ScriptedService::answering(
        r#"Sure! Here is the organized list:
        {
            "Produce": [{ "name": "garlic", "amount": "3", "unit": "cloves" }],
            "Condiments & Sauces": [{ "name": "olive oil", "amount": "2", "unit": "tbsp" }],
            "Spices & Seasonings": [{ "name": "oregano" }]
        }"#,
    );
    let organizer = GroceryListOrganizer::new(service.clone());
    let mut session = ShoppingSession::new(selection());

    let outcome = session.organize(&organizer).await;

    assert!(matches!(outcome, CleanupOutcome::Applied));
    assert_eq!(session.list().item_count(), 3);

    let garlic = &session.list().get(StoreSection::Produce).unwrap()[0];
    assert_eq!(garlic.from_recipes, vec!["Pasta", "Salad"]);

    let oregano = &session.list().get(StoreSection::SpicesAndSeasonings).unwrap()[0];
    assert_eq!(oregano.amount, "");
    assert_eq!(oregano.from_recipes, vec!["Salad"]);

    let requests = service.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with(ORGANIZE_MARKER));
    assert!(requests[0].contains("=== Produce ===\n3 cloves garlic\nFrom: Pasta, Salad"));
    assert!(requests[0].contains("water (for boiling)"));
}

#[tokio::test]
async fn test_session_organize_failure_keeps_list() {
    let organizer = GroceryListOrganizer::new(ScriptedService::unreachable());
    let mut session = ShoppingSession::new(selection());
    let before = session.list().clone();

    let outcome = session.organize(&organizer).await;

    assert!(matches!(
        outcome,
        CleanupOutcome::Failed(CleanupError::Network(_))
    ));
    assert_eq!(session.list(), &before);
    assert!(!session.is_organizing());
}

#[tokio::test]
async fn test_session_organize_invalid_json_keeps_list() {
    let organizer = GroceryListOrganizer::new(ScriptedService::answering("I cannot help with that."));
    let mut session = ShoppingSession::new(selection());
    let before = session.list().clone();

    let outcome = session.organize(&organizer).await;

    assert!(matches!(outcome, CleanupOutcome::Failed(CleanupError::Parse(_))));
    assert_eq!(session.list(), &before);
}

#[tokio::test]
async fn test_result_for_old_selection_is_discarded() {
    let organizer = GroceryListOrganizer::new(ScriptedService::answering(
        r#"{ "Produce": [{ "name": "garlic", "amount": "3", "unit": "cloves" }] }"#,
    ));
    let mut session = ShoppingSession::new(selection());

    let ticket = session.begin_cleanup().unwrap();
    let result = organizer.organize(ticket.list()).await;

    session.deselect("2");
    let rebuilt = session.list().clone();

    assert!(matches!(
        session.finish_cleanup(ticket, result),
        CleanupOutcome::Discarded
    ));
    assert_eq!(session.list(), &rebuilt);
    assert_eq!(
        session.list().get(StoreSection::Produce).unwrap()[0].amount,
        "2"
    );
}
