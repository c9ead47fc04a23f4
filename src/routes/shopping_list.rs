use axum::extract::{Json, State};
use larder_shared::Recipe;
use larder_shopping::{CheckedItems, OrganizedGroceryList, export_text, generate_grocery_list};
use serde::Deserialize;

use crate::{error::AppError, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Deserialize)]
pub struct OrganizeRequest {
    pub list: OrganizedGroceryList,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    /// List to export; rebuilt from `recipes` when absent
    #[serde(default)]
    pub list: Option<OrganizedGroceryList>,
    /// Keys of the items already in the basket
    #[serde(default)]
    pub checked: Vec<String>,
}

/// POST /shopping-list
pub async fn generate(Json(input): Json<GenerateRequest>) -> Json<OrganizedGroceryList> {
    Json(generate_grocery_list(&input.recipes))
}

/// POST /shopping-list/organize
pub async fn organize(
    State(app): State<AppState>,
    Json(input): Json<OrganizeRequest>,
) -> Result<Json<OrganizedGroceryList>, AppError> {
    if input.list.is_empty() {
        return Err(AppError::ValidationError(
            "grocery list is empty, nothing to organize".to_owned(),
        ));
    }

    let cleaned = app.organizer.organize(&input.list).await?;

    Ok(Json(cleaned))
}

/// POST /shopping-list/export
pub async fn export(Json(input): Json<ExportRequest>) -> String {
    let list = input
        .list
        .unwrap_or_else(|| generate_grocery_list(&input.recipes));
    let titles = input
        .recipes
        .iter()
        .map(|r| r.title.as_str())
        .collect::<Vec<_>>();
    let checked = input.checked.into_iter().collect::<CheckedItems>();

    export_text(&titles, &list, &checked)
}
