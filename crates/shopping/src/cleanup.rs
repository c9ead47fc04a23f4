use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::categorization::StoreSection;
use crate::list::{GroceryItem, OrganizedGroceryList};

/// Opening sentence the text service looks for to switch from recipe parsing
/// to grocery-list organization.
pub const ORGANIZE_MARKER: &str = "Please organize this grocery list and clean up the quantities:";

/// Error types for the cleanup pass
///
/// Every variant means the same thing to the caller: organizing failed and the
/// list built before the call is still the one to show.
#[derive(Debug, thiserror::Error)]
pub enum CleanupError {
    #[error("Organize failed: could not reach cleanup service: {0}")]
    Network(String),

    #[error("Organize failed: cleanup service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Organize failed: unusable cleanup response: {0}")]
    Parse(String),

    #[error("Organize failed: a cleanup is already running for this list")]
    InProgress,
}

/// Body of the cleanup request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CleanupRequest {
    #[serde(rename = "recipeText")]
    pub recipe_text: String,
}

impl CleanupRequest {
    pub fn for_list(list: &OrganizedGroceryList) -> Self {
        Self {
            recipe_text: format!("{ORGANIZE_MARKER}\n\n{}", render_for_cleanup(list)),
        }
    }
}

/// External text-normalization service.
///
/// Implementations return the raw response body; validating it is left to
/// [`GroceryListOrganizer`].
#[async_trait]
pub trait CleanupService: Send + Sync {
    async fn organize(&self, request: &CleanupRequest) -> Result<String, CleanupError>;
}

/// Cleanup service reached over HTTP with a JSON POST.
pub struct HttpCleanupService {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpCleanupService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CleanupError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CleanupError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CleanupService for HttpCleanupService {
    async fn organize(&self, request: &CleanupRequest) -> Result<String, CleanupError> {
        tracing::debug!(endpoint = %self.endpoint, "sending grocery list to cleanup service");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| CleanupError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::debug!(
                        err = %err,
                        status = status.as_u16(),
                        "failed to read cleanup error body"
                    );
                    String::new()
                }
            };
            return Err(CleanupError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| CleanupError::Network(e.to_string()))
    }
}

/// Runs the cleanup pass: serialize, call the service, validate the answer
/// and carry provenance over from the list that was sent.
#[derive(Clone)]
pub struct GroceryListOrganizer {
    service: Arc<dyn CleanupService>,
}

impl GroceryListOrganizer {
    pub fn new(service: Arc<dyn CleanupService>) -> Self {
        Self { service }
    }

    /// Produce a cleaned replacement for `list`.
    ///
    /// `list` itself is never modified, so on error the caller still holds
    /// the pre-cleanup version.
    #[tracing::instrument(skip_all, fields(sections = list.section_count(), items = list.item_count()))]
    pub async fn organize(
        &self,
        list: &OrganizedGroceryList,
    ) -> Result<OrganizedGroceryList, CleanupError> {
        let request = CleanupRequest::for_list(list);

        let result = match self.service.organize(&request).await {
            Ok(body) => parse_cleanup_response(&body).and_then(|cleaned| {
                if cleaned.is_empty() && !list.is_empty() {
                    return Err(CleanupError::Parse(
                        "response contained no usable items".to_owned(),
                    ));
                }

                Ok(cleaned)
            }),
            Err(err) => Err(err),
        };

        match result {
            Ok(mut cleaned) => {
                reattach_provenance(&mut cleaned, list);

                tracing::info!(
                    items_before = list.item_count(),
                    items_after = cleaned.item_count(),
                    "grocery list organized"
                );

                Ok(cleaned)
            }
            Err(err) => {
                tracing::error!(err = %err, "failed to organize grocery list");
                Err(err)
            }
        }
    }
}

/// Line-oriented rendering of `list` sent to the cleanup service.
///
/// ```text
/// === Produce ===
/// 2 onion (diced)
/// From: Soup, Stew
///
/// === Pantry ===
/// 1 cup sugar
/// From: Cake
/// ```
pub fn render_for_cleanup(list: &OrganizedGroceryList) -> String {
    list.iter()
        .map(|(section, items)| {
            let items = items
                .iter()
                .map(|item| {
                    format!(
                        "{}\nFrom: {}",
                        item.display_text(),
                        item.from_recipes.join(", ")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n");

            format!("=== {section} ===\n{items}")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Validate a cleanup response body into a list.
///
/// The body must hold a JSON object keyed by section name. Entries that are
/// not arrays and items without a usable name are skipped; missing text
/// fields default to empty. The returned items carry no provenance yet.
pub fn parse_cleanup_response(body: &str) -> Result<OrganizedGroceryList, CleanupError> {
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(err) => {
            let Some(object) = extract_json_object(body) else {
                return Err(CleanupError::Parse(err.to_string()));
            };

            serde_json::from_str::<Value>(object)
                .map_err(|e| CleanupError::Parse(e.to_string()))?
        }
    };

    let Value::Object(sections) = value else {
        return Err(CleanupError::Parse(
            "expected a JSON object keyed by section".to_owned(),
        ));
    };

    let mut list = OrganizedGroceryList::new();

    for (name, entries) in sections {
        let Value::Array(entries) = entries else {
            tracing::debug!(section = %name, "ignoring non-array section in cleanup response");
            continue;
        };

        let items = entries.iter().filter_map(parse_item).collect::<Vec<_>>();
        list.insert(StoreSection::from_name(&name), items);
    }

    Ok(list)
}

fn parse_item(value: &Value) -> Option<GroceryItem> {
    let Value::Object(fields) = value else {
        return None;
    };

    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())?;

    let notes = text_field(fields, "notes");

    Some(GroceryItem {
        name: name.to_owned(),
        amount: text_field(fields, "amount"),
        unit: text_field(fields, "unit"),
        notes: (!notes.is_empty()).then_some(notes),
        from_recipes: Vec::new(),
        checked: false,
    })
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Outermost `{ ... }` span of a text that wraps a JSON object in prose.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;

    (start < end).then(|| &text[start..=end])
}

/// Copy `from_recipes` from `original` onto the cleaned items.
///
/// An original item counts as a source when either lowercase name contains
/// the other. Short names ("oil") can match more originals than intended.
pub fn reattach_provenance(cleaned: &mut OrganizedGroceryList, original: &OrganizedGroceryList) {
    let originals = original
        .items()
        .filter(|item| !item.name.is_empty())
        .map(|item| (item.name.to_lowercase(), item))
        .collect::<Vec<_>>();

    for item in cleaned.items_mut() {
        let name = item.name.to_lowercase();

        for (original_name, original_item) in &originals {
            if original_name.contains(&name) || name.contains(original_name.as_str()) {
                item.add_recipes(&original_item.from_recipes);
            }
        }
    }
}
