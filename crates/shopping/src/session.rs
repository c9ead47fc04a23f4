use larder_shared::{Recipe, RecipeSelection};

use crate::checklist::{CheckedItems, export_text};
use crate::cleanup::{CleanupError, GroceryListOrganizer};
use crate::generate::generate_for_selection;
use crate::list::{GroceryItem, OrganizedGroceryList};

/// Proof that a cleanup was started, handed back with its result.
#[derive(Debug, Clone)]
pub struct CleanupTicket {
    id: u64,
    revision: u64,
    list: OrganizedGroceryList,
}

impl CleanupTicket {
    /// Selection revision the snapshot was built from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Snapshot of the list the cleanup runs against.
    pub fn list(&self) -> &OrganizedGroceryList {
        &self.list
    }
}

/// What happened to a cleanup result handed to [`ShoppingSession::finish_cleanup`].
#[derive(Debug)]
pub enum CleanupOutcome {
    /// The cleaned list replaced the current one.
    Applied,
    /// The service failed; the current list was kept.
    Failed(CleanupError),
    /// The selection changed or the request was cancelled meanwhile.
    Discarded,
}

/// Shopping state owned by the presentation layer.
///
/// Holds the recipe selection, the list built from it, the ticks and the
/// single in-flight cleanup. The list is rebuilt from scratch on every
/// selection change.
#[derive(Debug, Default)]
pub struct ShoppingSession {
    selection: RecipeSelection,
    list: OrganizedGroceryList,
    checked: CheckedItems,
    next_ticket: u64,
    in_flight: Option<u64>,
}

impl ShoppingSession {
    pub fn new(selection: RecipeSelection) -> Self {
        let list = generate_for_selection(&selection);

        Self {
            selection,
            list,
            ..Default::default()
        }
    }

    pub fn selection(&self) -> &RecipeSelection {
        &self.selection
    }

    pub fn list(&self) -> &OrganizedGroceryList {
        &self.list
    }

    pub fn checked(&self) -> &CheckedItems {
        &self.checked
    }

    pub fn is_organizing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn select(&mut self, recipe: Recipe) -> bool {
        let changed = self.selection.add(recipe);
        if changed {
            self.rebuild();
        }

        changed
    }

    pub fn deselect(&mut self, recipe_id: &str) -> bool {
        let changed = self.selection.remove(recipe_id);
        if changed {
            self.rebuild();
        }

        changed
    }

    pub fn clear(&mut self) {
        if self.selection.is_empty() {
            return;
        }

        self.selection.clear();
        self.rebuild();
    }

    fn rebuild(&mut self) {
        if self.in_flight.take().is_some() {
            tracing::debug!("selection changed, pending cleanup will be discarded");
        }

        self.list = generate_for_selection(&self.selection);
    }

    pub fn toggle(&mut self, item: &GroceryItem) -> bool {
        self.checked.toggle(item)
    }

    pub fn is_checked(&self, item: &GroceryItem) -> bool {
        self.checked.is_checked(item)
    }

    pub fn export_text(&self) -> String {
        export_text(&self.selection.titles(), &self.list, &self.checked)
    }

    /// Start a cleanup of the current list.
    ///
    /// Only one cleanup may run at a time.
    pub fn begin_cleanup(&mut self) -> Result<CleanupTicket, CleanupError> {
        if self.in_flight.is_some() {
            return Err(CleanupError::InProgress);
        }

        self.next_ticket += 1;
        self.in_flight = Some(self.next_ticket);

        Ok(CleanupTicket {
            id: self.next_ticket,
            revision: self.selection.revision(),
            list: self.list.clone(),
        })
    }

    /// Abandon the running cleanup; its result will be discarded.
    pub fn cancel_cleanup(&mut self) {
        self.in_flight = None;
    }

    /// Apply the result of the cleanup started with `ticket`.
    pub fn finish_cleanup(
        &mut self,
        ticket: CleanupTicket,
        result: Result<OrganizedGroceryList, CleanupError>,
    ) -> CleanupOutcome {
        if self.in_flight != Some(ticket.id) || ticket.revision != self.selection.revision() {
            tracing::debug!(
                ticket = ticket.id,
                ticket_revision = ticket.revision,
                revision = self.selection.revision(),
                "discarding stale cleanup result"
            );
            return CleanupOutcome::Discarded;
        }

        self.in_flight = None;

        match result {
            Ok(cleaned) => {
                self.list = cleaned;
                // item identities changed with the cleanup
                self.checked.clear();
                CleanupOutcome::Applied
            }
            Err(err) => CleanupOutcome::Failed(err),
        }
    }

    /// Run a whole cleanup against `organizer` in one go.
    pub async fn organize(&mut self, organizer: &GroceryListOrganizer) -> CleanupOutcome {
        let ticket = match self.begin_cleanup() {
            Ok(ticket) => ticket,
            Err(err) => return CleanupOutcome::Failed(err),
        };

        let result = organizer.organize(ticket.list()).await;
        self.finish_cleanup(ticket, result)
    }
}
