//! Loaded collection with its loading and error flags.
//!
//! DESIGN
//! ======
//! Every screen owns one `ListState` per collection it shows. Mutations go
//! through the API and then re-fetch the whole collection, so the items are
//! always a server snapshot and never patched locally.
//!
//! ERROR HANDLING
//! ==============
//! A failed load keeps the previous items and stores the message for the
//! error banner. A failed mutation returns the error to the caller and leaves
//! the items untouched; it does not set the banner.

use tracing::info;

use super::form::Submission;
use crate::model::{Id, Resource};
use crate::net::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct ListState<R> {
    pub items: Vec<R>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected_id: Option<Id>,
}

impl<R> Default for ListState<R> {
    fn default() -> Self {
        Self { items: Vec::new(), loading: false, error: None, selected_id: None }
    }
}

impl<R: Resource> ListState<R> {
    /// Mark the start of a fetch.
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Apply a fetch outcome.
    pub fn finish_load(&mut self, outcome: Result<Vec<R>, ApiError>) {
        self.loading = false;
        match outcome {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    #[must_use]
    pub fn find(&self, id: Id) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&R> {
        self.selected_id.and_then(|id| self.find(id))
    }

    /// Re-fetch the collection.
    pub async fn refresh(&mut self, api: &ApiClient) {
        self.begin_load();
        let outcome = api.list::<R>().await;
        self.finish_load(outcome);
    }

    /// Send a form submission, then refresh.
    ///
    /// # Errors
    ///
    /// Returns the API error; the collection is not refreshed in that case.
    pub async fn save(&mut self, api: &ApiClient, submission: &Submission<R::Payload>) -> Result<Option<R>, ApiError> {
        let saved = match submission {
            Submission::Create(payload) => api.create::<R>(payload).await?,
            Submission::Update(id, payload) => api.update::<R>(*id, payload).await?,
        };
        info!(resource = R::PATH, "saved");
        self.refresh(api).await;
        Ok(saved)
    }

    /// Delete a record, then refresh.
    ///
    /// # Errors
    ///
    /// Returns the API error; the collection is not refreshed in that case.
    pub async fn remove(&mut self, api: &ApiClient, id: Id) -> Result<(), ApiError> {
        api.delete::<R>(id).await?;
        info!(resource = R::PATH, id, "deleted");
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
        self.refresh(api).await;
        Ok(())
    }
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
