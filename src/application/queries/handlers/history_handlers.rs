//! History Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::HistoryRepositoryPort;
use crate::application::queries::ListHistory;
use crate::domain::history::{HistoryEntry, Page};

/// ListHistory Handler
pub struct ListHistoryHandler {
    history_repo: Arc<dyn HistoryRepositoryPort>,
}

impl ListHistoryHandler {
    pub fn new(history_repo: Arc<dyn HistoryRepositoryPort>) -> Self {
        Self { history_repo }
    }

    pub async fn handle(&self, query: ListHistory) -> Result<Page<HistoryEntry>, ApplicationError> {
        let total = self.history_repo.count_by_user(query.user_id).await?;
        let items = if total > query.page.offset() {
            self.history_repo
                .find_by_user(query.user_id, query.page)
                .await?
        } else {
            Vec::new()
        };

        Ok(Page::new(items, total, query.page))
    }
}
