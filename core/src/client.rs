//! Async category client over an injected `Transport`.
//!
//! # Design
//! `CategoryClient` holds only a shared handle to the transport and carries
//! no state between calls: every operation is one request built by the codec,
//! one `Transport::execute`, and one parse. Failures are logged exactly once
//! through `tracing` and returned to the caller unchanged.

use std::fmt;
use std::sync::Arc;

use crate::codec;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Category, CategoryId, CategoryInput};

/// The operations `CategoryClient` performs, as named in log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListCategories,
    GetCategory,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::ListCategories => "list_categories",
            Operation::GetCategory => "get_category",
            Operation::CreateCategory => "create_category",
            Operation::UpdateCategory => "update_category",
            Operation::DeleteCategory => "delete_category",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct CategoryClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for CategoryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryClient").finish_non_exhaustive()
    }
}

impl CategoryClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// All categories, in the order the server returns them.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let result = self
            .send(codec::build_list_categories())
            .await
            .and_then(codec::parse_list_categories);
        result.inspect_err(|err| log_failure(Operation::ListCategories, None, err))
    }

    /// Fails with `ApiError::NotFound` when no category has this id.
    pub async fn get_category(&self, id: CategoryId) -> Result<Category, ApiError> {
        let result = self
            .send(codec::build_get_category(id))
            .await
            .and_then(codec::parse_get_category);
        result.inspect_err(|err| log_failure(Operation::GetCategory, Some(id), err))
    }

    /// Returns the created category with its server-assigned id.
    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        let result = match codec::build_create_category(input) {
            Ok(request) => self.send(request).await.and_then(codec::parse_create_category),
            Err(err) => Err(err),
        };
        result.inspect_err(|err| log_failure(Operation::CreateCategory, None, err))
    }

    /// `Ok(None)` when the server acknowledges the update without a body.
    pub async fn update_category(
        &self,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Option<Category>, ApiError> {
        let result = match codec::build_update_category(id, input) {
            Ok(request) => self.send(request).await.and_then(codec::parse_update_category),
            Err(err) => Err(err),
        };
        result.inspect_err(|err| log_failure(Operation::UpdateCategory, Some(id), err))
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        let result = self
            .send(codec::build_delete_category(id))
            .await
            .and_then(codec::parse_delete_category);
        result.inspect_err(|err| log_failure(Operation::DeleteCategory, Some(id), err))
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request).await
    }
}

fn log_failure(operation: Operation, id: Option<CategoryId>, err: &ApiError) {
    let message = err.best_message();
    match id {
        Some(id) => tracing::error!(
            operation = operation.as_str(),
            category_id = id.0,
            status = err.status(),
            "{operation} failed for category {id}: {message}"
        ),
        None => tracing::error!(
            operation = operation.as_str(),
            status = err.status(),
            "{operation} failed: {message}"
        ),
    }
}
