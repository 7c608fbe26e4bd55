use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use configs::DirectoryConfig;
use models::employee;

use super::domain::EmployeeInput;
use super::query::{EmployeeQuery, ListParams, SearchPolicy};
use super::repository::EmployeeRepository;
use crate::errors::ServiceError;
use crate::pagination::{Limits, Window};

/// Listing rules fixed at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryPolicy {
    pub search: SearchPolicy,
    pub limits: Limits,
}

impl From<&DirectoryConfig> for QueryPolicy {
    fn from(cfg: &DirectoryConfig) -> Self {
        Self {
            search: cfg.search_policy,
            limits: Limits { default_limit: cfg.default_limit, max_limit: cfg.max_limit },
        }
    }
}

/// One window of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeePage {
    pub items: Vec<employee::Model>,
    /// Matches before offset/limit were applied.
    pub total: u64,
    #[serde(skip)]
    pub window: Window,
}

/// Application service for the employee directory.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use service::directory::{EmployeeInput, EmployeeService, ListParams, QueryPolicy};
/// use service::directory::repository::mock::MockEmployeeRepository;
///
/// let svc = EmployeeService::new(Arc::new(MockEmployeeRepository::default()), QueryPolicy::default());
/// tokio_test::block_on(async {
///     let input = EmployeeInput {
///         full_name: Some("Petrov Petr".into()),
///         position: Some("Analyst".into()),
///         gender: Some("male".into()),
///         hire_date: Some("2023-04-10".into()),
///         ..Default::default()
///     };
///     let created = svc.create(input).await.unwrap();
///     let page = svc.list(&ListParams::default()).await.unwrap();
///     assert_eq!(page.total, 1);
///     assert_eq!(page.items[0].id, created.id);
/// });
/// ```
pub struct EmployeeService<R: EmployeeRepository> {
    repo: Arc<R>,
    policy: QueryPolicy,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: Arc<R>, policy: QueryPolicy) -> Self { Self { repo, policy } }

    pub fn policy(&self) -> QueryPolicy { self.policy }

    pub fn query(&self, params: &ListParams) -> EmployeeQuery {
        EmployeeQuery::from_params(params, self.policy.search, self.policy.limits)
    }

    #[instrument(skip(self, params))]
    pub async fn list(&self, params: &ListParams) -> Result<EmployeePage, ServiceError> {
        let query = self.query(params);
        let (items, total) = self.repo.list(&query).await?;
        tracing::debug!(total, returned = items.len(), sort = query.sort.as_str(), order = query.order.as_str(), "employee_list");
        Ok(EmployeePage { items, total, window: query.window })
    }

    pub async fn get(&self, id: i32) -> Result<employee::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("employee"))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: EmployeeInput) -> Result<employee::Model, ServiceError> {
        let data = input.validate()?;
        let created = self.repo.create(data).await?;
        info!(employee_id = created.id, "employee_created");
        Ok(created)
    }

    /// Full replace: the input must carry every required field.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: EmployeeInput) -> Result<employee::Model, ServiceError> {
        let data = input.validate()?;
        let updated = self
            .repo
            .replace(id, data)
            .await?
            .ok_or_else(|| ServiceError::not_found("employee"))?;
        info!(employee_id = id, "employee_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("employee"));
        }
        info!(employee_id = id, "employee_deleted");
        Ok(())
    }
}
