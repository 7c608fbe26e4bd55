use async_trait::async_trait;
use sea_orm::{
    DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use models::employee::{self, Column, EmployeeData, Entity};

use super::query::EmployeeQuery;
use crate::errors::ServiceError;

/// Persistence seam for the employee directory.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// One page of matches plus the total number of matches before windowing.
    async fn list(&self, query: &EmployeeQuery) -> Result<(Vec<employee::Model>, u64), ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<employee::Model>, ServiceError>;
    async fn create(&self, data: EmployeeData) -> Result<employee::Model, ServiceError>;
    async fn replace(&self, id: i32, data: EmployeeData) -> Result<Option<employee::Model>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmEmployeeRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn list(&self, query: &EmployeeQuery) -> Result<(Vec<employee::Model>, u64), ServiceError> {
        let mut select = Entity::find();
        if let Some(cond) = query.filter.condition() {
            select = select.filter(cond);
        }
        let total = select.clone().count(&self.db).await?;
        let rows = select
            .order_by(query.sort.column(), Order::from(query.order))
            .order_by(Column::Id, Order::Asc)
            .offset(query.window.offset)
            .limit(query.window.limit)
            .all(&self.db)
            .await?;
        Ok((rows, total))
    }

    async fn get(&self, id: i32) -> Result<Option<employee::Model>, ServiceError> {
        Ok(Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, data: EmployeeData) -> Result<employee::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let created = employee::create(&txn, data).await?;
        txn.commit().await?;
        Ok(created)
    }

    async fn replace(&self, id: i32, data: EmployeeData) -> Result<Option<employee::Model>, ServiceError> {
        let txn = self.db.begin().await?;
        let updated = employee::replace(&txn, id, data).await?;
        txn.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        let removed = employee::hard_delete(&txn, id).await?;
        txn.commit().await?;
        Ok(removed)
    }
}

/// In-memory repository for unit tests and doc examples.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use crate::directory::query::{Filter, SearchField, SortField, SortOrder};

    #[derive(Default)]
    pub struct MockEmployeeRepository {
        rows: Mutex<Vec<employee::Model>>,
        next_id: Mutex<i32>,
    }

    fn folded_text(m: &employee::Model, f: SearchField) -> Option<&str> {
        match f {
            SearchField::FullName => Some(&m.full_name_folded),
            SearchField::Position => Some(&m.position_folded),
            SearchField::Phone => Some(&m.phone_folded),
            SearchField::Email => Some(&m.email_folded),
            SearchField::Gender | SearchField::OnProbation => None,
        }
    }

    fn matches(filter: &Filter, m: &employee::Model) -> bool {
        match filter {
            Filter::All => true,
            Filter::Contains { fields, term } => {
                let needle = employee::fold(term);
                fields.iter().filter_map(|f| folded_text(m, *f)).any(|v| v.contains(&needle))
            }
            Filter::Probation(flag) => m.on_probation == *flag,
            Filter::Gender(g) => m.gender == *g,
        }
    }

    fn compare(sort: SortField, a: &employee::Model, b: &employee::Model) -> std::cmp::Ordering {
        match sort {
            SortField::Id => a.id.cmp(&b.id),
            SortField::FullName => a.full_name.cmp(&b.full_name),
            SortField::Position => a.position.cmp(&b.position),
            SortField::Gender => a.gender.label().cmp(b.gender.label()),
            SortField::Phone => a.phone.cmp(&b.phone),
            SortField::Email => a.email.cmp(&b.email),
            SortField::OnProbation => a.on_probation.cmp(&b.on_probation),
            SortField::HireDate => a.hire_date.cmp(&b.hire_date),
        }
    }

    fn to_model(id: i32, data: EmployeeData) -> employee::Model {
        employee::Model {
            id,
            full_name_folded: employee::fold(&data.full_name),
            position_folded: employee::fold(&data.position),
            phone_folded: employee::fold(&data.phone),
            email_folded: employee::fold(&data.email),
            full_name: data.full_name,
            position: data.position,
            gender: data.gender,
            phone: data.phone,
            email: data.email,
            on_probation: data.on_probation,
            hire_date: data.hire_date,
        }
    }

    #[async_trait]
    impl EmployeeRepository for MockEmployeeRepository {
        async fn list(&self, query: &EmployeeQuery) -> Result<(Vec<employee::Model>, u64), ServiceError> {
            let rows = self.rows.lock().unwrap();
            let mut hits: Vec<_> = rows.iter().filter(|m| matches(&query.filter, m)).cloned().collect();
            hits.sort_by(|a, b| {
                let primary = compare(query.sort, a, b);
                let primary = if query.order == SortOrder::Desc { primary.reverse() } else { primary };
                primary.then(a.id.cmp(&b.id))
            });
            let total = hits.len() as u64;
            let page = hits
                .into_iter()
                .skip(query.window.offset as usize)
                .take(query.window.limit as usize)
                .collect();
            Ok((page, total))
        }

        async fn get(&self, id: i32) -> Result<Option<employee::Model>, ServiceError> {
            Ok(self.rows.lock().unwrap().iter().find(|m| m.id == id).cloned())
        }

        async fn create(&self, data: EmployeeData) -> Result<employee::Model, ServiceError> {
            data.validate()?;
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let model = to_model(*next, data);
            self.rows.lock().unwrap().push(model.clone());
            Ok(model)
        }

        async fn replace(&self, id: i32, data: EmployeeData) -> Result<Option<employee::Model>, ServiceError> {
            data.validate()?;
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|m| m.id == id) {
                Some(slot) => {
                    *slot = to_model(id, data);
                    Ok(Some(slot.clone()))
                }
                None => Ok(None),
            }
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|m| m.id != id);
            Ok(rows.len() != before)
        }
    }
}
