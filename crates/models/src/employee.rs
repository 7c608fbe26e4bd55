use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Stored as a one-letter code, exposed as `male` / `female`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[sea_orm(string_value = "m")]
    Male,
    #[sea_orm(string_value = "f")]
    Female,
}

impl Gender {
    /// Accepts the English labels, the stored codes and the short Russian forms.
    pub fn parse(term: &str) -> Option<Self> {
        match term.trim().to_lowercase().as_str() {
            "male" | "m" | "м" | "муж" | "мужской" => Some(Self::Male),
            "female" | "f" | "ж" | "жен" | "женский" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    pub position: String,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub on_probation: bool,
    pub hire_date: Date,
    #[serde(skip)]
    pub full_name_folded: String,
    #[serde(skip)]
    pub position_folded: String,
    #[serde(skip)]
    pub phone_folded: String,
    #[serde(skip)]
    pub email_folded: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// `DeriveEntityModel` generates a fieldless `Column` enum without `PartialEq`;
// this is the equivalent of `#[derive(PartialEq, Eq)]` on it.
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Eq for Column {}

/// A complete employee record without its storage id.
#[derive(Clone, Debug, PartialEq)]
pub struct EmployeeData {
    pub full_name: String,
    pub position: String,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub on_probation: bool,
    pub hire_date: Date,
}

/// Case folding used for the `*_folded` search columns and for search terms.
/// Done here rather than in SQL because SQLite's LOWER() only folds ASCII.
pub fn fold(value: &str) -> String {
    value.to_lowercase()
}

pub fn validate_name(field: &'static str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::invalid(field, "required"));
    }
    Ok(())
}

/// Empty is allowed; anything else must at least look like an address.
pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.is_empty() && !email.contains('@') {
        return Err(ModelError::invalid("email", "invalid email"));
    }
    Ok(())
}

impl EmployeeData {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name("full_name", &self.full_name)?;
        validate_name("position", &self.position)?;
        validate_email(&self.email)
    }

    fn apply(self, am: &mut ActiveModel) {
        am.full_name_folded = Set(fold(&self.full_name));
        am.position_folded = Set(fold(&self.position));
        am.phone_folded = Set(fold(&self.phone));
        am.email_folded = Set(fold(&self.email));
        am.full_name = Set(self.full_name);
        am.position = Set(self.position);
        am.gender = Set(self.gender);
        am.phone = Set(self.phone);
        am.email = Set(self.email);
        am.on_probation = Set(self.on_probation);
        am.hire_date = Set(self.hire_date);
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, data: EmployeeData) -> Result<Model, ModelError> {
    data.validate()?;
    let mut am = ActiveModel::new();
    data.apply(&mut am);
    Ok(am.insert(db).await?)
}

/// Overwrite every column of an existing row; `None` when the id is unknown.
pub async fn replace<C: ConnectionTrait>(db: &C, id: i32, data: EmployeeData) -> Result<Option<Model>, ModelError> {
    data.validate()?;
    let Some(found) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    data.apply(&mut am);
    Ok(Some(am.update(db).await?))
}

/// Returns whether a row was removed.
pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
