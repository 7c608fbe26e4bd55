//! Search / sort / pagination for the employee listing.
//!
//! Every request parameter is mapped onto a closed set of values before it
//! gets near the store: unknown sort fields become `full_name`, unknown orders
//! become `asc`, unknown search fields are treated as "no field", and terms
//! that do not fit a boolean or gender column leave the listing unfiltered.

use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, Order};
use serde::{Deserialize, Serialize};

use models::employee::{fold, Column, Gender};

pub use configs::SearchPolicy;

use super::domain::parse_flag;
use crate::pagination::{Limits, Window};

const LIKE_ESCAPE: char = '!';

/// Raw listing parameters, straight from the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub field: Option<String>,
    pub sort: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    FullName,
    Position,
    Phone,
    Email,
    Gender,
    OnProbation,
}

impl SearchField {
    /// Columns searched when no field is named.
    pub const TEXT: [SearchField; 4] = [Self::FullName, Self::Position, Self::Phone, Self::Email];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "full_name" | "fio" => Some(Self::FullName),
            "position" => Some(Self::Position),
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            "gender" => Some(Self::Gender),
            "on_probation" | "probation" => Some(Self::OnProbation),
            _ => None,
        }
    }

    /// The lower-cased shadow column searched for this field.
    fn folded_column(self) -> Option<Column> {
        match self {
            Self::FullName => Some(Column::FullNameFolded),
            Self::Position => Some(Column::PositionFolded),
            Self::Phone => Some(Column::PhoneFolded),
            Self::Email => Some(Column::EmailFolded),
            Self::Gender | Self::OnProbation => None,
        }
    }
}

/// Allow-listed sort columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Id,
    #[default]
    FullName,
    Position,
    Gender,
    Phone,
    Email,
    OnProbation,
    HireDate,
}

impl SortField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "id" => Some(Self::Id),
            "full_name" | "fio" => Some(Self::FullName),
            "position" => Some(Self::Position),
            "gender" => Some(Self::Gender),
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            "on_probation" | "probation" => Some(Self::OnProbation),
            "hire_date" => Some(Self::HireDate),
            _ => None,
        }
    }

    /// Anything outside the allow-list sorts by `full_name`.
    pub fn from_param(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    pub fn column(self) -> Column {
        match self {
            Self::Id => Column::Id,
            Self::FullName => Column::FullName,
            Self::Position => Column::Position,
            Self::Gender => Column::Gender,
            Self::Phone => Column::Phone,
            Self::Email => Column::Email,
            Self::OnProbation => Column::OnProbation,
            Self::HireDate => Column::HireDate,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FullName => "full_name",
            Self::Position => "position",
            Self::Gender => "gender",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::OnProbation => "on_probation",
            Self::HireDate => "hire_date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(|r| r.trim().to_ascii_lowercase()) {
            Some(r) if r == "desc" => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl From<SortOrder> for Order {
    fn from(o: SortOrder) -> Self {
        match o {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Resolved search filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    /// Case-insensitive containment, OR-ed across the listed columns.
    Contains { fields: Vec<SearchField>, term: String },
    Probation(bool),
    Gender(Gender),
}

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if c == LIKE_ESCAPE || c == '%' || c == '_' {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

fn like_pattern(term: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(term))).escape(LIKE_ESCAPE)
}

/// Both sides are folded in Rust, so matching does not depend on the
/// backend's notion of case.
fn contains(folded_column: Column, term: &str) -> SimpleExpr {
    Expr::col(folded_column).like(like_pattern(&fold(term)))
}

impl Filter {
    /// Resolve `search` / `field` under the configured policy.
    pub fn resolve(search: Option<&str>, field: Option<&str>, policy: SearchPolicy) -> Self {
        let term = match search.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return Self::All,
        };
        let field = match (field.and_then(SearchField::parse), policy) {
            (Some(f), _) => Some(f),
            (None, SearchPolicy::FieldOrAny) => None,
            (None, SearchPolicy::FieldOnly) => Some(SearchField::FullName),
        };
        match field {
            None => Self::Contains { fields: SearchField::TEXT.to_vec(), term: term.to_string() },
            Some(SearchField::OnProbation) => parse_flag(term).map(Self::Probation).unwrap_or(Self::All),
            Some(SearchField::Gender) => Gender::parse(term).map(Self::Gender).unwrap_or(Self::All),
            Some(f) => Self::Contains { fields: vec![f], term: term.to_string() },
        }
    }

    pub fn condition(&self) -> Option<Condition> {
        match self {
            Self::All => None,
            Self::Contains { fields, term } => {
                let cond = fields
                    .iter()
                    .filter_map(|f| f.folded_column())
                    .fold(Condition::any(), |cond, col| cond.add(contains(col, term)));
                Some(cond)
            }
            Self::Probation(flag) => Some(Condition::all().add(ColumnTrait::eq(&Column::OnProbation, *flag))),
            Self::Gender(g) => Some(Condition::all().add(ColumnTrait::eq(&Column::Gender, *g))),
        }
    }
}

/// Fully normalized listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeQuery {
    pub filter: Filter,
    pub sort: SortField,
    pub order: SortOrder,
    pub window: Window,
}

impl EmployeeQuery {
    /// Normalize raw parameters. Never fails; bad input becomes defaults.
    ///
    /// `page` is only consulted when neither `offset` nor `limit` is given.
    ///
    /// # Examples
    /// ```
    /// use service::directory::query::{EmployeeQuery, ListParams, SearchPolicy, SortField, SortOrder};
    /// use service::pagination::Limits;
    ///
    /// let params = ListParams {
    ///     sort: Some("salary; DROP TABLE employee".into()),
    ///     order: Some("sideways".into()),
    ///     limit: Some("5000".into()),
    ///     ..Default::default()
    /// };
    /// let q = EmployeeQuery::from_params(&params, SearchPolicy::FieldOrAny, Limits::default());
    /// assert_eq!(q.sort, SortField::FullName);
    /// assert_eq!(q.order, SortOrder::Asc);
    /// assert_eq!(q.window.limit, 100);
    /// ```
    pub fn from_params(params: &ListParams, policy: SearchPolicy, limits: Limits) -> Self {
        let sort = params.sort.as_deref().or(params.sort_by.as_deref());
        let window = if params.offset.is_none() && params.limit.is_none() && params.page.is_some() {
            Window::from_page(params.page.as_deref(), limits)
        } else {
            Window::from_raw(params.offset.as_deref(), params.limit.as_deref(), limits)
        };
        Self {
            filter: Filter::resolve(params.search.as_deref(), params.field.as_deref(), policy),
            sort: SortField::from_param(sort),
            order: SortOrder::from_param(params.order.as_deref()),
            window,
        }
    }
}
