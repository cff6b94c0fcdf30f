//! Query Builder
//!
//! Turns the raw list parameters (`search`, `sorton`, `sortdir`) into a
//! store-agnostic [`EmployeeFilter`] + [`SortSpec`]. [`to_surql`] renders
//! them for SurrealDB; [`EmployeeFilter::matches`] evaluates in memory.

use serde::Deserialize;

use crate::db::models::Employee;
use crate::db::repository::{RepoError, RepoResult};

/// Fields a free-text search looks at
pub const SEARCH_FIELDS: [&str; 7] = [
    "customId",
    "firstName",
    "lastName",
    "email",
    "city",
    "state",
    "country",
];

pub const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Raw list query string: `?search=&sorton=&sortdir=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub sorton: Option<String>,
    pub sortdir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeFilter {
    All,
    /// Case-insensitive substring match against any of `fields`.
    /// `term` is already lowercased.
    AnyFieldContains {
        term: String,
        fields: &'static [&'static str],
    },
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            EmployeeFilter::All => true,
            EmployeeFilter::AnyFieldContains { term, fields } => fields.iter().any(|field| {
                employee
                    .text_field(field)
                    .is_some_and(|value| value.to_lowercase().contains(term.as_str()))
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Exactly `"asc"` sorts ascending; anything else, including absent, descends
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Build filter and ordering from raw list parameters
pub fn build_query(
    search: Option<&str>,
    sort_field: Option<&str>,
    sort_direction: Option<&str>,
) -> (EmployeeFilter, SortSpec) {
    let filter = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => EmployeeFilter::AnyFieldContains {
            term: term.to_lowercase(),
            fields: &SEARCH_FIELDS,
        },
        None => EmployeeFilter::All,
    };

    let field = sort_field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SORT_FIELD)
        .to_string();

    let sort = SortSpec {
        field,
        direction: SortDirection::parse(sort_direction),
    };

    (filter, sort)
}

impl ListParams {
    pub fn build(&self) -> (EmployeeFilter, SortSpec) {
        build_query(
            self.search.as_deref(),
            self.sorton.as_deref(),
            self.sortdir.as_deref(),
        )
    }
}

/// SurrealQL statement plus the `$search` binding it expects (if any)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub sql: String,
    pub search: Option<String>,
}

/// Render a filter and sort over `table`
///
/// Sort fields are free-form but must look like a field path
/// (`createdAt`, `address.city`); anything else is rejected rather than
/// spliced into the statement.
pub fn to_surql(table: &str, filter: &EmployeeFilter, sort: &SortSpec) -> RepoResult<CompiledQuery> {
    let order_by = quote_field_path(&sort.field).ok_or_else(|| {
        RepoError::Validation(format!("Invalid sort field '{}'", sort.field))
    })?;

    let (where_clause, search) = match filter {
        EmployeeFilter::All => (String::new(), None),
        EmployeeFilter::AnyFieldContains { term, fields } => {
            let mut conditions = Vec::with_capacity(fields.len());
            for field in fields.iter() {
                let path = quote_field_path(field).ok_or_else(|| {
                    RepoError::Validation(format!("Invalid search field '{}'", field))
                })?;
                conditions.push(format!(
                    "string::contains(string::lowercase({path} ?? ''), $search)"
                ));
            }
            (format!(" WHERE {}", conditions.join(" OR ")), Some(term.clone()))
        }
    };

    Ok(CompiledQuery {
        sql: format!(
            "SELECT * FROM {table}{where_clause} ORDER BY {order_by} {}",
            sort.direction.keyword()
        ),
        search,
    })
}

/// `address.city` -> `` `address`.`city` ``, or `None` if not a plain field path
fn quote_field_path(path: &str) -> Option<String> {
    let mut parts = Vec::new();
    for segment in path.split('.') {
        let mut chars = segment.chars();
        let head_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !head_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }
        parts.push(format!("`{segment}`"));
    }
    Some(parts.join("."))
}
