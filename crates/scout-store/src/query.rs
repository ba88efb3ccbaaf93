//! Table query builder
//!
//! Builds the query string of a REST request: `select`, column filters
//! (`col=op.value`), `order` and `limit`. Values are sent as query
//! parameters, so reqwest takes care of URL encoding.

use std::fmt::Display;

use scout_core::access::QueryFilter;

/// A read, update or delete against one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    table: &'static str,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<usize>,
}

impl TableQuery {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            select: None,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    #[inline]
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Columns to return (defaults to `*`)
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("eq.{value}"))
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("gte.{value}"))
    }

    pub fn lte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("lte.{value}"))
    }

    /// `column` is one of `values`
    pub fn in_list<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let list = join_quoted(values);
        self.filter(column, format!("in.({list})"))
    }

    /// Array `column` contains every one of `values`
    pub fn contains<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let list = join_quoted(values);
        self.filter(column, format!("cs.{{{list}}}"))
    }

    /// Append a sort key; earlier keys take precedence
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order.push(format!("{column}.{direction}"));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Apply an access filter to the table's unit key column
    ///
    /// Returns `None` for [`QueryFilter::MatchNone`]: the caller must not
    /// send the request at all.
    pub fn scoped(self, unit_column: &str, filter: &QueryFilter) -> Option<Self> {
        match filter {
            QueryFilter::NoFilter => Some(self),
            QueryFilter::UnitIn(ids) => Some(self.in_list(unit_column, ids.iter())),
            QueryFilter::UnitEq(id) => Some(self.eq(unit_column, id)),
            QueryFilter::MatchNone => None,
        }
    }

    #[inline]
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Query string parameters in request order
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 3);
        params.push((
            "select".to_string(),
            self.select.clone().unwrap_or_else(|| "*".to_string()),
        ));
        params.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            params.push(("order".to_string(), self.order.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    fn filter(mut self, column: &str, expression: String) -> Self {
        self.filters.push((column.to_string(), expression));
        self
    }
}

// Reserved characters inside list filters force double quoting
fn join_quoted<I, V>(values: I) -> String
where
    I: IntoIterator<Item = V>,
    V: Display,
{
    values
        .into_iter()
        .map(|v| {
            let raw = v.to_string();
            if raw.contains([',', '(', ')', '{', '}', '"', ' ']) {
                format!("\"{}\"", raw.replace('\\', "\\\\").replace('"', "\\\""))
            } else {
                raw
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
