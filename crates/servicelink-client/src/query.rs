//! Query string construction.
//!
//! Parameters are only appended for present, truthy values: empty strings
//! and zero numbers are skipped the same way an absent value is.

use servicelink_models::{Pagination, ProviderQuery, ServiceFilters};
use url::Url;

/// A value that can appear in a query string.
pub trait QueryValue {
    /// Whether the value should be sent at all.
    fn is_truthy(&self) -> bool;

    fn to_query_string(&self) -> String;
}

impl QueryValue for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }

    fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }

    fn to_query_string(&self) -> String {
        self.clone()
    }
}

impl QueryValue for u32 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }

    fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for u64 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }

    fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }

    fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }

    fn to_query_string(&self) -> String {
        (**self).to_query_string()
    }
}

/// Ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value` when `value` is present and truthy.
    pub fn push<V: QueryValue>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value.filter(|v| v.is_truthy()) {
            self.pairs.push((key.to_string(), value.to_query_string()));
        }
        self
    }

    /// Append `key=value` unconditionally.
    pub fn push_always<V: QueryValue>(&mut self, key: &str, value: V) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_query_string()));
        self
    }

    /// Append one `key=item` pair per element, in order.
    pub fn push_each<I>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: QueryValue,
    {
        for value in values {
            self.pairs.push((key.to_string(), value.to_query_string()));
        }
        self
    }

    pub fn pagination(&mut self, pagination: &Pagination) -> &mut Self {
        self.push("page", pagination.page).push("limit", pagination.limit)
    }

    /// Query for the public service listing.
    pub fn for_services(filters: &ServiceFilters, pagination: &Pagination) -> Self {
        let mut query = Self::new();
        query
            .push("categoryId", filters.category_id.as_deref())
            .push("minPrice", filters.min_price)
            .push("maxPrice", filters.max_price)
            .push("searchTerm", filters.search_term.as_deref())
            .push_each("skillIds", &filters.skill_ids)
            .pagination(pagination);
        query
    }

    /// Query for the public provider search.
    pub fn for_provider_search(query: &ProviderQuery, pagination: &Pagination) -> Self {
        let mut params = Self::new();
        params
            .push("searchTerm", query.search_term.as_deref())
            .push("categoryId", query.category_id.as_deref())
            .push_each("skillIds", &query.skill_ids)
            .pagination(pagination);
        params
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// All values recorded for `key`, in order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Append the parameters to `url`, form-encoded.
    pub fn apply_to(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            return;
        }
        let mut serializer = url.query_pairs_mut();
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
    }
}
