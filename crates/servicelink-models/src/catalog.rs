//! Catalog asset paths and search filters.
//!
//! Listing payloads are handled as plain JSON so that every field the
//! backend sends, including nulls, survives the asset path rewrite.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resolve asset paths in a `categories-with-services` payload, in place.
///
/// `resolve` receives the stored path, or `None` for a null entry. Touches
/// each category `imageUrl` and each embedded provider `profilePicture` when
/// they are non-empty strings, and every entry of each service `imageUrls`
/// that is a string or null. Anything else is left as it is; a payload that
/// is not an array is left alone entirely.
pub fn rewrite_category_assets(categories: &mut Value, resolve: &impl Fn(Option<&str>) -> String) {
    let Some(categories) = categories.as_array_mut() else {
        return;
    };

    for category in categories {
        rewrite_if_set(category.get_mut("imageUrl"), resolve);

        let Some(services) = category.get_mut("services").and_then(Value::as_array_mut) else {
            continue;
        };

        for service in services {
            if let Some(urls) = service.get_mut("imageUrls").and_then(Value::as_array_mut) {
                for url in urls.iter_mut() {
                    let resolved = match &*url {
                        Value::String(path) => resolve(Some(path.as_str())),
                        Value::Null => resolve(None),
                        _ => continue,
                    };
                    *url = Value::String(resolved);
                }
            }

            let picture = service
                .get_mut("provider")
                .and_then(|p| p.get_mut("profilePicture"));
            rewrite_if_set(picture, resolve);
        }
    }
}

fn rewrite_if_set(slot: Option<&mut Value>, resolve: &impl Fn(Option<&str>) -> String) {
    if let Some(Value::String(path)) = slot {
        if !path.is_empty() {
            *path = resolve(Some(path.as_str()));
        }
    }
}

/// Filters for the public service listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFilters {
    pub category_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search_term: Option<String>,
    #[serde(default)]
    pub skill_ids: Vec<String>,
}

/// Query for the public provider search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderQuery {
    pub search_term: Option<String>,
    pub category_id: Option<String>,
    #[serde(default)]
    pub skill_ids: Vec<String>,
}

/// Page selection for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }
}
