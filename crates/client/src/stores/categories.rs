//! Category catalog slice: browse, search, and the instructor/admin
//! CRUD surface.

use dioxus::prelude::*;
use learnhub_shared::{CategoryDto, CreateCategoryRequest, UpdateCategoryRequest};

use crate::auth_session::AuthContext;
use crate::stores::slice::Slice;
use crate::stores::toasts;

/// UI-shaped category record.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    /// Display name: the localized name when the server sends one.
    pub name: String,
    pub slug: String,
    pub description: String,
    pub course_count: u32,
}

pub static CATEGORIES: GlobalSignal<Slice<Vec<Category>>> = Signal::global(Slice::new);

/// Normalize one raw category: pick the display name, fill absent
/// optional fields, derive a slug when the server omits one.
fn normalize_category(raw: CategoryDto) -> Category {
    let name = raw
        .localized_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(raw.name);
    let slug = raw
        .slug
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| derive_slug(&name));
    Category {
        id: raw.id,
        slug,
        description: raw.description.unwrap_or_default(),
        course_count: raw.course_count,
        name,
    }
}

/// Normalize a fetched page: all-or-nothing mapping, sorted by display
/// name ascending (case-insensitive).
pub fn normalize_categories(raw: Vec<CategoryDto>) -> Vec<Category> {
    let mut categories: Vec<Category> = raw.into_iter().map(normalize_category).collect();
    categories.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    categories
}

fn derive_slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn categories_path(search: Option<&str>) -> String {
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(query) => format!("/categories?search={}", urlencoding::encode(query)),
        None => "/categories".to_string(),
    }
}

/// Fetch the category list, optionally filtered by a search query.
/// Superseded searches (older keystrokes) settle into the void.
pub fn fetch_categories(auth: &AuthContext, search: Option<&str>) {
    let ticket = CATEGORIES.write().begin();
    let client = auth.client();
    let path = categories_path(search);

    spawn(async move {
        match client.get_json::<Vec<CategoryDto>>(&path).await {
            Ok(raw) => {
                CATEGORIES.write().fulfill(ticket, normalize_categories(raw));
            }
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                CATEGORIES.write().reject(ticket, message);
            }
        }
    });
}

/// Create a category, then refresh the list.
pub fn create_category(auth: &AuthContext, request: CreateCategoryRequest) {
    let client = auth.client();
    let auth = *auth;

    spawn(async move {
        match client
            .post_json::<_, CategoryDto>("/categories", &request)
            .await
        {
            Ok(created) => {
                toasts::success(format!("Category \"{}\" created", created.name));
                fetch_categories(&auth, None);
            }
            Err(err) => toasts::error(err.user_message()),
        }
    });
}

/// Rename/edit a category, then refresh the list.
pub fn update_category(auth: &AuthContext, id: String, request: UpdateCategoryRequest) {
    let client = auth.client();
    let auth = *auth;

    spawn(async move {
        match client
            .put_json::<_, CategoryDto>(&format!("/categories/{id}"), &request)
            .await
        {
            Ok(_) => {
                toasts::success("Category updated");
                fetch_categories(&auth, None);
            }
            Err(err) => toasts::error(err.user_message()),
        }
    });
}

/// Delete a category, then refresh the list.
pub fn delete_category(auth: &AuthContext, id: String) {
    let client = auth.client();
    let auth = *auth;

    spawn(async move {
        match client.delete(&format!("/categories/{id}")).await {
            Ok(()) => {
                toasts::success("Category deleted");
                fetch_categories(&auth, None);
            }
            Err(err) => toasts::error(err.user_message()),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn raw(name: &str, localized: Option<&str>) -> CategoryDto {
        CategoryDto {
            id: format!("cat-{name}"),
            name: name.to_string(),
            localized_name: localized.map(str::to_string),
            slug: None,
            description: None,
            course_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn normalization_sorts_by_display_name_ascending() {
        let normalized = normalize_categories(vec![
            raw("Programming", None),
            raw("Art", None),
            raw("music", None),
        ]);
        let names: Vec<&str> = normalized.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Art", "music", "Programming"]);
    }

    #[test]
    fn localized_name_wins_and_feeds_the_sort() {
        let normalized = normalize_categories(vec![
            raw("Zoology", Some("Animal Science")),
            raw("Business", None),
        ]);
        let names: Vec<&str> = normalized.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Animal Science", "Business"]);
    }

    #[test]
    fn missing_optional_fields_get_defaults() {
        let normalized = normalize_categories(vec![raw("Data Science", None)]);
        assert_eq!(normalized[0].slug, "data-science");
        assert_eq!(normalized[0].description, "");
    }

    #[test]
    fn search_path_is_urlencoded() {
        assert_eq!(categories_path(None), "/categories");
        assert_eq!(categories_path(Some("  ")), "/categories");
        assert_eq!(
            categories_path(Some("machine learning")),
            "/categories?search=machine%20learning"
        );
    }
}
