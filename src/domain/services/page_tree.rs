use std::collections::HashMap;
use std::sync::Arc;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidateEmail;
use crate::domain::models::page::{Page, PageKind};
use crate::domain::ports::{HotelRepository, PageRepository};
use crate::error::{AppError, ValidationErrors};

lazy_static! {
    static ref SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Splits `/a/b/` into `["a", "b"]`.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Slug path from the root down to `page_id`, e.g. `home/grand-hotel`.
pub fn path_of(pages: &HashMap<String, Page>, page_id: &str) -> Option<String> {
    let mut slugs = Vec::new();
    let mut current = pages.get(page_id)?;
    loop {
        slugs.push(current.slug.as_str());
        match current.parent_id.as_deref() {
            Some(parent) => {
                current = pages.get(parent)?;
                if slugs.len() > pages.len() {
                    return None;
                }
            }
            None => break,
        }
    }
    slugs.reverse();
    Some(slugs.join("/"))
}

/// True when `candidate` is `page_id` itself or one of its descendants.
pub fn is_self_or_descendant(pages: &HashMap<String, Page>, page_id: &str, candidate: &str) -> bool {
    let mut cursor = Some(candidate);
    let mut steps = 0;
    while let Some(id) = cursor {
        if id == page_id {
            return true;
        }
        steps += 1;
        if steps > pages.len() {
            return false;
        }
        cursor = pages.get(id).and_then(|p| p.parent_id.as_deref());
    }
    false
}

pub struct PageTreeService {
    page_repo: Arc<dyn PageRepository>,
    hotel_repo: Arc<dyn HotelRepository>,
}

impl PageTreeService {
    pub fn new(page_repo: Arc<dyn PageRepository>, hotel_repo: Arc<dyn HotelRepository>) -> Self {
        Self { page_repo, hotel_repo }
    }

    pub async fn resolve(&self, path: &str) -> Result<Page, AppError> {
        let slugs = split_path(path);
        if slugs.is_empty() {
            return Err(AppError::NotFound("Page not found".into()));
        }

        let mut parent: Option<String> = None;
        let mut found = None;
        for slug in slugs {
            let page = self.page_repo.find_child_by_slug(parent.as_deref(), slug).await?
                .ok_or_else(|| AppError::NotFound("Page not found".into()))?;
            parent = Some(page.id.clone());
            found = Some(page);
        }
        found.ok_or_else(|| AppError::NotFound("Page not found".into()))
    }

    pub async fn path(&self, page_id: &str) -> Result<String, AppError> {
        let pages = self.index().await?;
        path_of(&pages, page_id).ok_or_else(|| AppError::NotFound("Page not found".into()))
    }

    /// Checks slug, kind-specific fields and tree placement before a page is saved.
    pub async fn validate(&self, page: &Page) -> Result<(), AppError> {
        let mut errors = ValidationErrors::new();

        if !is_valid_slug(&page.slug) {
            errors.add("slug", "Use lowercase letters, digits and single hyphens.");
        }
        if page.title.trim().is_empty() {
            errors.add("title", "Title is required.");
        }
        if page.phone.chars().count() > 20 {
            errors.add("phone", "Phone number is limited to 20 characters.");
        }
        if !page.email.is_empty() && !page.email.validate_email() {
            errors.add("email", "Enter a valid email address.");
        }

        match (page.kind, page.hotel_id.as_deref()) {
            (PageKind::Hotel, None) => errors.add("hotel_id", "Hotel pages must reference a hotel."),
            (PageKind::Hotel, Some(hotel_id)) => {
                if self.hotel_repo.find_by_id(hotel_id).await?.is_none() {
                    errors.add("hotel_id", "Hotel does not exist.");
                }
            }
            (_, Some(_)) => errors.add("hotel_id", "Only hotel pages can reference a hotel."),
            (_, None) => {}
        }

        if let Some(parent_id) = page.parent_id.as_deref() {
            let pages = self.index().await?;
            if !pages.contains_key(parent_id) {
                errors.add("parent_id", "Parent page does not exist.");
            } else if is_self_or_descendant(&pages, &page.id, parent_id) {
                errors.add("parent_id", "A page cannot be moved under itself or its descendants.");
            }
        }

        if errors.is_empty()
            && let Some(sibling) = self.page_repo.find_child_by_slug(page.parent_id.as_deref(), &page.slug).await?
            && sibling.id != page.id
        {
            return Err(AppError::Conflict(format!("A sibling page already uses slug '{}'", page.slug)));
        }

        errors.into_result()
    }

    async fn index(&self) -> Result<HashMap<String, Page>, AppError> {
        Ok(self.page_repo.list_all().await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::page::NewPageParams;
    use chrono::Utc;

    fn page(id: &str, parent: Option<&str>, slug: &str) -> Page {
        let mut p = Page::new(NewPageParams {
            parent_id: parent.map(String::from),
            slug: slug.into(),
            title: slug.into(),
            kind: PageKind::Contact,
            hotel_id: None,
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            body: vec![],
            sort_order: 0,
        }, Utc::now());
        p.id = id.into();
        p
    }

    fn tree() -> HashMap<String, Page> {
        [
            page("root", None, "home"),
            page("a", Some("root"), "contacts"),
            page("b", Some("a"), "office"),
        ]
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect()
    }

    #[test]
    fn test_slug_rules() {
        assert!(is_valid_slug("grand-hotel-moscow"));
        assert!(is_valid_slug("home"));
        assert!(!is_valid_slug("Home"));
        assert!(!is_valid_slug("two--hyphens"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/home/contacts/"), vec!["home", "contacts"]);
        assert!(split_path("/").is_empty());
    }

    #[test]
    fn test_path_of_joins_slugs_from_root() {
        let pages = tree();
        assert_eq!(path_of(&pages, "root").as_deref(), Some("home"));
        assert_eq!(path_of(&pages, "b").as_deref(), Some("home/contacts/office"));
        assert_eq!(path_of(&pages, "missing"), None);
    }

    #[test]
    fn test_cycle_detection() {
        let pages = tree();
        assert!(is_self_or_descendant(&pages, "a", "a"));
        assert!(is_self_or_descendant(&pages, "a", "b"));
        assert!(!is_self_or_descendant(&pages, "b", "root"));
        assert!(!is_self_or_descendant(&pages, "a", "root"));
    }
}
