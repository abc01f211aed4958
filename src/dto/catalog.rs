use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    dto::forms::FormSchema,
    error::{AppError, AppResult},
    models::{Car, Comment, Hashtag, User},
    validation::{FieldErrors, required_text},
};

pub const CATALOG_PAGE_SIZE: u64 = 12;
const MAX_COMMENT: usize = 2000;

/// `page` stays a string so that non-numeric input can be reported as a missing page.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against brand and category.
    pub q: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
}

impl CatalogQuery {
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Parse a requested page number. Anything that is not a positive integer is `NotFound`.
pub fn parse_page(raw: Option<&str>) -> AppResult<u64> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(1),
        Some(raw) => raw,
    };
    match raw.parse::<i64>() {
        Ok(page) if page >= 1 => Ok(page as u64),
        _ => Err(AppError::NotFound),
    }
}

/// Number of pages for `total` items. An empty catalog still has one (empty) page.
pub fn page_count(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page).max(1)
}

/// Escape LIKE wildcards so user input is matched literally.
pub fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for ch in search.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CatalogPage {
    #[schema(value_type = Vec<Car>)]
    pub items: Vec<Car>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CarDetail {
    pub car: Car,
    pub owner: Option<User>,
    pub comments: Vec<Comment>,
    pub available_hashtags: Vec<Hashtag>,
    pub comment_form: FormSchema,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub text: Option<String>,
    /// Ids of existing hashtags.
    #[serde(default)]
    pub hashtags: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub text: String,
    pub hashtag_ids: Vec<Uuid>,
}

impl CommentRequest {
    pub fn validate(self) -> AppResult<NewComment> {
        let mut errors = FieldErrors::new();
        let text = required_text(
            &mut errors,
            "text",
            self.text.as_deref().unwrap_or_default(),
            MAX_COMMENT,
        );
        let mut hashtag_ids: Vec<Uuid> = Vec::with_capacity(self.hashtags.len());
        for id in self.hashtags {
            if !hashtag_ids.contains(&id) {
                hashtag_ids.push(id);
            }
        }
        errors.finish(NewComment { text, hashtag_ids })
    }
}
