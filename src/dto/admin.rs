use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::Hashtag,
    routes::params::{Pagination, SortOrder},
    validation::{FieldErrors, required_text},
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CarSortBy {
    Year,
    Price,
    CreatedAt,
}

/// Back-office search across cars.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminCarQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Matched against brand, model, description, color and engine.
    pub q: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub year: Option<i32>,
    pub sort_by: Option<CarSortBy>,
    pub sort_order: Option<SortOrder>,
}

impl AdminCarQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHashtagRequest {
    pub name: String,
}

impl CreateHashtagRequest {
    /// Trimmed name without a leading `#`.
    pub fn validate(self) -> AppResult<String> {
        let mut errors = FieldErrors::new();
        let raw = self.name.trim();
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        let name = required_text(&mut errors, "name", raw, 50);
        if name.chars().any(char::is_whitespace) {
            errors.add("name", "Hashtags cannot contain whitespace.");
        }
        errors.finish(name)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct HashtagList {
    #[schema(value_type = Vec<Hashtag>)]
    pub items: Vec<Hashtag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashtag_name_strips_hash_prefix() {
        let name = CreateHashtagRequest {
            name: "  #supercar ".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(name, "supercar");
    }

    #[test]
    fn hashtag_name_rejects_blank_and_spaces() {
        assert!(CreateHashtagRequest { name: "#".into() }.validate().is_err());
        assert!(
            CreateHashtagRequest {
                name: "two words".into()
            }
            .validate()
            .is_err()
        );
    }
}
