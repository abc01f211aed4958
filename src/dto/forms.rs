//! Descriptions of the input forms, served on the GET side of form routes so clients can
//! render them.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    choices::{Brand, Category, Color, Condition, Drivetrain, FuelType, Transmission},
    models::Hashtag,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Textarea,
    Password,
    Email,
    Integer,
    Float,
    Choice,
    MultiChoice,
    MediaPath,
    MediaPathList,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl FormField {
    fn new(name: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required,
            choices: None,
        }
    }

    fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = Some(choices);
        self
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormSchema {
    pub name: String,
    pub fields: Vec<FormField>,
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub fn car_form() -> FormSchema {
    use FieldKind::*;
    FormSchema {
        name: "car".into(),
        fields: vec![
            FormField::new("brand", Choice, true).with_choices(Brand::labels()),
            FormField::new("model", Text, true),
            FormField::new("description", Textarea, false),
            FormField::new("price", Integer, true),
            FormField::new("category", Choice, false).with_choices(Category::labels()),
            FormField::new("condition", Choice, false).with_choices(Condition::labels()),
            FormField::new("year", Integer, true),
            FormField::new("mileage", Integer, false),
            FormField::new("color", Choice, false).with_choices(Color::labels()),
            FormField::new("available_colors", MultiChoice, false).with_choices(Color::labels()),
            FormField::new("engine", Text, false),
            FormField::new("fuel_type", Choice, false).with_choices(FuelType::labels()),
            FormField::new("drivetrain", Choice, false).with_choices(Drivetrain::labels()),
            FormField::new("horsepower", Integer, false),
            FormField::new("torque", Integer, false),
            FormField::new("transmission", Choice, false).with_choices(Transmission::labels()),
            FormField::new("top_speed", Integer, false),
            FormField::new("acceleration", Float, false),
            FormField::new("document", MediaPath, false),
            FormField::new("images", MediaPathList, false),
        ],
    }
}

pub fn comment_form(hashtags: &[Hashtag]) -> FormSchema {
    let names = hashtags.iter().map(|h| h.name.clone()).collect();
    FormSchema {
        name: "comment".into(),
        fields: vec![
            FormField::new("text", FieldKind::Textarea, true),
            FormField::new("hashtags", FieldKind::MultiChoice, false).with_choices(names),
        ],
    }
}

pub fn login_form() -> FormSchema {
    FormSchema {
        name: "login".into(),
        fields: vec![
            FormField::new("username", FieldKind::Text, true),
            FormField::new("password", FieldKind::Password, true),
        ],
    }
}

pub fn register_form() -> FormSchema {
    FormSchema {
        name: "register".into(),
        fields: vec![
            FormField::new("username", FieldKind::Text, true),
            FormField::new("password", FieldKind::Password, true),
            FormField::new("password_confirm", FieldKind::Password, true),
            FormField::new("email", FieldKind::Email, false),
            FormField::new("phone", FieldKind::Text, false),
            FormField::new("address", FieldKind::Textarea, false),
            FormField::new("favorite_brand", FieldKind::Choice, false)
                .with_choices(Brand::labels()),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_form_lists_choices() {
        let form = car_form();
        let brand = form.field("brand").unwrap();
        assert!(brand.required);
        assert!(brand.choices.as_ref().unwrap().contains(&"Tesla".to_string()));
        assert!(form.field("price").unwrap().choices.is_none());
    }

    #[test]
    fn comment_form_offers_existing_hashtags() {
        let tags = vec![Hashtag {
            id: uuid::Uuid::new_v4(),
            name: "fast".into(),
        }];
        let form = comment_form(&tags);
        assert_eq!(
            form.field("hashtags").unwrap().choices.as_deref(),
            Some(&["fast".to_string()][..])
        );
    }
}
