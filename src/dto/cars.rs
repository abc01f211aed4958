use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    choices::{Brand, Category, Color, Condition, Drivetrain, FuelType, Transmission},
    dto::forms::FormSchema,
    error::AppResult,
    media::{DEFAULT_CAR_IMAGE, sanitize_media_path},
    models::Car,
    validation::{
        FieldErrors, choice, non_negative, non_negative_float, required_text,
    },
};

const MAX_MODEL: usize = 100;
const MAX_ENGINE: usize = 100;
const MAX_DESCRIPTION: usize = 10_000;
const MAX_IMAGES: usize = 20;

/// Body of both the create and the edit form. On edit every field is optional and only the
/// supplied ones change; `images` are appended to the existing ones.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CarRequest {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub year: Option<i64>,
    pub mileage: Option<i64>,
    pub color: Option<String>,
    pub available_colors: Option<Vec<String>>,
    pub engine: Option<String>,
    pub fuel_type: Option<String>,
    pub drivetrain: Option<String>,
    pub horsepower: Option<i64>,
    pub torque: Option<i64>,
    pub transmission: Option<String>,
    pub top_speed: Option<i64>,
    pub acceleration: Option<f64>,
    /// Relative media path; an empty string clears it on edit.
    pub document: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Validated field changes. `None` leaves a field untouched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CarChanges {
    pub brand: Option<Brand>,
    pub model: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub year: Option<i32>,
    pub mileage: Option<i64>,
    pub color: Option<Color>,
    pub available_colors: Option<Vec<Color>>,
    pub engine: Option<String>,
    pub fuel_type: Option<FuelType>,
    pub drivetrain: Option<Drivetrain>,
    pub horsepower: Option<i32>,
    pub torque: Option<i32>,
    pub transmission: Option<Transmission>,
    pub top_speed: Option<i32>,
    pub acceleration: Option<f64>,
    pub document: Option<Option<String>>,
    pub images: Vec<String>,
}

/// A complete, validated car ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct CarDraft {
    pub brand: Brand,
    pub model: String,
    pub description: String,
    pub price: i64,
    pub category: Category,
    pub condition: Condition,
    pub year: i32,
    pub mileage: i64,
    pub color: Color,
    pub available_colors: Vec<Color>,
    pub engine: String,
    pub fuel_type: FuelType,
    pub drivetrain: Drivetrain,
    pub horsepower: i32,
    pub torque: i32,
    pub transmission: Transmission,
    pub top_speed: i32,
    pub acceleration: f64,
    pub document: Option<String>,
    pub images: Vec<String>,
}

impl CarRequest {
    pub fn validate_create(self) -> AppResult<CarDraft> {
        let mut errors = FieldErrors::new();
        let required = [
            ("brand", self.brand.is_none()),
            ("model", self.model.is_none()),
            ("price", self.price.is_none()),
            ("year", self.year.is_none()),
        ];
        for (field, missing) in required {
            if missing {
                errors.add(field, "This field is required.");
            }
        }

        let changes = self.check(&mut errors);
        let draft = CarDraft {
            brand: changes.brand.unwrap_or(Brand::Other),
            model: changes.model.unwrap_or_default(),
            description: changes
                .description
                .unwrap_or_else(|| "No description available".to_string()),
            price: changes.price.unwrap_or_default(),
            category: changes.category.unwrap_or(Category::Other),
            condition: changes.condition.unwrap_or(Condition::New),
            year: changes.year.unwrap_or_default(),
            mileage: changes.mileage.unwrap_or_default(),
            color: changes.color.unwrap_or(Color::Other),
            available_colors: changes.available_colors.unwrap_or_else(|| vec![Color::Other]),
            engine: changes.engine.unwrap_or_else(|| "Unknown".to_string()),
            fuel_type: changes.fuel_type.unwrap_or(FuelType::Other),
            drivetrain: changes.drivetrain.unwrap_or(Drivetrain::Other),
            horsepower: changes.horsepower.unwrap_or_default(),
            torque: changes.torque.unwrap_or_default(),
            transmission: changes.transmission.unwrap_or(Transmission::Other),
            top_speed: changes.top_speed.unwrap_or_default(),
            acceleration: changes.acceleration.unwrap_or_default(),
            document: changes.document.flatten(),
            images: if changes.images.is_empty() {
                vec![DEFAULT_CAR_IMAGE.to_string()]
            } else {
                changes.images
            },
        };
        errors.finish(draft)
    }

    pub fn validate_update(self) -> AppResult<CarChanges> {
        let mut errors = FieldErrors::new();
        let changes = self.check(&mut errors);
        errors.finish(changes)
    }

    fn check(self, errors: &mut FieldErrors) -> CarChanges {
        let available_colors = self.available_colors.map(|raw| {
            if raw.is_empty() {
                errors.add("available_colors", "This field is required.");
            }
            let mut colors: Vec<Color> = Vec::new();
            for value in &raw {
                if let Some(color) = choice(errors, "available_colors", value, Color::parse) {
                    if !colors.contains(&color) {
                        colors.push(color);
                    }
                }
            }
            colors
        });

        let document = self.document.map(|raw| {
            if raw.trim().is_empty() {
                return None;
            }
            match sanitize_media_path(&raw) {
                Ok(path) => Some(path),
                Err(msg) => {
                    errors.add("document", msg);
                    None
                }
            }
        });

        if self.images.len() > MAX_IMAGES {
            errors.add(
                "images",
                format!("Attach at most {MAX_IMAGES} images at once."),
            );
        }
        let mut images = Vec::with_capacity(self.images.len());
        for raw in &self.images {
            match sanitize_media_path(raw) {
                Ok(path) => images.push(path),
                Err(msg) => errors.add("images", msg),
            }
        }

        CarChanges {
            brand: self
                .brand
                .and_then(|v| choice(errors, "brand", &v, Brand::parse)),
            model: self
                .model
                .map(|v| required_text(errors, "model", &v, MAX_MODEL)),
            description: self
                .description
                .map(|v| required_text(errors, "description", &v, MAX_DESCRIPTION)),
            price: self.price.map(|v| non_negative(errors, "price", v)),
            category: self
                .category
                .and_then(|v| choice(errors, "category", &v, Category::parse)),
            condition: self
                .condition
                .and_then(|v| choice(errors, "condition", &v, Condition::parse)),
            year: self.year.map(|v| non_negative(errors, "year", v)),
            mileage: self.mileage.map(|v| non_negative(errors, "mileage", v)),
            color: self
                .color
                .and_then(|v| choice(errors, "color", &v, Color::parse)),
            available_colors,
            engine: self
                .engine
                .map(|v| required_text(errors, "engine", &v, MAX_ENGINE)),
            fuel_type: self
                .fuel_type
                .and_then(|v| choice(errors, "fuel_type", &v, FuelType::parse)),
            drivetrain: self
                .drivetrain
                .and_then(|v| choice(errors, "drivetrain", &v, Drivetrain::parse)),
            horsepower: self.horsepower.map(|v| non_negative(errors, "horsepower", v)),
            torque: self.torque.map(|v| non_negative(errors, "torque", v)),
            transmission: self
                .transmission
                .and_then(|v| choice(errors, "transmission", &v, Transmission::parse)),
            top_speed: self.top_speed.map(|v| non_negative(errors, "top_speed", v)),
            acceleration: self
                .acceleration
                .map(|v| non_negative_float(errors, "acceleration", v)),
            document,
            images,
        }
    }
}

pub fn color_labels(colors: &[Color]) -> Vec<String> {
    colors.iter().map(|c| c.as_str().to_string()).collect()
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CarList {
    #[schema(value_type = Vec<Car>)]
    pub items: Vec<Car>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EditCarForm {
    pub car: Car,
    pub form: FormSchema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn tesla() -> CarRequest {
        CarRequest {
            brand: Some("tesla".into()),
            model: Some("Model S".into()),
            price: Some(80_000),
            year: Some(2024),
            ..Default::default()
        }
    }

    fn field_errors(err: AppError) -> FieldErrors {
        match err {
            AppError::Validation(fields) => fields,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_fills_defaults() {
        let draft = tesla().validate_create().unwrap();
        assert_eq!(draft.brand, Brand::Tesla);
        assert_eq!(draft.model, "Model S");
        assert_eq!(draft.description, "No description available");
        assert_eq!(draft.condition, Condition::New);
        assert_eq!(draft.available_colors, vec![Color::Other]);
        assert_eq!(draft.engine, "Unknown");
        assert_eq!(draft.acceleration, 0.0);
        assert_eq!(draft.images, vec![DEFAULT_CAR_IMAGE.to_string()]);
    }

    #[test]
    fn create_requires_core_fields() {
        let errors = field_errors(CarRequest::default().validate_create().unwrap_err());
        for field in ["brand", "model", "price", "year"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn rejects_negative_numbers_and_unknown_choices() {
        let request = CarRequest {
            price: Some(-1),
            mileage: Some(-10),
            acceleration: Some(-2.5),
            category: Some("Tractor".into()),
            available_colors: Some(vec!["Red".into(), "Plaid".into()]),
            ..tesla()
        };
        let errors = field_errors(request.validate_create().unwrap_err());
        assert!(errors.contains("price"));
        assert!(errors.contains("mileage"));
        assert!(errors.contains("acceleration"));
        assert!(errors.contains("category"));
        assert!(errors.contains("available_colors"));
        assert!(!errors.contains("brand"));
    }

    #[test]
    fn rejects_traversal_in_media_paths() {
        let request = CarRequest {
            document: Some("../../etc/passwd".into()),
            images: vec!["car_images/ok.jpg".into(), "/abs/path.jpg".into()],
            ..tesla()
        };
        let errors = field_errors(request.validate_create().unwrap_err());
        assert!(errors.contains("document"));
        assert_eq!(errors.get("images").map(<[String]>::len), Some(1));
    }

    #[test]
    fn update_only_touches_supplied_fields() {
        let changes = CarRequest {
            price: Some(75_000),
            available_colors: Some(vec!["red".into(), "Red".into(), "white".into()]),
            document: Some("  ".into()),
            ..Default::default()
        }
        .validate_update()
        .unwrap();

        assert_eq!(changes.price, Some(75_000));
        assert_eq!(changes.brand, None);
        assert_eq!(changes.available_colors, Some(vec![Color::Red, Color::White]));
        assert_eq!(changes.document, Some(None));
    }

    #[test]
    fn update_rejects_blank_model() {
        let errors = field_errors(
            CarRequest {
                model: Some("   ".into()),
                available_colors: Some(vec![]),
                ..Default::default()
            }
            .validate_update()
            .unwrap_err(),
        );
        assert!(errors.contains("model"));
        assert!(errors.contains("available_colors"));
    }
}
