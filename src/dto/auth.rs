use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    choices::Brand,
    error::AppResult,
    validation::{FieldErrors, choice, optional_text},
};

const MIN_USERNAME: usize = 3;
const MAX_USERNAME: usize = 150;
const MIN_PASSWORD: usize = 8;

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub favorite_brand: Option<String>,
}

/// Registration input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub favorite_brand: Option<Brand>,
}

impl RegisterRequest {
    pub fn validate(self) -> AppResult<NewAccount> {
        let mut errors = FieldErrors::new();

        let username = self.username.trim().to_string();
        if username.is_empty() {
            errors.add("username", "This field is required.");
        } else if username.chars().count() < MIN_USERNAME {
            errors.add(
                "username",
                format!("Ensure this value has at least {MIN_USERNAME} characters."),
            );
        } else if username.chars().count() > MAX_USERNAME {
            errors.add(
                "username",
                format!("Ensure this value has at most {MAX_USERNAME} characters."),
            );
        } else if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@.+-_".contains(c))
        {
            errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        }

        if self.password.chars().count() < MIN_PASSWORD {
            errors.add(
                "password",
                format!("This password is too short. It must contain at least {MIN_PASSWORD} characters."),
            );
        } else if self.password.chars().all(|c| c.is_ascii_digit()) {
            errors.add("password", "This password is entirely numeric.");
        }
        if self.password != self.password_confirm {
            errors.add("password_confirm", "The two password fields didn't match.");
        }

        let email = optional_text(&mut errors, "email", self.email.as_deref(), 254);
        if let Some(email) = &email {
            let valid = email
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if !valid {
                errors.add("email", "Enter a valid email address.");
            }
        }

        let phone = optional_text(&mut errors, "phone", self.phone.as_deref(), 32);
        let address = optional_text(&mut errors, "address", self.address.as_deref(), 500);
        let favorite_brand = self
            .favorite_brand
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .and_then(|b| choice(&mut errors, "favorite_brand", b, Brand::parse));

        errors.finish(NewAccount {
            username,
            password: self.password,
            email,
            phone,
            address,
            favorite_brand,
        })
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}
