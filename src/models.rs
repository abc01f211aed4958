use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    car_images::Model as CarImageModel, cars::Model as CarModel,
    hashtags::Model as HashtagModel, purchases::Model as PurchaseModel,
    user_profiles::Model as ProfileModel, users::Model as UserModel,
};

/// Public view of an account. The password hash never leaves the service layer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserProfile {
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub favorite_brand: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CarImage {
    pub id: Uuid,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Car {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub brand: String,
    pub model: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub condition: String,
    pub year: i32,
    pub mileage: i64,
    pub color: String,
    pub available_colors: Vec<String>,
    pub engine: String,
    pub fuel_type: String,
    pub drivetrain: String,
    pub horsepower: i32,
    pub torque: i32,
    pub transmission: String,
    pub top_speed: i32,
    /// 0-100 km/h in seconds.
    pub acceleration: f64,
    pub document: Option<String>,
    pub images: Vec<CarImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Hashtag {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub car_id: Uuid,
    pub author: Option<User>,
    pub text: String,
    pub hashtags: Vec<Hashtag>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Purchase {
    pub id: Uuid,
    pub car_id: Uuid,
    pub buyer_id: Uuid,
    pub purchased_at: DateTime<Utc>,
}

pub fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        username: model.username,
        role: model.role,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn profile_from_entity(model: ProfileModel) -> UserProfile {
    UserProfile {
        user_id: model.user_id,
        phone: model.phone,
        address: model.address,
        favorite_brand: model.favorite_brand,
    }
}

pub fn image_from_entity(model: CarImageModel) -> CarImage {
    CarImage {
        id: model.id,
        image: model.image,
    }
}

pub fn car_from_entity(model: CarModel, images: Vec<CarImage>) -> Car {
    Car {
        id: model.id,
        owner_id: model.owner_id,
        brand: model.brand,
        model: model.model,
        description: model.description,
        price: model.price,
        category: model.category,
        condition: model.condition,
        year: model.year,
        mileage: model.mileage,
        color: model.color,
        available_colors: model.available_colors,
        engine: model.engine,
        fuel_type: model.fuel_type,
        drivetrain: model.drivetrain,
        horsepower: model.horsepower,
        torque: model.torque,
        transmission: model.transmission,
        top_speed: model.top_speed,
        acceleration: model.acceleration,
        document: model.document,
        images,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

pub fn hashtag_from_entity(model: HashtagModel) -> Hashtag {
    Hashtag {
        id: model.id,
        name: model.name,
    }
}

pub fn purchase_from_entity(model: PurchaseModel) -> Purchase {
    Purchase {
        id: model.id,
        car_id: model.car_id,
        buyer_id: model.buyer_id,
        purchased_at: model.purchased_at.with_timezone(&Utc),
    }
}
