pub mod admin_service;
pub mod auth_service;
pub mod car_service;
pub mod catalog_service;
pub mod hashtag_service;
pub mod profile_service;
pub mod purchase_service;
