use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    choices::{Brand, Category, Color, Condition, Drivetrain, FuelType, Transmission},
    dto::{
        admin::{AdminCarQuery, CarSortBy, CreateHashtagRequest, HashtagList},
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cars::{CarList, CarRequest, EditCarForm},
        catalog::{CarDetail, CatalogPage, CatalogQuery, CommentRequest},
        forms::{FieldKind, FormField, FormSchema},
        profile::ProfileView,
    },
    models::{Car, CarImage, Comment, Hashtag, Purchase, User, UserProfile},
    response::{ApiResponse, Meta},
    routes::{admin, auth, cars, catalog, hashtags, health, pages, params, profile},
    validation::FieldErrors,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        pages::home,
        pages::about,
        auth::register_page,
        auth::register,
        auth::login_page,
        auth::login,
        auth::logout,
        profile::get_profile,
        cars::add_car_form,
        cars::create_car,
        cars::edit_car_form,
        cars::update_car,
        cars::delete_car_confirmation,
        cars::delete_car,
        catalog::list_catalog,
        catalog::car_detail,
        catalog::add_comment,
        catalog::purchase_car,
        hashtags::list_hashtags,
        admin::list_cars,
        admin::duplicate_car,
        admin::create_hashtag
    ),
    components(
        schemas(
            User,
            UserProfile,
            Car,
            CarImage,
            Comment,
            Hashtag,
            Purchase,
            Brand,
            Category,
            Condition,
            Color,
            FuelType,
            Drivetrain,
            Transmission,
            FieldKind,
            FormField,
            FormSchema,
            FieldErrors,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CarRequest,
            CarList,
            EditCarForm,
            CatalogQuery,
            CatalogPage,
            CarDetail,
            CommentRequest,
            ProfileView,
            AdminCarQuery,
            CarSortBy,
            CreateHashtagRequest,
            HashtagList,
            params::Pagination,
            params::SortOrder,
            pages::AboutData,
            health::HealthData,
            Meta,
            ApiResponse<Car>,
            ApiResponse<CarList>,
            ApiResponse<CatalogPage>,
            ApiResponse<CarDetail>,
            ApiResponse<ProfileView>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Pages", description = "Landing and about pages"),
        (name = "Auth", description = "Registration, login and logout"),
        (name = "Profile", description = "User profiles"),
        (name = "Cars", description = "Owner-only car management"),
        (name = "Catalog", description = "Public catalog, details, comments and purchases"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
