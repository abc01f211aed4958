use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Car, Purchase, User, UserProfile};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileView {
    pub user: User,
    pub profile: Option<UserProfile>,
    pub cars: Vec<Car>,
    /// Only present when viewing your own profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchases: Option<Vec<Purchase>>,
}
