pub mod audit_logs;
pub mod car_images;
pub mod cars;
pub mod comment_hashtags;
pub mod comments;
pub mod hashtags;
pub mod purchases;
pub mod user_profiles;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use car_images::Entity as CarImages;
pub use cars::Entity as Cars;
pub use comment_hashtags::Entity as CommentHashtags;
pub use comments::Entity as Comments;
pub use hashtags::Entity as Hashtags;
pub use purchases::Entity as Purchases;
pub use user_profiles::Entity as UserProfiles;
pub use users::Entity as Users;
