//! Unit-struct repositories, one per table, with static async methods.

pub mod condition_repo;
pub mod conversation_repo;
pub mod favorite_repo;
pub mod listing_repo;
pub mod message_repo;
pub mod notification_repo;
pub mod rating_repo;
pub mod session_repo;
pub mod user_repo;

pub use condition_repo::ConditionRepo;
pub use conversation_repo::ConversationRepo;
pub use favorite_repo::FavoriteRepo;
pub use listing_repo::ListingRepo;
pub use message_repo::MessageRepo;
pub use notification_repo::NotificationRepo;
pub use rating_repo::RatingRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
