//! Notification kinds and message builders.
//!
//! Kinds are stored as plain strings in the `notifications.kind` column;
//! handlers build title/body pairs here so wording stays in one place.

/// A buyer left a rating on one of the seller's listings.
pub const KIND_NEW_RATING: &str = "new_rating";
/// A new message arrived in one of the user's conversations.
pub const KIND_MESSAGE_RECEIVED: &str = "message_received";
/// A listing was marked sold.
pub const KIND_LISTING_SOLD: &str = "listing_sold";
/// A listing was marked reserved.
pub const KIND_LISTING_RESERVED: &str = "listing_reserved";
/// The price of a favorited listing dropped.
pub const KIND_PRICE_DROP: &str = "price_drop";

/// Title and body for a new-rating notification.
pub fn new_rating_message(buyer_username: &str, stars: i32) -> (String, String) {
    (
        "New rating received".to_string(),
        format!("{buyer_username} rated you {stars}/5"),
    )
}

/// Title and body for a message-received notification.
pub fn message_received_message(sender_username: &str) -> (String, String) {
    (
        "New message".to_string(),
        format!("{sender_username} sent you a message"),
    )
}

/// Title and body for a price-drop notification on a favorited listing.
pub fn price_drop_message(listing_title: &str, old_price: f64, new_price: f64) -> (String, String) {
    (
        "Price drop on a favorite".to_string(),
        format!("\"{listing_title}\" dropped from {old_price:.2} to {new_price:.2}"),
    )
}
