//! Listing status and declared-condition enums.
//!
//! The database stores both as plain text; these enums own the canonical
//! string forms and the allowed status transitions.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Condition the seller declares when creating a listing, independent of the
/// detailed checklist evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredCondition {
    New,
    LikeNew,
    Good,
    Acceptable,
    Worn,
}

impl DeclaredCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::LikeNew => "like_new",
            Self::Good => "good",
            Self::Acceptable => "acceptable",
            Self::Worn => "worn",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "new" => Ok(Self::New),
            "like_new" => Ok(Self::LikeNew),
            "good" => Ok(Self::Good),
            "acceptable" => Ok(Self::Acceptable),
            "worn" => Ok(Self::Worn),
            other => Err(CoreError::Validation(format!(
                "Unknown declared condition: {other}"
            ))),
        }
    }
}

/// Lifecycle status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Sold,
    Reserved,
    Disabled,
}

impl ListingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Reserved => "reserved",
            Self::Disabled => "disabled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "active" => Ok(Self::Active),
            "sold" => Ok(Self::Sold),
            "reserved" => Ok(Self::Reserved),
            "disabled" => Ok(Self::Disabled),
            other => Err(CoreError::Validation(format!(
                "Unknown listing status: {other}"
            ))),
        }
    }

    /// Whether a listing may move from `self` to `next`.
    ///
    /// Sold is terminal except for reactivation; reserved listings can be
    /// sold, reactivated, or disabled.
    pub fn can_transition_to(self, next: ListingStatus) -> bool {
        if self == next {
            return false;
        }
        match self {
            Self::Active => true,
            Self::Reserved => true,
            Self::Sold => next == Self::Active,
            Self::Disabled => next == Self::Active,
        }
    }
}
