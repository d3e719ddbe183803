//! Photo reaction state machine
//!
//! A (user, photo) pair is in one of three states. Submitting the action that
//! matches the current state clears it; submitting the opposite action flips
//! the stored record in place.
//!
//! | current  | action  | next     | effect        |
//! |----------|---------|----------|---------------|
//! | None     | like    | Liked    | create(true)  |
//! | None     | dislike | Disliked | create(false) |
//! | Liked    | like    | None     | remove        |
//! | Liked    | dislike | Disliked | flip(false)   |
//! | Disliked | dislike | None     | remove        |
//! | Disliked | like    | Liked    | flip(true)    |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reaction state of a user towards a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReactionState {
    /// No record stored
    #[default]
    None,
    Liked,
    Disliked,
}

/// Action submitted by a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ReactionAction {
    Like,
    Dislike,
}

/// Storage change required to reach the next state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionEffect {
    /// Insert a record with the given `is_like`
    Create(bool),
    /// Overwrite the stored `is_like`
    Flip(bool),
    /// Delete the stored record
    Remove,
}

/// Result of applying an action to a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: ReactionState,
    pub effect: ReactionEffect,
}

impl ReactionState {
    /// Derive the state from an optional stored `is_like` flag
    #[inline]
    pub fn from_record(is_like: Option<bool>) -> Self {
        match is_like {
            None => Self::None,
            Some(true) => Self::Liked,
            Some(false) => Self::Disliked,
        }
    }

    /// The stored flag for this state, `None` when no record exists
    #[inline]
    pub fn is_like(self) -> Option<bool> {
        match self {
            Self::None => None,
            Self::Liked => Some(true),
            Self::Disliked => Some(false),
        }
    }

    /// Wire name: `liked`, `disliked`, or absent
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Liked => Some("liked"),
            Self::Disliked => Some("disliked"),
        }
    }

    /// Apply an action, returning the next state and the storage effect
    pub fn apply(self, action: ReactionAction) -> Transition {
        let wants_like = action == ReactionAction::Like;
        let (next, effect) = match (self, action) {
            (Self::None, _) => (action.target(), ReactionEffect::Create(wants_like)),
            (Self::Liked, ReactionAction::Like) | (Self::Disliked, ReactionAction::Dislike) => {
                (Self::None, ReactionEffect::Remove)
            }
            (Self::Liked, ReactionAction::Dislike) | (Self::Disliked, ReactionAction::Like) => {
                (action.target(), ReactionEffect::Flip(wants_like))
            }
        };
        Transition { next, effect }
    }
}

impl ReactionAction {
    /// State reached when this action sets (rather than clears) a reaction
    #[inline]
    pub fn target(self) -> ReactionState {
        match self {
            Self::Like => ReactionState::Liked,
            Self::Dislike => ReactionState::Disliked,
        }
    }

}

/// An action name other than `like` or `dislike`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid choice.")]
pub struct UnknownReactionAction(pub String);

impl FromStr for ReactionAction {
    type Err = UnknownReactionAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(UnknownReactionAction(other.to_string())),
        }
    }
}

impl TryFrom<String> for ReactionAction {
    type Error = UnknownReactionAction;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ReactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like => f.write_str("like"),
            Self::Dislike => f.write_str("dislike"),
        }
    }
}

// Serialized as `"liked"`, `"disliked"` or `null`
impl Serialize for ReactionState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.as_str() {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ReactionState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None => Ok(Self::None),
            Some("liked") => Ok(Self::Liked),
            Some("disliked") => Ok(Self::Disliked),
            Some(other) => Err(serde::de::Error::unknown_variant(
                other,
                &["liked", "disliked"],
            )),
        }
    }
}
