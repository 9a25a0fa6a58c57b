use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::ParseRoleError;

/// One of the five standard lanes a team must fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bottom,
    Support,
}

impl Role {
    pub const LEN: usize = 5;

    /// All roles in standard order.
    ///
    /// This order is also the tie-break order used by role assignment.
    pub const ALL: [Self; Self::LEN] = [
        Self::Top,
        Self::Jungle,
        Self::Mid,
        Self::Bottom,
        Self::Support,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Jungle => "jungle",
            Self::Mid => "mid",
            Self::Bottom => "bottom",
            Self::Support => "support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Parses a role label, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseRoleError {
                label: s.to_owned(),
            })
    }
}

impl TryFrom<String> for Role {
    type Error = ParseRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The slot a player ends up occupying after role assignment.
///
/// `Forced` is the fallback for a player left without any open lane. It is a
/// legitimate outcome rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum AssignedRole {
    Lane(Role),
    Forced,
}

impl AssignedRole {
    #[must_use]
    pub const fn lane(self) -> Option<Role> {
        match self {
            Self::Lane(role) => Some(role),
            Self::Forced => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lane(role) => role.label(),
            Self::Forced => "forced",
        }
    }
}

impl From<Role> for AssignedRole {
    fn from(role: Role) -> Self {
        Self::Lane(role)
    }
}

impl fmt::Display for AssignedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AssignedRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}
