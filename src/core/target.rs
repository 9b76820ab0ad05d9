//! Navigation target and layout identifiers.
//!
//! Both are opaque handles supplied by whoever discovers routes. The registry
//! only compares them by value; it never looks inside.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::route::RouteError;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(name: impl AsRef<str>) -> Self {
                Self(Arc::from(name.as_ref()))
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Reject empty names before they reach a routing table.
            pub(crate) fn validate(&self) -> Result<(), RouteError> {
                if self.0.trim().is_empty() {
                    return Err(RouteError::InvalidArgument(
                        concat!($what, " name must not be empty").to_string(),
                    ));
                }
                Ok(())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                self.as_str().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                String::deserialize(deserializer).map(Self::from)
            }
        }
    };
}

define_handle!(
    /// Identifier of the view bound to a route.
    NavigationTarget,
    "navigation target"
);

define_handle!(
    /// Identifier of a parent layout wrapping a navigation target.
    LayoutId,
    "layout"
);

/// Parameter template of a route: how many trailing segments it accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlParameter {
    /// Plain route, no trailing segments.
    #[default]
    None,
    /// Exactly one trailing segment.
    Required,
    /// Zero or one trailing segment.
    Optional,
    /// Any number of trailing segments.
    Wildcard,
}

impl UrlParameter {
    /// Check whether this template matches the given parameter segments.
    pub fn accepts<S: AsRef<str>>(self, segments: &[S]) -> bool {
        match self {
            Self::None => segments.is_empty(),
            Self::Required => segments.len() == 1,
            Self::Optional => segments.len() <= 1,
            Self::Wildcard => true,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Wildcard => "wildcard",
        }
    }
}

impl std::fmt::Display for UrlParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
