//! Routes of the console: the landing view and the two list views.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Users,
    Posts,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Users => "/users",
            Self::Posts => "/posts",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route `{0}` (expected /, /users or /posts)")]
pub struct RouteError(pub String);

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('/') {
            "" | "home" => Ok(Self::Home),
            "/users" | "users" => Ok(Self::Users),
            "/posts" | "posts" => Ok(Self::Posts),
            other => Err(RouteError(other.to_string())),
        }
    }
}
