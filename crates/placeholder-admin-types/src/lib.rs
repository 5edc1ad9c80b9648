//! Wire types for the `/users` and `/posts` collections of the demo API.
//!
//! The remote service returns richer objects (addresses, post bodies, ...);
//! only the fields the admin console reads are modelled here and everything
//! else is ignored on decode.

use serde::{Deserialize, Serialize};

/// A user record as returned by `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
}

/// A post record as returned by `GET /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
    pub email: String,
}

/// Body of `POST /posts` and `PUT /posts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWriteRequest {
    pub user_id: i64,
    pub title: String,
}
