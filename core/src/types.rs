//! Domain DTOs for the todo API.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently so
//! the client never depends on Axum. The integration tests catch drift.

use serde::{Deserialize, Serialize};

/// A single task as returned by the API. Ids are server-assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Body for both login and register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful login reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
}

/// Body for create and update. The client only ever sends a title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: String,
}
