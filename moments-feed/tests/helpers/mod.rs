//! Test helper modules for moments-feed integration tests
//!
//! - FakeApi: scripted in-memory `MomentsApi` that records every call
//! - MockBackend: in-process axum server standing in for the REST backend

#![allow(dead_code)]

pub mod fake_api;
pub mod mock_backend;

pub use fake_api::{moment, moment_json, Call, FakeApi};
pub use mock_backend::{MockBackend, RecordedRequest};
