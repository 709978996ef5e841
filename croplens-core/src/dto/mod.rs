//! Data Transfer Objects for the backend API
//!
//! Wire shapes exchanged with the CropLens backend over HTTP+JSON. These are
//! kept separate from the domain types so the domain model is not coupled to
//! the backend's (Celery-flavored) status vocabulary.

pub mod task;
pub mod upload;
