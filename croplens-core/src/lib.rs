//! CropLens Core
//!
//! Core types for the CropLens dashboard client.
//!
//! This crate contains:
//! - Domain types: Core business entities (Job, SensorReading, analytics)
//! - DTOs: Wire shapes exchanged with the backend API

pub mod domain;
pub mod dto;
