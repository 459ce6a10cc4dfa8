// Request/response models for the HTTP surface

pub mod admin;
pub mod auth;
pub mod common;
pub mod contractor;
pub mod review;
