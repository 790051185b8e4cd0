//! HTTP front end for the question API.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
