//! Client for the club website backend.
//!
//! [`ClubClient`] covers every REST route of the backend: projects, events,
//! the singleton group info, images, project archives and executables. The
//! [`views`] module holds headless list, form and page models built on top
//! of it.

pub use api::API_KEY_HEADER;
pub use client::ClubClient;
pub use config::Config;
pub use error::{ClubError, Result};
pub use model::*;

mod api;
mod client;
pub mod config;
mod error;
pub mod model;
pub mod views;
