//! ARMOS company website and content admin console.
//!
//! Public pages render in English or Mongolian from records kept in a hosted
//! database and object storage. Signed-in admins manage those records through
//! the console under `/admin`.

pub mod admin;
pub mod attachments;
pub mod auth;
pub mod backend;
pub mod config;
pub mod content;
pub mod i18n;
pub mod models;
pub mod public;
pub mod render;
pub mod sections;
pub mod security;
pub mod server;
