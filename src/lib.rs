//! `pharmasite` - CMS-backed corporate site
//!
//! Pages are assembled from a headless CMS (Strapi) whose responses may
//! arrive in the legacy `attributes` envelope or the flat shape. Every
//! section falls back to built-in content when the CMS is unreachable or
//! returns nothing usable, so a page always renders.

pub mod cli;
pub mod cms;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod listing;
pub mod observability;
pub mod pages;
pub mod products;
pub mod render;
pub mod server;
