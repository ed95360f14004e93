//! # API crate: the console's connections to the outside world
//!
//! Everything that talks to something other than the DOM lives here, so the
//! `ui` crate only deals in records and errors.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`rest`] | [`RestStore`], a [`store::RecordStore`] speaking the PostgREST dialect (Supabase and friends) over `reqwest` |
//! | [`photo`] | [`PhotoPipeline`], which turns an uploaded image into a bounded JPEG plus its base64 and `data:` URL forms |
//!
//! Both are plain structs built from [`store::ConsoleConfig`]; neither keeps
//! any state between calls beyond the HTTP connection pool.

pub mod photo;
pub mod rest;

pub use photo::{scaled_dimensions, CapturedPhoto, PhotoError, PhotoPipeline};
pub use rest::RestStore;
