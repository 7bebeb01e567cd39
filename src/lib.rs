//! Composer - headless engine for authoring learning-analytics indicators.
//!
//! The crate models one authoring session: a draft indicator built from a
//! dataset selection, filters, an analytics technique, and a
//! visualization, with a guided tour walking the user through the steps.
//! Rendering is left entirely to the embedding UI; this crate owns the
//! step gating, the tour progression, session persistence, and the
//! clients for the remote indicator and catalog APIs.

pub mod api;
pub mod config;
pub mod draft;
pub mod logging;
pub mod session;
pub mod wizard;

pub use config::Config;
pub use draft::EditorState;
pub use session::{DraftStore, SessionSnapshot};
pub use wizard::TourController;
