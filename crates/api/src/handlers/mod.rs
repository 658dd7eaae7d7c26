//! Request handlers for the promo generator API.
//!
//! Handlers parse and validate input, delegate to the session store or the
//! [`promo_pipeline::PromoGenerator`], and map failures via
//! [`crate::error::AppError`].

pub mod generation;
pub mod options;
pub mod page;
pub mod sessions;
