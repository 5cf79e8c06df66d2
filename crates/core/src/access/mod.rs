//! Role-based access decisions for routes and navigation
//!
//! Pure functions over a [`SessionSnapshot`](crate::SessionSnapshot): the
//! gate decides whether a route renders, and the navigation model filters
//! the sidebar entries a user may see. No I/O happens here.

pub mod gate;
pub mod navigation;
