//! Course storefront
//!
//! Client-side core of the course storefront: the course catalog and
//! its card renderer, a facade over the hosted auth/document backend, the
//! state machines behind the page's UI widgets, and the content-protection
//! deterrents.

pub mod backend;
pub mod catalog;
pub mod clock;
pub mod courses;
pub mod fixtures;
pub mod format;
pub mod ids;
pub mod protection;
pub mod render;
pub mod storefront;
pub mod ui;
pub mod users;
