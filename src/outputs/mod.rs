//! Markdown rendering of the news page.
//!
//! # Submodules
//!
//! - [`card`]: turns one [`Article`](crate::models::Article) into a card
//! - [`page`]: lays out the navbar, category buttons, card grid and pagination
//!   for a [`View`](crate::app::View)

pub mod card;
pub mod page;
