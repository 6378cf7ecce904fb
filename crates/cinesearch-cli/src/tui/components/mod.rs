//! Stateless renderers for the search screen.

pub mod error_message;
pub mod loader;
pub mod movie_card;
pub mod movie_grid;
pub mod movie_modal;
pub mod pagination;
pub mod search_bar;
pub mod toast;
