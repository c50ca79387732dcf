//! Text renderers for the feed's containers
//!
//! Pure functions from state to text. Nothing in here performs I/O; the
//! binary decides where the output goes.

pub mod cards;
pub mod feed_view;
pub mod filter_bar;
pub mod share;
pub mod sidebar;

pub use cards::{render_card, render_cards, waterfall};
pub use feed_view::{render_feed, render_pager};
pub use filter_bar::render_filter_bar;
pub use share::render_share_dialog;
pub use sidebar::Sidebar;
