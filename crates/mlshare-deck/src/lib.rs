#![forbid(unsafe_code)]

//! The ML Tech Sharing deck.
//!
//! # Role in mlshare
//! `mlshare-deck` is the application crate. It holds the deck content, the
//! two state cells behind navigation (active section and scroll offset), and
//! the render tree that turns them into a page.
//!
//! # Primary responsibilities
//! - **Content**: the five sections, hero and footer as static data.
//! - **Navigation**: [`nav::NavigationController`] and [`tracker::ScrollTracker`],
//!   composed into [`app::DeckModel`].
//! - **Render tree**: [`view::PageView`] for frames, [`markup::render_html`]
//!   for a static page.
//! - **Hosts**: the crossterm terminal loop and the `mlshare` CLI.

pub mod app;
pub mod assets;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod layout;
pub mod markup;
pub mod nav;
pub mod state;
#[cfg(feature = "terminal")]
pub mod terminal;
pub mod theme;
pub mod tracker;
pub mod view;

pub use app::{DeckModel, Msg};
#[cfg(feature = "cli")]
pub use cli::{Cli, Commands, run, run_from_env};
pub use config::{ConfigError, DeckConfig};
pub use content::{DECK, Deck};
pub use error::{DeckError, Result};
pub use nav::NavigationController;
pub use state::{Focus, PageState};
pub use tracker::ScrollTracker;
pub use view::PageView;
