//! Typed access to a community's link listings and to link deletion.
//!
//! ```no_run
//! # async fn run() -> reddit_links::Result<()> {
//! use reddit_links::{Client, ClientConfig};
//!
//! let client = Client::new(ClientConfig::default())?;
//! for link in client.get_hot_links("golang").await? {
//!     println!("{} {}", link.score, link.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod listing;
pub mod models;

pub use client::{Client, ClientConfig};
pub use error::{Error, Result};
pub use listing::Sort;
pub use models::{Likes, Link, LinkPage, Media, OEmbed};
