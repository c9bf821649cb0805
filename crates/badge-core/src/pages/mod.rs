//! Badge pages.
//!
//! Every page draws a full screen through the [`PageRender`] contract. The
//! counter and about-me pages share a header banner and a thumbnail slot;
//! the status page paints its own background.

pub mod about_me;
pub mod constants;
pub mod counter;
pub mod header;
pub mod page;
pub mod status;

pub use about_me::AboutMePage;
pub use counter::CounterPage;
pub use page::{Page, PageRender, RenderContext};
pub use status::StatusPage;
