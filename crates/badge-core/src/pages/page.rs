//! Core page abstraction and the closed set of badge pages.
//!
//! This module defines the [`PageRender`] trait that every badge page
//! implements, along with [`Page`], an enum over the concrete page types.
//! The config holds a `Vec<Page>` and the controller renders through this
//! enum, so the page set stays closed and every `match` is exhaustive.
//!
//! # Render contract
//!
//! A render is a pure function of the config, the state and the page's own
//! fields. Pages never mutate state; they only issue draw calls through the
//! [`RenderContext`] canvas. The controller clears the panel to white and
//! leaves a black pen before calling [`PageRender::render`].

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;

use super::{AboutMePage, CounterPage, StatusPage};
use crate::config::BadgeConfig;
use crate::state::BadgeState;
use crate::ui::Canvas;

/// Everything a page needs besides the state: where to draw and the config.
pub struct RenderContext<'a, D>
where
    D: DrawTarget<Color = Gray4>,
{
    pub canvas: Canvas<'a, D>,
    pub config: &'a BadgeConfig,
}

impl<'a, D> RenderContext<'a, D>
where
    D: DrawTarget<Color = Gray4>,
{
    pub fn new(target: &'a mut D, config: &'a BadgeConfig) -> Self {
        Self {
            canvas: Canvas::new(target),
            config,
        }
    }
}

/// Trait that all badge pages implement.
pub trait PageRender {
    /// Human-readable title for logs.
    fn title(&self) -> &str;

    /// Draw the page for the given state.
    fn render<D: DrawTarget<Color = Gray4>>(
        &self,
        ctx: &mut RenderContext<'_, D>,
        state: &BadgeState,
    ) -> Result<(), D::Error>;
}

/// One navigable screen of the badge.
///
/// When adding a new page type, add a variant here and extend the
/// delegation below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Counter(CounterPage),
    AboutMe(AboutMePage),
    Status(StatusPage),
}

impl PageRender for Page {
    fn title(&self) -> &str {
        match self {
            Page::Counter(page) => page.title(),
            Page::AboutMe(page) => page.title(),
            Page::Status(page) => page.title(),
        }
    }

    fn render<D: DrawTarget<Color = Gray4>>(
        &self,
        ctx: &mut RenderContext<'_, D>,
        state: &BadgeState,
    ) -> Result<(), D::Error> {
        match self {
            Page::Counter(page) => page.render(ctx, state),
            Page::AboutMe(page) => page.render(ctx, state),
            Page::Status(page) => page.render(ctx, state),
        }
    }
}

impl From<CounterPage> for Page {
    fn from(page: CounterPage) -> Self {
        Page::Counter(page)
    }
}

impl From<AboutMePage> for Page {
    fn from(page: AboutMePage) -> Self {
        Page::AboutMe(page)
    }
}

impl From<StatusPage> for Page {
    fn from(page: StatusPage) -> Self {
        Page::Status(page)
    }
}
