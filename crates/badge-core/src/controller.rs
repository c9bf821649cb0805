//! Button-driven main loop.
//!
//! The controller owns the config, the loaded state and the state store. It
//! renders the current page, sleeps until the device reports input, applies
//! at most one button effect, and when that changed the state it persists
//! and re-renders. Everything runs in one sequence, so a render always sees
//! the state exactly as the preceding mutation left it.

use core::fmt::Debug;
use core::future::Future;

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use log::{debug, error, info};

use crate::config::BadgeConfig;
use crate::input::{Button, InputEffect, poll};
use crate::pages::{PageRender, RenderContext};
use crate::state::{BadgeState, StateStore};
use crate::storage::{Storage, StorageError};
use crate::ui::{PEN_BLACK, PEN_WHITE};

/// Display and buttons of a badge.
pub trait BadgeDevice: DrawTarget<Color = Gray4, Error: Debug> {
    /// Push everything drawn since the last call to the panel.
    fn present(&mut self) -> Result<(), Self::Error>;

    /// Sleep until a button may have been pressed.
    fn wait_for_input(&mut self) -> impl Future<Output = ()>;

    /// Whether `button` is held right now.
    fn is_pressed(&mut self, button: Button) -> bool;
}

/// Controller phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started
    Idle,
    /// Drawing the current page
    Rendering,
    /// Asleep until the device wakes us
    WaitingForInput,
    /// Reading buttons and applying their effect
    ProcessingInput,
}

/// Things that move the controller between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// State loaded, first frame due
    Start,
    /// Frame presented
    Rendered,
    /// Device returned from its input wait
    Woke,
    /// A button changed the state
    StateChanged,
    /// Nothing relevant was pressed
    NoChange,
    /// Stored state was wiped
    Reset,
}

impl Phase {
    /// Next phase for `event`. Events that do not apply leave the phase
    /// unchanged.
    pub fn transition(self, event: PhaseEvent) -> Self {
        use Phase::*;
        use PhaseEvent::*;

        match (self, event) {
            (Idle, Start) => Rendering,
            (Rendering, Rendered) => WaitingForInput,
            (WaitingForInput, Woke) => ProcessingInput,
            (ProcessingInput, StateChanged) => Rendering,
            (ProcessingInput, NoChange) => WaitingForInput,
            (_, Reset) => Rendering,
            (phase, _) => phase,
        }
    }
}

pub struct BadgeController<S: Storage> {
    config: BadgeConfig,
    store: StateStore<S>,
    state: BadgeState,
    phase: Phase,
}

impl<S: Storage> BadgeController<S> {
    /// Load the profile's state and get ready to draw the first frame.
    pub fn new(config: BadgeConfig, storage: S) -> Self {
        let mut store = StateStore::new(storage);
        let state = store.load(&config);
        info!(
            "Badge {} starting on page {} of {}",
            config.profile(),
            state.page,
            config.page_count()
        );

        Self {
            config,
            store,
            state,
            phase: Phase::Idle.transition(PhaseEvent::Start),
        }
    }

    pub fn config(&self) -> &BadgeConfig {
        &self.config
    }

    pub fn state(&self) -> &BadgeState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    pub fn storage_mut(&mut self) -> &mut S {
        self.store.storage_mut()
    }

    /// Apply the single effect of the buttons currently held.
    ///
    /// Returns `true` when the state changed. Nothing is persisted or drawn
    /// here.
    pub fn handle_input(&mut self, is_pressed: impl FnMut(Button) -> bool) -> bool {
        let counters = self.config.counters();
        let page_count = self.config.page_count();

        match poll(is_pressed, |index| index < counters.len()) {
            Some(InputEffect::Increment(index)) => {
                let key = &counters[index].key;
                let value = self.state.increment(key);
                debug!("Counter {} is now {}", key, value);
                true
            }
            Some(InputEffect::NextPage) => {
                self.state.next_page(page_count);
                info!("Next page: {}", self.state.page);
                true
            }
            Some(InputEffect::PreviousPage) => {
                self.state.previous_page(page_count);
                info!("Previous page: {}", self.state.page);
                true
            }
            None => false,
        }
    }

    /// Draw the current page on a blank white panel and present it.
    pub fn render<D: BadgeDevice>(&self, device: &mut D) -> Result<(), D::Error> {
        let Some(page) = self.config.page(self.state.page) else {
            error!("Page {} is out of range", self.state.page);
            return Ok(());
        };
        debug!("Rendering page {} ({})", self.state.page, page.title());

        {
            let mut ctx = RenderContext::new(device, &self.config);
            ctx.canvas.set_pen(PEN_WHITE);
            ctx.canvas.clear()?;
            ctx.canvas.set_pen(PEN_BLACK);
            page.render(&mut ctx, &self.state)?;
        }

        device.present()
    }

    /// Write the current state, logging instead of failing.
    fn persist(&mut self) {
        if let Err(e) = self.store.persist(&self.config, &self.state) {
            error!("State not saved, keeping it in memory: {}", e);
        }
    }

    fn redraw<D: BadgeDevice>(&mut self, device: &mut D) {
        if let Err(e) = self.render(device) {
            error!("Render failed: {:?}", e);
        }
        self.phase = self.phase.transition(PhaseEvent::Rendered);
    }

    /// Remove every stored state file and start over from a fresh state.
    ///
    /// The next [`Self::step`] redraws before waiting.
    pub fn reset(&mut self) -> Result<usize, StorageError> {
        let removed = self.store.reset()?;
        self.state = BadgeState::default();
        self.state
            .reconcile(self.config.counters(), self.config.page_count());
        self.phase = self.phase.transition(PhaseEvent::Reset);
        Ok(removed)
    }

    /// One turn of the loop: draw if a frame is due, wait for input, apply
    /// it, and persist and redraw if anything changed.
    ///
    /// Returns whether the state changed.
    pub async fn step<D: BadgeDevice>(&mut self, device: &mut D) -> bool {
        if self.phase == Phase::Rendering {
            self.redraw(device);
        }

        device.wait_for_input().await;
        self.phase = self.phase.transition(PhaseEvent::Woke);

        let changed = self.handle_input(|button| device.is_pressed(button));
        if !changed {
            self.phase = self.phase.transition(PhaseEvent::NoChange);
            return false;
        }

        self.persist();
        self.phase = self.phase.transition(PhaseEvent::StateChanged);
        self.redraw(device);
        true
    }

    /// Run forever.
    pub async fn run<D: BadgeDevice>(&mut self, device: &mut D) {
        loop {
            self.step(device).await;
        }
    }
}
