//! Hardware-independent core library for the e-paper name badge
//!
//! This crate contains all platform-agnostic logic for the badge: the page
//! engine (counter, about-me and status pages), the persistent state store
//! with schema reconciliation, the QR module rasterizer, the storage trait
//! and the button-driven controller loop.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod controller;
pub mod framebuffer;
pub mod input;
pub mod pages;
pub mod picture;
pub mod state;
pub mod storage;
pub mod ui;

pub use config::{BadgeConfig, BadgeProfile, ConfigError, CounterSpec};
pub use controller::{BadgeController, BadgeDevice, Phase, PhaseEvent};
pub use input::Button;
pub use state::{BadgeState, StateStore};
pub use storage::{MemoryStorage, Storage, StorageError};
