//! Desktop simulator for the e-paper name badge.
//!
//! Runs the real `badge-core` controller against an SDL2 window
//! (`embedded-graphics-simulator`), with state files and thumbnails stored
//! in a data directory on the host and QR codes encoded by `qrcodegen`.
//!
//! ```text
//! badge-simulator [PROFILE_JSON] [DATA_DIR]
//! ```
//!
//! Without a profile the stock badge is used, which expects a 1152-byte
//! `pfp.bin` thumbnail in the data directory (default `badge-data`).
//!
//! # Key bindings
//!
//! | Key        | Action                         |
//! |------------|--------------------------------|
//! | A / B / C  | Badge action buttons           |
//! | Up / Down  | Badge navigation buttons       |
//! | R          | Delete stored state and redraw |
//! | Q / Esc    | Quit                           |

mod device;
mod fs_storage;
mod qr;

use std::process::ExitCode;

use badge_core::{BadgeController, BadgeProfile};
use embassy_futures::block_on;
use log::{error, info};

use crate::device::{Request, SimDevice};
use crate::fs_storage::FsStorage;
use crate::qr::QrcodegenEncoder;

const DEFAULT_DATA_DIR: &str = "badge-data";

fn load_profile(path: Option<&str>) -> Result<BadgeProfile, String> {
    let Some(path) = path else {
        info!("No profile given, using the stock badge");
        return Ok(BadgeProfile::default());
    };

    let bytes = std::fs::read(path).map_err(|e| format!("Cannot read {}: {}", path, e))?;
    BadgeProfile::from_json(&bytes).map_err(|e| format!("Invalid profile {}: {}", path, e))
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let profile_path = args.first().map(String::as_str);
    let data_dir = args.get(1).map(String::as_str).unwrap_or(DEFAULT_DATA_DIR);

    let profile = match load_profile(profile_path) {
        Ok(profile) => profile,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::create_dir_all(data_dir) {
        error!("Cannot create data directory {}: {}", data_dir, e);
        return ExitCode::FAILURE;
    }
    let mut storage = FsStorage::new(data_dir);

    let config = match profile.build(&mut storage, &QrcodegenEncoder) {
        Ok(config) => config,
        Err(e) => {
            error!("Badge failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Starting badge simulator with data in {}", data_dir);
    info!("Keys: A/B/C=counters  Up/Down=pages  R=reset  Q=quit");

    let mut device = SimDevice::new();
    let mut controller = BadgeController::new(config, storage);

    loop {
        block_on(controller.step(&mut device));

        match device.take_request() {
            Some(Request::Reset) => match controller.reset() {
                Ok(removed) => info!("Reset: removed {} state file(s)", removed),
                Err(e) => error!("Reset failed: {}", e),
            },
            Some(Request::Quit) => break,
            None => {}
        }
    }

    info!("Simulator exiting");
    ExitCode::SUCCESS
}
