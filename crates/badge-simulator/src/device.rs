//! SDL-window [`BadgeDevice`].

use std::convert::Infallible;
use std::thread;
use std::time::Duration;

use badge_core::framebuffer::FrameBuffer;
use badge_core::input::Button;
use badge_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use badge_core::BadgeDevice;
use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::debug;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 3;

/// How often SDL is polled while the badge sleeps.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Simulator keys that are not badge buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Reset,
    Quit,
}

/// Draws into a framebuffer and flushes dirty regions to the window on
/// `present`, the way the panel driver does partial refreshes.
pub struct SimDevice {
    fb: FrameBuffer,
    display: SimulatorDisplay<Gray4>,
    window: Window,
    held: Option<Button>,
    request: Option<Request>,
}

impl SimDevice {
    pub fn new() -> Self {
        let mut display =
            SimulatorDisplay::<Gray4>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
        let _ = display.clear(Gray4::WHITE);

        let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
        let mut window = Window::new("Badge Simulator", &output_settings);

        // The SDL window is created on the first `update()`; `events()`
        // panics before that.
        window.update(&display);

        Self {
            fb: FrameBuffer::new(),
            display,
            window,
            held: None,
            request: None,
        }
    }

    /// Take the reset or quit request made during the last wait, if any.
    pub fn take_request(&mut self) -> Option<Request> {
        self.request.take()
    }
}

fn keycode_to_button(keycode: Keycode) -> Option<Button> {
    match keycode {
        Keycode::A => Some(Button::A),
        Keycode::B => Some(Button::B),
        Keycode::C => Some(Button::C),
        Keycode::Up => Some(Button::Up),
        Keycode::Down => Some(Button::Down),
        _ => None,
    }
}

fn keycode_to_request(keycode: Keycode) -> Option<Request> {
    match keycode {
        Keycode::R => Some(Request::Reset),
        Keycode::Q | Keycode::Escape => Some(Request::Quit),
        _ => None,
    }
}

impl OriginDimensions for SimDevice {
    fn size(&self) -> Size {
        self.fb.size()
    }
}

impl DrawTarget for SimDevice {
    type Color = Gray4;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.fb.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.fb.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fb.clear(color)
    }
}

impl BadgeDevice for SimDevice {
    fn present(&mut self) -> Result<(), Self::Error> {
        if let Some(area) = self.fb.flush(&mut self.display)? {
            debug!("Refreshed {:?}", area);
        }
        self.window.update(&self.display);
        Ok(())
    }

    async fn wait_for_input(&mut self) {
        self.held = None;
        loop {
            for event in self.window.events() {
                match event {
                    SimulatorEvent::Quit => {
                        self.request = Some(Request::Quit);
                        return;
                    }
                    SimulatorEvent::KeyDown { keycode, .. } => {
                        if let Some(button) = keycode_to_button(keycode) {
                            self.held = Some(button);
                            return;
                        }
                        if let Some(request) = keycode_to_request(keycode) {
                            self.request = Some(request);
                            return;
                        }
                    }
                    _ => {}
                }
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn is_pressed(&mut self, button: Button) -> bool {
        self.held == Some(button)
    }
}
