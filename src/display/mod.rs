//! OLED composition and render loop

mod footer;
mod frame;
mod renderer;
mod state;

pub use footer::{Footer, FooterMode, IDLE_PHRASES, QuoteRotation};
pub use frame::{Bitmap, CenterLayout, Frame, HEIGHT, WIDTH};
pub use renderer::{DisplayRenderer, DisplaySnapshot};
pub use state::{
    CLEARED_STATUS, CLEARED_STATUS_DURATION, DisplayState, STARTUP_MESSAGE, STARTUP_STATUS,
    STARTUP_STATUS_DURATION, climate_label, message_width, text_width,
};
