mod intensity;

use smart_leds::RGB8;

pub use intensity::{scale_channel, scale_intensity};

pub type Rgb = RGB8;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const MAGENTA: Rgb = Rgb { r: 255, g: 0, b: 255 };
/// Warm amber used as the last preset of the default effect list
pub const AMBER: Rgb = Rgb {
    r: 180,
    g: 100,
    b: 53,
};
