// Simple RGB color, serialized as a `[r, g, b]` triple

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Scale every channel by `alpha` (clamped to 0-1), used for fading
    pub fn scaled(self, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * a) as u8;
        Rgb(scale(self.0), scale(self.1), scale(self.2))
    }
}

/// Row palette: red, orange, yellow, green, blue, purple
pub fn default_brick_palette() -> Vec<Rgb> {
    vec![
        Rgb(231, 76, 60),
        Rgb(230, 126, 34),
        Rgb(241, 196, 15),
        Rgb(46, 204, 113),
        Rgb(52, 152, 219),
        Rgb(155, 89, 182),
    ]
}

pub const PADDLE_COLOR: Rgb = Rgb(200, 220, 255);
