use super::Rgb;

/// Scale a single channel by `level / max`
///
/// Uses integer floor division, so `level == max` keeps the channel intact
/// and any level below `max` rounds down. A zero `max` yields black.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale_channel(value: u8, level: u16, max: u16) -> u8 {
    if max == 0 {
        return 0;
    }
    let scaled = value as u32 * level as u32 / max as u32;
    if scaled > u8::MAX as u32 {
        u8::MAX
    } else {
        scaled as u8
    }
}

/// Scale every channel of a color by an intensity fraction `level / max`
#[inline]
pub const fn scale_intensity(color: Rgb, level: u16, max: u16) -> Rgb {
    Rgb {
        r: scale_channel(color.r, level, max),
        g: scale_channel(color.g, level, max),
        b: scale_channel(color.b, level, max),
    }
}
