/// Palette formulas: name-seeded and random.
use rand::RngExt;

use crate::error::PaletteError;
use crate::types::{Color, Palette};

pub const MIN_RANDOM_SIZE: usize = 4;
pub const MAX_RANDOM_SIZE: usize = 16;
pub const DEFAULT_RANDOM_SIZE: usize = 5;
pub const MAX_NAMED_SIZE: usize = 256;

/// Derive a palette from `name`. The same name and size always give the same colors.
///
/// Each position `i` is seeded from the UTF-16 code unit at `i mod len(name)`
/// offset by `i * 16`, and the channels are fixed multiples of the seed mod 256.
pub fn named_palette(name: &str, size: usize) -> Result<Palette, PaletteError> {
    let units: Vec<u16> = name.encode_utf16().collect();
    if units.is_empty() {
        return Err(PaletteError::EmptyName);
    }
    if size == 0 || size > MAX_NAMED_SIZE {
        return Err(PaletteError::InvalidNamedSize {
            max: MAX_NAMED_SIZE,
        });
    }

    let palette = (0..size)
        .map(|i| {
            let seed = u64::from(units[i % units.len()]) + (i as u64) * 16;
            Color::new(channel(seed, 123), channel(seed, 456), channel(seed, 789))
        })
        .collect();
    Ok(palette)
}

fn channel(seed: u64, factor: u64) -> u8 {
    ((seed * factor) % 256) as u8
}

/// Check a requested random palette size before generating anything.
pub fn validate_random_size(size: usize) -> Result<usize, PaletteError> {
    if (MIN_RANDOM_SIZE..=MAX_RANDOM_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(PaletteError::InvalidRandomSize {
            min: MIN_RANDOM_SIZE,
            max: MAX_RANDOM_SIZE,
        })
    }
}

/// Generate `size` uniformly random colors. Callers validate the size first.
pub fn random_palette<R: RngExt + ?Sized>(size: usize, rng: &mut R) -> Palette {
    (0..size)
        .map(|_| {
            Color::new(
                random_int(rng, 0, 255),
                random_int(rng, 0, 255),
                random_int(rng, 0, 255),
            )
        })
        .collect()
}

/// Uniform integer in `min..=max`.
pub fn random_int<R: RngExt + ?Sized>(rng: &mut R, min: u8, max: u8) -> u8 {
    rng.random_range(min..=max)
}
