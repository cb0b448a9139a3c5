use std::fmt;

/// Number of rejected draws after which [`next_color`] stops sampling and
/// steps through the palette instead.
pub const MAX_COLOR_ATTEMPTS: usize = 64;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

pub const PALETTE: [Rgba; 12] = [
    WHITE,
    Rgba::opaque(255, 0, 0),
    Rgba::opaque(0, 0, 255),
    Rgba::opaque(0, 255, 0),
    Rgba::opaque(255, 255, 0),
    Rgba::opaque(0, 255, 255),
    Rgba::opaque(255, 0, 255),
    Rgba::opaque(255, 128, 0),
    Rgba::opaque(128, 0, 255),
    Rgba::opaque(255, 128, 192),
    Rgba::opaque(128, 255, 0),
    Rgba::opaque(0, 128, 255),
];

/// Picks a palette color different from `current`.
///
/// Colors are drawn uniformly with replacement and rejected while they equal
/// `current`. If the palette has no other color, its first entry is returned.
pub fn next_color(current: Rgba, rng: &fastrand::Rng, palette: &[Rgba]) -> Rgba {
    let Some(&first) = palette.first() else {
        return current;
    };

    for _ in 0..MAX_COLOR_ATTEMPTS {
        let result = palette[rng.usize(..palette.len())];
        if result != current {
            return result;
        }
    }

    // unlucky streak: walk forward from a random start
    let start = rng.usize(..palette.len());
    palette
        .iter()
        .cycle()
        .skip(start)
        .take(palette.len())
        .copied()
        .find(|&c| c != current)
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_repeats_current() {
        let rng = fastrand::Rng::with_seed(7);
        let mut current = PALETTE[0];
        for _ in 0..10_000 {
            let next = next_color(current, &rng, &PALETTE);
            assert_ne!(next, current);
            assert!(PALETTE.contains(&next));
            current = next;
        }
    }

    #[test]
    fn two_color_palette_alternates() {
        let rng = fastrand::Rng::with_seed(1);
        let palette = [BLACK, WHITE];
        assert_eq!(next_color(BLACK, &rng, &palette), WHITE);
        assert_eq!(next_color(WHITE, &rng, &palette), BLACK);
    }

    #[test]
    fn degenerate_palettes_terminate() {
        let rng = fastrand::Rng::with_seed(3);
        assert_eq!(next_color(WHITE, &rng, &[WHITE]), WHITE);
        assert_eq!(next_color(WHITE, &rng, &[WHITE, WHITE, WHITE]), WHITE);
        assert_eq!(next_color(WHITE, &rng, &[]), WHITE);
    }

    #[test]
    fn palette_entries_are_distinct() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in &PALETTE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Rgba::opaque(255, 128, 0).to_string(), "#ff8000ff");
    }
}
