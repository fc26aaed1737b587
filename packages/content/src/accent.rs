use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Every channel darkened by `amount`, floored at 0.
    pub fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Used whenever the profile image cannot be sampled.
pub const DEFAULT_ACCENT: Rgb = Rgb::new(124, 77, 255);

const HOVER_DARKEN: u8 = 30;

/// Rounded mean colour of RGBA pixel data; alpha is ignored.
pub fn average_color(rgba: &[u8]) -> Option<Rgb> {
    let pixels = rgba.len() / 4;
    if pixels == 0 {
        return None;
    }
    let mut sums = [0u64; 3];
    for px in rgba.chunks_exact(4) {
        sums[0] += px[0] as u64;
        sums[1] += px[1] as u64;
        sums[2] += px[2] as u64;
    }
    let n = pixels as u64;
    let mean = |sum: u64| ((sum + n / 2) / n) as u8;
    Some(Rgb::new(mean(sums[0]), mean(sums[1]), mean(sums[2])))
}

/// CSS custom properties derived from one accent colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentPalette {
    pub accent: String,
    pub accent_transparent: String,
    pub hover_accent: String,
}

impl AccentPalette {
    pub fn from_color(color: Rgb) -> Self {
        Self {
            accent: color.to_string(),
            accent_transparent: format!("rgba({}, {}, {}, 0.67)", color.r, color.g, color.b),
            hover_accent: color.darken(HOVER_DARKEN).to_string(),
        }
    }

    /// `(property, value)` pairs for the document root.
    pub fn properties(&self) -> [(&'static str, &str); 3] {
        [
            ("--accent", self.accent.as_str()),
            ("--accent-transparent", self.accent_transparent.as_str()),
            ("--hover-accent", self.hover_accent.as_str()),
        ]
    }

    /// Inline `style` declaration setting every property.
    pub fn style(&self) -> String {
        self.properties()
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for AccentPalette {
    fn default() -> Self {
        Self::from_color(DEFAULT_ACCENT)
    }
}
