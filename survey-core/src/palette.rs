//! Categorical palettes for stacked segments.
//!
//! Colors are plain RGB so the core stays renderer-agnostic; a segment's
//! color is `palette[index % palette.len()]`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Named palettes selectable from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteName {
    /// The ten-color categorical palette familiar from plotting libraries.
    #[default]
    Tab10,
    /// Bright accents for dark terminals.
    Neon,
}

const TAB10: [Rgb; 10] = [
    Rgb(31, 119, 180),
    Rgb(255, 127, 14),
    Rgb(44, 160, 44),
    Rgb(214, 39, 40),
    Rgb(148, 103, 189),
    Rgb(140, 86, 75),
    Rgb(227, 119, 194),
    Rgb(127, 127, 127),
    Rgb(188, 189, 34),
    Rgb(23, 190, 207),
];

const NEON: [Rgb; 6] = [
    Rgb(0, 255, 255),
    Rgb(0, 255, 128),
    Rgb(255, 20, 147),
    Rgb(255, 140, 0),
    Rgb(147, 112, 219),
    Rgb(100, 149, 237),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    name: PaletteName,
    colors: &'static [Rgb],
}

impl Default for Palette {
    fn default() -> Self {
        Self::named(PaletteName::default())
    }
}

impl Palette {
    pub fn named(name: PaletteName) -> Self {
        let colors: &'static [Rgb] = match name {
            PaletteName::Tab10 => &TAB10,
            PaletteName::Neon => &NEON,
        };
        Self { name, colors }
    }

    pub fn name(&self) -> PaletteName {
        self.name
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color index for the `i`-th segment of a stack.
    pub fn index_for(&self, segment: usize) -> usize {
        segment % self.colors.len()
    }

    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }
}
