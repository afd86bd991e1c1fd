use crate::core::Dimension;
use crate::error::{DashboardError, DashboardResult};
use crate::render::Color;

const SEX: [Color; 2] = [Color::rgb(0xff, 0x3f, 0xd8), Color::rgb(0x42, 0x90, 0xff)];
const SMOKER: [Color; 2] = [Color::rgb(0xed, 0x28, 0x28), Color::rgb(0x32, 0xfc, 0x7c)];
const DAY: [Color; 4] = [
    Color::rgb(0x3d, 0xe8, 0x00),
    Color::rgb(0x00, 0xc9, 0xed),
    Color::rgb(0xdd, 0xff, 0x00),
    Color::rgb(0xff, 0x88, 0x00),
];
const TIME: [Color; 2] = [Color::rgb(0xf2, 0xe2, 0x00), Color::rgb(0x00, 0x59, 0xa3)];

/// Static per-dimension colors, indexed by category enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorPalette;

impl ColorPalette {
    #[must_use]
    pub fn colors(self, dimension: Dimension) -> &'static [Color] {
        match dimension {
            Dimension::Sex => &SEX,
            Dimension::Smoker => &SMOKER,
            Dimension::Day => &DAY,
            Dimension::Time => &TIME,
        }
    }

    /// Color of the `category_index`-th category of `dimension`.
    pub fn color(self, dimension: Dimension, category_index: usize) -> DashboardResult<Color> {
        self.colors(dimension)
            .get(category_index)
            .copied()
            .ok_or_else(|| {
                DashboardError::InvalidData(format!(
                    "palette for `{dimension}` has no color at index {category_index}"
                ))
            })
    }

    /// Every dimension must have at least as many colors as categories.
    pub fn validate(self) -> DashboardResult<()> {
        for dimension in Dimension::ALL {
            let available = self.colors(dimension).len();
            let needed = dimension.category_count();
            if available < needed {
                return Err(DashboardError::InvalidData(format!(
                    "palette for `{dimension}` has {available} colors for {needed} categories"
                )));
            }
        }
        Ok(())
    }
}
