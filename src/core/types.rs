use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declares a closed category enum with a fixed enumeration order.
///
/// Each variant carries its display label plus the lowercase spellings
/// accepted when parsing external input.
macro_rules! category_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal [$($alias:literal),+]),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub fn index(self) -> usize {
                self as usize
            }

            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                let normalized = input.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    $($($alias)|+ => Ok(Self::$variant),)+
                    _ => Err(format!("unknown {} category `{input}`", $kind)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

category_enum!(
    Sex, "sex" {
        Female => "Female" ["female"],
        Male => "Male" ["male"],
    }
);

category_enum!(
    Smoker, "smoker" {
        Yes => "Yes" ["yes"],
        No => "No" ["no"],
    }
);

category_enum!(
    Day, "day" {
        Thu => "Thur" ["thu", "thur", "thursday"],
        Fri => "Fri" ["fri", "friday"],
        Sat => "Sat" ["sat", "saturday"],
        Sun => "Sun" ["sun", "sunday"],
    }
);

category_enum!(
    /// Meal service of a record (`time` column).
    MealTime, "time" {
        Lunch => "Lunch" ["lunch"],
        Dinner => "Dinner" ["dinner"],
    }
);

/// Categorical column usable as a hue or x dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Sex,
    Smoker,
    Day,
    Time,
}

impl Dimension {
    pub const ALL: [Self; 4] = [Self::Sex, Self::Smoker, Self::Day, Self::Time];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sex => "sex",
            Self::Smoker => "smoker",
            Self::Day => "day",
            Self::Time => "time",
        }
    }

    /// Category labels in fixed enumeration order.
    #[must_use]
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Self::Sex => &["Female", "Male"],
            Self::Smoker => &["Yes", "No"],
            Self::Day => &["Thur", "Fri", "Sat", "Sun"],
            Self::Time => &["Lunch", "Dinner"],
        }
    }

    #[must_use]
    pub fn category_count(self) -> usize {
        self.labels().len()
    }

    /// Histogram subplot grid used when this dimension splits the view.
    #[must_use]
    pub fn subplot_grid(self) -> SubplotGrid {
        match self {
            Self::Sex | Self::Smoker | Self::Time => SubplotGrid::new(1, 2),
            Self::Day => SubplotGrid::new(2, 2),
        }
    }

    #[must_use]
    pub fn capitalized(self) -> String {
        capitalize(self.name())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dimension| dimension.name().eq_ignore_ascii_case(input.trim()))
            .ok_or_else(|| format!("unknown dimension `{input}`"))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric column that estimators and the boundary calculator read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    TotalBill,
    Tip,
}

impl NumericColumn {
    pub const ALL: [Self; 2] = [Self::TotalBill, Self::Tip];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TotalBill => "total_bill",
            Self::Tip => "tip",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TotalBill => "Total Bill",
            Self::Tip => "Tip",
        }
    }

    #[must_use]
    pub fn capitalized(self) -> String {
        capitalize(self.name())
    }
}

impl FromStr for NumericColumn {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.name().eq_ignore_ascii_case(input.trim()))
            .ok_or_else(|| format!("unknown numeric column `{input}`"))
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Subplot grid shape in rows x columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubplotGrid {
    pub rows: usize,
    pub cols: usize,
}

impl SubplotGrid {
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.rows * self.cols
    }

    /// Row-major cell for the `index`-th subplot, 1-based like the axes it maps to.
    #[must_use]
    pub fn cell(self, index: usize) -> Option<(usize, usize)> {
        if self.cols == 0 || index >= self.cell_count() {
            return None;
        }
        Some((index / self.cols + 1, index % self.cols + 1))
    }
}

/// One immutable row of the tips dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub total_bill: f64,
    pub tip: f64,
    pub sex: Sex,
    pub smoker: Smoker,
    pub day: Day,
    pub time: MealTime,
    pub size: u32,
}

impl Record {
    #[must_use]
    pub fn value(&self, column: NumericColumn) -> f64 {
        match column {
            NumericColumn::TotalBill => self.total_bill,
            NumericColumn::Tip => self.tip,
        }
    }

    /// Enumeration index of this record's category within `dimension`.
    #[must_use]
    pub fn category_index(&self, dimension: Dimension) -> usize {
        match dimension {
            Dimension::Sex => self.sex.index(),
            Dimension::Smoker => self.smoker.index(),
            Dimension::Day => self.day.index(),
            Dimension::Time => self.time.index(),
        }
    }

    #[must_use]
    pub fn category_label(&self, dimension: Dimension) -> &'static str {
        match dimension {
            Dimension::Sex => self.sex.label(),
            Dimension::Smoker => self.smoker.label(),
            Dimension::Day => self.day.label(),
            Dimension::Time => self.time.label(),
        }
    }
}

/// Upper-cases the first character and lower-cases the rest (`total_bill` -> `Total_bill`).
#[must_use]
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_follow_enum_order() {
        for dimension in Dimension::ALL {
            assert_eq!(dimension.labels().len(), dimension.category_count());
        }
        assert_eq!(Day::ALL.iter().map(|d| d.label()).collect::<Vec<_>>(), Dimension::Day.labels());
        assert_eq!(Sex::Male.index(), 1);
        assert_eq!(MealTime::Dinner.index(), 1);
    }

    #[test]
    fn category_parsing_accepts_dataset_spellings() {
        assert_eq!("Thur".parse::<Day>(), Ok(Day::Thu));
        assert_eq!("thu".parse::<Day>(), Ok(Day::Thu));
        assert_eq!(" Female ".parse::<Sex>(), Ok(Sex::Female));
        assert!("Mon".parse::<Day>().is_err());
    }

    #[test]
    fn capitalize_matches_first_letter_rule() {
        assert_eq!(capitalize("total_bill"), "Total_bill");
        assert_eq!(capitalize("TIP"), "Tip");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn subplot_cells_fill_row_major() {
        let grid = Dimension::Day.subplot_grid();
        assert_eq!(grid.cell(0), Some((1, 1)));
        assert_eq!(grid.cell(1), Some((1, 2)));
        assert_eq!(grid.cell(2), Some((2, 1)));
        assert_eq!(grid.cell(3), Some((2, 2)));
        assert_eq!(grid.cell(4), None);
    }
}
