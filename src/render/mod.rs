mod frame;
mod palette;
mod primitives;

pub use frame::{
    AxisSpec, CategoryTrace, ChartLayout, ChartSpec, GroupMode, HistogramTrace, HoverMode,
    LegendPosition, Margins, PieTrace, ScatterTrace, SubplotCell, SubplotSpec, TableCell,
    TableColumn, TableTrace, Trace,
};
pub use palette::ColorPalette;
pub use primitives::{CellStyle, Color, Outline, TextAlign};
