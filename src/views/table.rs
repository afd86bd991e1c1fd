use ordered_float::OrderedFloat;

use crate::api::{ControlId, ControlSnapshot, DashboardConfig, ValueRange};
use crate::core::{Dataset, Record};
use crate::error::DashboardResult;
use crate::render::{
    CellStyle, ChartLayout, ChartSpec, Color, TableCell, TableColumn, TableTrace, TextAlign, Trace,
};

use super::ViewOutput;

type CellReader = fn(&Record) -> TableCell;

const COLUMN_READERS: [(&str, CellReader); 7] = [
    ("total_bill", |record| TableCell::Number(record.total_bill)),
    ("tip", |record| TableCell::Number(record.tip)),
    ("sex", |record| TableCell::Text(record.sex.label().to_owned())),
    ("smoker", |record| TableCell::Text(record.smoker.label().to_owned())),
    ("day", |record| TableCell::Text(record.day.label().to_owned())),
    ("time", |record| TableCell::Text(record.time.label().to_owned())),
    ("size", |record| TableCell::Integer(record.size)),
];

/// Column order of the tabular view.
pub const TABLE_COLUMNS: [&str; 7] = {
    let mut names = [""; 7];
    let mut index = 0;
    while index < names.len() {
        names[index] = COLUMN_READERS[index].0;
        index += 1;
    }
    names
};

const HEADER_STYLE: CellStyle = CellStyle {
    fill: Color::rgb(0xa1, 0xc3, 0xd1),
    font_size: 18.0,
    height: 30.0,
    align: TextAlign::Center,
};

const BODY_STYLE: CellStyle = CellStyle {
    fill: Color::rgb(0xed, 0xfa, 0xff),
    font_size: 16.0,
    height: 30.0,
    align: TextAlign::Right,
};

/// Rows with `total_bill` inside `range` (inclusive), stably sorted by `total_bill`.
#[must_use]
pub fn filter_by_total_bill(dataset: &Dataset, range: ValueRange) -> Vec<Record> {
    let mut rows: Vec<Record> = dataset
        .records()
        .iter()
        .filter(|record| range.contains(record.total_bill))
        .copied()
        .collect();
    rows.sort_by_key(|record| OrderedFloat(record.total_bill));
    rows
}

fn table_columns(rows: &[Record]) -> Vec<TableColumn> {
    COLUMN_READERS
        .iter()
        .map(|&(name, read)| TableColumn {
            name: name.to_owned(),
            cells: rows.iter().map(read).collect(),
        })
        .collect()
}

pub fn table_view(
    dataset: &Dataset,
    controls: &ControlSnapshot,
    config: &DashboardConfig,
) -> DashboardResult<ViewOutput> {
    let range = controls.range(ControlId::TotalBillRange)?;
    let rows = filter_by_total_bill(dataset, range);

    let layout = ChartLayout {
        margin: Some(config.layout.margins),
        height: Some(config.layout.table_height),
        ..ChartLayout::default()
    };
    let chart = ChartSpec::new(layout).with_trace(Trace::Table(TableTrace {
        header_style: HEADER_STYLE,
        cell_style: BODY_STYLE,
        columns: table_columns(&rows),
    }));

    Ok(ViewOutput {
        chart,
        texts: vec![
            format!("Min Total Bill: {} - Max Total Bill: {}", range.lo, range.hi),
            format!("Total row: {}", rows.len()),
        ],
    })
}
