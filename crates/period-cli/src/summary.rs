use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use period_core::{Designator, Period};

use crate::types::{AddToResult, DurationResult, EncodeResult};

const FIELDS: [Designator; 6] = [
    Designator::Year,
    Designator::Month,
    Designator::Day,
    Designator::Hour,
    Designator::Minute,
    Designator::Second,
];

pub fn print_period(period: &Period) {
    println!("{}", period_table(period));
    println!("{period}");
}

pub fn print_duration(result: &DurationResult) {
    let mut table = period_table(&result.period);
    table.add_row(vec![label_cell("Elapsed"), Cell::new(format_elapsed(result))]);
    table.add_row(vec![label_cell("Exact"), flag_cell(result.precise)]);
    println!("{table}");
}

pub fn print_add_to(result: &AddToResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Start"),
        header_cell("Period"),
        header_cell("End"),
        header_cell("Exact"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(result.start),
        Cell::new(result.period),
        Cell::new(result.end).add_attribute(Attribute::Bold),
        flag_cell(result.precise),
    ]);
    println!("{table}");
    println!("{}", result.end);
}

pub fn print_encoding(result: &EncodeResult) {
    let mut table = period_table(&result.period);
    table.add_row(vec![label_cell("Bytes"), Cell::new(spaced_hex(&result.bytes))]);
    println!("{table}");
}

/// Field table of a period: one row per field, then the owner of the fraction.
pub fn period_table(period: &Period) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (name, value) in field_rows(period) {
        let cell = if value == "0" { dim_cell(value) } else { Cell::new(value) };
        table.add_row(vec![label_cell(&name), cell]);
    }
    let owner = period.fraction_owner();
    let owner_cell = if owner == Designator::NoFraction {
        dim_cell("-")
    } else {
        Cell::new(owner.field_name())
    };
    table.add_row(vec![label_cell("Fraction"), owner_cell]);
    table
}

/// Field names with their signed decimal values.
pub fn field_rows(period: &Period) -> Vec<(String, String)> {
    FIELDS
        .iter()
        .zip(period.tenths())
        .map(|(designator, tenths)| (capitalise(designator.field_name()), decimal(tenths)))
        .collect()
}

fn decimal(tenths: i16) -> String {
    let sign = if tenths < 0 { "-" } else { "" };
    let magnitude = i32::from(tenths).abs();
    match magnitude % 10 {
        0 => format!("{sign}{}", magnitude / 10),
        digit => format!("{sign}{}.{digit}", magnitude / 10),
    }
}

fn format_elapsed(result: &DurationResult) -> String {
    let elapsed = result.elapsed;
    let sign = if elapsed < chrono::TimeDelta::zero() { "-" } else { "" };
    let elapsed = elapsed.abs();
    let millis = elapsed.subsec_nanos() / 1_000_000;
    format!("{sign}{}.{millis:03}s", elapsed.num_seconds())
}

/// Lowercase hex, one space between bytes.
fn spaced_hex(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    encoded
        .as_bytes()
        .chunks(2)
        .filter_map(|pair| std::str::from_utf8(pair).ok())
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalise(name: &str) -> String {
    let mut chars = name.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn flag_cell(exact: bool) -> Cell {
    if exact {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("approximate").fg(Color::Yellow)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use insta::assert_snapshot;

    use super::*;

    fn rows(text: &str) -> String {
        field_rows(&Period::parse(text).unwrap())
            .into_iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_field_rows() {
        assert_snapshot!(
            rows("P1Y2M3DT4H5M6.5S"),
            @"Years=1 Months=2 Days=3 Hours=4 Minutes=5 Seconds=6.5"
        );
        assert_snapshot!(
            rows("-PT0.5H"),
            @"Years=0 Months=0 Days=0 Hours=-0.5 Minutes=0 Seconds=0"
        );
    }

    #[test]
    fn test_elapsed_text() {
        let result = |elapsed| DurationResult {
            period: Period::ZERO,
            elapsed,
            precise: true,
        };
        assert_eq!(
            format_elapsed(&result(TimeDelta::try_milliseconds(1_500).unwrap())),
            "1.500s"
        );
        assert_eq!(
            format_elapsed(&result(TimeDelta::try_seconds(-90).unwrap())),
            "-90.000s"
        );
    }

    #[test]
    fn test_spaced_hex() {
        assert_eq!(spaced_hex(&[0, 15, 255]), "00 0f ff");
        assert_eq!(
            spaced_hex(&Period::parse("PT1.5S").unwrap().to_bytes()),
            "00 00 00 00 00 00 00 00 00 00 00 0f 05 07"
        );
    }

    #[test]
    fn test_period_table_lists_every_field() {
        let table = period_table(&Period::parse("P1D").unwrap());
        assert_eq!(table.row_count(), 7);
    }
}
