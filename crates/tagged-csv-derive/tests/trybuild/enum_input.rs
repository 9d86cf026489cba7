//! Enums cannot derive CsvRecord

use tagged_csv_derive::CsvRecord;

#[derive(CsvRecord)]
enum Shape { Circle, Square }

fn main() {}
