//! Unions cannot derive CsvRecord

use tagged_csv_derive::CsvRecord;

#[derive(CsvRecord)]
union Bits { int: u32, float: f32 }

fn main() {}
