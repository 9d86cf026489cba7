//! Generic structs are rejected

use tagged_csv_derive::CsvRecord;

#[derive(CsvRecord)]
struct Wrapper<T> { #[col = "value"] value: T }

fn main() {}
