//! Column names must be string literals

use tagged_csv_derive::CsvRecord;

#[derive(CsvRecord)]
struct Person {
    #[col = 5]
    name: String,
}

fn main() {}
