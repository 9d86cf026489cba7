//! A field takes at most one #[col]

use tagged_csv_derive::CsvRecord;

#[derive(CsvRecord)]
struct Person {
    #[col = "name"]
    #[col = "full_name"]
    name: String,
}

fn main() {}
