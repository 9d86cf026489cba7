//! Two fields cannot share a column

use tagged_csv_derive::CsvRecord;

#[derive(CsvRecord)]
struct Person {
    #[col = "name"]
    first: String,
    #[col = "name"]
    last: String,
}

fn main() {}
