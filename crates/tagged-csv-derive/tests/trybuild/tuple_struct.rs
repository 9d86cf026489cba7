//! Tuple structs have no field names to annotate

use tagged_csv_derive::CsvRecord;

#[derive(CsvRecord)]
struct Pair(String, bool);

fn main() {}
