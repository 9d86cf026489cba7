//! File-backed reads and writes.

use tagged_csv::{
    read_records, read_records_from, read_records_from_source, read_records_with, write_records,
    write_records_to, write_records_to_sink, Config, CsvRecord, LocalFile, MappingError,
};
use tempfile::TempDir;

#[derive(Debug, Default, Clone, PartialEq, CsvRecord)]
struct Account {
    #[col = "id"]
    id: i64,
    #[col = "owner"]
    owner: String,
    #[col = "balance"]
    balance: f64,
    #[col = "frozen"]
    frozen: bool,
    session: Option<String>,
}

fn accounts() -> Vec<Account> {
    vec![
        Account {
            id: 1,
            owner: "Ann".to_string(),
            balance: 120.0,
            frozen: false,
            session: None,
        },
        Account {
            id: 2,
            owner: "Smith, Bob".to_string(),
            balance: -5.0,
            frozen: true,
            session: None,
        },
    ]
}

#[test]
fn test_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("accounts.csv");

    write_records(&path, &accounts()).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "id,owner,balance,frozen\n1,Ann,120,false\n2,\"Smith, Bob\",-5,true\n"
    );

    let read: Vec<Account> = read_records(&path).unwrap();
    assert_eq!(read, accounts());
}

#[test]
fn test_read_with_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("accounts.csv");
    std::fs::write(
        &path,
        "frozen,note,balance,owner,id\nT,x,1.5e2,Ann,1\n0,y,-5,\"Smith, Bob\",2\n",
    )
    .unwrap();

    let config = Config::default()
        .with_parallel_threshold(1)
        .with_buffer_size(8);
    let read: Vec<Account> = read_records_with(&path, &config).unwrap();
    assert_eq!(read.len(), 2);
    assert_eq!(read[0].balance, 150.0);
    assert!(read[0].frozen);
    assert_eq!(read[1].owner, "Smith, Bob");
}

#[test]
fn test_read_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.csv");
    let err = read_records::<Account>(&path).unwrap_err();
    assert!(matches!(err, MappingError::SourceRead(_)));
    assert!(err.to_string().starts_with("read file error:"));
}

#[test]
fn test_read_from_reader() {
    let data = "id,owner,balance,frozen\n7,Cy,0,False\n";
    let read: Vec<Account> = read_records_from(data.as_bytes()).unwrap();
    assert_eq!(read[0].id, 7);
    assert!(!read[0].frozen);
}

#[test]
fn test_read_malformed_csv() {
    let data: &[u8] = b"id,owner,balance,frozen\n1,\xff,0,true\n";
    let err = read_records_from::<Account, _>(data).unwrap_err();
    assert!(matches!(err, MappingError::SourceRead(_)));
}

#[test]
fn test_write_to_writer() {
    let mut out = Vec::new();
    write_records_to(&mut out, &accounts()[..1]).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "id,owner,balance,frozen\n1,Ann,120,false\n"
    );
}

#[test]
fn test_write_empty_record_set() {
    let mut out = Vec::new();
    write_records_to::<Account, _>(&mut out, &[]).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "id,owner,balance,frozen\n");
}

#[test]
fn test_write_failure_leaves_destination() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("accounts.csv");
    let err = write_records(&path, &accounts()).unwrap_err();
    assert!(matches!(err, MappingError::SinkWrite(_)));
    assert!(!path.exists());
}

#[test]
fn test_source_and_sink() {
    let temp_dir = TempDir::new().unwrap();
    let file = LocalFile::new(temp_dir.path().join("accounts.csv"));

    write_records_to_sink(&file, &accounts()).unwrap();
    let read: Vec<Account> = read_records_from_source(&file, &Config::default()).unwrap();
    assert_eq!(read, accounts());
}
