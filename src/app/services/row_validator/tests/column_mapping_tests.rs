//! Tests for header-based column lookup

use crate::app::models::Row;
use crate::app::services::row_validator::ColumnMapping;

#[test]
fn test_analyze_header() {
    let header = Row::from_fields(["Name", " Age ", "INCOME", "City", "email"]);
    let mapping = ColumnMapping::analyze(&header);

    assert_eq!(mapping.len(), 5);
    assert_eq!(mapping.get_index("Age"), Some(1));
    assert_eq!(mapping.get_index("Income"), Some(2));
    assert_eq!(mapping.get_index("Email"), Some(4));
    assert!(mapping.has_column("city"));
    assert!(!mapping.has_column("Phone"));
}

#[test]
fn test_first_duplicate_wins_and_blank_names_skipped() {
    let header = Row::from_fields(["Age", "", "age", "  "]);
    let mapping = ColumnMapping::analyze(&header);

    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.get_index("AGE"), Some(0));
}

#[test]
fn test_empty_header() {
    let mapping = ColumnMapping::analyze(&Row::from_fields(Vec::<String>::new()));
    assert!(mapping.is_empty());
}
