//! Unit tests for the verification table definition

use crate::database::repositories::CREATE_VERIFICATION_TABLE;

fn column_definition(name: &str) -> &'static str {
    CREATE_VERIFICATION_TABLE
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with(name))
        .unwrap()
}

#[test]
fn test_key_columns_compare_exactly() {
    // Default utf8mb4 collations ignore case, which would merge distinct keys
    for column in ["email ", "code "] {
        let definition = column_definition(column);
        assert!(definition.contains("COLLATE utf8mb4_bin"), "{definition}");
    }
}

#[test]
fn test_email_is_primary_key() {
    assert!(CREATE_VERIFICATION_TABLE.contains("PRIMARY KEY (email)"));
}
