use super::*;
use std::collections::HashSet;

#[test]
fn test_unquoted_folds_to_upper_by_default() {
    let factory = QuotedIdFactory::default();
    assert_eq!(factory.create_id("orders", false).unwrap(), "ORDERS");
    assert_eq!(factory.parse_id("Orders").unwrap(), "ORDERS");
}

#[test]
fn test_quoted_keeps_spelling() {
    let factory = QuotedIdFactory::default();
    assert_eq!(factory.create_id("Orders", true).unwrap(), "Orders");
    assert_eq!(factory.parse_id("\"Orders\"").unwrap(), "Orders");
    assert_eq!(factory.parse_id("\"say \"\"hi\"\"\"").unwrap(), "say \"hi\"");
}

#[test]
fn test_lower_and_preserve_folding() {
    let lower = QuotedIdFactory::new(CaseFolding::Lower);
    assert_eq!(lower.parse_id("Orders").unwrap(), "orders");

    let preserve = QuotedIdFactory::new(CaseFolding::Preserve);
    assert_eq!(preserve.parse_id("Orders").unwrap(), "Orders");
}

#[test]
fn test_empty_identifier_rejected() {
    let factory = QuotedIdFactory::default();
    assert!(matches!(
        factory.create_id("", false),
        Err(CoreError::InvalidIdentifier { .. })
    ));
    assert!(factory.parse_id("\"\"").is_err());
}

#[test]
fn test_relation_id_structural_equality() {
    let factory = QuotedIdFactory::default();
    let a = factory.create_relation_id(Some("sales"), "orders").unwrap();
    let b = RelationId::new(Some(QuotedId::new("SALES")), QuotedId::new("ORDERS"));
    assert_eq!(a, b);

    let mut set = HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
}

#[test]
fn test_relation_id_display() {
    let factory = QuotedIdFactory::default();
    let qualified = factory.create_relation_id(Some("sales"), "orders").unwrap();
    assert_eq!(qualified.to_string(), "SALES.ORDERS");

    let bare = factory.create_relation_id(None, "orders").unwrap();
    assert_eq!(bare.to_string(), "ORDERS");
    assert!(!bare.has_schema());
}

#[test]
fn test_case_folding_deserialize() {
    let folding: CaseFolding = serde_yaml::from_str("lower").unwrap();
    assert_eq!(folding, CaseFolding::Lower);
}
