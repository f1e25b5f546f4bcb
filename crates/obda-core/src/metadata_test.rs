use super::*;
use crate::identifier::CaseFolding;
use tempfile::TempDir;

const CATALOG: &str = r#"
relations:
  - name: P
    columns: [A, B]
  - schema: sales
    name: orders
    columns:
      - id
      - name: amount
        type: decimal(10,2)
        nullable: false
      - "\"Note\""
"#;

fn loaded() -> DbMetadata {
    let mut metadata = DbMetadata::default();
    metadata.load_catalog_str(CATALOG).unwrap();
    metadata
}

#[test]
fn test_load_catalog_str() {
    let metadata = loaded();
    assert_eq!(metadata.len(), 2);

    let factory = QuotedIdFactory::default();
    let orders = metadata
        .get(&factory.create_relation_id(Some("sales"), "orders").unwrap())
        .unwrap();
    assert_eq!(orders.arity(), 3);
    let amount = orders.attribute(&QuotedId::new("AMOUNT")).unwrap();
    assert_eq!(amount.data_type.as_deref(), Some("decimal(10,2)"));
    assert!(!amount.nullable);
    assert!(orders.attribute(&QuotedId::new("Note")).is_some());
    assert!(orders.attribute(&QuotedId::new("NOTE")).is_none());
}

#[test]
fn test_columns_keep_declared_order() {
    let metadata = loaded();
    let p = metadata
        .get(&RelationId::table_only(QuotedId::new("P")))
        .unwrap();
    let names: Vec<&str> = p.attributes().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_bare_table_name_fallback() {
    let metadata = loaded();
    let bare = RelationId::table_only(QuotedId::new("ORDERS"));
    let def = metadata.get(&bare).unwrap();
    assert_eq!(def.id().to_string(), "SALES.ORDERS");
}

#[test]
fn test_bare_table_name_ambiguous_across_schemas() {
    let mut metadata = loaded();
    metadata
        .load_catalog_str("relations:\n  - schema: archive\n    name: orders\n    columns: [id]\n")
        .unwrap();
    let bare = RelationId::table_only(QuotedId::new("ORDERS"));
    assert!(metadata.get(&bare).is_none());
}

#[test]
fn test_wrong_schema_not_found() {
    let metadata = loaded();
    let factory = QuotedIdFactory::default();
    let id = factory.create_relation_id(Some("other"), "orders").unwrap();
    assert!(metadata.get(&id).is_none());
}

#[test]
fn test_duplicate_relation_rejected() {
    let mut metadata = loaded();
    let result = metadata.load_catalog_str("relations:\n  - name: p\n    columns: [x]\n");
    assert!(matches!(result, Err(CoreError::DuplicateRelation { .. })));
}

#[test]
fn test_duplicate_column_rejected() {
    let mut metadata = DbMetadata::default();
    let result = metadata.load_catalog_str("relations:\n  - name: t\n    columns: [a, A]\n");
    assert!(matches!(result, Err(CoreError::DuplicateAttribute { .. })));
}

#[test]
fn test_case_folding_applies_to_catalog() {
    let mut metadata = DbMetadata::new(QuotedIdFactory::new(CaseFolding::Lower));
    metadata
        .load_catalog_str("relations:\n  - name: Orders\n    columns: [Id]\n")
        .unwrap();
    let def = metadata
        .get(&RelationId::table_only(QuotedId::new("orders")))
        .unwrap();
    assert_eq!(def.attributes()[0].id, "id");
}

#[test]
fn test_load_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("catalog.yml"), CATALOG).unwrap();
    let config: Config = serde_yaml::from_str("name: t").unwrap();
    let metadata = DbMetadata::load(&config, dir.path()).unwrap();
    assert_eq!(metadata.len(), 2);
}

#[test]
fn test_missing_catalog_file() {
    let dir = TempDir::new().unwrap();
    let config: Config = serde_yaml::from_str("name: t").unwrap();
    let result = DbMetadata::load(&config, dir.path());
    assert!(matches!(result, Err(CoreError::CatalogNotFound { .. })));
}
