use super::*;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

fn expr(sql: &str) -> Expr {
    Parser::new(&GenericDialect {})
        .try_with_sql(sql)
        .unwrap()
        .parse_expr()
        .unwrap()
}

fn leaf(relation: RelationId, columns: &[(&str, &str)]) -> RelationalExpression {
    let columns: Vec<(QuotedId, obda_core::Variable)> = columns
        .iter()
        .map(|(c, v)| (QuotedId::new(*c), obda_core::Variable::new(*v)))
        .collect();
    RelationalExpression::from_base_relation(&relation, &columns)
}

/// EMP(ID, DEPT) x DEPT(ID, NAME)
fn source() -> RelationalExpression {
    let emp = leaf(
        RelationId::table_only(QuotedId::new("EMP")),
        &[("ID", "id1"), ("DEPT", "dept2")],
    );
    let dept = leaf(
        RelationId::table_only(QuotedId::new("DEPT")),
        &[("ID", "id3"), ("NAME", "name4")],
    );
    RelationalExpression::cross_join(&emp, &dept).unwrap()
}

fn translate(sql: &str) -> JoinResult<Vec<String>> {
    let condition = SqlCondition::new(expr(sql), QuotedIdFactory::default());
    let atoms = condition.translate(&source())?;
    Ok(atoms.iter().map(|a| a.to_string()).collect())
}

#[test]
fn test_qualified_equality() {
    assert_eq!(translate("emp.dept = dept.id").unwrap(), vec!["dept2 = id3"]);
}

#[test]
fn test_top_level_and_is_split() {
    assert_eq!(
        translate("emp.dept = dept.id AND name IS NOT NULL").unwrap(),
        vec!["dept2 = id3", "name4 IS NOT NULL"]
    );
    assert_eq!(
        translate("(emp.id > 10 AND emp.id <= 20)").unwrap(),
        vec!["id1 > 10", "id1 <= 20"]
    );
}

#[test]
fn test_disjunction_keeps_nested_structure() {
    assert_eq!(
        translate("emp.id = 1 OR emp.id BETWEEN 5 AND 7").unwrap(),
        vec!["(id1 = 1 OR (id1 >= 5 AND id1 <= 7))"]
    );
    assert_eq!(
        translate("emp.id NOT BETWEEN 5 AND 7").unwrap(),
        vec!["(id1 < 5 OR id1 > 7)"]
    );
}

#[test]
fn test_in_list() {
    assert_eq!(
        translate("emp.dept IN (1, 2)").unwrap(),
        vec!["(dept2 = 1 OR dept2 = 2)"]
    );
    assert_eq!(
        translate("emp.dept NOT IN (1, 2)").unwrap(),
        vec!["(dept2 <> 1 AND dept2 <> 2)"]
    );
    assert_eq!(translate("emp.dept IN (3)").unwrap(), vec!["dept2 = 3"]);
}

#[test]
fn test_literals_and_negation() {
    assert_eq!(
        translate("NOT name = 'R&D'").unwrap(),
        vec!["NOT name4 = 'R&D'"]
    );
    assert_eq!(translate("emp.id = -5").unwrap(), vec!["id1 = -5"]);
    assert_eq!(translate("emp.id <> 2.5").unwrap(), vec!["id1 <> 2.5"]);
    assert_eq!(translate("name IS NULL").unwrap(), vec!["name4 IS NULL"]);
    assert_eq!(translate("TRUE").unwrap(), vec!["TRUE"]);
}

#[test]
fn test_ambiguous_unqualified_reference() {
    assert_eq!(
        translate("id = 1").unwrap_err(),
        JoinError::AmbiguousReference {
            reference: "ID".to_string()
        }
    );
}

#[test]
fn test_unresolved_reference() {
    assert_eq!(
        translate("emp.salary > 0").unwrap_err(),
        JoinError::UnresolvedAttribute {
            reference: "EMP.SALARY".to_string()
        }
    );
    // A delimited qualifier keeps its case and misses the folded relation name
    assert_eq!(
        translate("\"emp\".dept = 1").unwrap_err(),
        JoinError::UnresolvedAttribute {
            reference: "emp.DEPT".to_string()
        }
    );
}

#[test]
fn test_unsupported_constructs() {
    assert!(matches!(
        translate("emp.id + 1 = 2"),
        Err(JoinError::UnsupportedCondition(_))
    ));
    assert!(matches!(
        translate("name LIKE 'R%'"),
        Err(JoinError::UnsupportedCondition(_))
    ));
    assert!(matches!(
        translate("emp.dept"),
        Err(JoinError::UnsupportedCondition(_))
    ));
}

#[test]
fn test_schema_qualified_reference() {
    let hr_emp = leaf(
        RelationId::new(Some(QuotedId::new("HR")), QuotedId::new("EMP")),
        &[("ID", "id1")],
    );
    let condition = SqlCondition::new(expr("hr.emp.id = 7"), QuotedIdFactory::default());
    let atoms = condition.translate(&hr_emp).unwrap();
    assert_eq!(atoms, vec![Atom::compare(
        ComparisonOp::Eq,
        obda_core::Variable::new("id1"),
        Constant::Integer(7)
    )]);
}
