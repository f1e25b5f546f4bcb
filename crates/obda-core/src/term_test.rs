use super::*;

fn var(name: &str) -> Variable {
    Variable::new(name)
}

#[test]
fn test_data_atom_display() {
    let relation = RelationId::table_only(QuotedId::new("P"));
    let atom = Atom::data(
        Predicate::for_relation(&relation, 2),
        vec![var("x").into(), var("y").into()],
    );
    assert_eq!(atom.to_string(), "P(x, y)");
}

#[test]
fn test_comparison_display() {
    assert_eq!(Atom::equality(var("x"), var("u")).to_string(), "x = u");
    let atom = Atom::compare(ComparisonOp::GtEq, var("x"), Constant::Integer(3));
    assert_eq!(atom.to_string(), "x >= 3");
    let atom = Atom::compare(
        ComparisonOp::NotEq,
        var("x"),
        Constant::String("it's".to_string()),
    );
    assert_eq!(atom.to_string(), "x <> 'it''s'");
}

#[test]
fn test_nested_display() {
    let atom = Atom::Not(Box::new(Atom::Or(vec![
        Atom::IsNull {
            term: var("x").into(),
            negated: false,
        },
        Atom::Literal(false),
    ])));
    assert_eq!(atom.to_string(), "NOT (x IS NULL OR FALSE)");
}

#[test]
fn test_conjunction_of_one_is_identity() {
    let eq = Atom::equality(var("x"), var("u"));
    assert_eq!(Atom::conjunction(vec![eq.clone()]), eq);
    assert_eq!(Atom::disjunction(vec![eq.clone()]), eq);
    assert!(matches!(
        Atom::conjunction(vec![eq.clone(), eq]),
        Atom::And(v) if v.len() == 2
    ));
}

#[test]
fn test_variables_collects_nested() {
    let atom = Atom::Or(vec![
        Atom::equality(var("x"), var("u")),
        Atom::IsNull {
            term: var("y").into(),
            negated: true,
        },
        Atom::equality(var("v"), Constant::Null),
    ]);
    let names: Vec<&str> = atom.variables().into_iter().map(|v| v.as_str()).collect();
    assert_eq!(names, vec!["x", "u", "y", "v"]);
}

#[test]
fn test_atoms_structural_equality() {
    let a = Atom::equality(var("x"), var("u"));
    let b = Atom::equality(Variable::new("x"), Variable::new("u"));
    assert_eq!(a, b);
    assert_ne!(a, Atom::equality(var("u"), var("x")));
}

#[test]
fn test_variable_generator_is_fresh() {
    let mut generator = VariableGenerator::new();
    let a = QuotedId::new("A");
    let first = generator.fresh(&a);
    let second = generator.fresh(&a);
    assert_eq!(first, "a1");
    assert_eq!(second, "a2");
    assert_ne!(first, second);
    assert_eq!(generator.issued(), 2);
}

#[test]
fn test_generator_never_repeats_a_name_across_columns() {
    let mut generator = VariableGenerator::new();
    let first = generator.fresh(&QuotedId::new("C1"));
    assert_eq!(first, "c11");
    for n in 2..=10 {
        generator.fresh(&QuotedId::new(&format!("D{}", n)));
    }

    // `C` at counter 11 would spell `c11` again
    let second = generator.fresh(&QuotedId::new("C"));
    assert_ne!(first, second);
    assert_eq!(second, "c12");
    assert_eq!(generator.issued(), 11);

    let third = generator.fresh(&QuotedId::new("C"));
    assert_eq!(third, "c13");
}
