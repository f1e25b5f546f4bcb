//! Logical terms and atoms produced by SQL translation

use crate::identifier::{QuotedId, RelationId};
use crate::name::define_name;
use std::collections::HashSet;
use std::fmt;

define_name! {
    /// A logical variable bound to one physical column occurrence.
    pub struct Variable("variable");
}

/// A constant value appearing in a condition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    /// Integer literal
    Integer(i64),
    /// Non-integer numeric literal, kept as written
    Decimal(String),
    /// String literal
    String(String),
    /// Boolean literal
    Boolean(bool),
    /// SQL NULL
    Null,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Integer(i) => write!(f, "{}", i),
            Constant::Decimal(d) => f.write_str(d),
            Constant::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Constant::Boolean(true) => f.write_str("TRUE"),
            Constant::Boolean(false) => f.write_str("FALSE"),
            Constant::Null => f.write_str("NULL"),
        }
    }
}

/// Argument of an atom
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Variable reference
    Variable(Variable),
    /// Constant value
    Constant(Constant),
}

impl Term {
    /// The variable, if this term is one
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            Term::Constant(_) => None,
        }
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Variable(v)
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Term::Constant(c)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
        }
    }
}

/// Predicate symbol of a data atom
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    name: String,
    arity: usize,
}

impl Predicate {
    /// Create a predicate with a name and arity
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }

    /// Predicate symbol derived from a relation identifier
    pub fn for_relation(relation: &RelationId, arity: usize) -> Self {
        Self::new(relation.to_string(), arity)
    }

    /// Predicate name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of arguments
    pub fn arity(&self) -> usize {
        self.arity
    }
}

/// Binary comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl ComparisonOp {
    /// SQL spelling of the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::NotEq => "<>",
            ComparisonOp::Lt => "<",
            ComparisonOp::LtEq => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::GtEq => ">=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A logical atom: one conjunct of a translated query body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    /// Relation predicate applied to arguments, in declared column order
    Data { predicate: Predicate, args: Vec<Term> },
    /// Comparison between two terms
    Compare {
        op: ComparisonOp,
        left: Term,
        right: Term,
    },
    /// `term IS [NOT] NULL`
    IsNull { term: Term, negated: bool },
    /// Negation
    Not(Box<Atom>),
    /// Conjunction nested inside a disjunction or negation
    And(Vec<Atom>),
    /// Disjunction
    Or(Vec<Atom>),
    /// Boolean constant used as a condition
    Literal(bool),
}

impl Atom {
    /// Data atom for a relation
    pub fn data(predicate: Predicate, args: Vec<Term>) -> Self {
        Atom::Data { predicate, args }
    }

    /// Comparison atom
    pub fn compare(op: ComparisonOp, left: impl Into<Term>, right: impl Into<Term>) -> Self {
        Atom::Compare {
            op,
            left: left.into(),
            right: right.into(),
        }
    }

    /// Equality atom `left = right`
    pub fn equality(left: impl Into<Term>, right: impl Into<Term>) -> Self {
        Self::compare(ComparisonOp::Eq, left, right)
    }

    /// Combine atoms conjunctively; a single atom is returned as is.
    pub fn conjunction(mut atoms: Vec<Atom>) -> Self {
        if atoms.len() == 1 {
            atoms.remove(0)
        } else {
            Atom::And(atoms)
        }
    }

    /// Combine atoms disjunctively; a single atom is returned as is.
    pub fn disjunction(mut atoms: Vec<Atom>) -> Self {
        if atoms.len() == 1 {
            atoms.remove(0)
        } else {
            Atom::Or(atoms)
        }
    }

    /// All variables occurring in this atom, in order of appearance
    pub fn variables(&self) -> Vec<&Variable> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a Variable>) {
        match self {
            Atom::Data { args, .. } => out.extend(args.iter().filter_map(Term::as_variable)),
            Atom::Compare { left, right, .. } => {
                out.extend(left.as_variable());
                out.extend(right.as_variable());
            }
            Atom::IsNull { term, .. } => out.extend(term.as_variable()),
            Atom::Not(inner) => inner.collect_variables(out),
            Atom::And(atoms) | Atom::Or(atoms) => {
                for atom in atoms {
                    atom.collect_variables(out);
                }
            }
            Atom::Literal(_) => {}
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, atoms: &[Atom], sep: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, atom) in atoms.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", atom)?;
    }
    f.write_str(")")
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Data { predicate, args } => {
                write!(f, "{}(", predicate.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Atom::Compare { op, left, right } => write!(f, "{} {} {}", left, op, right),
            Atom::IsNull { term, negated } => {
                if *negated {
                    write!(f, "{} IS NOT NULL", term)
                } else {
                    write!(f, "{} IS NULL", term)
                }
            }
            Atom::Not(inner) => write!(f, "NOT {}", inner),
            Atom::And(atoms) => write_joined(f, atoms, " AND "),
            Atom::Or(atoms) => write_joined(f, atoms, " OR "),
            Atom::Literal(true) => f.write_str("TRUE"),
            Atom::Literal(false) => f.write_str("FALSE"),
        }
    }
}

/// Hands out fresh variables, one per column occurrence.
///
/// Names are `<column><n>` with a counter shared across the generator's
/// lifetime. Column names may themselves end in digits (`C1` at 1 and `C`
/// at 11 both spell `c11`), so issued names are remembered and a counter
/// value that would repeat one is skipped.
#[derive(Debug, Default)]
pub struct VariableGenerator {
    counter: usize,
    issued: HashSet<String>,
}

impl VariableGenerator {
    /// Create a generator starting from zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Next fresh variable, named after the column it is bound to
    pub fn fresh(&mut self, column: &QuotedId) -> Variable {
        let stem = column.as_str().to_lowercase();
        loop {
            self.counter += 1;
            let name = format!("{}{}", stem, self.counter);
            if self.issued.insert(name.clone()) {
                return Variable::new(name);
            }
            log::trace!("Variable name '{}' already issued, skipping", name);
        }
    }

    /// Number of variables handed out so far
    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}

#[cfg(test)]
#[path = "term_test.rs"]
mod tests;
