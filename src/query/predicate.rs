use sqlx::{QueryBuilder, Sqlite};

use super::expr::Expr;
use super::subquery::SubQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Goe,
    Lt,
    Loe,
}

impl CompareOp {
    fn sql(self) -> &'static str {
        match self {
            CompareOp::Eq => " = ",
            CompareOp::Ne => " <> ",
            CompareOp::Gt => " > ",
            CompareOp::Goe => " >= ",
            CompareOp::Lt => " < ",
            CompareOp::Loe => " <= ",
        }
    }
}

/// Boolean condition evaluated per row
///
/// Built from the typed paths (`m.username.eq("member1")`) and combined
/// with [`Predicate::and`] / [`Predicate::or`]. Both combinators accept an
/// `Option<Predicate>` and treat `None` as "no constraint", so optional
/// search parameters can be chained without checks.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare(Expr, CompareOp, Expr),
    Between(Expr, Expr, Expr),
    In(Expr, Vec<Expr>),
    NotIn(Expr, Vec<Expr>),
    InQuery(Expr, Box<SubQuery>),
    Like(Expr, String),
    IsNull(Expr),
    IsNotNull(Expr),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    /// Conjunction; a `None` operand leaves `self` unchanged
    pub fn and(self, other: impl Into<Option<Predicate>>) -> Predicate {
        match other.into() {
            None => self,
            Some(other) => {
                let mut parts = match self {
                    Predicate::And(parts) => parts,
                    single => vec![single],
                };
                match other {
                    Predicate::And(more) => parts.extend(more),
                    single => parts.push(single),
                }
                Predicate::And(parts)
            }
        }
    }

    /// Disjunction; a `None` operand leaves `self` unchanged
    pub fn or(self, other: impl Into<Option<Predicate>>) -> Predicate {
        match other.into() {
            None => self,
            Some(other) => {
                let mut parts = match self {
                    Predicate::Or(parts) => parts,
                    single => vec![single],
                };
                match other {
                    Predicate::Or(more) => parts.extend(more),
                    single => parts.push(single),
                }
                Predicate::Or(parts)
            }
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        match self {
            Predicate::Not(inner) => *inner,
            other => Predicate::Not(Box::new(other)),
        }
    }

    pub(crate) fn push_sql<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>) {
        match self {
            Predicate::Compare(lhs, op, rhs) => {
                lhs.push_sql(qb);
                qb.push(op.sql());
                rhs.push_sql(qb);
            }
            Predicate::Between(expr, low, high) => {
                expr.push_sql(qb);
                qb.push(" BETWEEN ");
                low.push_sql(qb);
                qb.push(" AND ");
                high.push_sql(qb);
            }
            Predicate::In(expr, values) => push_in_list(qb, expr, values, false),
            Predicate::NotIn(expr, values) => push_in_list(qb, expr, values, true),
            Predicate::InQuery(expr, subquery) => {
                expr.push_sql(qb);
                qb.push(" IN (");
                subquery.push_sql(qb);
                qb.push(")");
            }
            Predicate::Like(expr, pattern) => {
                expr.push_sql(qb);
                qb.push(" LIKE ");
                qb.push_bind(pattern.clone());
                qb.push(" ESCAPE '\\'");
            }
            Predicate::IsNull(expr) => {
                expr.push_sql(qb);
                qb.push(" IS NULL");
            }
            Predicate::IsNotNull(expr) => {
                expr.push_sql(qb);
                qb.push(" IS NOT NULL");
            }
            Predicate::And(parts) => push_joined(qb, parts, " AND "),
            Predicate::Or(parts) => push_joined(qb, parts, " OR "),
            Predicate::Not(inner) => {
                qb.push("NOT (");
                inner.push_sql(qb);
                qb.push(")");
            }
        }
    }
}

fn push_joined<'args>(qb: &mut QueryBuilder<'args, Sqlite>, parts: &[Predicate], separator: &str) {
    qb.push("(");
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        part.push_sql(qb);
    }
    qb.push(")");
}

fn push_in_list<'args>(
    qb: &mut QueryBuilder<'args, Sqlite>,
    expr: &Expr,
    values: &[Expr],
    negated: bool,
) {
    // SQLite rejects `IN ()`; an empty list is simply false (or true when negated).
    if values.is_empty() {
        qb.push(if negated { "1 = 1" } else { "1 = 0" });
        return;
    }

    expr.push_sql(qb);
    qb.push(if negated { " NOT IN (" } else { " IN (" });
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        value.push_sql(qb);
    }
    qb.push(")");
}
