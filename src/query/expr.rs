use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

use super::case::SimpleCaseBuilder;
use super::order::{Direction, OrderSpecifier};
use super::predicate::{CompareOp, Predicate};
use super::subquery::SubQuery;

/// Bound literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Uuid(Uuid),
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl Value {
    pub(crate) fn push_bind<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>) {
        match self {
            Value::Text(v) => qb.push_bind(v.clone()),
            Value::Int(v) => qb.push_bind(*v),
            Value::Uuid(v) => qb.push_bind(*v),
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Count,
    Sum,
    Avg,
    Max,
    Min,
}

impl Aggregate {
    fn sql(self) -> &'static str {
        match self {
            Aggregate::Count => "COUNT",
            Aggregate::Sum => "SUM",
            Aggregate::Avg => "AVG",
            Aggregate::Max => "MAX",
            Aggregate::Min => "MIN",
        }
    }
}

/// One `WHEN` arm of a CASE expression
#[derive(Debug, Clone, PartialEq)]
pub enum CaseArm {
    /// `WHEN <predicate> THEN <value>` (searched CASE)
    When(Predicate, Expr),
    /// `WHEN <operand> THEN <value>` (simple CASE)
    Match(Expr, Expr),
}

/// Untyped expression tree rendered into SQL
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column {
        alias: &'static str,
        name: &'static str,
    },
    Constant(Value),
    Aggregate(Aggregate, Box<Expr>),
    Concat(Vec<Expr>),
    CastText(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Case {
        subject: Option<Box<Expr>>,
        arms: Vec<CaseArm>,
        otherwise: Box<Expr>,
    },
    SubQuery(Box<SubQuery>),
    Alias(Box<Expr>, &'static str),
}

impl Expr {
    pub(crate) fn column(alias: &'static str, name: &'static str) -> Self {
        Expr::Column { alias, name }
    }

    /// Renders the expression for use inside a clause (aliases are dropped)
    pub(crate) fn push_sql<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>) {
        match self {
            Expr::Column { alias, name } => {
                qb.push(alias).push(".").push(name);
            }
            Expr::Constant(value) => value.push_bind(qb),
            Expr::Aggregate(aggregate, inner) => {
                qb.push(aggregate.sql()).push("(");
                inner.push_sql(qb);
                qb.push(")");
            }
            Expr::Concat(parts) => {
                qb.push("(");
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        qb.push(" || ");
                    }
                    part.push_sql(qb);
                }
                qb.push(")");
            }
            Expr::CastText(inner) => {
                qb.push("CAST(");
                inner.push_sql(qb);
                qb.push(" AS TEXT)");
            }
            Expr::Add(lhs, rhs) => {
                qb.push("(");
                lhs.push_sql(qb);
                qb.push(" + ");
                rhs.push_sql(qb);
                qb.push(")");
            }
            Expr::Case {
                subject,
                arms,
                otherwise,
            } => {
                qb.push("CASE");
                if let Some(subject) = subject {
                    qb.push(" ");
                    subject.push_sql(qb);
                }
                for arm in arms {
                    qb.push(" WHEN ");
                    match arm {
                        CaseArm::When(condition, then) => {
                            condition.push_sql(qb);
                            qb.push(" THEN ");
                            then.push_sql(qb);
                        }
                        CaseArm::Match(operand, then) => {
                            operand.push_sql(qb);
                            qb.push(" THEN ");
                            then.push_sql(qb);
                        }
                    }
                }
                qb.push(" ELSE ");
                otherwise.push_sql(qb);
                qb.push(" END");
            }
            Expr::SubQuery(subquery) => {
                qb.push("(");
                subquery.push_sql(qb);
                qb.push(")");
            }
            Expr::Alias(inner, _) => inner.push_sql(qb),
        }
    }

    /// Renders the expression as a select-list item
    ///
    /// Bare columns are labelled with their own name so row decoding by
    /// name does not depend on the driver's default column naming.
    pub(crate) fn push_select_item<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>) {
        match self {
            Expr::Alias(inner, alias) => {
                inner.push_sql(qb);
                qb.push(" AS ").push(alias);
            }
            Expr::Column { name, .. } => {
                self.push_sql(qb);
                qb.push(" AS ").push(name);
            }
            other => other.push_sql(qb),
        }
    }
}

/// Conversion between the typed wrappers and the untyped tree
pub trait TypedExpr: Sized {
    fn from_expr(expr: Expr) -> Self;

    fn expr(&self) -> &Expr;

    fn into_expr(self) -> Expr;

    /// Labels the expression in a select list
    fn as_(&self, alias: &'static str) -> Expr {
        Expr::Alias(Box::new(self.expr().clone()), alias)
    }

    fn asc(&self) -> OrderSpecifier {
        OrderSpecifier::new(self.expr().clone(), Direction::Asc)
    }

    fn desc(&self) -> OrderSpecifier {
        OrderSpecifier::new(self.expr().clone(), Direction::Desc)
    }

    fn is_null(&self) -> Predicate {
        Predicate::IsNull(self.expr().clone())
    }

    fn is_not_null(&self) -> Predicate {
        Predicate::IsNotNull(self.expr().clone())
    }

    fn count(&self) -> NumberExpr {
        NumberExpr(Expr::Aggregate(
            Aggregate::Count,
            Box::new(self.expr().clone()),
        ))
    }
}

macro_rules! typed_expr {
    ($name:ident) => {
        impl TypedExpr for $name {
            fn from_expr(expr: Expr) -> Self {
                $name(expr)
            }

            fn expr(&self) -> &Expr {
                &self.0
            }

            fn into_expr(self) -> Expr {
                self.0
            }
        }

        impl From<$name> for Expr {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Text-valued expression
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr(pub(crate) Expr);

/// Integer-valued expression
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr(pub(crate) Expr);

/// Identifier (UUID) expression
#[derive(Debug, Clone, PartialEq)]
pub struct IdExpr(pub(crate) Expr);

typed_expr!(StringExpr);
typed_expr!(NumberExpr);
typed_expr!(IdExpr);

impl From<&str> for StringExpr {
    fn from(v: &str) -> Self {
        StringExpr(Expr::Constant(v.into()))
    }
}

impl From<String> for StringExpr {
    fn from(v: String) -> Self {
        StringExpr(Expr::Constant(v.into()))
    }
}

impl From<i32> for NumberExpr {
    fn from(v: i32) -> Self {
        NumberExpr(Expr::Constant(v.into()))
    }
}

impl From<i64> for NumberExpr {
    fn from(v: i64) -> Self {
        NumberExpr(Expr::Constant(v.into()))
    }
}

impl From<SubQuery> for NumberExpr {
    fn from(v: SubQuery) -> Self {
        NumberExpr(Expr::SubQuery(Box::new(v)))
    }
}

impl From<Uuid> for IdExpr {
    fn from(v: Uuid) -> Self {
        IdExpr(Expr::Constant(v.into()))
    }
}

fn compare(lhs: &Expr, op: CompareOp, rhs: Expr) -> Predicate {
    Predicate::Compare(lhs.clone(), op, rhs)
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl StringExpr {
    pub fn eq(&self, rhs: impl Into<StringExpr>) -> Predicate {
        compare(&self.0, CompareOp::Eq, rhs.into().0)
    }

    pub fn ne(&self, rhs: impl Into<StringExpr>) -> Predicate {
        compare(&self.0, CompareOp::Ne, rhs.into().0)
    }

    /// Raw LIKE pattern; `%` and `_` keep their wildcard meaning
    pub fn like(&self, pattern: impl Into<String>) -> Predicate {
        Predicate::Like(self.0.clone(), pattern.into())
    }

    pub fn contains(&self, needle: &str) -> Predicate {
        Predicate::Like(self.0.clone(), format!("%{}%", escape_like(needle)))
    }

    pub fn starts_with(&self, prefix: &str) -> Predicate {
        Predicate::Like(self.0.clone(), format!("{}%", escape_like(prefix)))
    }

    pub fn in_list<I, S>(&self, values: I) -> Predicate
    where
        I: IntoIterator<Item = S>,
        S: Into<StringExpr>,
    {
        Predicate::In(
            self.0.clone(),
            values.into_iter().map(|v| v.into().0).collect(),
        )
    }

    pub fn concat(&self, rhs: impl Into<StringExpr>) -> StringExpr {
        let mut parts = match &self.0 {
            Expr::Concat(parts) => parts.clone(),
            other => vec![other.clone()],
        };
        parts.push(rhs.into().0);
        StringExpr(Expr::Concat(parts))
    }
}

impl NumberExpr {
    pub fn eq(&self, rhs: impl Into<NumberExpr>) -> Predicate {
        compare(&self.0, CompareOp::Eq, rhs.into().0)
    }

    pub fn ne(&self, rhs: impl Into<NumberExpr>) -> Predicate {
        compare(&self.0, CompareOp::Ne, rhs.into().0)
    }

    pub fn gt(&self, rhs: impl Into<NumberExpr>) -> Predicate {
        compare(&self.0, CompareOp::Gt, rhs.into().0)
    }

    /// Greater than or equal
    pub fn goe(&self, rhs: impl Into<NumberExpr>) -> Predicate {
        compare(&self.0, CompareOp::Goe, rhs.into().0)
    }

    pub fn lt(&self, rhs: impl Into<NumberExpr>) -> Predicate {
        compare(&self.0, CompareOp::Lt, rhs.into().0)
    }

    /// Less than or equal
    pub fn loe(&self, rhs: impl Into<NumberExpr>) -> Predicate {
        compare(&self.0, CompareOp::Loe, rhs.into().0)
    }

    /// Inclusive on both ends
    pub fn between(&self, low: impl Into<NumberExpr>, high: impl Into<NumberExpr>) -> Predicate {
        Predicate::Between(self.0.clone(), low.into().0, high.into().0)
    }

    pub fn in_list<I, N>(&self, values: I) -> Predicate
    where
        I: IntoIterator<Item = N>,
        N: Into<NumberExpr>,
    {
        Predicate::In(
            self.0.clone(),
            values.into_iter().map(|v| v.into().0).collect(),
        )
    }

    pub fn not_in<I, N>(&self, values: I) -> Predicate
    where
        I: IntoIterator<Item = N>,
        N: Into<NumberExpr>,
    {
        Predicate::NotIn(
            self.0.clone(),
            values.into_iter().map(|v| v.into().0).collect(),
        )
    }

    pub fn in_query(&self, subquery: SubQuery) -> Predicate {
        Predicate::InQuery(self.0.clone(), Box::new(subquery))
    }

    pub fn add(&self, rhs: impl Into<NumberExpr>) -> NumberExpr {
        NumberExpr(Expr::Add(Box::new(self.0.clone()), Box::new(rhs.into().0)))
    }

    pub fn sum(&self) -> NumberExpr {
        self.aggregate(Aggregate::Sum)
    }

    pub fn avg(&self) -> NumberExpr {
        self.aggregate(Aggregate::Avg)
    }

    pub fn max(&self) -> NumberExpr {
        self.aggregate(Aggregate::Max)
    }

    pub fn min(&self) -> NumberExpr {
        self.aggregate(Aggregate::Min)
    }

    /// The value rendered as text, for concatenation
    pub fn string_value(&self) -> StringExpr {
        StringExpr(Expr::CastText(Box::new(self.0.clone())))
    }

    /// Starts a simple `CASE <self> WHEN ...` expression
    pub fn cases<E: TypedExpr>(&self) -> SimpleCaseBuilder<E> {
        SimpleCaseBuilder::new(self.0.clone())
    }

    fn aggregate(&self, aggregate: Aggregate) -> NumberExpr {
        NumberExpr(Expr::Aggregate(aggregate, Box::new(self.0.clone())))
    }
}

impl IdExpr {
    pub fn eq(&self, rhs: impl Into<IdExpr>) -> Predicate {
        compare(&self.0, CompareOp::Eq, rhs.into().0)
    }

    pub fn ne(&self, rhs: impl Into<IdExpr>) -> Predicate {
        compare(&self.0, CompareOp::Ne, rhs.into().0)
    }
}

/// Factory for free-standing expressions
pub struct Expressions;

impl Expressions {
    /// A bound constant, e.g. an extra literal column in a projection
    pub fn constant(value: impl Into<Value>) -> Expr {
        Expr::Constant(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::path::QMember;

    fn render(expr: &Expr) -> String {
        let mut qb = QueryBuilder::<Sqlite>::new("");
        expr.push_sql(&mut qb);
        qb.sql().to_string()
    }

    fn render_item(expr: &Expr) -> String {
        let mut qb = QueryBuilder::<Sqlite>::new("");
        expr.push_select_item(&mut qb);
        qb.sql().to_string()
    }

    #[test]
    fn column_renders_with_alias() {
        let m = QMember::member();
        assert_eq!(render(m.username.expr()), "m.username");
    }

    #[test]
    fn select_item_labels_bare_columns() {
        let m = QMember::member();
        assert_eq!(render_item(m.age.expr()), "m.age AS age");
        assert_eq!(render_item(&m.username.as_("name")), "m.username AS name");
    }

    #[test]
    fn concat_flattens_chained_calls() {
        let m = QMember::member();
        let expr = m.username.concat("_").concat(m.age.string_value());

        assert_eq!(
            render(expr.expr()),
            "(m.username || ? || CAST(m.age AS TEXT))"
        );
    }

    #[test]
    fn aggregates_wrap_their_operand() {
        let m = QMember::member();
        assert_eq!(render(m.age.avg().expr()), "AVG(m.age)");
        assert_eq!(render(m.count().expr()), "COUNT(m.id)");
    }

    #[test]
    fn like_escapes_wildcards_for_contains() {
        let m = QMember::member();
        match m.username.contains("50%_off") {
            Predicate::Like(_, pattern) => assert_eq!(pattern, "%50\\%\\_off%"),
            other => panic!("unexpected predicate: {:?}", other),
        }
    }

    #[test]
    fn starts_with_appends_wildcard() {
        let m = QMember::member();
        match m.username.starts_with("member") {
            Predicate::Like(_, pattern) => assert_eq!(pattern, "member%"),
            other => panic!("unexpected predicate: {:?}", other),
        }
    }
}
