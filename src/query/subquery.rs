use sqlx::{QueryBuilder, Sqlite};

use super::condition::Condition;
use super::expr::Expr;
use super::path::QMember;
use super::predicate::Predicate;

/// Scalar or list sub-query over the member table
///
/// Uses its own alias so it can be correlated with, or kept apart from,
/// the outer query.
///
/// # Example
/// ```
/// use roster_api::query::{QMember, SubQuery};
///
/// let m = QMember::member();
/// let sub = QMember::new("ms");
///
/// // members with the maximum age
/// let oldest = m.age.eq(SubQuery::select(sub.age.max()).from(&sub));
/// # let _ = oldest;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SubQuery {
    select: Expr,
    alias: &'static str,
    filter: Condition,
}

/// A sub-query that still needs its `FROM`
#[derive(Debug, Clone)]
pub struct SubQuerySelect {
    select: Expr,
}

impl SubQuery {
    pub fn select(expr: impl Into<Expr>) -> SubQuerySelect {
        SubQuerySelect {
            select: expr.into(),
        }
    }

    pub fn filter(mut self, predicate: impl Into<Option<Predicate>>) -> Self {
        self.filter = self.filter.and(predicate);
        self
    }

    pub(crate) fn push_sql<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>) {
        qb.push("SELECT ");
        self.select.push_sql(qb);
        qb.push(" FROM member ").push(self.alias);
        self.filter.push_clause(qb, " WHERE ");
    }
}

impl SubQuerySelect {
    pub fn from(self, member: &QMember) -> SubQuery {
        SubQuery {
            select: self.select,
            alias: member.alias(),
            filter: Condition::new(),
        }
    }
}
