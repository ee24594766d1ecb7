use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::condition::Condition;
use super::expr::{Expr, NumberExpr, StringExpr, TypedExpr};
use super::path::{QMember, MEMBER_ALIAS};
use super::predicate::Predicate;
use crate::domain::repositories::RepositoryResult;

/// Bulk `UPDATE member` statement
///
/// Runs directly against the database. Entities already loaded into a
/// [`Roster`](crate::domain::roster::Roster) keep their old values until
/// the roster is cleared and the rows are read again.
#[derive(Debug, Clone)]
pub struct UpdateClause {
    sets: Vec<(&'static str, Expr)>,
    filter: Condition,
}

/// Bulk `DELETE FROM member` statement
#[derive(Debug, Clone)]
pub struct DeleteClause {
    filter: Condition,
}

pub fn update_member() -> UpdateClause {
    UpdateClause {
        sets: Vec::new(),
        filter: Condition::new(),
    }
}

pub fn delete_member() -> DeleteClause {
    DeleteClause {
        filter: Condition::new(),
    }
}

impl UpdateClause {
    pub fn set_username(mut self, username: impl Into<StringExpr>) -> Self {
        self.sets.push(("username", username.into().into_expr()));
        self
    }

    pub fn set_age(mut self, age: impl Into<NumberExpr>) -> Self {
        self.sets.push(("age", age.into().into_expr()));
        self
    }

    /// `age = age + delta`; a negative delta subtracts
    pub fn add_age(mut self, delta: i32) -> Self {
        let age = QMember::member().age.add(delta);
        self.sets.push(("age", age.into_expr()));
        self
    }

    pub fn filter(mut self, predicate: impl Into<Option<Predicate>>) -> Self {
        self.filter = self.filter.and(predicate);
        self
    }

    pub fn to_sql(&self) -> String {
        let mut qb = QueryBuilder::<Sqlite>::new("");
        self.push_sql(&mut qb);
        qb.sql().to_string()
    }

    /// Returns the number of rows changed
    pub async fn execute(&self, pool: &SqlitePool) -> RepositoryResult<u64> {
        if self.sets.is_empty() {
            tracing::warn!("Bulk update without assignments; nothing to execute");
            return Ok(0);
        }

        let mut qb = QueryBuilder::new("");
        self.push_sql(&mut qb);
        tracing::debug!(sql = qb.sql(), "Executing bulk update");

        let result = qb.build().execute(pool).await?;
        tracing::info!(rows = result.rows_affected(), "Bulk update applied");
        Ok(result.rows_affected())
    }

    fn push_sql<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>) {
        qb.push("UPDATE member AS ").push(MEMBER_ALIAS).push(" SET ");
        for (i, (column, value)) in self.sets.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(column).push(" = ");
            value.push_sql(qb);
        }
        self.filter.push_clause(qb, " WHERE ");
    }
}

impl DeleteClause {
    pub fn filter(mut self, predicate: impl Into<Option<Predicate>>) -> Self {
        self.filter = self.filter.and(predicate);
        self
    }

    pub fn to_sql(&self) -> String {
        let mut qb = QueryBuilder::<Sqlite>::new("");
        self.push_sql(&mut qb);
        qb.sql().to_string()
    }

    /// Returns the number of rows removed
    pub async fn execute(&self, pool: &SqlitePool) -> RepositoryResult<u64> {
        let mut qb = QueryBuilder::new("");
        self.push_sql(&mut qb);
        tracing::debug!(sql = qb.sql(), "Executing bulk delete");

        let result = qb.build().execute(pool).await?;
        tracing::info!(rows = result.rows_affected(), "Bulk delete applied");
        Ok(result.rows_affected())
    }

    fn push_sql<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>) {
        qb.push("DELETE FROM member AS ").push(MEMBER_ALIAS);
        self.filter.push_clause(qb, " WHERE ");
    }
}
