use std::marker::PhantomData;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::condition::Condition;
use super::expr::Expr;
use super::order::OrderSpecifier;
use super::path::{MEMBER_ALIAS, TEAM_ALIAS};
use super::predicate::Predicate;
use super::results::{Page, QueryResults};
use super::rows::MemberWithTeam;
use crate::domain::member::Member;
use crate::domain::repositories::{RepositoryError, RepositoryResult};

pub(crate) const MEMBER_COLUMNS: &str = "m.id AS member_id, m.username AS member_username, \
     m.age AS member_age, m.team_id AS member_team_id";

const MEMBER_TEAM_COLUMNS: &str = "m.id AS member_id, m.username AS member_username, \
     m.age AS member_age, m.team_id AS member_team_id, t.id AS team_id, t.name AS team_name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Cross,
}

/// What the team table is joined through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinTarget {
    /// Along the association: `m.team_id = t.id`, plus any `on` predicate
    MemberTeam,
    /// Unrelated join; only the `on` predicate links the rows
    Team,
}

#[derive(Debug, Clone)]
struct Join {
    kind: JoinKind,
    target: JoinTarget,
    on: Condition,
}

impl Join {
    fn push_sql<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>) {
        qb.push(match self.kind {
            JoinKind::Inner => " INNER JOIN team ",
            JoinKind::Left => " LEFT JOIN team ",
            JoinKind::Cross => " CROSS JOIN team ",
        });
        qb.push(TEAM_ALIAS);

        match self.target {
            JoinTarget::MemberTeam => {
                qb.push(" ON ")
                    .push(MEMBER_ALIAS)
                    .push(".team_id = ")
                    .push(TEAM_ALIAS)
                    .push(".id");
                self.on.push_clause(qb, " AND ");
            }
            JoinTarget::Team => {
                if !self.on.is_unconstrained() {
                    self.on.push_clause(qb, " ON ");
                } else if self.kind != JoinKind::Cross {
                    qb.push(" ON 1 = 1");
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Selection {
    Columns(&'static str),
    Exprs(Vec<Expr>),
}

#[derive(Debug, Clone, Copy)]
enum Window {
    Paged,
    Top(i64),
    Count,
}

/// A `SELECT ... FROM member m` query producing rows of type `T`
///
/// Entry points are [`select_from_member`], [`select_member_and_team`],
/// [`select`] and [`select_value`]. Terminal operations take the pool, so a
/// query can be built once and executed several times.
///
/// # Example
/// ```no_run
/// use roster_api::query::{select_from_member, QMember, TypedExpr};
/// # async fn example(pool: sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let m = QMember::member();
/// let members = select_from_member()
///     .filter(m.age.goe(18))
///     .order_by(m.username.desc())
///     .offset(1)
///     .limit(2)
///     .fetch(&pool)
///     .await?;
/// # let _ = members;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Query<T> {
    selection: Selection,
    distinct: bool,
    joins: Vec<Join>,
    filter: Condition,
    group_by: Vec<Expr>,
    having: Condition,
    order: Vec<OrderSpecifier>,
    offset: Option<i64>,
    limit: Option<i64>,
    _row: PhantomData<fn() -> T>,
}

/// `SELECT <member columns> FROM member m`
pub fn select_from_member() -> Query<Member> {
    Query::with_selection(Selection::Columns(MEMBER_COLUMNS))
}

/// Member and team columns side by side; add a team join before fetching
pub fn select_member_and_team() -> Query<MemberWithTeam> {
    Query::with_selection(Selection::Columns(MEMBER_TEAM_COLUMNS))
}

/// Arbitrary projection decoded into `T` (a tuple, decoded by position,
/// or a `FromRow` DTO, decoded by column label)
pub fn select<T>(items: impl IntoIterator<Item = Expr>) -> Query<T> {
    Query::with_selection(Selection::Exprs(items.into_iter().collect()))
}

/// Single-column projection; read it back with [`Query::fetch_values`]
pub fn select_value<V>(item: impl Into<Expr>) -> Query<(V,)> {
    Query::with_selection(Selection::Exprs(vec![item.into()]))
}

impl<T> Query<T> {
    fn with_selection(selection: Selection) -> Self {
        Self {
            selection,
            distinct: false,
            joins: Vec::new(),
            filter: Condition::new(),
            group_by: Vec::new(),
            having: Condition::new(),
            order: Vec::new(),
            offset: None,
            limit: None,
            _row: PhantomData,
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn join(mut self, kind: JoinKind, target: JoinTarget) -> Self {
        self.joins.push(Join {
            kind,
            target,
            on: Condition::new(),
        });
        self
    }

    pub fn inner_join_team(self) -> Self {
        self.join(JoinKind::Inner, JoinTarget::MemberTeam)
    }

    pub fn left_join_team(self) -> Self {
        self.join(JoinKind::Left, JoinTarget::MemberTeam)
    }

    /// Adds a join condition to the most recent join
    pub fn on(mut self, predicate: impl Into<Option<Predicate>>) -> Self {
        match self.joins.last_mut() {
            Some(join) => join.on = std::mem::take(&mut join.on).and(predicate),
            None => tracing::warn!("on() called without a join; condition ignored"),
        }
        self
    }

    /// Adds a `WHERE` predicate; `None` adds nothing
    pub fn filter(mut self, predicate: impl Into<Option<Predicate>>) -> Self {
        self.filter = self.filter.and(predicate);
        self
    }

    /// Adds every present predicate; absent ones are skipped
    pub fn filter_all<I>(self, predicates: I) -> Self
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        predicates
            .into_iter()
            .fold(self, |query, predicate| query.filter(predicate))
    }

    pub fn filter_condition(self, condition: Condition) -> Self {
        self.filter(condition.into_predicate())
    }

    pub fn group_by(mut self, expr: impl Into<Expr>) -> Self {
        self.group_by.push(expr.into());
        self
    }

    pub fn having(mut self, predicate: impl Into<Option<Predicate>>) -> Self {
        self.having = self.having.and(predicate);
        self
    }

    pub fn order_by(mut self, order: OrderSpecifier) -> Self {
        self.order.push(order);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset.max(0));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit.max(0));
        self
    }

    pub fn page(self, page: Page) -> Self {
        self.offset(page.offset).limit(page.limit)
    }

    /// The SQL this query executes, with `?` placeholders
    pub fn to_sql(&self) -> String {
        let mut qb = QueryBuilder::<Sqlite>::new("");
        self.push_sql(&mut qb, Window::Paged);
        qb.sql().to_string()
    }

    /// Number of rows the query matches, ignoring order, offset and limit
    pub async fn fetch_count(&self, pool: &SqlitePool) -> RepositoryResult<i64> {
        let mut qb = QueryBuilder::new("");
        self.push_sql(&mut qb, Window::Count);
        tracing::debug!(sql = qb.sql(), "Executing count query");

        let (count,): (i64,) = qb.build_query_as().fetch_one(pool).await?;
        Ok(count)
    }

    fn push_sql<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>, window: Window) {
        if let Window::Count = window {
            qb.push("SELECT COUNT(*) FROM (");
        }

        qb.push("SELECT ");
        if self.distinct {
            qb.push("DISTINCT ");
        }
        match &self.selection {
            Selection::Columns(columns) => {
                qb.push(columns);
            }
            Selection::Exprs(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        qb.push(", ");
                    }
                    item.push_select_item(qb);
                }
            }
        }

        qb.push(" FROM member ").push(MEMBER_ALIAS);
        for join in &self.joins {
            join.push_sql(qb);
        }

        self.filter.push_clause(qb, " WHERE ");

        if !self.group_by.is_empty() {
            qb.push(" GROUP BY ");
            for (i, expr) in self.group_by.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                expr.push_sql(qb);
            }
        }
        self.having.push_clause(qb, " HAVING ");

        if let Window::Count = window {
            qb.push(")");
            return;
        }

        if !self.order.is_empty() {
            qb.push(" ORDER BY ");
            for (i, order) in self.order.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                order.push_sql(qb);
            }
        }

        let limit = match window {
            Window::Top(n) => Some(self.limit.map_or(n, |limit| limit.min(n))),
            _ => self.limit,
        };
        // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded.
        if limit.is_some() || self.offset.is_some() {
            qb.push(" LIMIT ").push_bind(limit.unwrap_or(-1));
            if let Some(offset) = self.offset {
                qb.push(" OFFSET ").push_bind(offset);
            }
        }
    }
}

impl<T> Query<T>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    /// All rows inside the offset/limit window
    pub async fn fetch(&self, pool: &SqlitePool) -> RepositoryResult<Vec<T>> {
        self.fetch_window(pool, Window::Paged).await
    }

    /// Zero or one row; more than one is an error
    pub async fn fetch_one(&self, pool: &SqlitePool) -> RepositoryResult<Option<T>> {
        let mut rows = self.fetch_window(pool, Window::Top(2)).await?;
        if rows.len() > 1 {
            return Err(RepositoryError::NonUniqueResult);
        }
        Ok(rows.pop())
    }

    /// The first row, if any
    pub async fn fetch_first(&self, pool: &SqlitePool) -> RepositoryResult<Option<T>> {
        let mut rows = self.fetch_window(pool, Window::Top(1)).await?;
        Ok(rows.pop())
    }

    /// The paged rows plus the unpaged total
    pub async fn fetch_results(&self, pool: &SqlitePool) -> RepositoryResult<QueryResults<T>> {
        let total = self.fetch_count(pool).await?;
        let results = if total == 0 {
            Vec::new()
        } else {
            self.fetch(pool).await?
        };

        Ok(QueryResults {
            results,
            total,
            offset: self.offset.unwrap_or(0),
            limit: self.limit,
        })
    }

    async fn fetch_window(&self, pool: &SqlitePool, window: Window) -> RepositoryResult<Vec<T>> {
        let mut qb = QueryBuilder::new("");
        self.push_sql(&mut qb, window);
        tracing::debug!(sql = qb.sql(), "Executing query");

        let rows = qb.build_query_as::<T>().fetch_all(pool).await?;
        Ok(rows)
    }
}

impl<V> Query<(V,)>
where
    (V,): for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    /// Rows of a single-column projection, unwrapped
    pub async fn fetch_values(&self, pool: &SqlitePool) -> RepositoryResult<Vec<V>> {
        let rows = self.fetch(pool).await?;
        Ok(rows.into_iter().map(|(value,)| value).collect())
    }
}
