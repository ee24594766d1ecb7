use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::domain::member::Member;
use crate::domain::team::Team;

// Decodes the `member_*` labelled columns of a member select.
impl<'r> FromRow<'r, SqliteRow> for Member {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Member::from_persistence(
            row.try_get("member_id")?,
            row.try_get("member_username")?,
            row.try_get("member_age")?,
            row.try_get("member_team_id")?,
        ))
    }
}

/// A member row together with the joined team, if the join matched
///
/// The team carries no member back-references; it is a projection, not a
/// loaded aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberWithTeam {
    pub member: Member,
    pub team: Option<Team>,
}

impl<'r> FromRow<'r, SqliteRow> for MemberWithTeam {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let member = Member::from_row(row)?;
        let team_id: Option<Uuid> = row.try_get("team_id")?;
        let team_name: Option<String> = row.try_get("team_name")?;

        let team = match (team_id, team_name) {
            (Some(id), Some(name)) => Some(Team::from_persistence(id, name, Vec::new())),
            _ => None,
        };

        Ok(Self { member, team })
    }
}
