use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::query::{Expr, QMember, QTeam, TypedExpr};

/// Flat member + team view returned by member searches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct MemberTeamDto {
    pub member_id: Uuid,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<Uuid>,
    pub team_name: Option<String>,
}

impl MemberTeamDto {
    /// Select list labelled after the fields; needs a team join
    pub fn projection(member: &QMember, team: &QTeam) -> Vec<Expr> {
        vec![
            member.id.as_("member_id"),
            member.username.as_("username"),
            member.age.as_("age"),
            team.id.as_("team_id"),
            team.name.as_("team_name"),
        ]
    }
}

/// Positional variant of [`MemberTeamDto`]
///
/// Decoded by column index, so the select list order matters and labels
/// do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberTeamRecord(
    pub Uuid,
    pub Option<String>,
    pub i32,
    pub Option<Uuid>,
    pub Option<String>,
);

impl MemberTeamRecord {
    pub fn member_id(&self) -> Uuid {
        self.0
    }

    pub fn username(&self) -> Option<&str> {
        self.1.as_deref()
    }

    pub fn age(&self) -> i32 {
        self.2
    }

    pub fn team_id(&self) -> Option<Uuid> {
        self.3
    }

    pub fn team_name(&self) -> Option<&str> {
        self.4.as_deref()
    }
}

impl<'r> FromRow<'r, SqliteRow> for MemberTeamRecord {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(
            row.try_get(0)?,
            row.try_get(1)?,
            row.try_get(2)?,
            row.try_get(3)?,
            row.try_get(4)?,
        ))
    }
}

impl From<MemberTeamRecord> for MemberTeamDto {
    fn from(record: MemberTeamRecord) -> Self {
        Self {
            member_id: record.0,
            username: record.1,
            age: record.2,
            team_id: record.3,
            team_name: record.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_converts_field_by_field() {
        let member_id = Uuid::new_v4();
        let team_id = Uuid::new_v4();
        let record = MemberTeamRecord(
            member_id,
            Some("member1".to_string()),
            10,
            Some(team_id),
            Some("teamA".to_string()),
        );

        assert_eq!(record.username(), Some("member1"));
        assert_eq!(record.team_name(), Some("teamA"));

        let dto = MemberTeamDto::from(record);
        assert_eq!(dto.member_id, member_id);
        assert_eq!(dto.age, 10);
        assert_eq!(dto.team_id, Some(team_id));
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let dto = MemberTeamDto {
            member_id: Uuid::nil(),
            username: Some("member1".to_string()),
            age: 10,
            team_id: None,
            team_name: None,
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["username"], "member1");
        assert_eq!(json["age"], 10);
        assert!(json["team_name"].is_null());
    }
}
