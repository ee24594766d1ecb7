use thiserror::Error;
use uuid::Uuid;

/// Errors raised while maintaining the in-memory member/team graph
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Member not found: {0}")]
    MemberNotFound(Uuid),

    #[error("Team not found: {0}")]
    TeamNotFound(Uuid),

    #[error("Member {member_id} references team {team_id} which is not staged")]
    UnstagedTeam { member_id: Uuid, team_id: Uuid },
}

pub type DomainResult<T> = Result<T, DomainError>;
