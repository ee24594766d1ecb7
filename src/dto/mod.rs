// Read-only projection carriers
// Built fresh per row; none of them has an identity of its own

pub mod member_dto;
pub mod member_team_dto;
pub mod search_condition;
pub mod user_dto;

pub use member_dto::MemberDto;
pub use member_team_dto::{MemberTeamDto, MemberTeamRecord};
pub use search_condition::MemberSearchCondition;
pub use user_dto::UserDto;
