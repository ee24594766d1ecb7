#![allow(dead_code)]

use roster_api::domain::member::Member;
use roster_api::domain::roster::Roster;
use roster_api::domain::team::Team;
use roster_api::infrastructure::database;
use roster_api::infrastructure::repositories::{SqliteMemberRepository, SqliteTeamRepository};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Ids of the standard fixture
pub struct Fixture {
    pub team_a: Uuid,
    pub team_b: Uuid,
    pub members: [Uuid; 4],
}

/// Set up a fresh in-memory database
pub async fn setup_test_db() -> SqlitePool {
    database::connect_in_memory()
        .await
        .expect("Failed to open in-memory database")
}

/// Stages TeamA/TeamB with member1..member4 (ages 10, 20, 10, 20) and flushes
pub async fn seed(pool: &SqlitePool) -> (Roster, Fixture) {
    let mut team_a = Team::new("TeamA");
    let mut team_b = Team::new("TeamB");

    let member1 = Member::with_team("member1", 10, &mut team_a);
    let member2 = Member::with_team("member2", 20, &mut team_a);
    let member3 = Member::with_team("member3", 10, &mut team_b);
    let member4 = Member::with_team("member4", 20, &mut team_b);

    let mut roster = Roster::new();
    let team_a = roster.persist_team(team_a);
    let team_b = roster.persist_team(team_b);
    let mut members = [Uuid::nil(); 4];
    for (slot, member) in members
        .iter_mut()
        .zip([member1, member2, member3, member4])
    {
        *slot = roster.persist_member(member).expect("team is staged");
    }

    let team_repo = SqliteTeamRepository::new(pool.clone());
    let member_repo = SqliteMemberRepository::new(pool.clone());
    roster
        .flush(&team_repo, &member_repo)
        .await
        .expect("Failed to flush roster");

    (
        roster,
        Fixture {
            team_a,
            team_b,
            members,
        },
    )
}

pub async fn seeded_db() -> (SqlitePool, Fixture) {
    let pool = setup_test_db().await;
    let (_, fixture) = seed(&pool).await;
    (pool, fixture)
}
