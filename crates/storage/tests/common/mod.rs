#![allow(dead_code)]

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use storage::Store;
use storage::models::{CartLine, Match, MatchStatus, User};
use storage::repository::carts::CartRepository;
use storage::repository::matches::MatchRepository;
use storage::repository::users::UserRepository;

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("valid timestamp")
}

/// A fixed "now" shared by the integration suites.
pub fn now() -> NaiveDateTime {
    ts("2026-05-20 12:00:00")
}

pub fn match_record(title: &str, max_players: i32, kickoff_at: NaiveDateTime) -> Match {
    Match {
        match_id: Uuid::new_v4(),
        title: title.to_string(),
        kickoff_at,
        max_players,
        status: MatchStatus::Available,
        price: Some(Decimal::new(1200, 2)),
        participants: Vec::new(),
        created_at: ts("2026-05-01 09:00:00"),
        version: 0,
    }
}

/// A match far enough out that the 24-hour imminence rule never
/// applies.
pub fn distant_match(title: &str, max_players: i32) -> Match {
    match_record(title, max_players, ts("2026-07-01 18:00:00"))
}

pub fn seed_match(store: &Store, m: Match) -> Uuid {
    let match_id = m.match_id;
    MatchRepository::new(store).insert(m).expect("seed match");
    match_id
}

pub fn seed_user(store: &Store, name: &str) -> Uuid {
    let user = User {
        user_id: Uuid::new_v4(),
        name: name.to_string(),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        created_at: ts("2026-04-01 08:00:00"),
    };
    let user_id = user.user_id;
    UserRepository::new(store).insert(user).expect("seed user");
    user_id
}

pub fn stage_cart(store: &Store, user_id: Uuid, lines: &[(Uuid, i32)]) {
    let lines = lines
        .iter()
        .map(|(match_id, quantity)| CartLine {
            match_id: *match_id,
            quantity: *quantity,
        })
        .collect();
    CartRepository::new(store).set_lines(user_id, lines);
}

pub fn occupancy(store: &Store, match_id: Uuid) -> i32 {
    MatchRepository::new(store)
        .find_by_id(match_id)
        .expect("match exists")
        .occupancy()
}
