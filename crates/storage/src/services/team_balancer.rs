use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::Store;
use crate::error::{Result, StorageError};
use crate::models::{PlayerPosition, Team};
use crate::repository::matches::MatchRepository;
use crate::repository::teams::TeamRepository;

/// Pool a participant was assigned from: their position, or the
/// shuffled no-position pool.
type PoolKey = Option<PlayerPosition>;

/// Splits a match's participants into two balanced teams and persists
/// them, replacing any previous teams for the match wholesale.
///
/// Per position the participants are sorted by skill (descending,
/// unknown skill last, stable) and dealt out alternately; the
/// no-position pool is shuffled with the caller's RNG before being
/// dealt. The shuffle is the only source of non-determinism, so a
/// seeded RNG reproduces team membership exactly.
pub fn generate_teams<R: Rng + ?Sized>(
    store: &Store,
    rng: &mut R,
    match_id: Uuid,
) -> Result<Vec<Team>> {
    let m = MatchRepository::new(store).find_by_id(match_id)?;
    if m.participants.len() < 2 {
        return Err(StorageError::BusinessRule(format!(
            "match \"{}\" needs at least 2 participants to form teams, has {}",
            m.title,
            m.participants.len()
        )));
    }

    let team_repo = TeamRepository::new(store);
    team_repo.delete_for_match(match_id);

    let mut side_a: Vec<(Uuid, PoolKey)> = Vec::new();
    let mut side_b: Vec<(Uuid, PoolKey)> = Vec::new();

    for position in PlayerPosition::ALL {
        let mut pool: Vec<_> = m
            .participants
            .iter()
            .filter(|p| p.position == Some(position))
            .collect();
        pool.sort_by_key(|p| std::cmp::Reverse(p.skill_level.unwrap_or(i16::MIN)));
        for (i, p) in pool.iter().enumerate() {
            let entry = (p.participant_id, Some(position));
            if i % 2 == 0 {
                side_a.push(entry);
            } else {
                side_b.push(entry);
            }
        }
    }

    let mut unpositioned: Vec<_> = m
        .participants
        .iter()
        .filter(|p| p.position.is_none())
        .collect();
    unpositioned.shuffle(rng);
    for (i, p) in unpositioned.iter().enumerate() {
        let entry = (p.participant_id, None);
        if i % 2 == 0 {
            side_a.push(entry);
        } else {
            side_b.push(entry);
        }
    }

    rebalance(&mut side_a, &mut side_b);

    let teams = vec![
        build_team(match_id, "Team A", &side_a),
        build_team(match_id, "Team B", &side_b),
    ];
    team_repo.replace_for_match(match_id, teams.clone());
    Ok(teams)
}

pub fn get_teams(store: &Store, match_id: Uuid) -> Result<Vec<Team>> {
    MatchRepository::new(store).find_by_id(match_id)?;
    Ok(TeamRepository::new(store).find_by_match(match_id))
}

pub fn delete_teams(store: &Store, match_id: Uuid) -> Result<()> {
    MatchRepository::new(store).find_by_id(match_id)?;
    TeamRepository::new(store).delete_for_match(match_id);
    Ok(())
}

/// Because each pool is dealt starting with side A, odd pools drift
/// the totals apart. Moves members from the larger side until the
/// sizes differ by at most one, always picking from a pool the larger
/// side has more of, so the per-pool split stays within one as well.
fn rebalance(side_a: &mut Vec<(Uuid, PoolKey)>, side_b: &mut Vec<(Uuid, PoolKey)>) {
    loop {
        let diff = side_a.len() as i64 - side_b.len() as i64;
        if diff > 1 {
            let index = pick_movable(side_a, side_b);
            let moved = side_a.remove(index);
            side_b.push(moved);
        } else if diff < -1 {
            let index = pick_movable(side_b, side_a);
            let moved = side_b.remove(index);
            side_a.push(moved);
        } else {
            break;
        }
    }
}

fn pick_movable(larger: &[(Uuid, PoolKey)], smaller: &[(Uuid, PoolKey)]) -> usize {
    let count = |side: &[(Uuid, PoolKey)], pool: PoolKey| {
        side.iter().filter(|(_, p)| *p == pool).count()
    };
    // Prefer shifting unpositioned players; they carry no positional
    // balance to preserve.
    if count(larger, None) > count(smaller, None) {
        if let Some(index) = larger.iter().rposition(|(_, p)| p.is_none()) {
            return index;
        }
    }
    larger
        .iter()
        .rposition(|(_, pool)| count(larger, *pool) > count(smaller, *pool))
        .unwrap_or(larger.len() - 1)
}

fn build_team(match_id: Uuid, name: &str, side: &[(Uuid, PoolKey)]) -> Team {
    Team {
        team_id: Uuid::new_v4(),
        match_id,
        name: name.to_string(),
        participant_ids: side.iter().map(|(id, _)| *id).collect(),
    }
}
