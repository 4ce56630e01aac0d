/// Leaderboard derivation from a passport snapshot
///
/// Everything here is a pure function of its input. The dashboard calls it
/// again on every snapshot; nothing is cached between calls.

use super::types::{CallerSummary, LeaderboardEntry, PassportRecord};

/// Rank every passport with a positive score.
///
/// Records with a null, missing, zero or negative score are left out. Equal
/// scores keep the order they had in `records`.
pub fn compute_leaderboard(records: &[PassportRecord]) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&PassportRecord> = records
        .iter()
        .filter(|p| p.effective_score() > 0)
        .collect();

    // sort_by is stable, which is what keeps ties in input order
    ranked.sort_by(|a, b| b.effective_score().cmp(&a.effective_score()));

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, passport)| LeaderboardEntry {
            rank: index + 1,
            address: passport.owner.clone(),
            score: passport.effective_score(),
        })
        .collect()
}

/// 1-based rank of `caller`, or one past the last entry when not ranked
pub fn compute_caller_rank(leaderboard: &[LeaderboardEntry], caller: &str) -> usize {
    leaderboard
        .iter()
        .position(|entry| entry.address.eq_ignore_ascii_case(caller))
        .map(|index| index + 1)
        .unwrap_or(leaderboard.len() + 1)
}

/// The visible slice of the board
pub fn top_entries(leaderboard: &[LeaderboardEntry], n: usize) -> &[LeaderboardEntry] {
    &leaderboard[..n.min(leaderboard.len())]
}

pub fn find_caller_passport<'a>(
    records: &'a [PassportRecord],
    caller: &str,
) -> Option<&'a PassportRecord> {
    records.iter().find(|p| p.is_owned_by(caller))
}

pub fn caller_summary(
    records: &[PassportRecord],
    leaderboard: &[LeaderboardEntry],
    caller: &str,
) -> CallerSummary {
    let passport = find_caller_passport(records, caller);
    CallerSummary {
        rank: compute_caller_rank(leaderboard, caller),
        score: passport.map(|p| p.effective_score()).unwrap_or(0),
        passport_found: passport.is_some(),
    }
}
