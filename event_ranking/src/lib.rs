mod config;
pub mod builder;
pub mod export;
pub mod manual;
pub mod session;

use log::{debug, info};

use std::cmp::Ordering;

pub use crate::config::*;
pub use crate::session::{Session, ViewMode};

/// Ranks the teams of one event.
///
/// Numeric scores are ranked 1..K in the given direction. Equal scores keep the order in
/// which the teams appear in `scores`, the first one getting the better rank.
///
/// Every other team gets a rank based on the total number of teams `n` in the event:
/// `n` for participation only, `n + 1` for not started and `n + 2` for disqualified.
/// All teams sharing an outcome share the same rank.
pub fn calculate_ranks(scores: &EventScores, direction: EventDirection) -> EventRanks {
    let mut numeric: Vec<(&TeamId, f64)> = scores
        .iter()
        .filter_map(|(tid, s)| match s {
            Score::Number(x) => Some((tid, *x)),
            _ => None,
        })
        .collect();
    // Stable sort: ties stay in sheet order.
    numeric.sort_by(|(_, a), (_, b)| compare_scores(*a, *b, direction));
    debug!(
        "calculate_ranks: direction: {:?} sorted numeric scores: {:?}",
        direction, numeric
    );

    let numeric_ranks: EventRanks = numeric
        .iter()
        .enumerate()
        .map(|(idx, (tid, _))| ((*tid).clone(), (idx + 1) as Rank))
        .collect();

    let total = scores.len() as Rank;
    // Keep the rank table in the same team order as the scores.
    scores
        .iter()
        .map(|(tid, s)| {
            let rank = match s {
                Score::Number(_) => numeric_ranks[tid],
                Score::ParticipationOnly => total,
                Score::NotStarted => total + 1,
                Score::Disqualified => total + 2,
            };
            (tid.clone(), rank)
        })
        .collect()
}

// Scores are finite, so partial_cmp only fails on programming errors. -0 and 0 are a tie.
fn compare_scores(a: f64, b: f64, direction: EventDirection) -> Ordering {
    let (first, second) = match direction {
        EventDirection::HigherIsBetter => (b, a),
        EventDirection::LowerIsBetter => (a, b),
    };
    first.partial_cmp(&second).unwrap_or(Ordering::Equal)
}

/// Ranks every event of the table, choosing the direction of each event from its name.
pub fn calculate_all_ranks(scores: &ScoreTable, policy: &DirectionPolicy) -> RankTable {
    scores
        .iter()
        .map(|(event, event_scores)| {
            let direction = policy.direction(event);
            info!(
                "Ranking event {:?}: {} teams, {:?}",
                event,
                event_scores.len(),
                direction
            );
            (event.clone(), calculate_ranks(event_scores, direction))
        })
        .collect()
}

/// The teams ranked at or above `cutoff`, best first.
///
/// The cutoff applies to the rank value, so teams tied at the cutoff are all included and
/// the list may be longer than `cutoff`. Equal ranks keep the order of `ranks`.
pub fn top_teams(ranks: &EventRanks, cutoff: Rank) -> Vec<TeamId> {
    let mut selected: Vec<(&TeamId, Rank)> = ranks
        .iter()
        .filter(|(_, r)| **r <= cutoff)
        .map(|(tid, r)| (tid, *r))
        .collect();
    selected.sort_by_key(|(_, r)| *r);
    selected.into_iter().map(|(tid, _)| tid.clone()).collect()
}

/// Imports a full grid and ranks it.
///
/// Arguments:
/// * `grid` the header row followed by one row per team
/// * `rules` how events are sorted
pub fn run_ranking(grid: &[Vec<String>], rules: &RankingRules) -> Result<Standings, ImportErrors> {
    info!("Importing {:?} rows", grid.len());
    let (header, teams, scores) = builder::parse_grid(grid)?;
    info!(
        "Imported {} teams and {} events",
        teams.len(),
        scores.len()
    );
    let ranks = calculate_all_ranks(&scores, &rules.direction_policy);
    Ok(Standings {
        header,
        teams,
        scores,
        ranks,
    })
}
