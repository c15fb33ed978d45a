//! Row sets handed to the CSV writer and the slide renderer.
//!
//! Nothing here performs I/O.

use crate::config::*;
use crate::top_teams;

// Slide geometry, in inches.
const TITLE_X: f64 = 1.0;
const TITLE_Y: f64 = 1.0;
const TITLE_W: f64 = 10.0;
const TITLE_H: f64 = 0.5;
const TITLE_FONT_SIZE: u32 = 24;
const LINE_X: f64 = 1.0;
const LINE_FIRST_Y: f64 = 2.0;
const LINE_STEP_Y: f64 = 0.4;
const LINE_W: f64 = 10.0;
const LINE_H: f64 = 0.2;
const LINE_FONT_SIZE: u32 = 16;

fn team_label(standings: &Standings, team: &str) -> String {
    let name = standings
        .teams
        .get(team)
        .map(|s| s.as_str())
        .unwrap_or_default();
    format!("{} - {}", team, name)
}

/// The full rank table: the imported header, then one row per team with its rank in
/// every event.
pub fn rank_table_rows(standings: &Standings) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = vec![standings.header.clone()];
    for (team, name) in standings.teams.iter() {
        let mut row = vec![team.clone(), name.clone()];
        for event in standings.scores.keys() {
            row.push(standings.rank_of(event, team).to_string());
        }
        rows.push(row);
    }
    rows
}

/// One row per event: the event name followed by `"<number> - <name>"` for every team
/// on the leaderboard.
pub fn top_rows(standings: &Standings, cutoff: Rank) -> Vec<Vec<String>> {
    standings
        .ranks
        .iter()
        .map(|(event, er)| {
            let mut row = vec![event.clone()];
            row.extend(top_teams(er, cutoff).iter().map(|t| team_label(standings, t)));
            row
        })
        .collect()
}

/// One slide per event. Leaderboard lines are numbered 1..M by position, whatever the
/// underlying rank values.
pub fn slides(standings: &Standings, cutoff: Rank) -> Vec<Slide> {
    standings
        .ranks
        .iter()
        .map(|(event, er)| {
            let title = TextBox {
                text: event.clone(),
                x: TITLE_X,
                y: TITLE_Y,
                w: TITLE_W,
                h: TITLE_H,
                font_size: TITLE_FONT_SIZE,
            };
            let lines = top_teams(er, cutoff)
                .iter()
                .enumerate()
                .map(|(idx, t)| TextBox {
                    text: format!("{}. {}", idx + 1, team_label(standings, t)),
                    x: LINE_X,
                    y: LINE_FIRST_Y + (idx as f64) * LINE_STEP_Y,
                    w: LINE_W,
                    h: LINE_H,
                    font_size: LINE_FONT_SIZE,
                })
                .collect();
            Slide { title, lines }
        })
        .collect()
}
