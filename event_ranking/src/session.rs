use log::{info, warn};

use crate::config::*;
use crate::export;
use crate::run_ranking;

/// What the score table shows.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum ViewMode {
    #[default]
    Scores,
    Ranks,
}

/// The state of one scoring session.
///
/// Only `import` changes the standings. An import either fully replaces them or leaves
/// them untouched.
#[derive(Debug, Clone, Default)]
pub struct Session {
    rules: RankingRules,
    standings: Option<Standings>,
    view_mode: ViewMode,
}

impl Session {
    pub fn new(rules: &RankingRules) -> Session {
        Session {
            rules: rules.clone(),
            standings: None,
            view_mode: ViewMode::default(),
        }
    }

    pub fn import(&mut self, grid: &[Vec<String>]) -> Result<&Standings, ImportErrors> {
        match run_ranking(grid, &self.rules) {
            Ok(st) => {
                info!(
                    "Session::import: replacing standings with {} teams",
                    st.teams.len()
                );
                Ok(self.standings.insert(st))
            }
            Err(e) => {
                warn!("Session::import: import rejected, keeping previous state: {}", e);
                Err(e)
            }
        }
    }

    pub fn standings(&self) -> Option<&Standings> {
        self.standings.as_ref()
    }

    pub fn rules(&self) -> &RankingRules {
        &self.rules
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        self.view_mode = match self.view_mode {
            ViewMode::Scores => ViewMode::Ranks,
            ViewMode::Ranks => ViewMode::Scores,
        };
        self.view_mode
    }

    /// The table shown to the user: team number, team name and one column per event
    /// holding either the raw score or the rank.
    ///
    /// `None` until a sheet has been imported.
    pub fn table_view(&self) -> Option<Vec<Vec<String>>> {
        let st = self.standings.as_ref()?;
        let mut header = vec!["Team number".to_string(), "Team name".to_string()];
        header.extend(st.scores.keys().cloned());
        let mut rows = vec![header];
        for (team, name) in st.teams.iter() {
            let mut row = vec![team.clone(), name.clone()];
            for (event, es) in st.scores.iter() {
                let cell = match self.view_mode {
                    ViewMode::Ranks => st.rank_of(event, team).to_string(),
                    ViewMode::Scores => match es.get(team) {
                        Some(s) => s.to_string(),
                        None => panic!(
                            "table_view: no score for team {:?} in event {:?}",
                            team, event
                        ),
                    },
                };
                row.push(cell);
            }
            rows.push(row);
        }
        Some(rows)
    }

    pub fn rank_table_rows(&self) -> Option<Vec<Vec<String>>> {
        self.standings.as_ref().map(export::rank_table_rows)
    }

    pub fn top_rows(&self) -> Option<Vec<Vec<String>>> {
        self.standings
            .as_ref()
            .map(|st| export::top_rows(st, self.rules.leaderboard_cutoff))
    }

    pub fn slides(&self) -> Option<Vec<Slide>> {
        self.standings
            .as_ref()
            .map(|st| export::slides(st, self.rules.leaderboard_cutoff))
    }
}
