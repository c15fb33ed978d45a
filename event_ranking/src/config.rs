// ********* Input data structures ***********

use indexmap::IndexMap;
use std::error::Error;
use std::fmt::Display;

/// A raw score recorded for one team in one event.
///
/// Non-numeric outcomes still receive a rank, below every numeric score.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Score {
    /// A measured score. Always finite.
    Number(f64),
    /// `DQ` in the sheet.
    Disqualified,
    /// `NS` in the sheet, or an empty cell.
    NotStarted,
    /// `P` in the sheet.
    ParticipationOnly,
}

impl Score {
    pub const DISQUALIFIED_TOKEN: &'static str = "DQ";
    pub const NOT_STARTED_TOKEN: &'static str = "NS";
    pub const PARTICIPATION_TOKEN: &'static str = "P";

    /// Reads a sentinel token. Numbers are not handled here.
    pub fn from_sentinel(token: &str) -> Option<Score> {
        match token {
            Score::DISQUALIFIED_TOKEN => Some(Score::Disqualified),
            Score::NOT_STARTED_TOKEN => Some(Score::NotStarted),
            Score::PARTICIPATION_TOKEN => Some(Score::ParticipationOnly),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Score::Number(_))
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Score::Number(x) => write!(f, "{}", x),
            Score::Disqualified => write!(f, "{}", Score::DISQUALIFIED_TOKEN),
            Score::NotStarted => write!(f, "{}", Score::NOT_STARTED_TOKEN),
            Score::ParticipationOnly => write!(f, "{}", Score::PARTICIPATION_TOKEN),
        }
    }
}

pub type TeamId = String;
pub type EventName = String;
pub type Rank = u32;

/// team number -> team name, in sheet order
pub type Teams = IndexMap<TeamId, String>;

/// team number -> raw score
pub type EventScores = IndexMap<TeamId, Score>;

/// team number -> rank
pub type EventRanks = IndexMap<TeamId, Rank>;

/// event name -> { team number -> raw score }
pub type ScoreTable = IndexMap<EventName, EventScores>;

/// event name -> { team number -> rank }
pub type RankTable = IndexMap<EventName, EventRanks>;

// ******** Output data structures *********

/// Everything derived from one imported sheet.
#[derive(PartialEq, Debug, Clone)]
pub struct Standings {
    /// The header row, exactly as imported.
    pub header: Vec<String>,
    pub teams: Teams,
    pub scores: ScoreTable,
    pub ranks: RankTable,
}

impl Standings {
    /// The rank of a team in an event.
    ///
    /// Panics if the pair is unknown: every imported team is ranked in every event.
    pub fn rank_of(&self, event: &str, team: &str) -> Rank {
        match self.ranks.get(event).and_then(|er| er.get(team)) {
            Some(r) => *r,
            None => panic!(
                "rank_of: no rank for team {:?} in event {:?}, the rank table is out of sync",
                team, event
            ),
        }
    }
}

/// A text element placed on a slide. Coordinates are in inches.
#[derive(PartialEq, Debug, Clone)]
pub struct TextBox {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub font_size: u32,
}

/// One slide per event: the event name and its leaderboard.
#[derive(PartialEq, Debug, Clone)]
pub struct Slide {
    pub title: TextBox,
    pub lines: Vec<TextBox>,
}

/// Errors that prevent a sheet from being imported.
///
/// When an import fails, nothing from that sheet is kept.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ImportErrors {
    /// No data row below the header.
    TooFewRows { rows: usize },
    /// The header needs the team number, the team name and at least one event.
    TooFewColumns { columns: usize },
    /// A data row does not have as many cells as the header.
    /// `row` is the index in the grid (the header is row 0).
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A score cell is neither a number nor one of `DQ`, `NS`, `P`.
    UnrecognizedScore {
        row: usize,
        column: usize,
        event: String,
        token: String,
    },
}

impl Error for ImportErrors {}

impl Display for ImportErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportErrors::TooFewRows { rows } => write!(
                f,
                "the sheet has {} row(s), expected a header and at least one team",
                rows
            ),
            ImportErrors::TooFewColumns { columns } => write!(
                f,
                "the header has {} column(s), expected team number, team name and at least one event",
                columns
            ),
            ImportErrors::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cell(s) but the header has {}",
                row + 1,
                found,
                expected
            ),
            ImportErrors::UnrecognizedScore {
                row,
                column,
                event,
                token,
            } => write!(
                f,
                "row {} column {} (event {:?}): {:?} is not a number nor one of DQ, NS, P",
                row + 1,
                column + 1,
                event,
                token
            ),
        }
    }
}

// ********* Configuration **********

/// Which way the scores of an event are sorted.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum EventDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// Decides the direction of an event from its name.
///
/// An event is lower-is-better when its name contains one of the patterns
/// (case-sensitive substring match). Every other event is higher-is-better.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DirectionPolicy {
    pub lower_is_better_patterns: Vec<String>,
}

impl DirectionPolicy {
    pub const DEFAULT_LOWER_IS_BETTER: [&'static str; 2] = ["Scrambler", "Robot Tour"];

    pub fn new(patterns: &[String]) -> DirectionPolicy {
        DirectionPolicy {
            lower_is_better_patterns: patterns.to_vec(),
        }
    }

    pub fn direction(&self, event: &str) -> EventDirection {
        if self
            .lower_is_better_patterns
            .iter()
            .any(|p| event.contains(p.as_str()))
        {
            EventDirection::LowerIsBetter
        } else {
            EventDirection::HigherIsBetter
        }
    }
}

impl Default for DirectionPolicy {
    fn default() -> Self {
        DirectionPolicy {
            lower_is_better_patterns: DirectionPolicy::DEFAULT_LOWER_IS_BETTER
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankingRules {
    pub direction_policy: DirectionPolicy,
    /// Teams ranked at or above this value make the leaderboard.
    pub leaderboard_cutoff: Rank,
}

impl RankingRules {
    pub const DEFAULT_LEADERBOARD_CUTOFF: Rank = 6;
}

impl Default for RankingRules {
    fn default() -> Self {
        RankingRules {
            direction_policy: DirectionPolicy::default(),
            leaderboard_cutoff: RankingRules::DEFAULT_LEADERBOARD_CUTOFF,
        }
    }
}
