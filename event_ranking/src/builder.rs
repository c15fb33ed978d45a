use log::{debug, warn};

pub use crate::config::*;

/// A builder for importing a score sheet row by row.
///
/// The header is given first, then each data row. Row numbers in errors are grid
/// indices, the header being row 0.
///
/// ```
/// pub use event_ranking::builder::Builder;
/// # use event_ranking::ImportErrors;
///
/// let header = ["Team number", "Team name", "Mission Possible", "Robot Tour"];
/// let mut builder = Builder::new(&header.map(String::from))?;
///
/// builder.add_row(&["B12", "Owls", "42", "3.5"].map(String::from))?;
/// builder.add_row(&["B07", "Hawks", "DQ", ""].map(String::from))?;
///
/// let (teams, scores) = builder.build()?;
/// assert_eq!(teams.len(), 2);
/// assert_eq!(scores.len(), 2);
/// # Ok::<(), ImportErrors>(())
/// ```
pub struct Builder {
    pub(crate) _header: Vec<String>,
    pub(crate) _teams: Teams,
    pub(crate) _scores: ScoreTable,
    // Grid index of the next row.
    pub(crate) _next_row: usize,
}

/// Index of the first event column. Columns 0 and 1 are the team number and name.
pub const FIRST_EVENT_COLUMN: usize = 2;

impl Builder {
    pub fn new(header: &[String]) -> Result<Builder, ImportErrors> {
        if header.len() <= FIRST_EVENT_COLUMN {
            return Err(ImportErrors::TooFewColumns {
                columns: header.len(),
            });
        }
        let mut scores: ScoreTable = ScoreTable::new();
        for event in header[FIRST_EVENT_COLUMN..].iter() {
            if scores.contains_key(event) {
                warn!(
                    "Builder::new: event {:?} appears in several columns, the last column wins",
                    event
                );
            }
            scores.insert(event.clone(), EventScores::new());
        }
        debug!("Builder::new: header: {:?}", header);
        Ok(Builder {
            _header: header.to_vec(),
            _teams: Teams::new(),
            _scores: scores,
            _next_row: 1,
        })
    }

    /// Adds one team.
    ///
    /// A team number seen before overwrites the name and the scores of the earlier row,
    /// but keeps its position.
    pub fn add_row(&mut self, row: &[String]) -> Result<(), ImportErrors> {
        let lineno = self._next_row;
        if row.len() != self._header.len() {
            return Err(ImportErrors::RaggedRow {
                row: lineno,
                expected: self._header.len(),
                found: row.len(),
            });
        }
        let team_id = row[0].clone();

        // Parse every cell before touching the tables.
        let mut parsed: Vec<(&String, Score)> = Vec::new();
        for (idx, cell) in row.iter().enumerate().skip(FIRST_EVENT_COLUMN) {
            let event = &self._header[idx];
            let score = parse_score(cell).ok_or_else(|| ImportErrors::UnrecognizedScore {
                row: lineno,
                column: idx,
                event: event.clone(),
                token: cell.clone(),
            })?;
            parsed.push((event, score));
        }
        debug!(
            "add_row: lineno: {:?} team: {:?} scores: {:?}",
            lineno, team_id, parsed
        );

        if let Some(previous) = self._teams.insert(team_id.clone(), row[1].clone()) {
            warn!(
                "add_row: team number {:?} on row {} already seen (was {:?}), the later row wins",
                team_id,
                lineno + 1,
                previous
            );
        }
        for (event, score) in parsed {
            if let Some(es) = self._scores.get_mut(event) {
                es.insert(team_id.clone(), score);
            }
        }
        self._next_row += 1;
        Ok(())
    }

    pub fn build(self) -> Result<(Teams, ScoreTable), ImportErrors> {
        if self._teams.is_empty() {
            return Err(ImportErrors::TooFewRows {
                rows: self._next_row,
            });
        }
        Ok((self._teams, self._scores))
    }

    pub fn header(&self) -> &[String] {
        &self._header
    }
}

/// Reads one score cell.
///
/// Surrounding whitespace is ignored and a blank cell counts as `NS`. Numbers follow
/// the usual floating point syntax (`12`, `-3.5`, `1e3`); infinities and NaN are not
/// scores. Returns `None` for anything else.
pub fn parse_score(cell: &str) -> Option<Score> {
    let token = match cell.trim() {
        "" => Score::NOT_STARTED_TOKEN,
        t => t,
    };
    match token.parse::<f64>() {
        Ok(x) if x.is_finite() => Some(Score::Number(x)),
        _ => Score::from_sentinel(token),
    }
}

/// Parses a full grid: the header row followed by one row per team.
pub fn parse_grid(grid: &[Vec<String>]) -> Result<(Vec<String>, Teams, ScoreTable), ImportErrors> {
    let (header, rows) = match grid {
        [] | [_] => return Err(ImportErrors::TooFewRows { rows: grid.len() }),
        [header, rows @ ..] => (header, rows),
    };
    let mut builder = Builder::new(header)?;
    for row in rows {
        builder.add_row(row)?;
    }
    let header = builder.header().to_vec();
    let (teams, scores) = builder.build()?;
    Ok((header, teams, scores))
}
