/*!

This is the long-form manual for `event_ranking` and `tranks`.

## Input format

The score sheet has one row per team and one column per event:

```text
Team number,Team name,Fossils,Robot Tour,Egg Scrambler
B12,Owls,42,31.5,
B07,Hawks,DQ,28,3
B19,Jays,P,NS,4.25
```

- The first row is the header. Its first two cells are the team number and the team
  name, every following cell names an event. The header text is not checked, but it is
  reproduced verbatim at the top of `ranks.csv`.
- A score is a number (`12`, `-3.5`, `1e3`) or one of the outcomes:
  * `DQ` disqualified
  * `NS` not started. An empty cell means the same thing.
  * `P` participation only
- Spaces around a cell are ignored.
- Anything else (`dq`, `12 pts`, `late`) rejects the whole sheet. The error names the row,
  the column and the offending text.
- A team number appearing twice: the later row replaces the earlier one, the team keeps
  its first position.

Both `.csv` (comma separated) and `.xlsx` workbooks are read. For workbooks, the first
worksheet is used unless `--excel-worksheet-name` says otherwise.

## Ranking rules

For each event:

1. The teams with a numeric score are sorted, best first, and get ranks 1, 2, 3...
   Equal scores get distinct ranks: the team listed first in the sheet wins the tie.
2. With `n` teams in the event, the other outcomes get:
   * `P`: rank `n`
   * `NS`: rank `n + 1`
   * `DQ`: rank `n + 2`

   All teams with the same outcome share that rank.

Most events are won by the highest score. An event whose name contains `Scrambler` or
`Robot Tour` (case-sensitive) is won by the lowest score. The list of patterns can be
changed with `--lower-is-better` or the `lowerIsBetterPatterns` configuration entry.

## Outputs

- `ranks.csv`: the header of the sheet, then for each team its number, name and rank in
  every event.
- `top.csv`: one row per event, the event name followed by `<team number> - <team name>`
  for each team ranked 6 or better. Teams tied on the cutoff rank are all listed.
- `slides.json`: one slide per event with the event name as title and one numbered line
  per leaderboard entry. Lines are numbered by position (1, 2, 3...) regardless of the
  rank values.

The CSV files start with a UTF-8 byte-order mark, quote every field and end lines with
CRLF so that spreadsheet programs open them directly.

## Configuration

`tranks` can read its settings from a JSON file:

```json
{
  "outputSettings": {
    "contestName": "Regional tournament",
    "outputDirectory": "out"
  },
  "scoreFileSource": {
    "provider": "csv",
    "filePath": "scores.csv"
  },
  "rules": {
    "lowerIsBetterPatterns": ["Scrambler", "Robot Tour"],
    "leaderboardCutoff": 6
  }
}
```

Paths are relative to the configuration file. `outputSettings` also accepts
`ranksFileName`, `topFileName` and `slidesFileName`; `scoreFileSource` accepts
`excelWorksheetName`. Command line flags take precedence over the file.

 */
