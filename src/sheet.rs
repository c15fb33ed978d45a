use log::{debug, info, warn};

use event_ranking::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use text_diff::print_diff;

use crate::args::Args;
use crate::sheet::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod io_export;

#[derive(Debug, Snafu)]
pub enum TranksError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("The workbook {path} has no worksheet named {name:?}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("Cell at row {row}, column {column} of {path} cannot be read: {content}"))]
    ExcelWrongCellType {
        path: String,
        row: usize,
        column: usize,
        content: String,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error formatting {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Error accessing {path}"))]
    Io {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening configuration file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing JSON"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Expected a positive number, found {content}"))]
    ParsingJsonNumber { content: String },
    #[snafu(display("Cannot find the directory of {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("Cannot import {path}: {source}"))]
    Import { source: ImportErrors, path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TranksResult<T> = Result<T, TranksError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Xlsx,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum OutputTarget {
    Stdout,
    Directory(PathBuf),
}

/// Everything needed to process one sheet, with all paths resolved.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SheetJob {
    pub contest_name: String,
    pub input_path: PathBuf,
    pub input_type: InputType,
    pub excel_worksheet_name: Option<String>,
    pub output: Option<OutputTarget>,
    pub ranks_file_name: String,
    pub top_file_name: String,
    pub slides_file_name: String,
    pub rules: RankingRules,
    pub view: Option<ViewMode>,
    pub reference: Option<PathBuf>,
}

fn guess_input_type(path: &Path) -> InputType {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => InputType::Xlsx,
        _ => InputType::Csv,
    }
}

fn read_view_mode(view: &Option<String>) -> TranksResult<Option<ViewMode>> {
    match view.as_deref() {
        None => Ok(None),
        Some("scores") => Ok(Some(ViewMode::Scores)),
        Some("ranks") => Ok(Some(ViewMode::Ranks)),
        Some(x) => whatever!("Unknown view {:?}, expected scores or ranks", x),
    }
}

fn read_output_target(out: &str, root: &Path) -> OutputTarget {
    if out == "stdout" {
        OutputTarget::Stdout
    } else {
        OutputTarget::Directory(root.join(out))
    }
}

fn output_file_name(
    settings: Option<&OutputSettings>,
    pick: impl Fn(&OutputSettings) -> Option<&String>,
    default: &str,
) -> String {
    settings
        .and_then(pick)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

/// Combines the configuration file (if any) and the command line flags.
pub fn build_job(args: &Args) -> TranksResult<SheetJob> {
    let config: Option<(SheetConfig, PathBuf)> = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu { path: config_path })?
                .to_path_buf();
            info!("Read configuration {:?}", config);
            Some((config, root))
        }
        None => None,
    };

    let (input_path, configured_type, excel_worksheet_name) = match (&args.input, &config) {
        (Some(input), _) => (PathBuf::from(input), None, None),
        (None, Some((c, root))) => {
            let cfs = &c.score_file_source;
            (
                root.join(&cfs.file_path),
                Some(cfs.input_type()?),
                cfs.excel_worksheet_name.clone(),
            )
        }
        (None, None) => whatever!("No score sheet given: use --input or --config"),
    };
    let input_type = match &args.input_type {
        Some(t) => read_input_type(t)?,
        None => configured_type.unwrap_or_else(|| guess_input_type(&input_path)),
    };
    let excel_worksheet_name = args
        .excel_worksheet_name
        .clone()
        .or(excel_worksheet_name);

    let mut rules = match &config {
        Some((c, _)) => validate_rules(&c.rules)?,
        None => RankingRules::default(),
    };
    if let Some(patterns) = &args.lower_is_better {
        rules.direction_policy = DirectionPolicy::new(patterns);
    }
    if let Some(cutoff) = args.cutoff {
        rules.leaderboard_cutoff = cutoff;
    }

    let output = match (&args.out, &config) {
        (Some(out), _) => Some(read_output_target(out, Path::new(""))),
        (None, Some((c, root))) => c
            .output_settings
            .output_directory
            .as_deref()
            .map(|out| read_output_target(out, root)),
        (None, None) => None,
    };

    let settings = config.as_ref().map(|(c, _)| &c.output_settings);
    let contest_name = match settings {
        Some(s) => s.contest_name.clone(),
        None => io_common::simplify_file_name(&input_path),
    };

    Ok(SheetJob {
        contest_name,
        ranks_file_name: output_file_name(
            settings,
            |s| s.ranks_file_name.as_ref(),
            DEFAULT_RANKS_FILE_NAME,
        ),
        top_file_name: output_file_name(
            settings,
            |s| s.top_file_name.as_ref(),
            DEFAULT_TOP_FILE_NAME,
        ),
        slides_file_name: output_file_name(
            settings,
            |s| s.slides_file_name.as_ref(),
            DEFAULT_SLIDES_FILE_NAME,
        ),
        input_path,
        input_type,
        excel_worksheet_name,
        output,
        rules,
        view: read_view_mode(&args.view)?,
        reference: args.reference.as_ref().map(PathBuf::from),
    })
}

fn read_score_grid(job: &SheetJob) -> TranksResult<Vec<Vec<String>>> {
    let path = job.input_path.display().to_string();
    info!("Attempting to read score file {:?}", path);
    match job.input_type {
        InputType::Csv => io_csv::read_csv_grid(&path),
        InputType::Xlsx => io_excel::read_excel_grid(&path, job.excel_worksheet_name.as_deref()),
    }
}

/// Compares the computed rank table with a reference file. Byte-order marks and line
/// endings are not significant.
fn check_reference(reference: &Path, computed: &str) -> TranksResult<()> {
    let path = reference.display().to_string();
    let contents = fs::read_to_string(reference).context(IoSnafu { path })?;
    let reference_text = io_common::normalize_text(&contents);
    let computed_text = io_common::normalize_text(computed);
    if reference_text != computed_text {
        warn!("Found differences with the reference ranks");
        print_diff(reference_text.as_str(), computed_text.as_str(), "\n");
        whatever!("Difference detected between calculated ranks and reference ranks")
    }
    info!("The computed ranks match the reference {:?}", reference);
    Ok(())
}

pub fn run_job(job: &SheetJob) -> TranksResult<Session> {
    let grid = read_score_grid(job)?;
    debug!("run_job: read {} rows", grid.len());

    let mut session = Session::new(&job.rules);
    session.import(&grid).context(ImportSnafu {
        path: job.input_path.display().to_string(),
    })?;

    let cutoff = job.rules.leaderboard_cutoff;
    let standings = session
        .standings()
        .whatever_context("No standings after a successful import")?;
    let ranks_csv = io_export::csv_bytes(&export::rank_table_rows(standings), &job.ranks_file_name)?;
    let top_csv = io_export::csv_bytes(&export::top_rows(standings, cutoff), &job.top_file_name)?;
    let slides_js = io_export::slides_to_json(&export::slides(standings, cutoff), &job.contest_name);

    match &job.output {
        Some(OutputTarget::Stdout) => {
            println!("{}", io_export::csv_text(&ranks_csv));
        }
        Some(OutputTarget::Directory(dir)) => {
            fs::create_dir_all(dir).context(IoSnafu {
                path: dir.display().to_string(),
            })?;
            io_export::write_bytes(&dir.join(&job.ranks_file_name), &ranks_csv)?;
            io_export::write_bytes(&dir.join(&job.top_file_name), &top_csv)?;
            let pretty_js =
                serde_json::to_string_pretty(&slides_js).context(WritingJsonSnafu {})?;
            io_export::write_bytes(&dir.join(&job.slides_file_name), pretty_js.as_bytes())?;
            info!("Wrote the exports to {:?}", dir);
        }
        None => {
            info!("No output location given, nothing written");
        }
    }

    if let Some(mode) = job.view {
        session.set_view_mode(mode);
        if let Some(rows) = session.table_view() {
            print!("{}", io_common::format_table(&rows));
        }
    }

    // The reference summary, if provided for comparison
    if let Some(reference) = &job.reference {
        check_reference(reference, &io_export::csv_text(&ranks_csv))?;
    }

    Ok(session)
}

pub fn run_sheet(args: &Args) -> TranksResult<()> {
    let job = build_job(args)?;
    info!("job: {:?}", job);
    run_job(&job)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    // A fresh directory under the system temp dir.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tranks-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const SHEET: &str = "Team number,Team name,Event1,Robot Tour\n\
                         T1,One,10,5\n\
                         T2,Two,20,3\n\
                         T3,Three,DQ,\n";

    fn args(extra: &[&str]) -> Args {
        let mut v = vec!["tranks"];
        v.extend_from_slice(extra);
        Args::parse_from(v)
    }

    #[test]
    fn job_from_flags() {
        let a = args(&[
            "--input",
            "data/scores.xlsx",
            "--cutoff",
            "3",
            "--lower-is-better",
            "Time",
            "--lower-is-better",
            "Tour",
            "--out",
            "stdout",
            "--view",
            "ranks",
        ]);
        let job = build_job(&a).unwrap();
        assert_eq!(job.input_type, InputType::Xlsx);
        assert_eq!(job.rules.leaderboard_cutoff, 3);
        assert_eq!(
            job.rules.direction_policy.lower_is_better_patterns,
            vec!["Time".to_string(), "Tour".to_string()]
        );
        assert_eq!(job.output, Some(OutputTarget::Stdout));
        assert_eq!(job.view, Some(ViewMode::Ranks));
        assert_eq!(job.contest_name, "scores.xlsx");
        assert_eq!(job.ranks_file_name, "ranks.csv");
    }

    #[test]
    fn job_needs_an_input() {
        assert!(build_job(&args(&[])).is_err());
        assert!(build_job(&args(&["--input", "a.csv", "--view", "table"])).is_err());
    }

    #[test]
    fn job_from_config_file() {
        let dir = scratch_dir("config");
        let config_path = dir.join("config.json");
        fs::write(
            &config_path,
            r#"{
                "outputSettings": {"contestName": "Regionals", "outputDirectory": "out", "slidesFileName": "deck.json"},
                "scoreFileSource": {"provider": "csv", "filePath": "scores.txt"},
                "rules": {"leaderboardCutoff": 4}
            }"#,
        )
        .unwrap();
        let a = args(&["--config", config_path.to_str().unwrap()]);
        let job = build_job(&a).unwrap();
        assert_eq!(job.input_path, dir.join("scores.txt"));
        assert_eq!(job.input_type, InputType::Csv);
        assert_eq!(job.output, Some(OutputTarget::Directory(dir.join("out"))));
        assert_eq!(job.slides_file_name, "deck.json");
        assert_eq!(job.top_file_name, "top.csv");
        assert_eq!(job.rules.leaderboard_cutoff, 4);
        assert_eq!(job.contest_name, "Regionals");
    }

    #[test]
    fn writes_all_exports() {
        let dir = scratch_dir("exports");
        let input = dir.join("scores.csv");
        fs::write(&input, SHEET).unwrap();
        let out = dir.join("out");
        let a = args(&[
            "--input",
            input.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ]);
        let session = run_job(&build_job(&a).unwrap()).unwrap();
        assert_eq!(session.standings().unwrap().teams.len(), 3);

        let ranks = fs::read(out.join("ranks.csv")).unwrap();
        assert!(ranks.starts_with("\u{feff}".as_bytes()));
        assert_eq!(
            io_export::csv_text(&ranks),
            "\"Team number\",\"Team name\",\"Event1\",\"Robot Tour\"\r\n\
             \"T1\",\"One\",\"2\",\"2\"\r\n\
             \"T2\",\"Two\",\"1\",\"1\"\r\n\
             \"T3\",\"Three\",\"5\",\"4\"\r\n"
        );

        let top = fs::read(out.join("top.csv")).unwrap();
        assert_eq!(
            io_export::csv_text(&top),
            "\"Event1\",\"T2 - Two\",\"T1 - One\",\"T3 - Three\"\r\n\
             \"Robot Tour\",\"T2 - Two\",\"T1 - One\",\"T3 - Three\"\r\n"
        );

        let slides: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("slides.json")).unwrap()).unwrap();
        assert_eq!(slides["contest"], "scores.csv");
        assert_eq!(slides["slides"][1]["title"]["text"], "Robot Tour");
        assert_eq!(slides["slides"][1]["lines"][2]["text"], "3. T3 - Three");
    }

    #[test]
    fn reference_check() {
        let dir = scratch_dir("reference");
        let input = dir.join("scores.csv");
        fs::write(&input, SHEET).unwrap();
        let good = dir.join("good.csv");
        // No byte-order mark, plain line endings: still a match.
        fs::write(
            &good,
            "\"Team number\",\"Team name\",\"Event1\",\"Robot Tour\"\n\
             \"T1\",\"One\",\"2\",\"2\"\n\
             \"T2\",\"Two\",\"1\",\"1\"\n\
             \"T3\",\"Three\",\"5\",\"4\"\n",
        )
        .unwrap();
        let a = args(&[
            "--input",
            input.to_str().unwrap(),
            "--reference",
            good.to_str().unwrap(),
        ]);
        assert!(run_job(&build_job(&a).unwrap()).is_ok());

        let bad = dir.join("bad.csv");
        fs::write(&bad, "\"Team number\",\"Team name\",\"Event1\",\"Robot Tour\"\n").unwrap();
        let a = args(&[
            "--input",
            input.to_str().unwrap(),
            "--reference",
            bad.to_str().unwrap(),
        ]);
        assert!(matches!(
            run_job(&build_job(&a).unwrap()),
            Err(TranksError::Whatever { .. })
        ));
    }

    #[test]
    fn bad_sheet_is_reported() {
        let dir = scratch_dir("bad-sheet");
        let input = dir.join("scores.csv");
        fs::write(&input, "Team number,Team name,E\nT1,One,late\n").unwrap();
        let a = args(&["--input", input.to_str().unwrap()]);
        match run_job(&build_job(&a).unwrap()) {
            Err(TranksError::Import { source, .. }) => assert_eq!(
                source,
                ImportErrors::UnrecognizedScore {
                    row: 1,
                    column: 2,
                    event: "E".to_string(),
                    token: "late".to_string()
                }
            ),
            other => panic!("unexpected result {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn exported_ranks_can_be_read_back() {
        let dir = scratch_dir("read-back");
        let input = dir.join("scores.csv");
        fs::write(&input, SHEET).unwrap();
        let out = dir.join("out");
        let a = args(&[
            "--input",
            input.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ]);
        run_job(&build_job(&a).unwrap()).unwrap();
        let grid = io_csv::read_csv_grid(out.join("ranks.csv").to_str().unwrap()).unwrap();
        assert_eq!(grid[0], vec!["Team number", "Team name", "Event1", "Robot Tour"]);
        assert_eq!(grid[3], vec!["T3", "Three", "5", "4"]);
    }
}
