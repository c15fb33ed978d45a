use crate::sheet::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const DEFAULT_RANKS_FILE_NAME: &str = "ranks.csv";
pub const DEFAULT_TOP_FILE_NAME: &str = "top.csv";
pub const DEFAULT_SLIDES_FILE_NAME: &str = "slides.json";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "ranksFileName")]
    pub ranks_file_name: Option<String>,
    #[serde(rename = "topFileName")]
    pub top_file_name: Option<String>,
    #[serde(rename = "slidesFileName")]
    pub slides_file_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl FileSource {
    pub fn input_type(&self) -> TranksResult<InputType> {
        read_input_type(&self.provider)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SheetRules {
    #[serde(rename = "lowerIsBetterPatterns")]
    pub lower_is_better_patterns: Option<Vec<String>>,
    #[serde(rename = "leaderboardCutoff")]
    pub leaderboard_cutoff: Option<JSValue>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "scoreFileSource")]
    pub score_file_source: FileSource,
    pub rules: Option<SheetRules>,
}

pub fn read_config(path: &str) -> TranksResult<SheetConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

pub fn read_input_type(provider: &str) -> TranksResult<InputType> {
    match provider {
        "csv" => Ok(InputType::Csv),
        "xlsx" | "excel" => Ok(InputType::Xlsx),
        x => whatever!("Input type {:?} not supported, expected csv or xlsx", x),
    }
}

/// Turns the optional rules of the configuration into ranking rules. Missing entries take
/// the default values.
pub fn validate_rules(rules: &Option<SheetRules>) -> TranksResult<RankingRules> {
    let mut res = RankingRules::default();
    if let Some(r) = rules {
        if let Some(patterns) = &r.lower_is_better_patterns {
            res.direction_policy = DirectionPolicy::new(patterns);
        }
        if r.leaderboard_cutoff.is_some() {
            res.leaderboard_cutoff = read_js_int(&r.leaderboard_cutoff)?;
        }
    }
    Ok(res)
}

fn read_js_int(x: &Option<JSValue>) -> TranksResult<u32> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .and_then(|x| u32::try_from(x).ok())
            .context(ParsingJsonNumberSnafu {
                content: n.to_string(),
            }),
        Some(JSValue::String(s)) => s.trim().parse::<u32>().ok().context(ParsingJsonNumberSnafu {
            content: s.clone(),
        }),
        x => None.context(ParsingJsonNumberSnafu {
            content: format!("{:?}", x),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config() {
        let js = r#"{
            "outputSettings": {
                "contestName": "Regionals",
                "outputDirectory": "out",
                "topFileName": "leaders.csv"
            },
            "scoreFileSource": {"provider": "csv", "filePath": "scores.csv"},
            "rules": {"lowerIsBetterPatterns": ["Time"], "leaderboardCutoff": "3"}
        }"#;
        let config: SheetConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.output_settings.contest_name, "Regionals");
        assert_eq!(config.output_settings.ranks_file_name, None);
        assert_eq!(
            config.output_settings.top_file_name,
            Some("leaders.csv".to_string())
        );
        assert_eq!(config.score_file_source.input_type().unwrap(), InputType::Csv);
        let rules = validate_rules(&config.rules).unwrap();
        assert_eq!(rules.leaderboard_cutoff, 3);
        assert_eq!(
            rules.direction_policy.lower_is_better_patterns,
            vec!["Time".to_string()]
        );
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let js = r#"{
            "outputSettings": {"contestName": "Invitational"},
            "scoreFileSource": {"provider": "xlsx", "filePath": "scores.xlsx"}
        }"#;
        let config: SheetConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.score_file_source.input_type().unwrap(), InputType::Xlsx);
        assert_eq!(validate_rules(&config.rules).unwrap(), RankingRules::default());
    }

    #[test]
    fn bad_cutoff() {
        let rules = Some(SheetRules {
            lower_is_better_patterns: None,
            leaderboard_cutoff: Some(serde_json::json!(-2)),
        });
        assert!(matches!(
            validate_rules(&rules),
            Err(TranksError::ParsingJsonNumber { .. })
        ));
    }

    #[test]
    fn unknown_provider() {
        assert!(read_input_type("ods").is_err());
    }
}
