use crate::rollcall::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "sessionName")]
    pub session_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "outputFormat")]
    pub output_format: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct StatusMark {
    pub name: String,
    pub status: String,
}

impl StatusMark {
    pub fn status(&self) -> RollcallResult<Status> {
        self.status.parse::<Status>().context(RosterSnafu {})
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(default)]
    pub sources: Vec<FileSource>,
    pub names: Option<String>,
    #[serde(default)]
    pub marks: Vec<StatusMark>,
}

pub fn read_config(path: &str) -> RollcallResult<SessionConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(&contents).context(ParsingJsonSnafu {})
}

pub fn read_summary(path: &str) -> RollcallResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})
}
