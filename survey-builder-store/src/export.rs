use std::fs;
use std::path::{Path, PathBuf};

use survey_builder_types::SurveyState;

use crate::StoreError;

/// File name for an exported survey: `survey-<slug>.json`.
///
/// The slug is the title with everything but ASCII letters and digits removed,
/// lower-cased, or `untitled` if nothing is left.
pub fn export_file_name(title: &str) -> String {
    let slug: String = title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if slug.is_empty() {
        "survey-untitled.json".to_string()
    } else {
        format!("survey-{slug}.json")
    }
}

/// The export document: the survey as pretty-printed JSON.
pub fn export_json(survey: &SurveyState) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(survey)?)
}

/// Write the export document into `dir`, returning the written path.
pub fn export_to(dir: &Path, survey: &SurveyState) -> Result<PathBuf, StoreError> {
    let json = export_json(survey)?;
    fs::create_dir_all(dir).map_err(|err| StoreError::io(dir, err))?;
    let path = dir.join(export_file_name(&survey.title));
    fs::write(&path, json).map_err(|err| StoreError::io(&path, err))?;
    tracing::info!(survey = %survey.id, path = %path.display(), "exported survey");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn file_name_from_title() {
        assert_eq!(export_file_name("Team Lunch 2024!"), "survey-teamlunch2024.json");
        assert_eq!(export_file_name("Größe?"), "survey-gre.json");
        assert_eq!(export_file_name(""), "survey-untitled.json");
        assert_eq!(export_file_name(" -- "), "survey-untitled.json");
    }

    #[test]
    fn export_writes_the_survey_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut survey = SurveyState::new("abc", Utc::now());
        survey.title = "Pets".into();

        let path = export_to(dir.path(), &survey).unwrap();
        assert_eq!(path.file_name().unwrap(), "survey-pets.json");

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"id\": \"abc\""));
        let parsed: SurveyState = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, survey);
    }
}
