pub fn generate_typescript_definitions(
    type_names: &[&str],
) -> Result<String, Box<dyn std::error::Error>> {
    if type_names.is_empty() {
        return Err("No type names provided".into());
    }

    let mut definitions = Vec::new();

    for name in type_names {
        let type_def = export_type(name)?;
        let cleaned = clean_type(type_def);

        if !cleaned.trim().is_empty() {
            definitions.push(cleaned);
        }
    }

    Ok(definitions.join("\n\n"))
}

/// Names accepted by `generate_typescript_definitions`, in output order
pub const API_TYPE_NAMES: &[&str] = &[
    "PracticeConfig",
    "StartSessionRequest",
    "SessionConfigResponse",
    "PracticeSessionResponse",
    "StartSessionResponse",
    "SubmitAnswerRequest",
    "AttemptResponse",
    "SubmitAnswerResponse",
    "SkipRoundResponse",
    "RandomQuestionQuery",
    "RandomQuestionResponse",
    "QuestionResponse",
    "SuggestAnswerRequest",
    "SuggestAnswerResponse",
    "ErrorResponse",
    "HealthResponse",
];

fn export_type(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    use crate::*;
    use ts_rs::TS;

    let result = match name {
        "PracticeConfig" => PracticeConfig::export_to_string()?,
        "StartSessionRequest" => StartSessionRequest::export_to_string()?,
        "SessionConfigResponse" => SessionConfigResponse::export_to_string()?,
        "PracticeSessionResponse" => PracticeSessionResponse::export_to_string()?,
        "StartSessionResponse" => StartSessionResponse::export_to_string()?,

        "SubmitAnswerRequest" => SubmitAnswerRequest::export_to_string()?,
        "AttemptResponse" => AttemptResponse::export_to_string()?,
        "SubmitAnswerResponse" => SubmitAnswerResponse::export_to_string()?,
        "SkipRoundResponse" => SkipRoundResponse::export_to_string()?,

        "RandomQuestionQuery" => RandomQuestionQuery::export_to_string()?,
        "RandomQuestionResponse" => RandomQuestionResponse::export_to_string()?,
        "QuestionResponse" => QuestionResponse::export_to_string()?,
        "SuggestAnswerRequest" => SuggestAnswerRequest::export_to_string()?,
        "SuggestAnswerResponse" => SuggestAnswerResponse::export_to_string()?,

        "ErrorResponse" => ErrorResponse::export_to_string()?,
        "HealthResponse" => HealthResponse::export_to_string()?,

        _ => {
            return Err(format!(
                "Unknown type: '{}'. Available types can be found in shared-types/src/",
                name
            )
            .into());
        }
    };

    Ok(result)
}

pub fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let lines: Vec<&str> = type_def.lines().collect();

    let filtered: Vec<&str> = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
        })
        .cloned()
        .collect();

    filtered.join("\n").trim().to_string()
}
