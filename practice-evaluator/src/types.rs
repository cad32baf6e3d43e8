use serde::{Deserialize, Deserializer, Serialize};

/// Payload sent to the evaluation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub question_content: String,
    pub user_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    pub topic: String,
    pub level: String,
    pub language: String,
}

/// Scored answer returned by the evaluation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Score in the 0..=100 range
    pub score: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub improved_answer: String,
}

/// The service sends `null` for optional fields it did not fill.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Evaluation {
    /// Clamp the score into 0..=100; evaluators occasionally overshoot.
    pub fn normalized(mut self) -> Self {
        self.score = self.score.clamp(0, 100);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_missing_correct_answer() {
        let request = EvaluationRequest {
            question_content: "Q".to_string(),
            user_answer: "A".to_string(),
            correct_answer: None,
            topic: "General".to_string(),
            level: "Mid".to_string(),
            language: "en".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("correct_answer").is_none());
        assert_eq!(value["question_content"], "Q");
    }

    #[test]
    fn test_evaluation_defaults_optional_fields() {
        let evaluation: Evaluation = serde_json::from_str(r#"{"score": 70}"#).unwrap();
        assert_eq!(evaluation.score, 70);
        assert!(evaluation.feedback.is_empty());
        assert!(evaluation.suggestions.is_empty());
        assert!(evaluation.improved_answer.is_empty());
    }

    #[test]
    fn test_evaluation_accepts_null_fields() {
        let evaluation: Evaluation = serde_json::from_str(
            r#"{"score": 85, "feedback": null, "suggestions": null, "improved_answer": null}"#,
        )
        .unwrap();
        assert_eq!(evaluation.score, 85);
        assert!(evaluation.feedback.is_empty());
        assert!(evaluation.suggestions.is_empty());
        assert!(evaluation.improved_answer.is_empty());
    }

    #[test]
    fn test_normalized_clamps_score() {
        let high = Evaluation {
            score: 130,
            feedback: String::new(),
            suggestions: vec![],
            improved_answer: String::new(),
        };
        assert_eq!(high.normalized().score, 100);

        let low = Evaluation {
            score: -5,
            feedback: String::new(),
            suggestions: vec![],
            improved_answer: String::new(),
        };
        assert_eq!(low.normalized().score, 0);
    }
}
