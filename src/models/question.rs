use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// 拆分出的一道题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 很短的题目概要
    pub question_summary: String,
    /// 完整题目原文，不能丢失任何信息
    pub full_question: String,
}

/// 结构化输出的外层包装
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllQuestions {
    pub questions: Vec<Question>,
}

impl AllQuestions {
    pub const SCHEMA_NAME: &'static str = "all_questions";

    /// 严格模式下的 JSON Schema
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "questions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "question_summary": { "type": "string" },
                            "full_question": { "type": "string" }
                        },
                        "required": ["question_summary", "full_question"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["questions"],
            "additionalProperties": false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_every_field() {
        let schema = AllQuestions::json_schema();
        let item = &schema["properties"]["questions"]["items"];
        assert_eq!(item["required"], json!(["question_summary", "full_question"]));
        assert_eq!(item["additionalProperties"], json!(false));
        assert_eq!(schema["required"], json!(["questions"]));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let parsed = serde_json::from_str::<AllQuestions>(
            r#"{"questions": [{"question_summary": "capital"}]}"#,
        );
        assert!(parsed.is_err());
    }
}
