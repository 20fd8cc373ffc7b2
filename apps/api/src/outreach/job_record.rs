//! Job record — the structured (or degraded) view of a scraped job posting.

use serde::{Deserialize, Deserializer, Serialize};

/// Pay information as the posting states it. Models return either a number
/// (`120000`) or free text (`"$120k - $140k"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Salary {
    Amount(f64),
    Text(String),
}

/// Structured job details extracted from a posting.
///
/// Accepts the snake_case keys requested by the extraction prompt as well as the
/// title-case keys models sometimes echo back. Every field is optional on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    #[serde(default, alias = "Company Name", alias = "company")]
    pub company_name: Option<String>,

    #[serde(default, alias = "Position", alias = "title")]
    pub position: Option<String>,

    #[serde(
        default,
        alias = "Salary/Pay_Rate",
        alias = "salary_or_pay_rate",
        alias = "pay_rate",
        deserialize_with = "salary_or_none"
    )]
    pub salary: Option<Salary>,

    #[serde(default, alias = "Responsibility", alias = "Responsibilities", deserialize_with = "lenient_list")]
    pub responsibilities: Vec<String>,

    #[serde(default, alias = "Requirements", deserialize_with = "lenient_list")]
    pub requirements: Vec<String>,

    #[serde(default, alias = "Preferred Qualifications", deserialize_with = "lenient_list")]
    pub preferred_qualifications: Vec<String>,

    #[serde(default, alias = "Tech Stack", deserialize_with = "lenient_list")]
    pub tech_stack: Vec<String>,
}

/// A job posting after extraction. `Unstructured` is the degraded form kept when
/// the model reply could not be parsed; downstream code must handle both arms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JobRecord {
    Structured(JobDetails),
    Unstructured { raw_response: String },
}

impl JobRecord {
    /// Parses a (fence-stripped) model reply. Anything that is not a JSON object
    /// of job details becomes `Unstructured` holding the text as received.
    pub fn from_model_reply(text: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(_) => return Self::unstructured(text),
        };

        if !value.is_object() {
            return Self::unstructured(text);
        }

        match serde_json::from_value::<JobDetails>(value) {
            Ok(details) => JobRecord::Structured(details),
            Err(_) => Self::unstructured(text),
        }
    }

    pub fn unstructured(text: &str) -> Self {
        JobRecord::Unstructured {
            raw_response: text.to_string(),
        }
    }

    pub fn details(&self) -> Option<&JobDetails> {
        match self {
            JobRecord::Structured(details) => Some(details),
            JobRecord::Unstructured { .. } => None,
        }
    }
}

/// Accepts `null`, a single string (split on newlines / semicolons, bullet markers
/// dropped, commas kept within items), or an array.
/// Non-string array items are kept as their JSON text.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    let items = match value {
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(serde_json::Value::String(s)) => s
            .split(['\n', ';'])
            .map(|part| part.trim().trim_start_matches(['-', '*', '•']).trim().to_string())
            .collect(),
        Some(serde_json::Value::Array(arr)) => arr
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            })
            .collect(),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected a list of strings, got {other}"
            )))
        }
    };

    Ok(items.into_iter().filter(|s| !s.is_empty()).collect())
}

/// Salary accepts a number, a string, or null. Empty strings and the literal
/// "None" / "N/A" placeholders models emit are treated as absent.
fn salary_or_none<'de, D>(deserializer: D) -> Result<Option<Salary>, D::Error>
where
    D: Deserializer<'de>,
{
    let salary = Option::<Salary>::deserialize(deserializer)?;
    Ok(salary.filter(|s| match s {
        Salary::Amount(_) => true,
        Salary::Text(t) => {
            let t = t.trim();
            !(t.is_empty() || t.eq_ignore_ascii_case("none") || t.eq_ignore_ascii_case("n/a"))
        }
    }))
}
