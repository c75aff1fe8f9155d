//! Config file parsing.
//!
//! A config file holds either a JSON object or legacy `KEY=VALUE` /
//! `KEY:VALUE` lines. Parsing is a two-stage pipeline: JSON first, then the
//! line format. Content matching neither is [`ParsedConfig::Malformed`],
//! which callers treat the same as a missing file.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::credential::Credential;

/// Default config file name looked up by the resolver.
pub const CONFIG_FILE_NAME: &str = ".openai";

/// Legacy left-hand names for the API key.
const LEGACY_API_KEY_NAMES: &[&str] = &[
    "OPENAI_KEY",
    "OPENAI_API_KEY",
    "OPENAI_SECRET_KEY",
    "TEST_OPENAI_SECRET_KEY",
];

/// Legacy left-hand names for the organization id.
const LEGACY_ORGANIZATION_NAMES: &[&str] = &["OPEN_AI_ORGANIZATION_ID", "OPENAI_ORGANIZATION_ID"];

/// Legacy left-hand names for the project id.
const LEGACY_PROJECT_NAMES: &[&str] = &["OPENAI_PROJECT_ID", "OPEN_AI_PROJECT_ID"];

/// Outcome of parsing config file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedConfig {
    /// Content was recognized. Fields may still be missing or blank.
    Parsed {
        api_key: Option<String>,
        organization_id: Option<String>,
        project_id: Option<String>,
    },
    /// Content was neither a JSON object nor any recognized assignment.
    Malformed,
}

impl ParsedConfig {
    /// Convert into a credential, requiring a non-blank API key.
    pub fn into_credential(self) -> Option<Credential> {
        match self {
            Self::Parsed {
                api_key,
                organization_id,
                project_id,
            } => Credential::from_parts(api_key, organization_id, project_id),
            Self::Malformed => None,
        }
    }
}

/// Structured (JSON) config shape.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct JsonConfig {
    api_key: Option<String>,
    organization_id: Option<String>,
    project_id: Option<String>,
}

/// Parse config file content.
///
/// # Example
///
/// ```
/// use huoshan_core::{ParsedConfig, parse_config};
///
/// let parsed = parse_config(r#"{"apiKey": "sk-1", "projectId": "proj_1"}"#);
/// let credential = parsed.into_credential().unwrap();
/// assert_eq!(credential.project_id(), Some("proj_1"));
///
/// assert_eq!(parse_config("not a config"), ParsedConfig::Malformed);
/// ```
pub fn parse_config(content: &str) -> ParsedConfig {
    parse_json(content).unwrap_or_else(|| parse_legacy(content))
}

/// Only a JSON object counts; arrays and scalars fall through to the line format.
fn parse_json(content: &str) -> Option<ParsedConfig> {
    let object: Map<String, Value> = serde_json::from_str(content).ok()?;
    let config: JsonConfig = serde_json::from_value(Value::Object(object)).ok()?;
    Some(ParsedConfig::Parsed {
        api_key: config.api_key,
        organization_id: config.organization_id,
        project_id: config.project_id,
    })
}

fn parse_legacy(content: &str) -> ParsedConfig {
    let mut api_key = None;
    let mut organization_id = None;
    let mut project_id = None;
    let mut recognized = false;

    for line in content.lines() {
        let Some((name, value)) = line.split_once(['=', ':']) else {
            continue;
        };

        let name = name.trim();
        let slot = if LEGACY_API_KEY_NAMES.contains(&name) {
            &mut api_key
        } else if LEGACY_ORGANIZATION_NAMES.contains(&name) {
            &mut organization_id
        } else if LEGACY_PROJECT_NAMES.contains(&name) {
            &mut project_id
        } else {
            continue;
        };

        recognized = true;
        let value = value.trim();
        // First non-blank assignment wins
        if slot.is_none() && !value.is_empty() {
            *slot = Some(value.to_string());
        }
    }

    if recognized {
        ParsedConfig::Parsed {
            api_key,
            organization_id,
            project_id,
        }
    } else {
        ParsedConfig::Malformed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_all_fields() {
        let parsed = parse_config(
            r#"{"apiKey":"sk-test12","organizationId":"org-testOrg","projectId":"proj_testProject"}"#,
        );
        assert_eq!(
            parsed,
            ParsedConfig::Parsed {
                api_key: Some("sk-test12".to_string()),
                organization_id: Some("org-testOrg".to_string()),
                project_id: Some("proj_testProject".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_json_ignores_unknown_fields() {
        let parsed = parse_config(r#"{"apiKey":"sk-1","region":"cn-beijing"}"#);
        let credential = parsed.into_credential().unwrap();
        assert_eq!(credential.api_key(), "sk-1");
    }

    #[test]
    fn test_parse_json_without_key_has_no_credential() {
        let parsed = parse_config(r#"{"organizationId":"org-1"}"#);
        assert!(matches!(parsed, ParsedConfig::Parsed { api_key: None, .. }));
        assert!(parsed.into_credential().is_none());
    }

    #[test]
    fn test_parse_legacy_both_separators() {
        let parsed = parse_config(
            "OPENAI_API_KEY=sk-legacy\nOPENAI_ORGANIZATION_ID: org-legacy \nOPEN_AI_PROJECT_ID=proj_legacy\n",
        );
        let credential = parsed.into_credential().unwrap();
        assert_eq!(credential.api_key(), "sk-legacy");
        assert_eq!(credential.organization_id(), Some("org-legacy"));
        assert_eq!(credential.project_id(), Some("proj_legacy"));
    }

    #[test]
    fn test_parse_legacy_first_assignment_wins() {
        let parsed = parse_config("OPENAI_KEY=sk-first\nOPENAI_SECRET_KEY=sk-second\n");
        assert_eq!(parsed.into_credential().unwrap().api_key(), "sk-first");
    }

    #[test]
    fn test_parse_legacy_is_case_sensitive() {
        assert_eq!(parse_config("openai_api_key=sk-lower"), ParsedConfig::Malformed);
    }

    #[test]
    fn test_parse_legacy_ignores_unknown_keys() {
        let parsed = parse_config("# comment\nOTHER=1\nOPENAI_SECRET_KEY = sk-spaced\n");
        assert_eq!(parsed.into_credential().unwrap().api_key(), "sk-spaced");
    }

    #[test]
    fn test_parse_legacy_blank_key_is_not_a_credential() {
        let parsed = parse_config("OPENAI_API_KEY=\nOPENAI_ORGANIZATION_ID=org-1\n");
        assert!(matches!(parsed, ParsedConfig::Parsed { .. }));
        assert!(parsed.into_credential().is_none());
    }

    #[test]
    fn test_parse_json_array_is_malformed() {
        assert_eq!(
            parse_config(r#"["sk-arr", "org", "proj"]"#),
            ParsedConfig::Malformed
        );
        assert_eq!(parse_config("[]"), ParsedConfig::Malformed);
        assert_eq!(parse_config(r#""sk-scalar""#), ParsedConfig::Malformed);
    }

    #[test]
    fn test_parse_garbage_is_malformed() {
        assert_eq!(parse_config(""), ParsedConfig::Malformed);
        assert_eq!(parse_config("[1, 2, 3]"), ParsedConfig::Malformed);
        assert!(parse_config("just some text").into_credential().is_none());
    }
}
