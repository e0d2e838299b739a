//! Inbound request validation and boundary typing.
//!
//! `CoachRequest::parse` turns a raw request body into a fully-typed value
//! so downstream components never re-check field presence. Validation is
//! deliberately asymmetric: strict on `prompt` (a request without one is
//! meaningless), lenient on `profile` and `meta` (missing or wrong-typed
//! values coerce to empty containers instead of failing the request).

use crate::error::RequestError;
use serde_json::Value;

/// A validated coaching request.
///
/// Deliberately NOT serde-deserializable: `parse` is the only way in, so
/// the strict-prompt / lenient-profile coercion can't be bypassed by
/// deserializing around the validator.
#[derive(Debug, Clone)]
pub struct CoachRequest {
    /// The learner's free-text coaching question, trimmed, never empty.
    pub prompt: String,

    /// Consent-gated learner data. Defaults to empty.
    pub profile: ProfileSource,

    /// Exercise context (risk index, bucket id, ...). Included verbatim
    /// downstream when non-empty.
    pub meta: serde_json::Map<String, Value>,
}

/// Untrusted, partially-populated learner data.
///
/// Every field is optional; blank strings are normalized to `None` at the
/// boundary. Third-party-sourced fields are only used downstream when the
/// matching consent flag is set.
#[derive(Debug, Clone, Default)]
pub struct ProfileSource {
    pub name: Option<String>,
    pub role: Option<String>,
    pub org: Option<String>,

    /// Learner's self-authored 90-day goals. Not consent-gated.
    pub day90_outcomes: Option<String>,

    /// Pasted job description. Gated by `consents.store_job_description`.
    pub job_description_text: Option<String>,

    /// LinkedIn URL or pasted sections. Gated by `consents.use_linkedin`.
    pub linkedin: Option<String>,

    /// Personal site URLs, reference-only, never fetched.
    /// Gated by `consents.use_personal_site`.
    pub personal_site_urls: Option<String>,

    pub consents: Consents,
}

/// Explicit per-category opt-in flags. Absent or wrong-typed flags read as
/// `false` — consent is fail-closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Consents {
    pub store_job_description: bool,
    pub use_linkedin: bool,
    pub use_personal_site: bool,
}

impl CoachRequest {
    /// Parse and validate a raw request body.
    ///
    /// Fails with `InvalidPayload` when the body is not a JSON object, and
    /// with `MissingPrompt` when `prompt` is absent, not a string, or empty
    /// after trimming. `profile` and `meta` never cause failure.
    pub fn parse(body: &[u8]) -> Result<Self, RequestError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| RequestError::InvalidPayload)?;

        let obj = value.as_object().ok_or(RequestError::InvalidPayload)?;

        let prompt = obj
            .get("prompt")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(RequestError::MissingPrompt)?
            .to_string();

        let profile = obj
            .get("profile")
            .map(ProfileSource::from_value)
            .unwrap_or_default();

        let meta = obj
            .get("meta")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            prompt,
            profile,
            meta,
        })
    }
}

impl ProfileSource {
    /// Extract a profile from an untyped JSON value.
    ///
    /// A non-object value yields the empty profile. String fields that are
    /// missing, wrong-typed, or blank after trimming become `None`.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            name: text_field(obj, "name"),
            role: text_field(obj, "role"),
            org: text_field(obj, "org"),
            day90_outcomes: text_or_list_field(obj, "day90_outcomes", "; "),
            job_description_text: text_field(obj, "job_description_text"),
            linkedin: text_field(obj, "linkedin"),
            personal_site_urls: text_or_list_field(obj, "personal_site_urls", ", "),
            consents: Consents::from_value(obj.get("consents")),
        }
    }
}

impl Consents {
    fn from_value(value: Option<&Value>) -> Self {
        let Some(obj) = value.and_then(Value::as_object) else {
            return Self::default();
        };

        // Anything other than an explicit `true` reads as false.
        let flag = |key: &str| obj.get(key).and_then(Value::as_bool).unwrap_or(false);

        Self {
            store_job_description: flag("store_job_description"),
            use_linkedin: flag("use_linkedin"),
            use_personal_site: flag("use_personal_site"),
        }
    }
}

/// A trimmed, non-blank string field, or `None`.
fn text_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A field that accepts either a plain string or a list of strings.
///
/// Lists are joined with `sep`; non-string elements are skipped.
fn text_or_list_field(
    obj: &serde_json::Map<String, Value>,
    key: &str,
    sep: &str,
) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(_)) => text_field(obj, key),
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(sep);
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_body_rejected() {
        let err = CoachRequest::parse(b"not json {").unwrap_err();
        assert_eq!(err, RequestError::InvalidPayload);
    }

    #[test]
    fn non_object_body_rejected() {
        assert_eq!(
            CoachRequest::parse(b"[1,2,3]").unwrap_err(),
            RequestError::InvalidPayload
        );
        assert_eq!(
            CoachRequest::parse(b"\"hello\"").unwrap_err(),
            RequestError::InvalidPayload
        );
    }

    #[test]
    fn missing_prompt_rejected() {
        let err = CoachRequest::parse(br#"{"profile":{}}"#).unwrap_err();
        assert_eq!(err, RequestError::MissingPrompt);
    }

    #[test]
    fn whitespace_prompt_rejected() {
        let err = CoachRequest::parse(br#"{"prompt":"   \n\t "}"#).unwrap_err();
        assert_eq!(err, RequestError::MissingPrompt);
    }

    #[test]
    fn non_string_prompt_rejected() {
        let err = CoachRequest::parse(br#"{"prompt":42}"#).unwrap_err();
        assert_eq!(err, RequestError::MissingPrompt);
    }

    #[test]
    fn prompt_is_trimmed() {
        let req = CoachRequest::parse(br#"{"prompt":"  plan my first week  "}"#).unwrap();
        assert_eq!(req.prompt, "plan my first week");
    }

    #[test]
    fn missing_profile_and_meta_default_to_empty() {
        let req = CoachRequest::parse(br#"{"prompt":"hi"}"#).unwrap();
        assert!(req.profile.name.is_none());
        assert!(req.meta.is_empty());
    }

    #[test]
    fn wrong_typed_profile_and_meta_coerced_not_rejected() {
        let req =
            CoachRequest::parse(br#"{"prompt":"hi","profile":"oops","meta":[1,2]}"#).unwrap();
        assert!(req.profile.day90_outcomes.is_none());
        assert!(req.meta.is_empty());
    }

    #[test]
    fn meta_preserved_verbatim() {
        let req = CoachRequest::parse(
            br#"{"prompt":"hi","meta":{"riskIndex":0.7,"bucket":"b2"}}"#,
        )
        .unwrap();
        assert_eq!(req.meta.len(), 2);
        assert_eq!(req.meta["bucket"], "b2");
    }

    #[test]
    fn day90_outcomes_accepts_string_or_list() {
        let plain =
            CoachRequest::parse(br#"{"prompt":"p","profile":{"day90_outcomes":"ship a pilot"}}"#)
                .unwrap();
        assert_eq!(plain.profile.day90_outcomes.as_deref(), Some("ship a pilot"));

        let list = CoachRequest::parse(
            br#"{"prompt":"p","profile":{"day90_outcomes":["ship a pilot","hire two leads"]}}"#,
        )
        .unwrap();
        assert_eq!(
            list.profile.day90_outcomes.as_deref(),
            Some("ship a pilot; hire two leads")
        );
    }

    #[test]
    fn blank_profile_strings_normalized_to_none() {
        let req =
            CoachRequest::parse(br#"{"prompt":"p","profile":{"name":"  ","linkedin":""}}"#)
                .unwrap();
        assert!(req.profile.name.is_none());
        assert!(req.profile.linkedin.is_none());
    }

    #[test]
    fn absent_consents_read_false() {
        let req = CoachRequest::parse(br#"{"prompt":"p","profile":{"linkedin":"url"}}"#).unwrap();
        assert!(!req.profile.consents.use_linkedin);
        assert!(!req.profile.consents.store_job_description);
        assert!(!req.profile.consents.use_personal_site);
    }

    #[test]
    fn wrong_typed_consent_reads_false() {
        let req = CoachRequest::parse(
            br#"{"prompt":"p","profile":{"consents":{"use_linkedin":"yes","store_job_description":1}}}"#,
        )
        .unwrap();
        assert!(!req.profile.consents.use_linkedin);
        assert!(!req.profile.consents.store_job_description);
    }

    #[test]
    fn consent_true_is_honored() {
        let req = CoachRequest::parse(
            br#"{"prompt":"p","profile":{"consents":{"use_linkedin":true}}}"#,
        )
        .unwrap();
        assert!(req.profile.consents.use_linkedin);
    }
}
