//! Consent-gated context snapshot builder.
//!
//! Turns a `ProfileSource` into an ordered sequence of labeled text
//! segments under two constraints:
//!
//! - **Consent is fail-closed.** Third-party-sourced fields (job
//!   description, LinkedIn, personal site) only appear when their consent
//!   flag is explicitly true. Self-authored goals are always eligible.
//! - **Every segment is bounded.** Long-form fields are capped so a single
//!   oversized field can't blow up prompt size or cost.
//!
//! Building never fails; absent or malformed fields simply produce fewer
//! segments. An all-empty profile yields one fallback segment — the
//! composer relies on the snapshot never being empty.

use ninety_core::request::ProfileSource;

/// Character cap for the job description excerpt.
pub const JOB_DESCRIPTION_MAX: usize = 1200;

/// Character cap for LinkedIn content.
pub const LINKEDIN_MAX: usize = 800;

/// Appended whenever a capped field was cut short.
const TRUNCATION_MARKER: &str = " …[truncated]";

/// One labeled segment of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub label: &'static str,
    pub text: String,
}

/// The bounded, consent-filtered profile summary for a single request.
#[derive(Debug, Clone)]
pub struct ContextSnapshot {
    segments: Vec<Segment>,
}

impl ContextSnapshot {
    /// Build a snapshot from learner profile data.
    pub fn build(profile: &ProfileSource) -> Self {
        let mut segments = Vec::new();

        // Identity line: present fields joined with a fixed separator, no
        // empty separators for absent ones.
        let identity: Vec<String> = [
            profile.name.clone(),
            profile.role.as_ref().map(|r| format!("Role: {r}")),
            profile.org.as_ref().map(|o| format!("Org: {o}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        if !identity.is_empty() {
            segments.push(Segment {
                label: "Learner",
                text: identity.join(" | "),
            });
        }

        // Self-authored goals are not subject to consent gating.
        if let Some(outcomes) = &profile.day90_outcomes {
            segments.push(Segment {
                label: "Day 90 outcomes (learner's words)",
                text: outcomes.clone(),
            });
        }

        if profile.consents.store_job_description {
            if let Some(jd) = &profile.job_description_text {
                segments.push(Segment {
                    label: "Job description excerpt",
                    text: truncate(jd, JOB_DESCRIPTION_MAX),
                });
            }
        }

        if profile.consents.use_linkedin {
            if let Some(linkedin) = &profile.linkedin {
                segments.push(Segment {
                    label: "LinkedIn content (URL or pasted sections)",
                    text: truncate(linkedin, LINKEDIN_MAX),
                });
            }
        }

        // URLs are passed through verbatim for context only — the builder
        // never fetches or resolves them.
        if profile.consents.use_personal_site {
            if let Some(urls) = &profile.personal_site_urls {
                segments.push(Segment {
                    label: "Personal site URLs (for context only, do NOT fetch)",
                    text: urls.clone(),
                });
            }
        }

        if segments.is_empty() {
            segments.push(Segment {
                label: "Profile",
                text: "minimal information provided.".into(),
            });
        }

        Self { segments }
    }

    /// The ordered segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render the snapshot as labeled lines for a system message.
    pub fn render(&self) -> String {
        self.segments
            .iter()
            .map(|s| format!("{}: {}", s.label, s.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Cap `text` at `max` characters, appending a visible marker when cut.
///
/// Character-based so multi-byte content never splits mid-codepoint.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}
