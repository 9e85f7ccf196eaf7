use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use crate::models::profile::{ProfileFields, SocialLinks};
use crate::profile::validation::FieldError;

/// Document paths a POST body can never write through the verbatim
/// passthrough: identity, the sub-collections (mutated only via their own
/// operations), the insert timestamp, and the computed social object.
const RESERVED_FIELDS: &[&str] = &[
    "_id",
    "user",
    "experience",
    "education",
    "created_at",
    "social",
];

/// Body of POST /api/profile. Recognized fields are typed; everything else
/// lands in `extra` and is stored verbatim.
#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub status: Option<String>,
    pub skills: Option<SkillsInput>,
    pub website: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Skills arrive either pre-split or as a comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Csv(String),
}

/// Normalizes a submission into the exact set of paths the upsert writes.
/// Collects every field error rather than stopping at the first.
pub fn build_profile_fields(req: UpsertProfileRequest) -> Result<ProfileFields, Vec<FieldError>> {
    let mut errors = Vec::new();

    let status = req
        .status
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if status.is_none() {
        errors.push(FieldError::new("Status is required", "status"));
    }

    let skills = match req.skills {
        Some(SkillsInput::List(list)) if !list.is_empty() => Some(list),
        Some(SkillsInput::Csv(csv)) => {
            let tokens: Vec<String> = csv
                .split(',')
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .collect();
            if tokens.is_empty() {
                None
            } else {
                Some(tokens)
            }
        }
        _ => None,
    };
    if skills.is_none() {
        errors.push(FieldError::new("Skills is required", "skills"));
    }

    let website = match req.website.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => match normalize_url(raw) {
            Some(url) => url,
            None => {
                errors.push(FieldError::new("website must be a valid URL", "website"));
                String::new()
            }
        },
        _ => String::new(),
    };

    let social = SocialLinks {
        youtube: normalize_social("youtube", req.youtube, &mut errors),
        twitter: normalize_social("twitter", req.twitter, &mut errors),
        instagram: normalize_social("instagram", req.instagram, &mut errors),
        linkedin: normalize_social("linkedin", req.linkedin, &mut errors),
        facebook: normalize_social("facebook", req.facebook, &mut errors),
    };

    let extra: Map<String, Value> = req
        .extra
        .into_iter()
        .filter(|(key, _)| !RESERVED_FIELDS.contains(&key.as_str()))
        .collect();

    match (status, skills) {
        (Some(status), Some(skills)) if errors.is_empty() => Ok(ProfileFields {
            status,
            website,
            skills,
            social,
            extra,
        }),
        _ => Err(errors),
    }
}

fn normalize_social(
    param: &str,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let raw = value?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match normalize_url(raw) {
        Some(url) => Some(url),
        None => {
            errors.push(FieldError::new(
                format!("{param} must be a valid URL"),
                param,
            ));
            None
        }
    }
}

/// Canonicalizes a URL with the scheme forced to https. A bare domain
/// gains the scheme; a bare root path loses its trailing slash, so
/// "example.com" comes back as "https://example.com".
fn normalize_url(raw: &str) -> Option<String> {
    let candidate = match raw.split_once("://") {
        Some((_, rest)) => format!("https://{rest}"),
        None => format!("https://{raw}"),
    };
    let url = Url::parse(&candidate).ok()?;
    url.host_str()?;

    let mut out = url.to_string();
    if url.path() == "/" && url.query().is_none() && url.fragment().is_none() {
        out.pop();
    }
    Some(out)
}
