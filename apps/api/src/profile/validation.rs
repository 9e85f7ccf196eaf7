use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::{Education, Experience};

/// A single per-field validation failure, serialized into the 400
/// `{ errors: [...] }` list.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
    pub location: &'static str,
}

impl FieldError {
    pub fn new(msg: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: param.into(),
            location: "body",
        }
    }
}

/// Returns the trimmed value; missing or whitespace-only counts as absent.
fn require(
    value: Option<String>,
    msg: &str,
    param: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
    {
        Some(v) => Some(v),
        None => {
            errors.push(FieldError::new(msg, param));
            None
        }
    }
}

fn require_date(
    value: Option<NaiveDate>,
    msg: &str,
    param: &str,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    if value.is_none() {
        errors.push(FieldError::new(msg, param));
    }
    value
}

/// Body of PUT /api/profile/experience.
#[derive(Debug, Deserialize)]
pub struct ExperienceInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl ExperienceInput {
    /// Checks required fields and mints the stable entry identifier.
    pub fn into_entry(self) -> Result<Experience, Vec<FieldError>> {
        let mut errors = Vec::new();
        let title = require(self.title, "Title is Required", "title", &mut errors);
        let company = require(self.company, "Company is Required", "company", &mut errors);
        let from = require_date(self.from, "From date is Required", "from", &mut errors);

        match (title, company, from) {
            (Some(title), Some(company), Some(from)) if errors.is_empty() => Ok(Experience {
                id: Uuid::new_v4(),
                title,
                company,
                location: self.location,
                from,
                to: self.to,
                current: self.current,
                description: self.description,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of PUT /api/profile/education.
#[derive(Debug, Deserialize)]
pub struct EducationInput {
    pub school: Option<String>,
    pub degree: Option<String>,
    #[serde(rename = "fieldOfStudy")]
    pub field_of_study: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl EducationInput {
    pub fn into_entry(self) -> Result<Education, Vec<FieldError>> {
        let mut errors = Vec::new();
        let school = require(self.school, "school is Required", "school", &mut errors);
        let degree = require(self.degree, "degree is Required", "degree", &mut errors);
        let field_of_study = require(
            self.field_of_study,
            "Field of Study is Required",
            "fieldOfStudy",
            &mut errors,
        );
        let from = require_date(self.from, "From date is Required", "from", &mut errors);

        match (school, degree, field_of_study, from) {
            (Some(school), Some(degree), Some(field_of_study), Some(from))
                if errors.is_empty() =>
            {
                Ok(Education {
                    id: Uuid::new_v4(),
                    school,
                    degree,
                    field_of_study,
                    from,
                    to: self.to,
                    current: self.current,
                    description: self.description,
                })
            }
            _ => Err(errors),
        }
    }
}
