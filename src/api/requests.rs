use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::{split_skills, Education, Experience, ProfileFields, Social};
use crate::error::{ApiError, FieldError};

/// Empty strings count as "not provided"
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Parse the required `from` and optional `to` dates, collecting both failures
fn parse_period(from: &str, to: Option<&str>) -> Result<(NaiveDate, Option<NaiveDate>), ApiError> {
    let mut errors = Vec::new();

    let from = parse_date(from);
    if from.is_none() {
        errors.push(FieldError::body("from", "From date is invalid"));
    }

    let to = match to.filter(|v| !v.is_empty()) {
        Some(raw) => {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                errors.push(FieldError::body("to", "To date is invalid"));
            }
            parsed
        }
        None => None,
    };

    match from {
        Some(from) if errors.is_empty() => Ok((from, to)),
        _ => Err(ApiError::validation(errors)),
    }
}

/// POST /api/profile body
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[validate(
        required(message = "Status is required"),
        length(min = 1, message = "Status is required")
    )]
    pub status: Option<String>,
    pub githubusername: Option<String>,
    #[validate(
        required(message = "Skills are required"),
        length(min = 1, message = "Skills are required")
    )]
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl From<ProfileRequest> for ProfileFields {
    fn from(req: ProfileRequest) -> Self {
        ProfileFields {
            company: present(req.company),
            website: present(req.website),
            location: present(req.location),
            bio: present(req.bio),
            status: req.status.unwrap_or_default(),
            githubusername: present(req.githubusername),
            skills: req.skills.as_deref().map(split_skills).unwrap_or_default(),
            social: Social {
                youtube: present(req.youtube),
                twitter: present(req.twitter),
                facebook: present(req.facebook),
                linkedin: present(req.linkedin),
                instagram: present(req.instagram),
            },
        }
    }
}

/// PUT /api/profile/experiences body
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ExperienceRequest {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Company is required"),
        length(min = 1, message = "Company is required")
    )]
    pub company: Option<String>,
    pub location: Option<String>,
    #[validate(
        required(message = "From date is required"),
        length(min = 1, message = "From date is required")
    )]
    pub from: Option<String>,
    pub to: Option<String>,
    /// `null` and absent both mean "not current"
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl TryFrom<ExperienceRequest> for Experience {
    type Error = ApiError;

    fn try_from(req: ExperienceRequest) -> Result<Self, Self::Error> {
        let (from, to) = parse_period(req.from.as_deref().unwrap_or_default(), req.to.as_deref())?;
        Ok(Experience {
            id: Uuid::new_v4(),
            title: req.title.unwrap_or_default(),
            company: req.company.unwrap_or_default(),
            location: present(req.location),
            from,
            to,
            current: req.current.unwrap_or_default(),
            description: present(req.description),
        })
    }
}

/// PUT /api/profile/education body
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EducationRequest {
    #[validate(
        required(message = "School is required"),
        length(min = 1, message = "School is required")
    )]
    pub school: Option<String>,
    #[validate(
        required(message = "Degree is required"),
        length(min = 1, message = "Degree is required")
    )]
    pub degree: Option<String>,
    #[validate(
        required(message = "Field of study is required"),
        length(min = 1, message = "Field of study is required")
    )]
    pub fieldofstudy: Option<String>,
    #[validate(
        required(message = "From date is required"),
        length(min = 1, message = "From date is required")
    )]
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl TryFrom<EducationRequest> for Education {
    type Error = ApiError;

    fn try_from(req: EducationRequest) -> Result<Self, Self::Error> {
        let (from, to) = parse_period(req.from.as_deref().unwrap_or_default(), req.to.as_deref())?;
        Ok(Education {
            id: Uuid::new_v4(),
            school: req.school.unwrap_or_default(),
            degree: req.degree.unwrap_or_default(),
            fieldofstudy: req.fieldofstudy.unwrap_or_default(),
            from,
            to,
            current: req.current.unwrap_or_default(),
            description: present(req.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_errors(err: ApiError) -> Vec<FieldError> {
        match err {
            ApiError::Validation(errors) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn profile_request_requires_status_and_skills() {
        let errors = field_errors(ProfileRequest::default().validate().unwrap_err().into());
        assert_eq!(
            errors,
            vec![
                FieldError::body("skills", "Skills are required"),
                FieldError::body("status", "Status is required"),
            ]
        );
    }

    #[test]
    fn empty_strings_fail_required_fields() {
        let req = ProfileRequest {
            status: Some(String::new()),
            skills: Some("rust".into()),
            ..Default::default()
        };
        let errors = field_errors(req.validate().unwrap_err().into());
        assert_eq!(errors, vec![FieldError::body("status", "Status is required")]);
    }

    #[test]
    fn profile_fields_drop_empty_values_and_split_skills() {
        let fields = ProfileFields::from(ProfileRequest {
            company: Some(String::new()),
            website: Some("https://ada.dev".into()),
            status: Some("Developer".into()),
            skills: Some("a , b , c".into()),
            twitter: Some("https://twitter.com/ada".into()),
            youtube: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(fields.company, None);
        assert_eq!(fields.website.as_deref(), Some("https://ada.dev"));
        assert_eq!(fields.skills, vec!["a", "b", "c"]);
        assert_eq!(fields.social.twitter.as_deref(), Some("https://twitter.com/ada"));
        assert_eq!(fields.social.youtube, None);
    }

    #[test]
    fn experience_request_lists_missing_fields() {
        let errors = field_errors(ExperienceRequest::default().validate().unwrap_err().into());
        let params: Vec<_> = errors.iter().map(|e| e.param.as_str()).collect();
        assert_eq!(params, vec!["company", "from", "title"]);
    }

    #[test]
    fn education_request_lists_missing_fields() {
        let req = EducationRequest {
            school: Some("MIT".into()),
            ..Default::default()
        };
        let errors = field_errors(req.validate().unwrap_err().into());
        let params: Vec<_> = errors.iter().map(|e| e.param.as_str()).collect();
        assert_eq!(params, vec!["degree", "fieldofstudy", "from"]);
    }

    #[test]
    fn experience_dates_accept_plain_and_rfc3339() {
        let entry = Experience::try_from(ExperienceRequest {
            title: Some("Engineer".into()),
            company: Some("Acme".into()),
            from: Some("2019-03-01".into()),
            to: Some("2021-06-30T12:00:00Z".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(entry.from, NaiveDate::from_ymd_opt(2019, 3, 1).unwrap());
        assert_eq!(entry.to, NaiveDate::from_ymd_opt(2021, 6, 30));
        assert!(!entry.current);
    }

    #[test]
    fn unparseable_dates_are_field_errors() {
        let err = Education::try_from(EducationRequest {
            school: Some("MIT".into()),
            degree: Some("BSc".into()),
            fieldofstudy: Some("CS".into()),
            from: Some("last spring".into()),
            to: Some("soon".into()),
            ..Default::default()
        })
        .unwrap_err();

        assert_eq!(
            field_errors(err),
            vec![
                FieldError::body("from", "From date is invalid"),
                FieldError::body("to", "To date is invalid"),
            ]
        );
    }
}
