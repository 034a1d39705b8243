use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in a candidate's skill list. The candidate API stores skills
/// either as plain strings or as `{ "name": ... }` records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Skill {
    Name(String),
    Record { name: String },
}

impl Skill {
    pub fn name(&self) -> &str {
        match self {
            Skill::Name(name) => name,
            Skill::Record { name } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub headline: Option<String>,
    pub summary: Option<String>,
}

/// A candidate as returned by the remote API. The directory variant carries
/// first/last name and profile fields; the applied variant carries a full
/// name plus application metadata. All shape differences are optional fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    pub student_profile: Option<StudentProfile>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub applied_at: Option<DateTime<Utc>>,
    pub resume_path: Option<String>,
}

const HEADLINE_PREVIEW_LEN: usize = 120;

impl Candidate {
    /// First+last name, falling back to the full-name field. Empty when the
    /// record carries no name at all; matching runs against this, so a
    /// nameless candidate never matches a name term.
    pub fn name_text(&self) -> String {
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !joined.is_empty() {
            return joined;
        }
        self.full_name.clone().unwrap_or_default()
    }

    /// Display name with the literal "Unknown" placeholder.
    pub fn display_name(&self) -> String {
        let name = self.name_text();
        if name.is_empty() {
            "Unknown".to_string()
        } else {
            name
        }
    }

    pub fn skill_names(&self) -> Vec<&str> {
        self.skills.iter().map(Skill::name).collect()
    }

    /// Headline, or the summary clipped to a short preview.
    pub fn headline_preview(&self) -> Option<String> {
        let profile = self.student_profile.as_ref()?;
        if let Some(headline) = profile.headline.as_deref().filter(|h| !h.is_empty()) {
            return Some(headline.to_string());
        }
        let summary = profile.summary.as_deref().filter(|s| !s.is_empty())?;
        if summary.chars().count() > HEADLINE_PREVIEW_LEN {
            let clipped: String = summary.chars().take(HEADLINE_PREVIEW_LEN).collect();
            Some(format!("{}...", clipped))
        } else {
            Some(summary.to_string())
        }
    }

    /// Text fields a search term is checked against.
    pub fn search_haystacks(&self) -> Vec<String> {
        let mut haystacks = vec![self.name_text()];
        if let Some(email) = &self.email {
            haystacks.push(email.clone());
        }
        if !self.skills.is_empty() {
            haystacks.push(self.skill_names().join(", "));
        }
        if let Some(profile) = &self.student_profile {
            if let Some(headline) = &profile.headline {
                haystacks.push(headline.clone());
            }
            if let Some(summary) = &profile.summary {
                haystacks.push(summary.clone());
            }
        }
        if let Some(job_title) = &self.job_title {
            haystacks.push(job_title.clone());
        }
        if let Some(company) = &self.company {
            haystacks.push(company.clone());
        }
        haystacks.retain(|h| !h.is_empty());
        haystacks
    }
}
