use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owning user as embedded in profile responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileOwner {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl Social {
    /// Overlay the links present in `update`, keeping the stored ones it omits
    pub fn merge(&mut self, update: Social) {
        fn overlay(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }
        overlay(&mut self.youtube, update.youtube);
        overlay(&mut self.twitter, update.twitter);
        overlay(&mut self.facebook, update.facebook);
        overlay(&mut self.linkedin, update.linkedin);
        overlay(&mut self.instagram, update.instagram);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Entries of a profile's history lists, addressable by a stable id
pub trait HistoryEntry {
    fn entry_id(&self) -> Uuid;
}

impl HistoryEntry for Experience {
    fn entry_id(&self) -> Uuid {
        self.id
    }
}

impl HistoryEntry for Education {
    fn entry_id(&self) -> Uuid {
        self.id
    }
}

/// Insert at the front so the list stays newest first
fn push_front<T>(list: &mut Vec<T>, entry: T) {
    list.insert(0, entry);
}

/// Remove the entry with `id`; an unknown id leaves the list untouched
fn remove_by_id<T: HistoryEntry>(list: &mut Vec<T>, id: Uuid) -> bool {
    match list.iter().position(|entry| entry.entry_id() == id) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user: ProfileOwner,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Build a brand new profile from the first upsert for `owner`
    pub fn create(owner: ProfileOwner, fields: ProfileFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user: owner,
            company: fields.company,
            website: fields.website,
            location: fields.location,
            bio: fields.bio,
            status: fields.status,
            githubusername: fields.githubusername,
            skills: fields.skills,
            social: fields.social,
            experiences: Vec::new(),
            education: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy only the fields present in `fields` onto this profile
    pub fn merge(&mut self, fields: ProfileFields) {
        fn overlay(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }
        overlay(&mut self.company, fields.company);
        overlay(&mut self.website, fields.website);
        overlay(&mut self.location, fields.location);
        overlay(&mut self.bio, fields.bio);
        overlay(&mut self.githubusername, fields.githubusername);
        self.status = fields.status;
        self.skills = fields.skills;
        self.social.merge(fields.social);
        self.updated_at = Utc::now();
    }

    /// Apply a history list edit. Returns whether the lists changed.
    pub fn apply(&mut self, edit: ListEdit) -> bool {
        let changed = match edit {
            ListEdit::AddExperience(entry) => {
                push_front(&mut self.experiences, entry);
                true
            }
            ListEdit::RemoveExperience(id) => remove_by_id(&mut self.experiences, id),
            ListEdit::AddEducation(entry) => {
                push_front(&mut self.education, entry);
                true
            }
            ListEdit::RemoveEducation(id) => remove_by_id(&mut self.education, id),
        };
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

/// Partial update document assembled from a create/update request.
/// `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
}

/// Mutation of one of a profile's history lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEdit {
    AddExperience(Experience),
    RemoveExperience(Uuid),
    AddEducation(Education),
    RemoveEducation(Uuid),
}

/// Split the raw skills input on the " , " delimiter, trimming each entry
pub fn split_skills(input: &str) -> Vec<String> {
    input.split(" , ").map(|skill| skill.trim().to_string()).collect()
}
