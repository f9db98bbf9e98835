pub mod requests;

pub use requests::{EducationRequest, ExperienceRequest, ProfileRequest};
