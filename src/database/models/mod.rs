pub mod profile;
pub mod user;

pub use profile::{
    split_skills, Education, Experience, ListEdit, Profile, ProfileFields, ProfileOwner, Social,
};
pub use user::User;
