//! Domain types: subjects, specializations, user profiles, institutions.

pub mod institution;
pub mod profile;
pub mod specialization;
pub mod subject;

pub use institution::{Funding, Institution};
pub use profile::UserProfile;
pub use specialization::Specialization;
pub use subject::Subject;
