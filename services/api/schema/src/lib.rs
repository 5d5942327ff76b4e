//! sea-orm entities for the Mol API database.

pub mod accounts;
pub mod blog_posts;
pub mod contact_messages;
pub mod courses;
pub mod newsletters;
pub mod team_members;
