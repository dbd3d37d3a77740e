pub mod admin;
pub mod comments;
pub mod interactions;
pub mod leads;
