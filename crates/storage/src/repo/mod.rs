mod comments;
mod interactions;
mod leads;
mod users;
