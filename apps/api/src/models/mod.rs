pub mod analysis;
pub mod cover_letter;
pub mod user;
