// Stored analyses: persistence, listing, and high-risk rankings.

pub mod handlers;
pub mod repository;
