pub mod achievements;
pub mod best;
pub mod scoring;
