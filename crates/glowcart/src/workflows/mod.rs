pub mod catalog;
pub mod skin_quiz;
