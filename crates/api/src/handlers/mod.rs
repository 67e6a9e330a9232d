pub mod checks;
pub mod trash;
