// Document tools
pub mod clean;
pub mod header;
pub mod row;
pub mod tokenize;

// Output
pub mod export;
