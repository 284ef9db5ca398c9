//! URL and filesystem utilities.

pub mod fs;
pub mod url;
