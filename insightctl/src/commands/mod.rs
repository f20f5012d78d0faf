pub mod search;
pub mod suggest;
pub mod taxonomy;
pub mod url;
