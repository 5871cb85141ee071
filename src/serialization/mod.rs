pub mod document;
pub mod response;
