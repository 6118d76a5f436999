pub mod similarity;
pub mod status;
