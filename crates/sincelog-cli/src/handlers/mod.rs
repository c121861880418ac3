pub mod import;
pub mod rebuild;
pub mod since;
pub mod versions;
