pub mod entry;
pub mod meta;
pub mod option;
pub mod term;
