pub mod derived;
pub mod labels;
pub mod record;
