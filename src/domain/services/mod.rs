pub mod conflicts;
pub mod lifecycle;
pub mod rules;
pub mod slots;
