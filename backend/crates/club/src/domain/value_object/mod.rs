//! Value Object Module

pub mod application_status;
pub mod grade;
pub mod text;
