//! Entity Module

pub mod application;
pub mod attendance;
pub mod grade;
pub mod member;
pub mod news;
