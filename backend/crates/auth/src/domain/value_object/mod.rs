//! Value Object Module

pub mod email;
pub mod full_name;
pub mod member_password;
pub mod member_role;
pub mod telegram_login;
