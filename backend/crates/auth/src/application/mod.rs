//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod register;
pub mod session;
pub mod sign_in;
pub mod sign_out;
pub mod telegram_sign_in;

// Re-exports
pub use check_session::{CheckSessionUseCase, SessionStatus};
pub use config::AuthConfig;
pub use register::{RegisterInput, RegisterUseCase};
pub use session::SignedIn;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use telegram_sign_in::TelegramSignInUseCase;
