//! Authentication for the boat log server
//!
//! Token signing and verification, the access/refresh session policies,
//! password hashing, the request gate, and the sign-up/sign-in/refresh
//! flows built on them.

pub mod handlers;
pub mod middleware;
pub mod password;
pub mod service;
pub mod session;
pub mod token;

pub use middleware::{AuthGate, AuthenticatedUser};
pub use service::{AuthService, SignUpResponse};
pub use session::{SessionTokens, TokenPair};
pub use token::{Claims, TokenKind, TokenPayload};
