//! Authentication: password hashing, signed session tokens carried in an
//! HTTP-only cookie, and the checks that guard pages and mutating routes.

pub mod cookie;
pub mod extract;
pub mod gatekeeper;
pub mod password;
pub mod secret;
pub mod session;

pub use cookie::{clear_session_cookie, session_cookie, AUTH_COOKIE};
pub use extract::AuthUser;
pub use gatekeeper::guard_pages;
pub use password::{hash_password, verify_password};
pub use secret::secret_matches;
pub use session::{Claims, SessionKeys, SESSION_TTL_SECS};
