pub mod claims;
pub mod session;
pub mod token;

pub use session::{
    clear_session_cookie, session_cookie, token_from_cookies, Role, Session, SessionStore,
    SESSION_COOKIE,
};
