pub mod event;
pub mod invite;
pub mod pagination;
pub mod user;
pub mod validation;

pub use event::{Event, EventDraft, EventPage, EventPayload, EventStatus};
pub use user::{User, UserCredentials};
