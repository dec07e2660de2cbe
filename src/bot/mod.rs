//! Bot module - Session, dispatcher and runtime.

pub mod dispatcher;
pub mod outbound;
mod runtime;
mod session;

pub use dispatcher::build_dispatcher;
pub use runtime::run;
pub use session::Session;
