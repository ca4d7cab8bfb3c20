//! Application use cases (flow orchestration).

mod call_api;
mod check_status;
mod connect;
mod logout;

pub use call_api::CallApi;
pub use check_status::CheckStatus;
pub use connect::Connect;
pub use logout::Logout;
