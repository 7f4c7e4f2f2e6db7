//! Sens'it Services - History pagination, device accessors and sessions.
//!
//! Services orchestrate the API and models crates:
//! - `history`: walks paginated sensor history for a selection criterion
//! - `device`: per-kind accessors that validate, fetch and decode
//! - `credentials`: resolves which credential to authenticate with
//! - `session`: authenticates and discovers devices and their sensors

pub mod credentials;
pub mod device;
pub mod history;
pub mod session;

pub use credentials::{AuthMethod, Credentials};
pub use device::SensitDevice;
pub use history::HistoryPaginator;
pub use session::Session;
