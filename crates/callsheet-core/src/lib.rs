pub mod cursor;
pub mod dial;
pub mod domain;
pub mod dto;
pub mod error;
pub mod roster;
pub mod rules;
pub mod seed;
pub mod selection;

pub use cursor::CallCursor;
pub use dial::{tel_uri, CommandDialer, DialError, Dialer, LogDialer};
pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use roster::RosterStore;
pub use rules::*;
pub use seed::sample_roster;
pub use selection::{select_all, Selection, SelectionState};
