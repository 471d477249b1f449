mod api_response;
pub use api_response::*;

mod app_state;
pub use app_state::*;

mod error;
pub use error::*;

mod relayer;
pub use relayer::*;

mod secret_string;
pub use secret_string::*;

mod transaction;
pub use transaction::*;
