pub mod app;
pub mod poller;
pub mod session;

pub use app::App;
pub use poller::{PollStream, Poller, Session};
pub use session::{run_session, PollError};
