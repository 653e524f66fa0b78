pub mod appointments;
pub mod classify;
pub mod feedback;
pub mod notifications;
pub mod resources;
pub mod tickets;
pub mod users;

pub use appointments::*;
pub use classify::*;
pub use feedback::*;
pub use notifications::*;
pub use resources::*;
pub use tickets::*;
pub use users::*;
