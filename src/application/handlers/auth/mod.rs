//! Authentication handlers.

mod logout;
mod register;
mod require_admin;
mod user_by_id_number;
mod verify_token;

pub use logout::{LogoutCommand, LogoutHandler};
pub use register::{RegisterCommand, RegisterHandler, RegisterResult};
pub use require_admin::RequireAdminHandler;
pub use user_by_id_number::{GetUserByIdNumberHandler, GetUserByIdNumberQuery};
pub use verify_token::{VerifyTokenCommand, VerifyTokenHandler, VerifyTokenResult};
