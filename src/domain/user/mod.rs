//! User accounts, profiles and local passwords.

mod account;
mod password;
mod profile;

pub use account::{full_name, NewUser, RegistrantDetails, Role, SignUpCredentials, User};
pub use password::{PasswordPolicy, PasswordService, MIN_PASSWORD_LENGTH};
pub use profile::{AccountDetails, Profile, ProfileDetails};
