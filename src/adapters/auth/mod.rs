//! Identity adapters.
//!
//! Implementations of the `TokenVerifier` and `IdentityProvider` ports:
//!
//! - `firebase` - ID token verification against Google's signing keys
//! - `firebase_admin` - Identity Toolkit account administration
//! - `mock` - In-memory implementations for tests

mod firebase;
mod firebase_admin;
mod mock;

pub use firebase::FirebaseTokenVerifier;
pub use firebase_admin::FirebaseAdminClient;
pub use mock::{MockIdentityProvider, MockTokenVerifier};
