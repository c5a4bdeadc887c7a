//! Client for the Pairio remote key/value service.
//!
//! Every request is a plain HTTP GET. The collection, hashed key, and value
//! (for sets) travel in the URL path; the channel and a signature travel in
//! the query string. The signature is the digest of a canonical request
//! descriptor that includes the channel password, so the password itself is
//! never sent.
//!
//! ```text
//! <url>/get/<collection>/<keyhash>?channel=<channel>&signature=<sig>
//! <url>/set/<collection>/<keyhash>/<value>?channel=<channel>&signature=<sig>
//! <url>/set/<collection>/<keyhash>?channel=<channel>&signature=<sig>
//! ```
//!
//! Transport failures are retried on a fixed backoff schedule; malformed or
//! rejected responses are terminal. Either way the caller sees a miss or a
//! `false`, not an error. Only missing configuration is raised.

pub mod client;
pub mod error;
pub mod protocol;
pub mod settings;
pub mod transport;

pub use client::RemoteClient;
pub use error::{RemoteError, RemoteResult};
pub use protocol::{Action, GetResponse, RequestDescriptor, SetResponse};
pub use settings::{EnvLookup, RemoteSettings};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, RetryPolicy};
