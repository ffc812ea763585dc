//! Async client for the Etherpad Lite HTTP API
//!
//! Every API function is a signed GET against `{base_url}/{function}` that
//! answers with a `{code, message, data}` envelope. [`EtherpadClient`] maps
//! that envelope to `data` or a typed [`EtherpadError`], and [`Pad`] wraps a
//! single pad ID so its properties read like methods.
//!
//! ```no_run
//! use etherpad_lite::EtherpadClient;
//!
//! # async fn example() -> etherpad_lite::Result<()> {
//! let client = EtherpadClient::new("http://localhost:9001/api/1.2.12", "secret")?;
//! let pad = client.create_pad("meeting-notes", Some("Agenda")).await?;
//! pad.set_text("Agenda\n- budget").await?;
//! println!("{}", pad.text().await?);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod pad;
pub mod params;
pub mod types;
pub mod url;

pub use client::EtherpadClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{EtherpadError, Result};
pub use pad::Pad;
pub use params::{ParamValue, Params};
pub use types::{ApiResponse, SessionInfo, SessionMap};
pub use url::{clean_url, generate_url};
