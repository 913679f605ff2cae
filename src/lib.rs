// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `HuumR` Lib - A Rust client library for the Huum sauna cloud API.
//!
//! This library provides async APIs to authenticate against the Huum
//! cloud service, discover sauna devices, start and stop heating sessions,
//! and fetch temperature statistics.
//!
//! # Supported Features
//!
//! - **Session authentication**: Login with account credentials, stored
//!   through an injected credential store, validated implicitly
//! - **Device status**: Current and target temperature, reachability,
//!   heating state for every sauna on the account
//! - **Heating sessions**: Start toward a target temperature with a
//!   bounded duration, stop with a session summary
//! - **Statistics**: Historical temperature readings per device
//!
//! The vendor service has a few quirks this library absorbs: JSON bodies
//! arrive wrapped in parentheses (`({...});`), endpoints mix GET and POST
//! in ways that contradict their documentation, and the only signal that a
//! session token has been invalidated is a 403 from the status endpoint.
//!
//! # Quick Start
//!
//! ## Login and start a heating session
//!
//! ```no_run
//! use huumr_lib::{ApiClient, SessionDuration, TargetTemperature, select_device};
//!
//! #[tokio::main]
//! async fn main() -> huumr_lib::Result<()> {
//!     let mut client = ApiClient::new()?;
//!     client.login("sauna@example.com", "secret").await?;
//!
//!     // Resolve the one device this command targets.
//!     let devices = client.get_status().await?;
//!     let device = select_device(&devices, None)?;
//!     println!("heating {} (currently {}°C)", device.name, device.current_temperature);
//!
//!     let response = client
//!         .start(TargetTemperature::new(85)?, SessionDuration::default())
//!         .await?;
//!     if let Some(minutes) = response.estimated_minutes() {
//!         println!("ready in ~{minutes} minutes");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Reuse a stored session across invocations
//!
//! ```no_run
//! use huumr_lib::{ApiClient, MemoryStore, SessionManager};
//!
//! #[tokio::main]
//! async fn main() -> huumr_lib::Result<()> {
//!     // A real embedder injects its keyring-backed store here.
//!     let manager = SessionManager::new(MemoryStore::new());
//!     let mut client = ApiClient::new()?;
//!
//!     let credentials = manager.ensure_session(&mut client).await?;
//!     println!("session for {}", credentials.email);
//!
//!     for device in client.get_status().await? {
//!         println!("{}: {}°C", device.name, device.current_temperature);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod device;
pub mod error;
pub mod response;
pub mod retry;
pub mod session;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, DEFAULT_BASE_URL};
pub use device::{Device, select_device};
pub use error::{
    ApiError, Error, ParseError, Result, SelectionError, StorageError, ValueError,
};
pub use response::{
    ApiResponse, LoginResponse, StartResponse, StatusResponse, StopResponse, TemperatureReading,
};
pub use retry::RetryPolicy;
pub use session::{CredentialStore, Credentials, MemoryStore, SessionManager};
pub use types::{SessionDuration, TargetTemperature};
