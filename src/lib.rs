//! Behaviour of the TaurusBet funnel site, independent of the browser.
//!
//! The `frontend` crate renders the pages with Yew and plugs the DOM, local storage
//! and `fetch` into the seams defined here ([`store::KeyValueStore`],
//! [`modal::ModalHost`], [`submission::Transport`]).

pub mod carousel;
pub mod config;
pub mod contact;
pub mod countdown;
pub mod error;
pub mod flow;
pub mod modal;
pub mod reveal;
pub mod seats;
pub mod store;
pub mod submission;
pub mod time_source;

pub use config::{Environment, FunnelConfig};
pub use error::{BackendErrorCode, ConfigError, StoreError, SubmissionError};
