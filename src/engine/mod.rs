//! Calculator engine: state machine, exact arithmetic and display channels.
//!
//! # Architecture
//!
//! ```text
//! input operation → guarded transition → EngineState → publish
//!                         │                               │
//!                         └── CalcError ──► Invalid        ├─► result channel  (formatted)
//!                                                          └─► process channel (expression)
//! ```
//!
//! # Modules
//!
//! - [`calculator`]: The [`Engine`] and its nine input operations
//! - [`channel`]: Replay-last publish/subscribe primitive
//! - [`mode`]: State machine tags
//! - [`shared`]: Mutex-serialized handle for multi-threaded callers
//! - [`state`]: Engine state record and serializable snapshot

pub mod calculator;
pub mod channel;
pub mod mode;
pub mod shared;
pub mod state;

pub use calculator::Engine;
pub use channel::{Channel, Subscriber, SubscriptionId};
pub use mode::Mode;
pub use shared::SharedEngine;
pub use state::{EngineSnapshot, EngineState};
