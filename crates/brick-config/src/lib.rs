//! Typed, string-serializable, change-notifying configuration records for
//! virtual network bricks.
//!
//! Three layers, leaves first:
//!
//! - [`Parameter`] describes one field: default value plus string
//!   conversion rules (integers, floats, strings, the legacy `*`/empty
//!   boolean form, range-checked spin values, flat lists, opaque objects).
//! - [`Config`] is the per-entity value container, seeded from a declared
//!   [`ParamSet`] and rejecting undeclared names.
//! - [`Base`] is the owning entity: a name, exactly one `Config`, per-field
//!   set hooks, and a synchronous "changed" channel. Persistence uses the
//!   INI-like section format in [`section`].
//!
//! Everything is synchronous and single-threaded; the owning application
//! serializes mutation through its GUI event loop.

mod base;
mod config;
mod error;
mod event;
mod literal;
mod param;
mod value;

pub mod section;

pub use base::{Base, ChangeEvent, Factory, SetHook};
pub use config::{Config, ParamSet, ParamSetBuilder};
pub use error::{ConfigError, Result};
pub use event::{EventSource, Subscription};
pub use param::{Boolean, Float, Integer, ListOf, Object, Parameter, SpinFloat, SpinInt, Str};
pub use value::Value;
