//! OptionStore - line-oriented typed configuration store
//!
//! Reads and writes flat key-value configuration files where every line
//! carries a one-character type tag, and exposes the loaded options through
//! get-or-set-default accessors.
//!
//! # File format
//!
//! ```text
//! ivolume 7
//! dpitch 0.500000
//! tname Alice Smith
//! ```
//!
//! One option per line: the tag (`i` = integer, `d` = double, `t` = text),
//! the name up to the first space, then the value through to the end of the
//! line. Text values may contain spaces; nothing is escaped.
//!
//! # Example
//!
//! ```no_run
//! use optionstore::OptionStore;
//!
//! # fn main() -> Result<(), optionstore::StoreError> {
//! let mut store = OptionStore::load("settings.cfg")?;
//! let volume = store.get_int("volume", 50);
//! store.set_text("name", "Alice Smith");
//! store.save()?;
//! # Ok(())
//! # }
//! ```

mod codec;
pub mod error;
mod store;

pub use error::StoreError;
pub use store::{Entry, Kind, OptionStore, Value};

/// File tag for integer options
pub const TAG_INT: u8 = b'i';

/// File tag for double options
pub const TAG_DOUBLE: u8 = b'd';

/// File tag for text options
pub const TAG_TEXT: u8 = b't';
