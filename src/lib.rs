//! # Probing Hash Map
//!
//! A Rust implementation of an open addressing hash table with linear probing.
//!
//! The crate is built around a single table:
//!
//! - `ProbingTable`: entries live directly in a power-of-two slot array, collisions walk
//!   forward one slot at a time, and the table doubles at 60% occupancy and shrinks by a
//!   factor of four when removals leave it sparse
//!
//! Around it sit two thin layers:
//!
//! - `HashMap`: picks a table strategy at construction and forwards every call through the
//!   `Map` trait
//! - `MapView`: std-style iteration over any `Map`, with a cursor that removes the entry it
//!   points at
//!
//! ## Basic Usage
//!
//! ```rust
//! use probing_hashmap::ProbingTable;
//!
//! // Create a new table
//! let mut table = ProbingTable::new();
//!
//! // Insert values
//! table.insert("apple".to_string(), 1);
//! table.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(table.get("apple"), Some(&1));
//!
//! // Update values
//! assert_eq!(table.insert("apple".to_string(), 10), Some(1));
//! assert_eq!(table.get("apple"), Some(&10));
//!
//! // Remove values
//! assert_eq!(table.remove("apple"), Some(10));
//! assert_eq!(table.get("apple"), None);
//!
//! // Check the invariants
//! assert!(table.validate());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use probing_hashmap::{ProbingTable, TableConfig};
//!
//! let config = TableConfig::builder()
//!     .minimum_capacity(64)
//!     .load_factor(0.5)
//!     .build()
//!     .expect("valid parameters");
//!
//! let table: ProbingTable<u64, u64> = ProbingTable::with_config(0, config);
//! assert_eq!(table.capacity(), 64);
//! ```

/// Module holding the construction-time parameters and their validation
mod config;
/// Module implementing the strategy-selecting facade and the `Map` trait
mod hash_map;
/// Module implementing the std-style adapter over any `Map`
mod map_view;
/// Module implementing the linear probing table
mod probing_table;

pub use config::{
    ConfigError, DEFAULT_LOAD_FACTOR, DEFAULT_MINIMUM_CAPACITY, DEFAULT_SHRINK_DIVISOR,
    TableConfig, TableConfigBuilder,
};
pub use hash_map::{HashMap, Map, Strategy};
pub use map_view::{Cursor, MapView};
pub use probing_table::{Iter, ProbingTable};
