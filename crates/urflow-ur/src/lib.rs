//! Uniform-resource rendering and reassembly for animated scannable codes.
//!
//! A payload becomes a [`Ur`] (a type tag plus canonical CBOR), which a
//! [`UrEncoder`] turns into a cyclic stream of case-insensitive part strings.
//! On the other side of the air gap, a [`UrDecoder`] absorbs whatever
//! strings the scanner happens to catch - out of order, duplicated, mixed
//! with noise - and reconstructs the original UR.
//!
//! ```
//! use urflow_fountain::FountainConfig;
//! use urflow_ur::{Ur, UrDecoder, UrEncoder};
//!
//! let ur = Ur::from_payload("bytes", b"Wolf")?;
//! let mut encoder = UrEncoder::new(ur.clone(), &FountainConfig::default())?;
//! assert_eq!(encoder.next_part()?, "ur:bytes/fyhgjljziybwnlgmgh");
//!
//! let mut decoder = UrDecoder::new();
//! decoder.receive("garbage is fine");
//! decoder.receive("ur:bytes/fyhgjljziybwnlgmgh");
//! assert_eq!(decoder.message()?, Some(ur));
//! # Ok::<(), urflow_ur::UrError>(())
//! ```
//!
//! Larger payloads fragment transparently:
//!
//! ```
//! use urflow_fountain::FountainConfig;
//! use urflow_ur::{Ur, UrDecoder, UrEncoder};
//!
//! let ur = Ur::from_payload("bytes", &[0u8; 1024])?;
//! let mut encoder = UrEncoder::new(ur.clone(), &FountainConfig::default())?;
//!
//! let mut decoder = UrDecoder::new();
//! while !decoder.is_complete() {
//!     decoder.receive(&encoder.next_part()?);
//! }
//! assert_eq!(decoder.message()?.unwrap().payload()?, vec![0u8; 1024]);
//! # Ok::<(), urflow_ur::UrError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bytewords;
mod decoder;
mod encoder;
mod error;
mod part;
mod ur;

pub use decoder::UrDecoder;
pub use encoder::UrEncoder;
pub use error::UrError;
pub use part::{parse, render_fragment, render_single, ParsedPart};
pub use ur::Ur;
