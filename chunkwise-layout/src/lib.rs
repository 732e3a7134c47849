//! Chunk layout model of a zchunk container, together with the invariants every layout has to
//! satisfy and the witness-chunk check used to tie a layout back to the original file.

pub mod container;
pub mod error;
pub mod layout;
pub mod oracle;
pub mod validator;

pub use error::{ContainerError, LayoutError, VerifyError};
pub use layout::{ChunkDescriptor, ChunkLayout, ContainerSizes, LayoutParams};
pub use oracle::{select_witness, verify_slice};
