use crate::{error::ContainerError, layout::ContainerSizes};

/// Every zchunk file starts with these bytes.
pub const ZCK_MAGIC: [u8; 5] = [0, b'Z', b'C', b'K', b'1'];

/// Checks that `prefix`, the first bytes of the compressed file, starts with [`ZCK_MAGIC`].
pub fn check_magic(prefix: &[u8]) -> Result<(), ContainerError> {
    if prefix.starts_with(&ZCK_MAGIC) {
        Ok(())
    } else {
        Err(ContainerError::BadMagic {
            found: prefix.iter().copied().take(ZCK_MAGIC.len()).collect(),
        })
    }
}

/// Checks that compressing the original file actually made it smaller.
pub fn check_shrunk(sizes: ContainerSizes) -> Result<(), ContainerError> {
    if sizes.compressed < sizes.original {
        Ok(())
    } else {
        Err(ContainerError::NotSmaller {
            compressed: sizes.compressed,
            original: sizes.original,
        })
    }
}
