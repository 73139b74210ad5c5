//! EDL export extension point.

use crate::timeline::{Sequence, XmemlError, XmemlResult};

/// Convert a sequence into an Edit Decision List cut-list text.
///
/// Named extension point, not implemented: the EDL grammar the downstream
/// tools expect has not been pinned down yet, and guessing one would lock
/// in an incompatible format. Always fails with `NotImplemented`.
pub fn to_edl(_seq: &Sequence) -> XmemlResult<String> {
    Err(XmemlError::NotImplemented("EDL export"))
}
