use crate::PnmError;
use crate::pnm::{self, Maxval, PnmFormat};

/// Resource limits for encode operations.
///
/// All fields default to `None` (no limit). Limits are checked before the
/// first byte reaches the output stream.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes the encoder allocates: its row scratch, plus the whole
    /// file in buffered mode.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check a `width` x `height` encode to `format` before anything is
    /// written. `buffered` adds the rendered file to the allocation.
    pub(crate) fn check_encode(
        &self,
        format: PnmFormat,
        width: u32,
        height: u32,
        maxval: Maxval,
        buffered: bool,
    ) -> Result<(), PnmError> {
        self.check_dimensions(width, height)?;
        let scratch = pnm::scratch_len(format, width, maxval);
        let bytes = if buffered {
            let file = pnm::encoded_len(format, width, height, maxval)?;
            scratch.and_then(|row| row.checked_add(file))
        } else {
            scratch
        };
        self.check_memory(bytes.ok_or(PnmError::DimensionsTooLarge { width, height })?)
    }

    fn check_dimensions(&self, width: u32, height: u32) -> Result<(), PnmError> {
        let pixels = u64::from(width) * u64::from(height);
        for (what, value, limit) in [
            ("width", u64::from(width), self.max_width),
            ("height", u64::from(height), self.max_height),
            ("pixel count", pixels, self.max_pixels),
        ] {
            if let Some(max) = limit
                && value > max
            {
                return Err(PnmError::LimitExceeded(format!(
                    "{what} {value} exceeds limit {max}"
                )));
            }
        }
        Ok(())
    }

    fn check_memory(&self, bytes: usize) -> Result<(), PnmError> {
        if let Some(max) = self.max_memory_bytes
            && bytes as u64 > max
        {
            return Err(PnmError::LimitExceeded(format!(
                "encoder needs {bytes} bytes, memory limit is {max}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory(max: u64) -> Limits {
        Limits {
            max_memory_bytes: Some(max),
            ..Default::default()
        }
    }

    #[test]
    fn default_allows_everything() {
        let limits = Limits::default();
        assert!(limits.check_dimensions(u32::MAX, u32::MAX).is_ok());
        assert!(limits.check_memory(usize::MAX).is_ok());
    }

    #[test]
    fn pixel_count_is_enforced() {
        let limits = Limits {
            max_pixels: Some(12),
            ..Default::default()
        };
        assert!(limits.check_dimensions(4, 3).is_ok());
        assert!(matches!(
            limits.check_dimensions(4, 4),
            Err(PnmError::LimitExceeded(_))
        ));
    }

    #[test]
    fn pbm_scratch_counts_levels_and_packed_row() {
        // 64 levels + 8 packed bytes
        let pbm = |limits: &Limits| {
            limits.check_encode(PnmFormat::Pbm, 64, 1, Maxval::Eight, false)
        };
        assert!(pbm(&memory(72)).is_ok());
        assert!(matches!(pbm(&memory(71)), Err(PnmError::LimitExceeded(_))));
        assert!(pbm(&memory(8)).is_err());
    }

    #[test]
    fn buffered_adds_the_whole_file() {
        // "P5\n4 2\n255\n" is 11 bytes, raster 8, row scratch 4
        let pgm = |limits: &Limits, buffered| {
            limits.check_encode(PnmFormat::Pgm, 4, 2, Maxval::Eight, buffered)
        };
        assert!(pgm(&memory(4), false).is_ok());
        assert!(pgm(&memory(4), true).is_err());
        assert!(pgm(&memory(23), true).is_ok());
        assert!(pgm(&memory(22), true).is_err());
    }
}
