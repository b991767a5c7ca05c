use core::fmt;

const ELLIPSIS: &str = "...";

/// Fixed-capacity `core::fmt` sink, used where a `core::fmt::Arguments` has
/// to be turned into a `&str` for `ufmt` (panic messages).
///
/// Output that does not fit is cut on a char boundary and ends with `...`.
pub struct StrWriter<const BUFF_SIZE: usize> {
    buffer: [u8; BUFF_SIZE],
    used: usize,
    truncated: bool,
}

impl<const BUFF_SIZE: usize> StrWriter<BUFF_SIZE> {
    const CAPACITY_TEST: () = assert!(
        BUFF_SIZE > ELLIPSIS.len(),
        "StrWriter buffer too small"
    );

    pub const fn new() -> Self {
        let _ = Self::CAPACITY_TEST;

        Self {
            buffer: [0; BUFF_SIZE],
            used: 0,
            truncated: false,
        }
    }

    pub fn as_str(&self) -> &str {
        // only whole chars are ever copied in
        core::str::from_utf8(&self.buffer[..self.used]).unwrap_or_default()
    }

    /// Formats `args` from an empty buffer and returns the text.
    pub fn format(&mut self, args: fmt::Arguments) -> &str {
        self.used = 0;
        self.truncated = false;
        // write_str never fails, overflow is recorded instead
        let _ = fmt::write(self, args);
        self.as_str()
    }

    fn truncate(&mut self) {
        let mut end = (BUFF_SIZE - ELLIPSIS.len()).min(self.used);
        while end > 0 && end < self.used && !is_char_boundary(self.buffer[end]) {
            end -= 1;
        }
        self.buffer[end..end + ELLIPSIS.len()].copy_from_slice(ELLIPSIS.as_bytes());
        self.used = end + ELLIPSIS.len();
        self.truncated = true;
    }
}

fn is_char_boundary(byte: u8) -> bool {
    // not a UTF-8 continuation byte
    (byte as i8) >= -0x40
}

impl<const BUFF_SIZE: usize> fmt::Write for StrWriter<BUFF_SIZE> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }

        let remaining = BUFF_SIZE - self.used;
        if s.len() <= remaining {
            self.buffer[self.used..self.used + s.len()].copy_from_slice(s.as_bytes());
            self.used += s.len();
        } else {
            self.buffer[self.used..].copy_from_slice(&s.as_bytes()[..remaining]);
            self.used = BUFF_SIZE;
            self.truncate();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_fits() {
        let mut w = StrWriter::<32>::new();

        assert_eq!(w.format(format_args!("step {} of {}", 3, 8)), "step 3 of 8");
    }

    #[test]
    fn buffer_is_reused_between_messages() {
        let mut w = StrWriter::<32>::new();
        w.format(format_args!("a much longer first message"));

        assert_eq!(w.format(format_args!("ok")), "ok");
    }

    #[test]
    fn exact_fit_is_not_truncated() {
        let mut w = StrWriter::<4>::new();

        assert_eq!(w.format(format_args!("abcd")), "abcd");
    }

    #[test]
    fn overflow_ends_with_ellipsis() {
        let mut w = StrWriter::<10>::new();
        let s = w.format(format_args!("index out of bounds: {}", 5));

        assert_eq!(s, "index o...");
        assert_eq!(s.len(), 10);
    }

    #[test]
    fn overflow_never_splits_a_char() {
        let mut w = StrWriter::<9>::new();
        // 'é' is two bytes; a cut at byte 6 would land inside the second one
        let s = w.format(format_args!("abcéééé"));

        assert!(s.ends_with(ELLIPSIS));
        assert_eq!(s, "abcé...");
    }
}
