//! Segmenter
//!
//! Splits a document into ordered, bounded segments, cutting on line breaks
//! where possible. Lengths are counted in chars.

/// Splits documents into segments of at most `max_size` chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    max_size: usize,
}

impl Segmenter {
    /// A `max_size` of zero is treated as one.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size: max_size.max(1),
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Segment `text`.
    ///
    /// The trimmed text is returned whole when it fits. Otherwise each cut is
    /// placed at the last `'\n'` inside the window, or at the exact window end
    /// when the window has none. Segments are trimmed and never empty, except
    /// the single element returned for blank input.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();

        if len <= self.max_size {
            return vec![text.to_string()];
        }

        let mut segments = Vec::new();
        let mut start = 0;
        while start < len {
            let mut end = (start + self.max_size).min(len);
            if end < len {
                if let Some(nl) = chars[start..end].iter().rposition(|c| *c == '\n') {
                    if nl > 0 {
                        end = start + nl;
                    }
                }
            }

            let piece: String = chars[start..end].iter().collect();
            let piece = piece.trim();
            if !piece.is_empty() {
                segments.push(piece.to_string());
            }
            start = end;
        }
        segments
    }
}

/// Segment `text` with a one-off [`Segmenter`].
pub fn segment(text: &str, max_size: usize) -> Vec<String> {
    Segmenter::new(max_size).segment(text)
}
