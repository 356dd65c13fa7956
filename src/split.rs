//! Enumerate every way to cut a string into short consecutive pieces.

/// Lazy iterator over the partitions of a string.
///
/// Pieces are at most `max_piece_len` chars long. Partitions come out with
/// the longest first piece first, and the same order applies recursively to
/// the rest: `"abc"` yields `[abc]`, `[ab, c]`, `[a, bc]`, `[a, b, c]`.
#[derive(Debug, Clone)]
pub struct Splits<'a> {
    text: &'a str,
    /// Byte offset of every char boundary, including the end of `text`.
    bounds: Vec<usize>,
    max_piece_len: usize,
    /// Piece lengths (in chars) of the partition to yield next.
    lengths: Option<Vec<usize>>,
}

impl<'a> Splits<'a> {
    pub fn new(text: &'a str, max_piece_len: usize) -> Self {
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;
        let max_piece_len = max_piece_len.max(1);
        let lengths = (char_count > 0).then(|| {
            let mut lengths = Vec::new();
            fill_greedy(&mut lengths, char_count, max_piece_len);
            lengths
        });
        Self {
            text,
            bounds,
            max_piece_len,
            lengths,
        }
    }

    fn pieces(&self, lengths: &[usize]) -> Vec<&'a str> {
        let mut start = 0;
        lengths
            .iter()
            .map(|len| {
                let piece = &self.text[self.bounds[start]..self.bounds[start + len]];
                start += len;
                piece
            })
            .collect()
    }

    /// Step to the next partition: shorten the rightmost piece that can
    /// shrink, then refill the remainder with the longest pieces allowed.
    fn advance(&mut self) {
        let char_count = self.bounds.len() - 1;
        let max_piece_len = self.max_piece_len;
        let Some(lengths) = self.lengths.as_mut() else {
            return;
        };
        match lengths.iter().rposition(|&len| len > 1) {
            Some(pos) => {
                lengths.truncate(pos + 1);
                lengths[pos] -= 1;
                let used: usize = lengths.iter().sum();
                fill_greedy(lengths, char_count - used, max_piece_len);
            }
            None => self.lengths = None,
        }
    }
}

fn fill_greedy(lengths: &mut Vec<usize>, mut remaining: usize, max_piece_len: usize) {
    while remaining > 0 {
        let len = remaining.min(max_piece_len);
        lengths.push(len);
        remaining -= len;
    }
}

impl<'a> Iterator for Splits<'a> {
    type Item = Vec<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        let pieces = self.pieces(self.lengths.as_deref()?);
        self.advance();
        Some(pieces)
    }
}

/// All partitions of `text` with pieces of at most `max_piece_len` chars.
pub fn splits(text: &str, max_piece_len: usize) -> Splits<'_> {
    Splits::new(text, max_piece_len)
}
