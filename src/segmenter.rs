use std::collections::VecDeque;

/// Characters that end a sentence chunk. Newline also flushes so that
/// pasted paragraphs keep their line structure in the output.
const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// One step of the input scan, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A flushed chunk with visible content, terminator included.
    /// Dispatched to the speller as one request.
    Sentence(String),
    /// A flushed chunk that was whitespace up to and including its
    /// terminator. Rendered as a line break, never dispatched. The raw
    /// text is carried so the scan stays lossless.
    LineBreak(String),
    /// 1-based count of chars consumed so far, emitted after every
    /// char and after any flush that char triggered.
    Progress(usize),
}

/// Scan `text` into sentence chunks interleaved with progress ticks.
///
/// The scan accumulates chars into a buffer and flushes it whenever the
/// current char is `.`, `!`, `?` or a newline. Whatever remains in the
/// buffer after the last char flushes as a final `Sentence`, even when
/// it never saw a terminator.
pub fn scan(text: &str) -> Scanner<'_> {
    Scanner {
        chars: text.chars(),
        index: 0,
        buf: String::new(),
        queue: VecDeque::new(),
        finished: false,
    }
}

pub struct Scanner<'a> {
    chars: std::str::Chars<'a>,
    index: usize,
    buf: String,
    queue: VecDeque<ScanEvent>,
    finished: bool,
}

impl Scanner<'_> {
    fn flush(&mut self) {
        let chunk = std::mem::take(&mut self.buf);
        if chunk.trim_end().is_empty() {
            self.queue.push_back(ScanEvent::LineBreak(chunk));
        } else {
            self.queue.push_back(ScanEvent::Sentence(chunk));
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<ScanEvent> {
        loop {
            if let Some(ev) = self.queue.pop_front() {
                return Some(ev);
            }
            match self.chars.next() {
                Some(ch) => {
                    self.index += 1;
                    self.buf.push(ch);
                    if ch == '\n' || TERMINATORS.contains(&ch) {
                        self.flush();
                    }
                    self.queue.push_back(ScanEvent::Progress(self.index));
                }
                None => {
                    if self.finished {
                        return None;
                    }
                    self.finished = true;
                    // Trailing remainder: any non-empty buffer goes out
                    // as a sentence, whitespace-only included.
                    if !self.buf.is_empty() {
                        let chunk = std::mem::take(&mut self.buf);
                        self.queue.push_back(ScanEvent::Sentence(chunk));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(text: &str) -> Vec<ScanEvent> {
        scan(text).collect()
    }

    #[test]
    fn single_terminated_sentence() {
        let evs = events("Hello.");
        assert_eq!(
            evs,
            vec![
                ScanEvent::Progress(1),
                ScanEvent::Progress(2),
                ScanEvent::Progress(3),
                ScanEvent::Progress(4),
                ScanEvent::Progress(5),
                ScanEvent::Sentence("Hello.".into()),
                ScanEvent::Progress(6),
            ]
        );
    }

    #[test]
    fn final_progress_equals_char_count() {
        for text in ["Hello.", "안녕하세요. 반갑습니다!", "a\nb\nc", "", "no punctuation"] {
            let last = events(text)
                .into_iter()
                .filter_map(|ev| match ev {
                    ScanEvent::Progress(i) => Some(i),
                    _ => None,
                })
                .last();
            assert_eq!(last, (!text.is_empty()).then(|| text.chars().count()), "input {text:?}");
        }
    }

    #[test]
    fn progress_is_monotonic() {
        let mut prev = 0;
        for ev in scan("One. Two! Three?\nFour") {
            if let ScanEvent::Progress(i) = ev {
                assert_eq!(i, prev + 1);
                prev = i;
            }
        }
        assert_eq!(prev, "One. Two! Three?\nFour".chars().count());
    }

    #[test]
    fn chunks_reconstruct_input() {
        let text = "첫 문장.  둘째!\n\n셋째는 어떨까요? 그리고 꼬리";
        let mut rebuilt = String::new();
        for ev in scan(text) {
            match ev {
                ScanEvent::Sentence(s) | ScanEvent::LineBreak(s) => rebuilt.push_str(&s),
                ScanEvent::Progress(_) => {}
            }
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn blank_chunk_becomes_line_break() {
        let evs = events("Hi.\n\nBye.");
        let chunks: Vec<_> = evs
            .iter()
            .filter(|ev| !matches!(ev, ScanEvent::Progress(_)))
            .cloned()
            .collect();
        assert_eq!(
            chunks,
            vec![
                ScanEvent::Sentence("Hi.".into()),
                ScanEvent::LineBreak("\n".into()),
                ScanEvent::LineBreak("\n".into()),
                ScanEvent::Sentence("Bye.".into()),
            ]
        );
    }

    #[test]
    fn whitespace_only_line_is_a_line_break() {
        let chunks: Vec<_> = events("  \nDone.")
            .into_iter()
            .filter(|ev| !matches!(ev, ScanEvent::Progress(_)))
            .collect();
        assert_eq!(
            chunks,
            vec![
                ScanEvent::LineBreak("  \n".into()),
                ScanEvent::Sentence("Done.".into()),
            ]
        );
    }

    #[test]
    fn punctuation_after_whitespace_still_dispatches() {
        // Only the trailing whitespace is ignored when deciding whether a
        // chunk has content; "   ." ends in a visible terminator.
        let chunks: Vec<_> = events("   .")
            .into_iter()
            .filter(|ev| !matches!(ev, ScanEvent::Progress(_)))
            .collect();
        assert_eq!(chunks, vec![ScanEvent::Sentence("   .".into())]);
    }

    #[test]
    fn unterminated_input_is_one_trailing_sentence() {
        let evs = events("no punctuation");
        let n = "no punctuation".chars().count();
        assert_eq!(evs[n - 1], ScanEvent::Progress(n));
        assert_eq!(evs[n], ScanEvent::Sentence("no punctuation".into()));
        assert_eq!(evs.len(), n + 1);
    }

    #[test]
    fn flush_precedes_its_progress_tick() {
        let evs = events("A.B");
        assert_eq!(
            evs,
            vec![
                ScanEvent::Progress(1),
                ScanEvent::Sentence("A.".into()),
                ScanEvent::Progress(2),
                ScanEvent::Progress(3),
                ScanEvent::Sentence("B".into()),
            ]
        );
    }

    #[test]
    fn trailing_whitespace_remainder_still_flushes() {
        let chunks: Vec<_> = events("Done.  ")
            .into_iter()
            .filter(|ev| !matches!(ev, ScanEvent::Progress(_)))
            .collect();
        assert_eq!(
            chunks,
            vec![
                ScanEvent::Sentence("Done.".into()),
                ScanEvent::Sentence("  ".into()),
            ]
        );
    }
}
