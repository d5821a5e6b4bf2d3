/*! Sentence segmentation

Both the converter (source rows) and the CoNLL-U block reader (text lines) group a flat
stream of items into sentences. [Segmenter] holds the shared two-state machine:

- `Outside`: no sentence is open. Pushing an item opens one.
- `InSentence`: items accumulate until [Segmenter::close] is called on a boundary,
  which emits the sentence and goes back to `Outside`.

[Segmenter::finish] flushes a sentence that is still open at end of input.
!*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Outside,
    InSentence,
}

#[derive(Debug)]
pub struct Segmenter<T> {
    current: Vec<T>,
}

impl<T> Default for Segmenter<T> {
    fn default() -> Self {
        Self {
            current: Vec::new(),
        }
    }
}

impl<T> Segmenter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        if self.current.is_empty() {
            State::Outside
        } else {
            State::InSentence
        }
    }

    /// Add an item to the open sentence, opening one if needed.
    pub fn push(&mut self, item: T) {
        self.current.push(item);
    }

    /// Items of the open sentence, empty when outside.
    pub fn current(&self) -> &[T] {
        &self.current
    }

    /// Boundary: emit the open sentence, if any.
    pub fn close(&mut self) -> Option<Vec<T>> {
        match self.state() {
            State::Outside => None,
            State::InSentence => Some(std::mem::take(&mut self.current)),
        }
    }

    /// End of input.
    pub fn finish(mut self) -> Option<Vec<T>> {
        self.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_outside() {
        let s: Segmenter<u8> = Segmenter::new();
        assert_eq!(s.state(), State::Outside);
        assert_eq!(s.finish(), None);
    }

    #[test]
    fn close_emits_and_resets() {
        let mut s = Segmenter::new();
        s.push(1);
        s.push(2);
        assert_eq!(s.state(), State::InSentence);
        assert_eq!(s.close(), Some(vec![1, 2]));
        assert_eq!(s.state(), State::Outside);

        // consecutive boundaries do not emit empty sentences
        assert_eq!(s.close(), None);
    }

    #[test]
    fn finish_flushes_open_sentence() {
        let mut s = Segmenter::new();
        s.push("a");
        s.close();
        s.push("b");
        assert_eq!(s.finish(), Some(vec!["b"]));
    }
}
