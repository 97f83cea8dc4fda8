//! The caption store and its ordering pass.

use crate::caption::Caption;
use std::collections::VecDeque;

/// An ordered collection of captions.
///
/// Captions are appended in source order during the scan, sorted once,
/// then drained front-to-back by the serializer. The store owns its
/// captions exclusively; dropping it on an error unwind destroys
/// everything it still holds.
#[derive(Debug, Default)]
pub struct CaptionList {
    items: VecDeque<Caption>,
}

impl CaptionList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a caption at the tail.
    pub fn push(&mut self, caption: Caption) {
        self.items.push_back(caption);
    }

    /// Removes and returns the caption at the head.
    pub fn pop(&mut self) -> Option<Caption> {
        self.items.pop_front()
    }

    /// Number of captions currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no captions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Discards all captions.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sorts the list ascending by raw key bytes.
    ///
    /// Bottom-up merge sort: the current run length starts at 1 and
    /// doubles each pass; each pass splits the list into adjacent run
    /// pairs and merges them, and the sort terminates once a pass
    /// produces a single run. Byte-wise `str` comparison orders equal
    /// prefixes shorter-first, and ties take the earlier (left) run, so
    /// captions with equal keys keep their insertion order.
    pub fn sort(&mut self) {
        let mut src = std::mem::take(&mut self.items);
        let mut left: VecDeque<Caption> = VecDeque::new();
        let mut run_len = 1;

        loop {
            let mut dst = VecDeque::with_capacity(src.len());
            let mut runs = 0;

            while !src.is_empty() {
                runs += 1;
                left.extend(src.drain(..run_len.min(src.len())));
                let mut right_len = run_len.min(src.len());

                loop {
                    let right_head = if right_len > 0 { src.front() } else { None };
                    let take_left = match (left.front(), right_head) {
                        (Some(l), Some(r)) => l.key <= r.key,
                        (Some(_), None) => true,
                        (None, Some(_)) => false,
                        (None, None) => break,
                    };

                    if take_left {
                        if let Some(caption) = left.pop_front() {
                            dst.push_back(caption);
                        }
                    } else if let Some(caption) = src.pop_front() {
                        dst.push_back(caption);
                        right_len -= 1;
                    }
                }
            }

            src = dst;
            if runs <= 1 {
                break;
            }
            run_len *= 2;
        }

        self.items = src;
    }
}

impl Extend<Caption> for CaptionList {
    fn extend<T: IntoIterator<Item = Caption>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list_of(pairs: &[(&str, &str)]) -> CaptionList {
        let mut list = CaptionList::new();
        for (key, value) in pairs {
            list.push(Caption::new((*key).to_string(), (*value).to_string()));
        }
        list
    }

    fn keys(mut list: CaptionList) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(caption) = list.pop() {
            out.push(caption.key);
        }
        out
    }

    #[test]
    fn push_pop_is_fifo() {
        let mut list = list_of(&[("b", "1"), ("a", "2")]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.pop().unwrap().key, "b");
        assert_eq!(list.pop().unwrap().key, "a");
        assert!(list.pop().is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn clear_discards_everything() {
        let mut list = list_of(&[("a", "1"), ("b", "2")]);
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn sort_empty_and_single() {
        let mut empty = CaptionList::new();
        empty.sort();
        assert!(empty.is_empty());

        let mut single = list_of(&[("only", "v")]);
        single.sort();
        assert_eq!(keys(single), vec!["only"]);
    }

    #[test]
    fn sort_orders_by_key_bytes() {
        let mut list = list_of(&[("hello", "World"), ("abc", "Zed")]);
        list.sort();
        assert_eq!(keys(list), vec!["abc", "hello"]);
    }

    #[test]
    fn sort_shorter_prefix_first() {
        let mut list = list_of(&[("abc", "1"), ("ab", "2"), ("abcd", "3")]);
        list.sort();
        assert_eq!(keys(list), vec!["ab", "abc", "abcd"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut list = list_of(&[
            ("dup", "first"),
            ("aaa", "x"),
            ("dup", "second"),
            ("dup", "third"),
        ]);
        list.sort();

        let mut values = Vec::new();
        while let Some(caption) = list.pop() {
            if caption.key == "dup" {
                values.push(caption.value);
            }
        }
        assert_eq!(values, vec!["first", "second", "third"]);
    }

    #[test]
    fn sort_reverse_input() {
        let mut list = list_of(&[("d", "1"), ("c", "2"), ("b", "3"), ("a", "4")]);
        list.sort();
        assert_eq!(keys(list), vec!["a", "b", "c", "d"]);
    }

    proptest! {
        #[test]
        fn sort_matches_stable_reference(
            raw in prop::collection::vec("[a-d]{0,4}", 0..64)
        ) {
            let mut list = CaptionList::new();
            for (i, key) in raw.iter().enumerate() {
                list.push(Caption::new(key.clone(), format!("v{i}")));
            }
            list.sort();

            let mut expected: Vec<(String, String)> = raw
                .iter()
                .enumerate()
                .map(|(i, k)| (k.clone(), format!("v{i}")))
                .collect();
            expected.sort_by(|a, b| a.0.cmp(&b.0));

            let mut actual = Vec::new();
            while let Some(caption) = list.pop() {
                actual.push((caption.key, caption.value));
            }
            prop_assert_eq!(actual, expected);
        }
    }
}
