use crate::align::AlignOptions;
use crate::apply::{HighlightSink, refresh};
use crate::plan::{Highlights, Side, plan_with};
use crate::position::Document;

/// Two documents compared after every change
///
/// Each pass replaces the previous highlights entirely. A pass over the same
/// texts as the previous one reuses its result.
#[derive(Debug, Default)]
pub struct CompareSession {
    left: String,
    right: String,
    options: AlignOptions,
    highlights: Highlights,
    /// Texts behind `highlights`
    compared: Option<(String, String)>,
    passes: usize,
}

impl CompareSession {
    pub fn new(options: AlignOptions) -> Self {
        Self { options, ..Self::default() }
    }

    pub fn text(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    /// Number of comparisons actually computed
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Replace the text of one side and recompare
    pub fn set_text(&mut self, side: Side, text: &str) -> &Highlights {
        match side {
            Side::Left => self.left = text.to_string(),
            Side::Right => self.right = text.to_string(),
        }
        self.compare()
    }

    /// Empty one side and recompare
    pub fn clear(&mut self, side: Side) -> &Highlights {
        self.set_text(side, "")
    }

    /// Run a comparison pass over the current texts
    pub fn compare(&mut self) -> &Highlights {
        if let Some((left, right)) = &self.compared
            && *left == self.left
            && *right == self.right
        {
            log::trace!("texts unchanged, reusing previous highlights");
            return &self.highlights;
        }

        self.highlights = plan_with(&Document::parse(&self.left), &Document::parse(&self.right), self.options);
        self.compared = Some((self.left.clone(), self.right.clone()));
        self.passes += 1;

        log::debug!("comparison pass {}: {} range(s)", self.passes, self.highlights.len());
        &self.highlights
    }

    /// Push the current highlights to both presentation sinks
    pub fn apply_to<L, R>(&self, left: &mut L, right: &mut R)
    where
        L: HighlightSink + ?Sized,
        R: HighlightSink + ?Sized,
    {
        refresh(left, self.highlights.for_side(Side::Left));
        refresh(right, self.highlights.for_side(Side::Right));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::StyledBuffer;
    use crate::plan::{HighlightTag, compare};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_each_edit_recompares() {
        let mut session = CompareSession::default();
        assert!(session.set_text(Side::Left, "cat").right.is_empty());
        assert_eq!(session.highlights().left[0].tag, HighlightTag::Deletion);

        session.set_text(Side::Right, "car");
        assert_eq!(session.highlights(), &compare("cat", "car"));
        assert_eq!(session.passes(), 2);
    }

    #[test]
    fn test_highlights_are_replaced_not_accumulated() {
        let mut session = CompareSession::default();
        session.set_text(Side::Left, "one\ntwo");
        session.set_text(Side::Right, "one\nTWO");
        assert_eq!(session.highlights().left.len(), 1);

        session.set_text(Side::Right, "one\ntwo");
        assert!(session.highlights().is_empty());
    }

    #[test]
    fn test_unchanged_text_reuses_pass() {
        let mut session = CompareSession::default();
        session.set_text(Side::Left, "abc");
        session.set_text(Side::Left, "abc");
        session.compare();
        assert_eq!(session.passes(), 1);

        // Changing and restoring a side is two real passes
        session.set_text(Side::Right, "abd");
        session.set_text(Side::Right, "");
        assert_eq!(session.passes(), 3);
        assert_eq!(session.highlights(), &compare("abc", ""));
    }

    #[test]
    fn test_clear_side() {
        let mut session = CompareSession::default();
        session.set_text(Side::Left, "hello");
        session.set_text(Side::Right, "hello");
        assert!(session.highlights().is_empty());

        session.clear(Side::Left);
        assert_eq!(session.text(Side::Left), "");
        assert_eq!(session.highlights().right.len(), 1);
        assert_eq!(session.highlights().right[0].tag, HighlightTag::Addition);
    }

    #[test]
    fn test_apply_to_buffers() {
        let mut session = CompareSession::default();
        session.set_text(Side::Left, "cat");
        session.set_text(Side::Right, "car");

        let mut left = StyledBuffer::from_text(session.text(Side::Left));
        let mut right = StyledBuffer::from_text(session.text(Side::Right));
        session.apply_to(&mut left, &mut right);

        assert_eq!(left.tag_at(1, 2), Some(HighlightTag::Modified));
        assert_eq!(right.tag_at(1, 2), Some(HighlightTag::Modified));
        assert_eq!(right.tag_at(1, 0), None);
    }
}
