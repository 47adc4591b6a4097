//! Display-title numbering.
//!
//! Each chapter kind draws from its own exhaustible counter. Counters are
//! stateful and order-dependent: call [`NumberingState::display_title`]
//! exactly once per chapter, in catalog order.

use crate::catalog::ChapterKind;
use crate::error::{Error, Result};

/// Legacy label baked into the source headings by an earlier edition.
const LEGACY_APPENDIX_PREFIX: &str = "Appendix A: ";

/// Per-kind numbering counters.
#[derive(Debug, Clone)]
pub struct NumberingState {
    chapters: std::ops::RangeInclusive<u32>,
    appendices: std::ops::RangeInclusive<char>,
    parts: std::ops::RangeInclusive<u32>,
}

impl NumberingState {
    pub fn new() -> Self {
        Self {
            chapters: 1..=99,
            appendices: 'A'..='L',
            parts: 1..=9,
        }
    }

    /// Compute the display title for the next chapter of the given kind,
    /// consuming one counter value for numbered kinds.
    pub fn display_title(&mut self, kind: ChapterKind, raw_title: &str) -> Result<String> {
        let base = raw_title.replace(LEGACY_APPENDIX_PREFIX, "");
        match kind {
            ChapterKind::Chapter => {
                let n = self.draw(kind, |s| s.chapters.next())?;
                Ok(format!("{n}: {base}"))
            }
            ChapterKind::Appendix => {
                let letter = self.draw(kind, |s| s.appendices.next())?;
                Ok(format!("Appendix {letter}: {base}"))
            }
            ChapterKind::Part => {
                let n = self.draw(kind, |s| s.parts.next())?;
                Ok(format!("Part {n}: {base}"))
            }
            ChapterKind::Epilogue => Ok(format!("Epilogue: {base}")),
            ChapterKind::Plain => Ok(base),
        }
    }

    fn draw<T>(
        &mut self,
        kind: ChapterKind,
        next: impl FnOnce(&mut Self) -> Option<T>,
    ) -> Result<T> {
        next(self).ok_or(Error::CounterExhausted { kind })
    }
}

impl Default for NumberingState {
    fn default() -> Self {
        Self::new()
    }
}
