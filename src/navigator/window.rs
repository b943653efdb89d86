// SPDX-License-Identifier: GPL-3.0

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Words on each side of the current one that keep a live media swiper
pub const LIVE_RADIUS: usize = 1;

/// How a word slide of the navigator is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    /// Full slide with its media swiper, media get fetched
    Live,
    /// Word text only, no media and no media swiper
    Placeholder,
}

/// Word slides within [`LIVE_RADIUS`] of `current`
pub fn live_range(current: usize, word_count: usize) -> Range<usize> {
    if word_count == 0 {
        return 0..0;
    }

    let current = current.min(word_count - 1);
    current.saturating_sub(LIVE_RADIUS)..(current + LIVE_RADIUS + 1).min(word_count)
}

pub fn slide(index: usize, current: usize, word_count: usize) -> Slide {
    if live_range(current, word_count).contains(&index) {
        Slide::Live
    } else {
        Slide::Placeholder
    }
}

/// Index range of a fixed-row list to render for the given scroll state.
///
/// Extents and offsets share one unit (pixels, rows, ...). The visible rows are
/// widened by `overscan` rows on each side and clamped to `item_count`.
pub fn visible_range(
    item_count: usize,
    viewport_extent: u32,
    scroll_offset: u32,
    item_extent: u32,
    overscan: usize,
) -> Range<usize> {
    if item_count == 0 || item_extent == 0 {
        return 0..0;
    }

    let extent = u64::from(item_extent);
    let offset = u64::from(scroll_offset);
    let first = usize::try_from(offset / extent)
        .unwrap_or(usize::MAX)
        .min(item_count);
    let last = usize::try_from((offset + u64::from(viewport_extent)).div_ceil(extent))
        .unwrap_or(usize::MAX)
        .clamp(first, item_count);

    first.saturating_sub(overscan)..last.saturating_add(overscan).min(item_count)
}

/// Row metrics of a virtualized list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListWindow {
    pub row_extent: u32,
    pub overscan: usize,
}

impl Default for ListWindow {
    fn default() -> Self {
        Self {
            row_extent: 48,
            overscan: 10,
        }
    }
}

impl ListWindow {
    pub fn range(&self, item_count: usize, viewport_extent: u32, scroll_offset: u32) -> Range<usize> {
        visible_range(
            item_count,
            viewport_extent,
            scroll_offset,
            self.row_extent,
            self.overscan,
        )
    }

    /// Extent of the whole list, for scrollbars
    pub fn total_extent(&self, item_count: usize) -> u64 {
        item_count as u64 * u64::from(self.row_extent)
    }

    /// Offset at which row `index` starts
    pub fn offset_of(&self, index: usize) -> u64 {
        index as u64 * u64::from(self.row_extent)
    }
}
