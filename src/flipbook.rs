//! Paged gallery viewer: a bounded page sequence (cover, one page per
//! image, back cover) and the page-turn state machine that navigates it.
//!
//! The machine is deterministic: callers supply the current time in
//! milliseconds with every stimulus, so the settle window is an explicit
//! timing contract instead of a hidden timer.

use crate::models::gallery::GalleryImage;

/// Wait between requesting a turn and the index actually advancing. The
/// paired CSS transition runs for the same duration.
pub const SETTLE_MS: u64 = 300;

/// One page of the synthesized sequence. Index is the sole identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Cover,
    Image(GalleryImage),
    BackCover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Visual flag of a page, a pure function of the settled index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFlag {
    /// Pages before the current index, already turned.
    Flipped,
    /// The page at the current index.
    Active,
    /// Pages after the current index, carrying no class.
    Upcoming,
}

#[derive(Debug, Clone, Copy)]
struct Turn {
    direction: Direction,
    started_at: u64,
}

/// The viewer. Built once per page view from the loaded image list and
/// discarded with it; `total_pages` never changes afterwards.
#[derive(Debug)]
pub struct Flipbook {
    pages: Vec<Page>,
    current: usize,
    in_flight: Option<Turn>,
}

impl Flipbook {
    /// Build the page sequence. An empty image list still yields the cover
    /// and back cover, so the sequence is never shorter than two pages.
    pub fn new(images: Vec<GalleryImage>) -> Self {
        let mut pages = Vec::with_capacity(images.len() + 2);
        pages.push(Page::Cover);
        pages.extend(images.into_iter().map(Page::Image));
        pages.push(Page::BackCover);
        Flipbook {
            pages,
            current: 0,
            in_flight: None,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Settled page index. Unchanged while a turn is in flight.
    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The page currently marked as leaving, if a turn is in flight.
    pub fn turning(&self) -> Option<Direction> {
        self.in_flight.map(|t| t.direction)
    }

    /// Forward navigation stimulus. Button clicks and the right-arrow key
    /// both land here.
    pub fn next(&mut self, now_ms: u64) {
        self.request(Direction::Forward, now_ms);
    }

    /// Backward navigation stimulus. Button clicks and the left-arrow key
    /// both land here.
    pub fn previous(&mut self, now_ms: u64) {
        self.request(Direction::Backward, now_ms);
    }

    fn request(&mut self, direction: Direction, now_ms: u64) {
        // A turn whose window has elapsed unblocks this request.
        self.settle(now_ms);
        if self.in_flight.is_some() {
            // Still inside the settle window: dropped, never queued.
            return;
        }
        let legal = match direction {
            Direction::Forward => self.current < self.total_pages() - 1,
            Direction::Backward => self.current > 0,
        };
        if !legal {
            return;
        }
        self.in_flight = Some(Turn {
            direction,
            started_at: now_ms,
        });
    }

    /// Complete the in-flight turn if its settle window has elapsed.
    /// Returns the freshly published page display when the index advanced.
    pub fn settle(&mut self, now_ms: u64) -> Option<(usize, usize)> {
        let turn = self.in_flight?;
        if now_ms < turn.started_at.saturating_add(SETTLE_MS) {
            return None;
        }
        self.in_flight = None;
        match turn.direction {
            Direction::Forward => self.current += 1,
            Direction::Backward => self.current -= 1,
        }
        Some(self.page_display())
    }

    /// Walk to `target` through ordinary transitions, settling each turn.
    /// An out-of-range target stops at the boundary no-op.
    pub fn goto(&mut self, target: usize) {
        let mut now = 0;
        while self.current != target {
            let before = self.current;
            if target > self.current {
                self.next(now);
            } else {
                self.previous(now);
            }
            now += SETTLE_MS;
            self.settle(now);
            if self.current == before {
                break;
            }
        }
    }

    /// Flags for every page, recomputed wholesale from the settled index.
    pub fn flags(&self) -> Vec<PageFlag> {
        (0..self.total_pages())
            .map(|index| {
                if index < self.current {
                    PageFlag::Flipped
                } else if index == self.current {
                    PageFlag::Active
                } else {
                    PageFlag::Upcoming
                }
            })
            .collect()
    }

    /// The 1-based "Trang X / N" value, published after construction and
    /// after every completed turn.
    pub fn page_display(&self) -> (usize, usize) {
        (self.current + 1, self.total_pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<GalleryImage> {
        (0..n)
            .map(|i| GalleryImage {
                title: format!("Ảnh {}", i + 1),
                alt: format!("Ảnh {}", i + 1),
                src: format!("/assets/images/anh-{}.jpg", i + 1),
                description: String::new(),
            })
            .collect()
    }

    /// Drive one full legal turn: request at `at`, settle after the window.
    fn turn(book: &mut Flipbook, direction: Direction, at: u64) -> u64 {
        match direction {
            Direction::Forward => book.next(at),
            Direction::Backward => book.previous(at),
        }
        let done = at + SETTLE_MS;
        book.settle(done);
        done
    }

    #[test]
    fn page_count_is_image_count_plus_two() {
        for n in [0usize, 1, 3, 7, 20] {
            let book = Flipbook::new(images(n));
            assert_eq!(book.total_pages(), n + 2);
            assert!(matches!(book.pages()[0], Page::Cover));
            assert!(matches!(book.pages()[n + 1], Page::BackCover));
        }
    }

    #[test]
    fn starts_on_cover_and_publishes_display() {
        let book = Flipbook::new(images(3));
        assert_eq!(book.current_page(), 0);
        assert_eq!(book.page_display(), (1, 5));
    }

    #[test]
    fn previous_on_cover_is_a_noop() {
        let mut book = Flipbook::new(images(2));
        book.previous(0);
        assert!(book.turning().is_none());
        assert_eq!(book.settle(SETTLE_MS), None);
        assert_eq!(book.current_page(), 0);
    }

    #[test]
    fn next_on_back_cover_is_a_noop() {
        let mut book = Flipbook::new(images(1));
        let mut now = 0;
        now = turn(&mut book, Direction::Forward, now);
        now = turn(&mut book, Direction::Forward, now);
        assert_eq!(book.current_page(), 2);

        book.next(now + 1);
        assert!(book.turning().is_none());
        assert_eq!(book.settle(now + 1 + SETTLE_MS), None);
        assert_eq!(book.current_page(), 2);
    }

    #[test]
    fn turn_is_two_phase() {
        let mut book = Flipbook::new(images(2));
        book.next(1_000);

        // Leaving is marked immediately, the index holds until the window
        // elapses.
        assert_eq!(book.turning(), Some(Direction::Forward));
        assert_eq!(book.current_page(), 0);
        assert_eq!(book.settle(1_000 + SETTLE_MS - 1), None);
        assert_eq!(book.current_page(), 0);

        assert_eq!(book.settle(1_000 + SETTLE_MS), Some((2, 4)));
        assert_eq!(book.current_page(), 1);
        assert!(book.turning().is_none());
    }

    #[test]
    fn request_inside_settle_window_is_dropped() {
        let mut book = Flipbook::new(images(3));
        book.next(0);
        book.next(SETTLE_MS - 1); // rapid double-activation
        book.settle(SETTLE_MS);
        assert_eq!(book.current_page(), 1);

        // Nothing was queued: the dropped request never lands.
        assert_eq!(book.settle(SETTLE_MS * 3), None);
        assert_eq!(book.current_page(), 1);
    }

    #[test]
    fn request_after_window_completes_pending_turn_first() {
        let mut book = Flipbook::new(images(3));
        book.next(0);
        // No explicit settle call: the late request itself completes the
        // pending turn, then starts its own.
        book.next(SETTLE_MS + 50);
        assert_eq!(book.current_page(), 1);
        assert_eq!(book.turning(), Some(Direction::Forward));
        book.settle(SETTLE_MS * 2 + 50);
        assert_eq!(book.current_page(), 2);
    }

    #[test]
    fn dropped_request_applies_to_state_at_request_time() {
        // previous() fired while the very first next() is still settling:
        // judged against index 0, where previous is illegal anyway, and
        // dropped without corrupting the pending turn.
        let mut book = Flipbook::new(images(2));
        book.next(0);
        book.previous(100);
        assert_eq!(book.settle(SETTLE_MS), Some((2, 4)));
        assert_eq!(book.current_page(), 1);
    }

    #[test]
    fn flags_are_exclusive_and_track_current() {
        let mut book = Flipbook::new(images(4));
        let mut now = 0;
        for _ in 0..3 {
            now = turn(&mut book, Direction::Forward, now + 1);
        }
        turn(&mut book, Direction::Backward, now + 1);
        assert_eq!(book.current_page(), 2);

        let flags = book.flags();
        assert_eq!(flags.len(), book.total_pages());
        assert_eq!(
            flags.iter().filter(|f| **f == PageFlag::Active).count(),
            1
        );
        for (index, flag) in flags.iter().enumerate() {
            let expected = if index < 2 {
                PageFlag::Flipped
            } else if index == 2 {
                PageFlag::Active
            } else {
                PageFlag::Upcoming
            };
            assert_eq!(*flag, expected, "page {}", index);
        }
    }

    #[test]
    fn empty_image_list_still_has_two_pages() {
        let mut book = Flipbook::new(Vec::new());
        assert_eq!(book.total_pages(), 2);
        assert_eq!(book.page_display(), (1, 2));

        let now = turn(&mut book, Direction::Forward, 0);
        assert_eq!(book.current_page(), 1);
        assert!(matches!(book.pages()[1], Page::BackCover));

        book.next(now + 1);
        assert!(book.turning().is_none());
        assert_eq!(book.current_page(), 1);
    }

    #[test]
    fn three_images_walked_to_the_back_cover() {
        let mut book = Flipbook::new(images(3));
        assert_eq!(book.total_pages(), 5);

        let mut now = 0;
        for _ in 0..4 {
            now = turn(&mut book, Direction::Forward, now + 1);
        }
        assert_eq!(book.current_page(), 4);

        let flags = book.flags();
        for index in 0..4 {
            assert_eq!(flags[index], PageFlag::Flipped);
        }
        assert_eq!(flags[4], PageFlag::Active);
    }

    #[test]
    fn goto_walks_in_both_directions_and_clamps() {
        let mut book = Flipbook::new(images(3));
        book.goto(4);
        assert_eq!(book.current_page(), 4);
        assert!(book.turning().is_none());

        book.goto(1);
        assert_eq!(book.current_page(), 1);

        // Past the back cover: stops at the boundary.
        book.goto(99);
        assert_eq!(book.current_page(), 4);
        assert_eq!(book.page_display(), (5, 5));
    }

    #[test]
    fn display_stays_one_based_and_in_bounds() {
        let mut book = Flipbook::new(images(2));
        let mut now = 0;
        let moves = [
            Direction::Backward, // noop at cover
            Direction::Forward,
            Direction::Forward,
            Direction::Forward,
            Direction::Forward, // noop at back cover
            Direction::Backward,
        ];
        for direction in moves {
            now = turn(&mut book, direction, now + 1);
            let (x, n) = book.page_display();
            assert_eq!(n, 4);
            assert!(x >= 1 && x <= n);
            assert_eq!(x, book.current_page() + 1);
        }
    }
}
