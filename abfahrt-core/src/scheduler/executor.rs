//! Tick executor
//!
//! Owns the cached feed and everything derived from it. The caller
//! supplies the platform per tick and is responsible for pacing.

use super::phase::{FetchOutcome, Phase, TickReport};
use crate::config::{FETCH_INDICATOR, REFRESH_TICKS, ROWS};
use crate::departure::{choose_departures, DisplayedDeparture, Feed};
use crate::marquee::{render, ScrollTick};
use crate::traits::{Clock, DisplaySurface, FeedFormat, FeedSource, Link};

/// Departure board scheduler
pub struct Scheduler<S, F> {
    source: S,
    format: F,
    feed: Feed,
    rows: [DisplayedDeparture; ROWS],
    scroll: ScrollTick,
    countdown: u8,
}

impl<S: FeedSource, F: FeedFormat> Scheduler<S, F> {
    /// Create a scheduler with an empty feed
    ///
    /// The countdown starts at zero so the first online tick fetches.
    pub fn new(source: S, format: F) -> Self {
        Self {
            source,
            format,
            feed: Feed::new(),
            rows: [DisplayedDeparture::placeholder(), DisplayedDeparture::placeholder()],
            scroll: ScrollTick::new(),
            countdown: 0,
        }
    }

    /// Run one tick
    pub async fn tick<L, C, D>(&mut self, link: &L, clock: &C, display: &mut D) -> TickReport
    where
        L: Link,
        C: Clock,
        D: DisplaySurface,
    {
        if !link.is_up() {
            return TickReport::Offline;
        }

        let report = match self.phase() {
            Phase::Refresh => {
                self.countdown -= 1;
                self.scroll.advance();
                TickReport::Refreshed {
                    scroll: self.scroll.value(),
                }
            }
            Phase::Fetch => {
                display.set_cursor(FETCH_INDICATOR.0, FETCH_INDICATOR.1);
                let outcome = self.update_feed().await;
                self.countdown = REFRESH_TICKS;
                TickReport::Fetched(outcome)
            }
        };

        self.rows = choose_departures(clock.now(), &self.feed);
        self.draw(display);

        report
    }

    /// Fetch and parse, replacing the feed only on success
    async fn update_feed(&mut self) -> FetchOutcome {
        let parsed = match self.source.fetch().await {
            Ok(raw) => self.format.parse(raw),
            Err(error) => Err(error),
        };

        match parsed {
            Ok(feed) => {
                let departures = feed.len();
                self.feed = feed;
                FetchOutcome::Updated { departures }
            }
            Err(error) => FetchOutcome::Kept(error),
        }
    }

    fn draw<D: DisplaySurface>(&self, display: &mut D) {
        for (row, departure) in self.rows.iter().enumerate() {
            display.write_line(row as u8, &render(departure, self.scroll.value()));
        }
    }

    /// Phase the next online tick will run
    pub fn phase(&self) -> Phase {
        Phase::from_countdown(self.countdown)
    }

    /// Ticks left before the next fetch
    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    /// Current marquee position
    pub fn scroll(&self) -> u8 {
        self.scroll.value()
    }

    /// Cached feed
    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// Departures currently shown
    pub fn rows(&self) -> &[DisplayedDeparture; ROWS] {
        &self.rows
    }

    /// Feed source, for reconfiguration between ticks
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::departure::DepartureRecord;
    use crate::marquee::Line;
    use crate::traits::{FeedError, ParseError, TransportError};
    use embassy_futures::block_on;

    const T: i64 = 1_717_000_000;

    struct MockLink(bool);

    impl Link for MockLink {
        fn is_up(&self) -> bool {
            self.0
        }
    }

    struct MockClock(i64);

    impl Clock for MockClock {
        fn now(&self) -> i64 {
            self.0
        }
    }

    #[derive(Default)]
    struct MockDisplay {
        cursor: Option<(u8, u8)>,
        lines: [Option<Line>; ROWS],
        writes: usize,
    }

    impl DisplaySurface for MockDisplay {
        fn set_cursor(&mut self, col: u8, row: u8) {
            self.cursor = Some((col, row));
        }

        fn write_line(&mut self, row: u8, line: &Line) {
            self.lines[row as usize] = Some(*line);
            self.writes += 1;
        }
    }

    /// Returns a fixed payload or error, counting calls
    struct MockSource {
        response: Result<&'static [u8], FeedError>,
        calls: usize,
    }

    impl MockSource {
        fn serving(payload: &'static [u8]) -> Self {
            Self {
                response: Ok(payload),
                calls: 0,
            }
        }
    }

    impl FeedSource for MockSource {
        async fn fetch(&mut self) -> Result<&[u8], FeedError> {
            self.calls += 1;
            self.response
        }
    }

    /// Lines of `name,seconds after T`
    struct LineFormat;

    impl FeedFormat for LineFormat {
        fn parse(&self, raw: &[u8]) -> Result<Feed, FeedError> {
            let text = core::str::from_utf8(raw).map_err(|_| ParseError::Syntax)?;
            let mut feed = Feed::new();
            for entry in text.lines() {
                let (name, offset) = entry.split_once(',').ok_or(ParseError::Data)?;
                let offset: i64 = offset.parse().map_err(|_| ParseError::Data)?;
                feed.push(DepartureRecord::new(name, T + offset, T + offset))
                    .map_err(|_| ParseError::Data)?;
            }
            Ok(feed)
        }
    }

    const PAYLOAD: &[u8] = "Fröttmaning,300\nKlinikum Großhadern,900".as_bytes();

    fn run(
        scheduler: &mut Scheduler<MockSource, LineFormat>,
        clock: &MockClock,
        display: &mut MockDisplay,
    ) -> TickReport {
        block_on(scheduler.tick(&MockLink(true), clock, display))
    }

    #[test]
    fn test_offline_tick_is_noop() {
        let mut scheduler = Scheduler::new(MockSource::serving(PAYLOAD), LineFormat);
        let mut display = MockDisplay::default();

        let report = block_on(scheduler.tick(&MockLink(false), &MockClock(T), &mut display));
        assert_eq!(report, TickReport::Offline);
        assert_eq!(display.writes, 0);
        assert_eq!(display.cursor, None);
        assert_eq!(scheduler.source_mut().calls, 0);
        assert_eq!(scheduler.phase(), Phase::Fetch);
    }

    #[test]
    fn test_first_tick_fetches() {
        let mut scheduler = Scheduler::new(MockSource::serving(PAYLOAD), LineFormat);
        let mut display = MockDisplay::default();

        let report = run(&mut scheduler, &MockClock(T), &mut display);
        assert_eq!(
            report,
            TickReport::Fetched(FetchOutcome::Updated { departures: 2 })
        );
        assert_eq!(display.cursor, Some((10, 1)));
        assert_eq!(scheduler.countdown(), REFRESH_TICKS);
        assert_eq!(scheduler.scroll(), 0);
        assert_eq!(scheduler.feed().len(), 2);

        assert_eq!(scheduler.rows()[0].destination.as_str(), "Fröttmaning");
        assert_eq!(scheduler.rows()[1].destination.as_str(), "Klinikum Großhadern");

        // 16:31 and 16:41 local hour 18
        assert_eq!(display.lines[0], Some(*b"Fr\xEFttmanin 18:31"));
        assert_eq!(display.lines[1], Some(*b"Klinikum G 18:41"));
    }

    #[test]
    fn test_refresh_cycle_length() {
        let mut scheduler = Scheduler::new(MockSource::serving(PAYLOAD), LineFormat);
        let mut display = MockDisplay::default();
        let clock = MockClock(T);

        run(&mut scheduler, &clock, &mut display);
        for expected in 1..=REFRESH_TICKS {
            let report = run(&mut scheduler, &clock, &mut display);
            assert_eq!(report, TickReport::Refreshed { scroll: expected });
        }
        assert_eq!(scheduler.source_mut().calls, 1);
        assert_eq!(scheduler.phase(), Phase::Fetch);

        let report = run(&mut scheduler, &clock, &mut display);
        assert!(matches!(report, TickReport::Fetched(_)));
        assert_eq!(scheduler.source_mut().calls, 2);
        // Fetch tick leaves the marquee where it was
        assert_eq!(scheduler.scroll(), REFRESH_TICKS);
    }

    #[test]
    fn test_refresh_scrolls_long_name() {
        let mut scheduler = Scheduler::new(MockSource::serving(PAYLOAD), LineFormat);
        let mut display = MockDisplay::default();
        let clock = MockClock(T);

        run(&mut scheduler, &clock, &mut display);
        run(&mut scheduler, &clock, &mut display);
        assert_eq!(&display.lines[0].unwrap()[..10], b"r\xEFttmaning");
        assert_eq!(&display.lines[1].unwrap()[..10], b"linikum Gr");
    }

    #[test]
    fn test_transport_failure_keeps_feed() {
        let mut scheduler = Scheduler::new(MockSource::serving(PAYLOAD), LineFormat);
        let mut display = MockDisplay::default();
        let clock = MockClock(T);

        run(&mut scheduler, &clock, &mut display);
        for _ in 0..REFRESH_TICKS {
            run(&mut scheduler, &clock, &mut display);
        }

        let error = FeedError::Transport(TransportError::Connect);
        scheduler.source_mut().response = Err(error);
        let report = run(&mut scheduler, &clock, &mut display);
        assert_eq!(report, TickReport::Fetched(FetchOutcome::Kept(error)));
        assert_eq!(scheduler.feed().len(), 2);
        assert_eq!(scheduler.rows()[0].destination.as_str(), "Fröttmaning");
        assert_eq!(scheduler.countdown(), REFRESH_TICKS);
    }

    #[test]
    fn test_parse_failure_keeps_feed() {
        let mut scheduler = Scheduler::new(MockSource::serving(b"no separator"), LineFormat);
        let mut display = MockDisplay::default();

        let report = run(&mut scheduler, &MockClock(T), &mut display);
        assert_eq!(
            report,
            TickReport::Fetched(FetchOutcome::Kept(FeedError::Parse(ParseError::Data)))
        );
        assert!(scheduler.feed().is_empty());
        assert_eq!(scheduler.rows()[0], DisplayedDeparture::placeholder());
        assert_eq!(display.lines[0], Some(*b"Laufen...  02:00"));
    }

    #[test]
    fn test_reselects_as_time_passes() {
        let mut scheduler = Scheduler::new(MockSource::serving(PAYLOAD), LineFormat);
        let mut display = MockDisplay::default();

        run(&mut scheduler, &MockClock(T), &mut display);

        // Fröttmaning is now inside the grace window
        run(&mut scheduler, &MockClock(T + 100), &mut display);
        assert_eq!(scheduler.rows()[0].destination.as_str(), "Klinikum Großhadern");
        assert_eq!(scheduler.rows()[1], DisplayedDeparture::placeholder());
        assert_eq!(scheduler.source_mut().calls, 1);
    }

    #[test]
    fn test_link_drop_pauses_countdown() {
        let mut scheduler = Scheduler::new(MockSource::serving(PAYLOAD), LineFormat);
        let mut display = MockDisplay::default();
        let clock = MockClock(T);

        run(&mut scheduler, &clock, &mut display);
        run(&mut scheduler, &clock, &mut display);
        let countdown = scheduler.countdown();

        for _ in 0..10 {
            block_on(scheduler.tick(&MockLink(false), &clock, &mut display));
        }
        assert_eq!(scheduler.countdown(), countdown);
        assert_eq!(scheduler.scroll(), 1);
    }
}
