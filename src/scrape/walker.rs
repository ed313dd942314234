// src/scrape/walker.rs
//
// Offset pagination over the controller's status pages. The page count
// is bounded so a misbehaving server cannot keep the walk alive forever.

use std::collections::HashSet;

use crate::config::consts::OFFSET_PARAM;
use crate::config::options::PollOptions;
use crate::core::net::Fetch;
use crate::data::{EntityKind, Reading};
use crate::scrape::{locate_table, extract_rows};

pub fn page_url(base: &str, kind: EntityKind, offset: u32) -> String {
    format!("{}/{}?{}={}", base.trim_end_matches('/'), kind.page(), OFFSET_PARAM, offset)
}

/// Fetch pages at increasing offsets and accumulate matching rows.
///
/// Termination: a page contributing zero identifiers not seen before ends
/// the walk, except the very first page (a cold source may legitimately
/// serve it empty). A failed fetch counts as an empty page and the walk
/// continues at the next offset.
pub fn walk(fetcher: &dyn Fetch, opts: &PollOptions, kind: EntityKind) -> Vec<Reading> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<Reading> = Vec::new();

    for page in 0..opts.max_pages {
        let offset = page * opts.page_stride;
        let url = page_url(&opts.base_url, kind, offset);

        let rows = match fetcher.fetch(&url) {
            Ok(doc) => match locate_table(&doc) {
                Some(table) => extract_rows(table, kind),
                None => Vec::new(), // parse miss, not an error
            },
            Err(e) => {
                loge!("{:?} page offset={}: {}", kind, offset, e);
                continue;
            }
        };

        let mut new_items = 0usize;
        for r in &rows {
            if seen.insert(r.item.clone()) {
                new_items += 1;
            }
        }
        logd!("{:?} offset={} rows={} new={}", kind, offset, rows.len(), new_items);
        out.extend(rows);

        if page > 0 && new_items == 0 {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::error::Error;

    /// Canned pages keyed by request order.
    struct StubFetcher {
        pages: Vec<Result<String, String>>,
        calls: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        fn new(pages: Vec<Result<String, String>>) -> Self {
            Self { pages, calls: RefCell::new(Vec::new()) }
        }
        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl Fetch for StubFetcher {
        fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
            let i = self.calls.borrow().len();
            self.calls.borrow_mut().push(s!(url));
            match self.pages.get(i) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(e)) => Err(e.clone().into()),
                None => Ok(s!("<html></html>")),
            }
        }
    }

    fn sensor_page(from: u32, count: u32) -> String {
        let mut t = s!("<table><tr><th>Item</th><th>Label</th><th>Value</th><th>Units</th></tr>");
        for n in from..from + count {
            t.push_str(&format!("<tr><td>S{n}</td><td>L{n}</td><td>{n}.0</td><td>DegC</td></tr>"));
        }
        t.push_str("</table>");
        t
    }

    fn opts() -> PollOptions {
        PollOptions { base_url: s!("http://c"), ..PollOptions::default() }
    }

    #[test]
    fn stops_after_first_zero_yield_page() {
        // 12, 12, 0 new rows -> exactly three fetches
        let f = StubFetcher::new(vec![
            Ok(sensor_page(1, 12)),
            Ok(sensor_page(13, 12)),
            Ok(sensor_page(13, 12)), // overlap only: zero new identifiers
        ]);
        let rows = walk(&f, &opts(), EntityKind::Sensor);
        assert_eq!(f.call_count(), 3);
        assert_eq!(rows.len(), 36); // duplicates kept; dedupe is downstream
    }

    #[test]
    fn empty_first_page_does_not_end_the_walk() {
        let f = StubFetcher::new(vec![
            Ok(s!("<html><p>warming up</p></html>")),
            Ok(sensor_page(1, 3)),
            Ok(s!("<html></html>")),
        ]);
        let rows = walk(&f, &opts(), EntityKind::Sensor);
        assert_eq!(rows.len(), 3);
        assert_eq!(f.call_count(), 3);
    }

    #[test]
    fn fetch_failure_skips_to_next_offset() {
        let f = StubFetcher::new(vec![
            Ok(sensor_page(1, 2)),
            Err(s!("connection reset")),
            Ok(sensor_page(3, 2)),
            Ok(s!("<html></html>")),
        ]);
        let rows = walk(&f, &opts(), EntityKind::Sensor);
        assert_eq!(rows.len(), 4);
        assert_eq!(f.call_count(), 4);
    }

    #[test]
    fn offsets_follow_the_stride() {
        let f = StubFetcher::new(vec![
            Ok(sensor_page(1, 12)),
            Ok(sensor_page(13, 1)),
            Ok(s!("<html></html>")),
        ]);
        let _ = walk(&f, &opts(), EntityKind::Sensor);
        let calls = f.calls.borrow();
        assert_eq!(calls[0], "http://c/S.htm?ovrideStart=0");
        assert_eq!(calls[1], "http://c/S.htm?ovrideStart=12");
        assert_eq!(calls[2], "http://c/S.htm?ovrideStart=24");
    }

    #[test]
    fn walk_is_bounded_by_max_pages() {
        let pages = (0..20).map(|_| Ok(sensor_page(1, 1))).collect();
        // page 1 repeats page 0's identifier -> zero new -> stop at 2 calls
        let f = StubFetcher::new(pages);
        let _ = walk(&f, &opts(), EntityKind::Sensor);
        assert_eq!(f.call_count(), 2);

        // distinct rows every page: the MAX_PAGES bound has to cut it
        let pages: Vec<_> = (0..20).map(|i| Ok(sensor_page(i * 100 + 1, 1))).collect();
        let f = StubFetcher::new(pages);
        let _ = walk(&f, &opts(), EntityKind::Sensor);
        assert_eq!(f.call_count(), opts().max_pages as usize);
    }
}
