//! Single-consumer collection of violations from concurrent rule workers.

use std::io;
use std::path::Path;

use crossbeam_channel::Receiver;
use tracing::error;

use crate::types::{ScanSummary, Verdict, Violation};
use crate::utils::paths;

/// Sink for violations as they arrive.
///
/// Implementations are driven from the aggregator thread only, so they
/// need no internal synchronisation.
pub trait Reporter: Send {
    /// Reports one violation. `display_path` is relative to the scan root.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying output cannot be written.
    fn violation(&mut self, display_path: &str, violation: &Violation) -> io::Result<()>;

    /// Called once after the last violation has been reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying output cannot be written.
    fn finish(&mut self, _summary: &ScanSummary) -> io::Result<()> {
        Ok(())
    }
}

/// What the aggregator observed once its intake closed.
#[derive(Debug)]
pub struct Tally {
    /// Number of violations received.
    pub violations: usize,
    /// First error returned by the reporter, if any.
    pub report_error: Option<io::Error>,
}

impl Tally {
    /// Verdict for the received violations.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::from_count(self.violations)
    }
}

/// Drains a violation channel into a [`Reporter`] in arrival order.
pub struct Aggregator<'a, R: Reporter + ?Sized> {
    root: &'a Path,
    reporter: &'a mut R,
}

impl<'a, R: Reporter + ?Sized> Aggregator<'a, R> {
    /// Creates an aggregator rendering paths relative to `root`.
    pub fn new(root: &'a Path, reporter: &'a mut R) -> Self {
        Self { root, reporter }
    }

    /// Consumes violations until every sender has been dropped.
    ///
    /// A failing reporter does not stop the drain: later violations are still
    /// received and counted so producers never block on a dead consumer.
    pub fn drain(self, intake: &Receiver<Violation>) -> Tally {
        let mut tally = Tally {
            violations: 0,
            report_error: None,
        };

        for violation in intake {
            tally.violations += 1;
            if tally.report_error.is_some() {
                continue;
            }
            let display = paths::relative_display(&violation.path, self.root);
            if let Err(e) = self.reporter.violation(&display, &violation) {
                error!("Failed to write report: {}", e);
                tally.report_error = Some(e);
            }
        }

        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[derive(Default)]
    struct Collect(Vec<String>);

    impl Reporter for Collect {
        fn violation(&mut self, display_path: &str, v: &Violation) -> io::Result<()> {
            self.0.push(format!("{display_path}: {}", v.message));
            Ok(())
        }
    }

    struct Broken;

    impl Reporter for Broken {
        fn violation(&mut self, _: &str, _: &Violation) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn violation(path: &str) -> Violation {
        Violation::new("DM001", "file-type", path, "bad type")
    }

    #[test]
    fn empty_intake_is_clean() {
        let (tx, rx) = unbounded::<Violation>();
        drop(tx);
        let mut sink = Collect::default();
        let tally = Aggregator::new(Path::new("/r"), &mut sink).drain(&rx);
        assert_eq!(tally.violations, 0);
        assert_eq!(tally.verdict(), Verdict::Clean);
        assert!(sink.0.is_empty());
    }

    #[test]
    fn reports_in_arrival_order() {
        let (tx, rx) = unbounded();
        tx.send(violation("/r/b.txt")).unwrap();
        tx.send(violation("/r/a.txt")).unwrap();
        drop(tx);

        let mut sink = Collect::default();
        let tally = Aggregator::new(Path::new("/r"), &mut sink).drain(&rx);
        assert_eq!(tally.verdict(), Verdict::Failed);
        assert_eq!(sink.0, vec!["./b.txt: bad type", "./a.txt: bad type"]);
    }

    #[test]
    fn waits_for_every_producer() {
        let (tx, rx) = unbounded();
        let producers: Vec<_> = (0..8)
            .map(|i| {
                let tx = tx.clone();
                std::thread::spawn(move || {
                    std::thread::sleep(std::time::Duration::from_millis(5 * i));
                    tx.send(violation(&format!("/r/{i}.txt"))).unwrap();
                })
            })
            .collect();
        drop(tx);

        let mut sink = Collect::default();
        let tally = Aggregator::new(Path::new("/r"), &mut sink).drain(&rx);
        for p in producers {
            p.join().unwrap();
        }
        assert_eq!(tally.violations, 8);
        assert_eq!(sink.0.len(), 8);
    }

    #[test]
    fn reporter_error_keeps_counting() {
        let (tx, rx) = unbounded();
        tx.send(violation("/r/a.txt")).unwrap();
        tx.send(violation("/r/b.txt")).unwrap();
        drop(tx);

        let tally = Aggregator::new(Path::new("/r"), &mut Broken).drain(&rx);
        assert_eq!(tally.violations, 2);
        assert!(tally.report_error.is_some());
    }
}
