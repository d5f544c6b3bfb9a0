//! Terminal renderings of the notifier and map ports.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::domain::ports::{MapContainer, Notifier};
use crate::domain::{HazardReport, SearchResult};

/// Writes user notices as single lines.
///
/// Errors are prefixed with `error: `; success notices are written as-is.
pub struct ConsoleNotifier<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> ConsoleNotifier<W> {
    /// Wrap `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(writer, "{line}") {
            warn!(%error, "failed to write notice");
        }
    }
}

impl<W: Write + Send> Notifier for ConsoleNotifier<W> {
    fn notify_error(&self, message: &str) {
        self.write_line(&format!("error: {message}"));
    }

    fn notify_success(&self, message: &str) {
        self.write_line(message);
    }
}

/// Prints map updates instead of drawing them.
pub struct ConsoleMap<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> ConsoleMap<W> {
    /// Wrap `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(writer, "{line}") {
            warn!(%error, "failed to write map update");
        }
    }
}

impl<W: Write + Send> MapContainer for ConsoleMap<W> {
    fn center_on(&self, result: &SearchResult) {
        self.write_line(&format!(
            "map centred on {} ({})",
            result.display_name,
            result.coordinate()
        ));
    }

    fn mark_hazard(&self, report: &HazardReport) {
        self.write_line(&format!(
            "hazard marker: {} ({} severity) at {}",
            report.hazard_type(),
            report.severity(),
            report.coordinate()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, HazardType, Severity};

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).expect("utf-8 output")
    }

    #[test]
    fn notices_are_written_one_per_line() {
        let notifier = ConsoleNotifier::new(Vec::new());

        notifier.notify_error("No results found. Please try a different search term.");
        notifier.notify_success("Hazard reported successfully.");

        assert_eq!(
            text(notifier.into_inner()),
            "error: No results found. Please try a different search term.\n\
             Hazard reported successfully.\n"
        );
    }

    #[test]
    fn map_updates_describe_the_place_and_marker() {
        let map = ConsoleMap::new(Vec::new());
        let report = HazardReport::new(
            HazardType::Flooding,
            "Road under water",
            Severity::High,
            Coordinate::new(51.5, -0.12),
        )
        .expect("valid report");

        map.center_on(&SearchResult {
            latitude: 48.8566,
            longitude: 2.3522,
            display_name: "Paris, France".to_owned(),
        });
        map.mark_hazard(&report);

        assert_eq!(
            text(map.into_inner()),
            "map centred on Paris, France (48.8566, 2.3522)\n\
             hazard marker: flooding (high severity) at 51.5, -0.12\n"
        );
    }
}
