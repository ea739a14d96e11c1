//! Help texts for well-known report metrics.
//!
//! Compiled-in, read-only. Unlisted metrics are described by their own name.

/// Known description for `section`/`metric`, if any.
pub fn lookup(section: &str, metric: &str) -> Option<&'static str> {
    let help = match (section, metric) {
        ("resources", "failed") => "How many resources were not successfully fixed",
        ("resources", "scheduled") => "How many resources met any scheduling restrictions",
        ("resources", "changed") => "How many resources were correctively changed",
        ("resources", "skipped") => {
            "How many resources were skipped, because of either tagging or scheduling restrictions"
        }
        ("resources", "total") => "The total number of resources being managed",
        ("resources", "failed_to_restart") => "How many resources could not be restarted",
        ("resources", "restarted") => "How many resources were restarted",
        ("resources", "out_of_sync") => "How many resources were out of sync",
        ("resources", "corrective_change") => "Number of corrected resources",

        ("events", "failure") => "How many events failed",
        ("events", "success") => "How many events succeeded",
        ("events", "total") => "Total number of events for last run",

        ("changes", "total") => "Total number of changes in the transaction",

        _ => return None,
    };
    Some(help)
}

/// Description for `section`/`metric`, falling back to the metric name.
pub fn describe<'a>(section: &str, metric: &'a str) -> &'a str {
    lookup(section, metric).unwrap_or(metric)
}
