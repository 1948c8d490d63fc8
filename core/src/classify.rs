use crate::error::StatsError;
use crate::model::PlaybookResults;

impl PlaybookResults {
    /// Verdict from the cumulative host counters.
    ///
    /// The first host (lexicographic order) with failures wins. Unreachable hosts
    /// are only reported when no host has failures.
    pub fn check_stats(&self) -> Result<(), StatsError> {
        if let Some((host, s)) = self.stats.iter().find(|(_, s)| s.failures > 0) {
            return Err(StatsError::Failures {
                host: host.clone(),
                failures: s.failures,
            });
        }

        if let Some((host, s)) = self.stats.iter().find(|(_, s)| s.unreachable > 0) {
            return Err(StatsError::Unreachable {
                host: host.clone(),
                unreachable: s.unreachable,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{HostStats, PlaybookResults};

    fn with_stats(entries: &[(&str, HostStats)]) -> PlaybookResults {
        PlaybookResults {
            stats: entries
                .iter()
                .map(|(h, s)| (h.to_string(), *s))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn clean_stats_pass() {
        let r = with_stats(&[(
            "host1",
            HostStats {
                ok: 4,
                changed: 2,
                skipped: 1,
                ..Default::default()
            },
        )]);
        assert_eq!(r.check_stats(), Ok(()));
        assert_eq!(PlaybookResults::default().check_stats(), Ok(()));
    }

    #[test]
    fn failures_are_reported() {
        let r = with_stats(&[(
            "host1",
            HostStats {
                failures: 1,
                ..Default::default()
            },
        )]);
        let err = r.check_stats().unwrap_err();
        assert_eq!(err.to_string(), "Host host1 finished with 1 failures");
        assert_eq!(err.host(), "host1");
    }

    #[test]
    fn unreachable_is_reported() {
        let r = with_stats(&[(
            "host1",
            HostStats {
                unreachable: 1,
                ..Default::default()
            },
        )]);
        assert_eq!(
            r.check_stats().unwrap_err().to_string(),
            "Host host1 finished with 1 unrecheable hosts"
        );
    }

    #[test]
    fn failures_take_precedence_over_unreachable() {
        let r = with_stats(&[
            (
                "a",
                HostStats {
                    unreachable: 3,
                    ..Default::default()
                },
            ),
            (
                "z",
                HostStats {
                    failures: 2,
                    ..Default::default()
                },
            ),
        ]);
        assert_eq!(
            r.check_stats().unwrap_err().to_string(),
            "Host z finished with 2 failures"
        );
    }

    #[test]
    fn first_host_in_key_order_wins() {
        let r = with_stats(&[
            (
                "web2",
                HostStats {
                    failures: 5,
                    ..Default::default()
                },
            ),
            (
                "web1",
                HostStats {
                    failures: 1,
                    ..Default::default()
                },
            ),
        ]);
        assert_eq!(r.check_stats().unwrap_err().host(), "web1");
    }
}
