//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use super::{Invariant, InvariantResult, SessionSnapshot, Violation};

/// The pending run, if any, carries the latest issued token.
///
/// A pending older token would mean a superseded request could still be
/// applied.
pub struct InFlightIsLatest;

impl Invariant for InFlightIsLatest {
    fn name(&self) -> &'static str {
        "in_flight_is_latest"
    }

    fn check(&self, history: &[SessionSnapshot]) -> InvariantResult {
        let Some(now) = history.last() else {
            return Ok(());
        };
        match now.in_flight {
            Some(token) if token != now.last_token => Err(Violation {
                invariant: self.name(),
                message: format!("pending {token} but latest issued is {}", now.last_token),
            }),
            _ => Ok(()),
        }
    }
}

/// Statistics are never shown while a run is pending.
///
/// A run clears them before dispatch; only its own completion repopulates
/// them.
pub struct StatsOnlyWhenIdle;

impl Invariant for StatsOnlyWhenIdle {
    fn name(&self) -> &'static str {
        "stats_only_when_idle"
    }

    fn check(&self, history: &[SessionSnapshot]) -> InvariantResult {
        match history.last() {
            Some(now) if now.busy() && now.has_stats => Err(Violation {
                invariant: self.name(),
                message: format!("statistics present while {:?} is pending", now.in_flight),
            }),
            _ => Ok(()),
        }
    }
}

/// A failure notification never coexists with a result.
///
/// Failed runs leave output and statistics in their cleared state, and the
/// notification blocks edits until dismissed.
pub struct AlertExcludesResult;

impl Invariant for AlertExcludesResult {
    fn name(&self) -> &'static str {
        "alert_excludes_result"
    }

    fn check(&self, history: &[SessionSnapshot]) -> InvariantResult {
        match history.last() {
            Some(now) if now.has_alert && (now.has_stats || now.output_chars > 0) => {
                Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "alert shown with stats={} output_chars={}",
                        now.has_stats, now.output_chars
                    ),
                })
            },
            _ => Ok(()),
        }
    }
}

/// Issued tokens never decrease.
pub struct TokenMonotonicity;

impl Invariant for TokenMonotonicity {
    fn name(&self) -> &'static str {
        "token_monotonicity"
    }

    fn check(&self, history: &[SessionSnapshot]) -> InvariantResult {
        for window in history.windows(2) {
            if let [before, after] = window
                && after.last_token < before.last_token
            {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("token went {} → {}", before.last_token, after.last_token),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use neurozip_app::{Mode, RequestToken};

    use super::*;

    fn idle() -> SessionSnapshot {
        SessionSnapshot {
            mode: Mode::Compress,
            in_flight: None,
            last_token: RequestToken(1),
            has_stats: false,
            output_chars: 0,
            has_alert: false,
        }
    }

    #[test]
    fn stale_pending_token_violates() {
        let snap = SessionSnapshot { in_flight: Some(RequestToken(1)), last_token: RequestToken(2), ..idle() };
        assert!(InFlightIsLatest.check(&[snap]).is_err());
    }

    #[test]
    fn stats_while_busy_violates() {
        let snap = SessionSnapshot { in_flight: Some(RequestToken(1)), has_stats: true, ..idle() };
        assert!(StatsOnlyWhenIdle.check(&[snap]).is_err());
    }

    #[test]
    fn alert_with_output_violates() {
        let snap = SessionSnapshot { has_alert: true, output_chars: 3, ..idle() };
        assert!(AlertExcludesResult.check(&[snap]).is_err());
    }

    #[test]
    fn decreasing_token_violates() {
        let later = SessionSnapshot { last_token: RequestToken(0), ..idle() };
        assert!(TokenMonotonicity.check(&[idle(), later]).is_err());
        assert!(TokenMonotonicity.check(&[idle(), idle()]).is_ok());
    }
}
