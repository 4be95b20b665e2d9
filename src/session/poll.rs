use std::{io::Write, time::Duration};
use tracing::{debug, info, instrument};

use crate::{
    api::{ImpactApi, SessionId, SessionStatus},
    Result,
};

/// Block until session `id` is completed or cancelled.
///
/// Queries the status, prints one `.` per query, and calls `sleep(interval)`
/// between queries. There is no attempt limit: a session stuck in any other
/// state, `Failed` included, is polled forever. A failed status request ends
/// the wait with its error.
#[instrument(level = "info", skip(api, sleep, out))]
pub fn wait_for_completion<A, W>(
    api: &A,
    id: SessionId,
    interval: Duration,
    mut sleep: impl FnMut(Duration),
    out: &mut W,
) -> Result<SessionStatus>
where
    A: ImpactApi + ?Sized,
    W: Write,
{
    write!(out, "Waiting for job to complete")?;
    out.flush()?;

    let mut attempt: u64 = 0;
    let status = loop {
        attempt += 1;
        write!(out, ".")?;
        out.flush()?;

        let status = api.session_status(id)?;
        debug!(attempt, %status, "polled session");
        if status.is_terminal() {
            break status;
        }
        sleep(interval);
    };

    writeln!(out)?;
    writeln!(out, "Done.")?;
    info!(attempts = attempt, %status, "session finished");
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::ApiError,
        testing::{session_id, StubApi, EXHAUSTED_STATUS},
        Error,
    };

    const INTERVAL: Duration = Duration::from_secs(5);

    #[test]
    fn two_sleeps_before_completion() {
        let api = StubApi::with_statuses([
            SessionStatus::parse("RUNNING"),
            SessionStatus::parse("RUNNING"),
            SessionStatus::Completed,
        ]);
        let mut sleeps = Vec::new();
        let mut out = Vec::new();

        let status =
            wait_for_completion(&api, session_id(), INTERVAL, |d| sleeps.push(d), &mut out)
                .unwrap();

        assert_eq!(status, SessionStatus::Completed);
        assert_eq!(sleeps, vec![INTERVAL, INTERVAL]);
        assert_eq!(api.status_checks.get(), 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Waiting for job to complete...\nDone.\n"
        );
    }

    #[test]
    fn cancelled_is_terminal() {
        let api = StubApi::with_statuses([SessionStatus::Requested, SessionStatus::Cancelled]);
        let mut sleeps = 0;

        let status =
            wait_for_completion(&api, session_id(), INTERVAL, |_| sleeps += 1, &mut Vec::new())
                .unwrap();

        assert_eq!(status, SessionStatus::Cancelled);
        assert_eq!(sleeps, 1);
    }

    #[test]
    fn immediate_completion_never_sleeps() {
        let api = StubApi::with_statuses([SessionStatus::Completed]);
        let mut sleeps = 0;

        wait_for_completion(&api, session_id(), INTERVAL, |_| sleeps += 1, &mut Vec::new())
            .unwrap();

        assert_eq!(sleeps, 0);
        assert_eq!(api.status_checks.get(), 1);
    }

    /// A failed session is not terminal: the loop keeps polling until
    /// something outside it stops it. Here the stub's script running out
    /// is that something.
    #[test]
    fn failed_session_keeps_polling() {
        const BOUND: usize = 200;
        let api = StubApi::with_statuses(std::iter::repeat(SessionStatus::Failed).take(BOUND));
        let mut sleeps = 0;

        let err =
            wait_for_completion(&api, session_id(), INTERVAL, |_| sleeps += 1, &mut Vec::new())
                .unwrap_err();

        assert!(matches!(
            err,
            Error::Api(ApiError::Remote {
                status: EXHAUSTED_STATUS,
                ..
            })
        ));
        assert_eq!(sleeps, BOUND);
        assert_eq!(api.status_checks.get(), BOUND + 1);
    }

    #[test]
    fn status_error_aborts_the_wait() {
        let api = StubApi::with_statuses([SessionStatus::Started]);
        api.push_status_error(ApiError::Remote {
            status: 500,
            message: "boom".into(),
            response: None,
        });
        api.push_statuses([SessionStatus::Completed]);
        let mut sleeps = 0;

        let err =
            wait_for_completion(&api, session_id(), INTERVAL, |_| sleeps += 1, &mut Vec::new())
                .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Remote { status: 500, .. })));
        assert_eq!(sleeps, 1);
        assert_eq!(api.status_checks.get(), 2);
    }
}
