//! Tracing spans that tie log events to one shopper session.

use tracing::Span;

/// Create the span for a shopper session.
///
/// Events emitted while the span is entered carry `session_id`, so a single
/// session can be followed through catalog load, cart edits and checkout.
pub fn session_span(session_id: &str) -> Span {
    tracing::info_span!("storefront_session", session_id = %session_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_span_can_be_entered() {
        let span = session_span("sess-123");
        let _guard = span.enter();
        tracing::info!("inside session span");
    }
}
