//! Static documentation served at the root.

use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Verity</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 42rem; margin: 3rem auto; padding: 0 1rem; color: #222; }
        code { background: #f2f2f2; padding: 0.1rem 0.3rem; border-radius: 3px; }
        .endpoint { margin: 1rem 0; padding: 0.75rem 1rem; border-left: 3px solid #446; background: #fafafa; }
        .note { color: #666; font-size: 0.9rem; }
    </style>
</head>
<body>
    <h1>Verity</h1>
    <p>A day-weighted random truth API. One truth per request, never cached.</p>

    <div class="endpoint">
        <code>GET /truth</code>
        <p class="note">A randomly selected truth, weighted by the current weekday.
        Send <code>Accept: text/plain</code> for the bare text; JSON is the default.
        Rate limited per client address.</p>
    </div>
    <div class="endpoint">
        <code>GET /truth/{id}</code>
        <p class="note">A specific truth by id, same negotiation. Rate limited.</p>
    </div>
    <div class="endpoint">
        <code>GET /health</code>
        <p class="note">Liveness probe. Not rate limited.</p>
    </div>

    <p class="note">Rate-limited requests receive <code>429</code> with a
    <code>retry_after_seconds</code> hint. All errors are JSON with a
    <code>request_id</code> for correlation.</p>
</body>
</html>
"#;

/// Root endpoint: fixed documentation payload.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
