//! Behavior-driven tests for fallback resolution
//!
//! These tests verify HOW the resolver walks an ordered endpoint chain:
//! short-circuiting on success, degrading in declared order, and
//! surfacing the last error when every endpoint fails.

use stockdrop_core::client::DEMO_PRICE;
use stockdrop_tests::{
    full_payload_body, light_payload_body, quote_chain, quote_payload_body, resolver_with,
    series_chain, symbol, EndpointSpec, FetchErrorKind, ResolveRequest, ScriptedHttpClient,
    SourceKind,
};

// =============================================================================
// Fallback Resolver: Short-Circuit on Success
// =============================================================================

#[tokio::test]
async fn when_first_endpoint_succeeds_later_endpoints_are_not_contacted() {
    // Given: A chain of two endpoints where the first answers correctly
    let http = ScriptedHttpClient::new().push_ok_json(quote_payload_body());
    let resolver = resolver_with(http.clone());
    let request = ResolveRequest::new(symbol("GCUSD"), quote_chain()).expect("valid request");

    // When: The quote is resolved
    let resolution = resolver.resolve(&request).await.expect("must resolve");

    // Then: Only the first endpoint was hit
    assert_eq!(resolution.source, SourceKind::Quote);
    assert_eq!(resolution.attempted, vec![SourceKind::Quote]);
    assert_eq!(http.request_count(), 1);
    assert_eq!(resolution.quote.price, 2385.4);
}

#[tokio::test]
async fn when_first_endpoint_fails_resolver_degrades_in_declared_order() {
    // Given: A quote endpoint that is down and a healthy historical fallback
    let http = ScriptedHttpClient::new()
        .push_status(500, "")
        .push_ok_json(light_payload_body());
    let resolver = resolver_with(http.clone());
    let request = ResolveRequest::new(symbol("GCUSD"), quote_chain()).expect("valid request");

    // When: The quote is resolved
    let resolution = resolver.resolve(&request).await.expect("must resolve");

    // Then: The fallback produced the quote and both attempts are recorded
    assert_eq!(resolution.source, SourceKind::HistoricalLight);
    assert_eq!(
        resolution.attempted,
        vec![SourceKind::Quote, SourceKind::HistoricalLight]
    );

    let requests = http.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.contains("/api/v3/quote/GCUSD"));
    assert!(requests[1].url.contains("/api/v3/historical-price-eod/light"));

    // The fallback quote diffs the two most recent closes
    assert_eq!(resolution.quote.price, 2385.4);
    assert!(resolution.quote.change < 0.0);
}

#[tokio::test]
async fn when_payload_is_unparseable_resolver_treats_it_as_failure_and_continues() {
    // Given: A 200 response whose body is a maintenance page, then a good fallback
    let http = ScriptedHttpClient::new()
        .push_ok_json("<html>maintenance</html>")
        .push_ok_json(light_payload_body());
    let resolver = resolver_with(http);
    let request = ResolveRequest::new(symbol("GCUSD"), quote_chain()).expect("valid request");

    // When: The quote is resolved
    let resolution = resolver.resolve(&request).await.expect("must resolve");

    // Then: The unparseable success counted as a failed attempt
    assert_eq!(resolution.source, SourceKind::HistoricalLight);
    assert_eq!(resolution.attempted.len(), 2);
}

#[tokio::test]
async fn when_payload_is_an_empty_array_resolver_falls_back() {
    // Given: A well-formed but empty quote payload, then a good fallback
    let http = ScriptedHttpClient::new()
        .push_ok_json("[]")
        .push_ok_json(light_payload_body());
    let resolver = resolver_with(http);
    let request = ResolveRequest::new(symbol("GCUSD"), quote_chain()).expect("valid request");

    // When: The quote is resolved
    let resolution = resolver.resolve(&request).await.expect("must resolve");

    // Then: Empty data never surfaces as a zero-value quote
    assert_eq!(resolution.source, SourceKind::HistoricalLight);
}

// =============================================================================
// Fallback Resolver: Total Failure
// =============================================================================

#[tokio::test]
async fn when_all_endpoints_fail_the_last_error_is_surfaced() {
    // Given: A rate-limited quote endpoint and an auth-rejected fallback
    let http = ScriptedHttpClient::new()
        .push_status(429, "")
        .push_status(401, "");
    let resolver = resolver_with(http);
    let request = ResolveRequest::new(symbol("GCUSD"), quote_chain()).expect("valid request");

    // When: Resolution runs out of endpoints
    let error = resolver.resolve(&request).await.expect_err("must fail");

    // Then: The LAST attempt's classification wins, not the first
    assert_eq!(error.kind(), FetchErrorKind::Auth);
    assert!(!error.retryable());
}

#[tokio::test]
async fn when_transport_fails_everywhere_the_error_is_a_network_error() {
    // Given: Every endpoint times out
    let http = ScriptedHttpClient::new()
        .push_transport_error("request timeout: deadline elapsed")
        .push_transport_error("connection failed: refused");
    let resolver = resolver_with(http);
    let request = ResolveRequest::new(symbol("GCUSD"), quote_chain()).expect("valid request");

    // When: Resolution runs out of endpoints
    let error = resolver.resolve(&request).await.expect_err("must fail");

    // Then: The classification and message come from the last attempt
    assert_eq!(error.kind(), FetchErrorKind::Network);
    assert!(error.message().contains("connection failed"));
}

// =============================================================================
// Fallback Resolver: Placeholder Terminal Entry
// =============================================================================

#[tokio::test]
async fn placeholder_terminated_chain_never_fails_outright() {
    // Given: A dead quote endpoint with the placeholder as the terminal entry
    let http = ScriptedHttpClient::new().push_status(503, "");
    let resolver = resolver_with(http.clone());
    let chain = vec![
        quote_chain()[0],
        EndpointSpec::placeholder(),
    ];
    let request = ResolveRequest::new(symbol("GCUSD"), chain).expect("valid request");

    // When: The quote is resolved
    let resolution = resolver.resolve(&request).await.expect("must resolve");

    // Then: The placeholder answered locally, with no extra network call
    assert_eq!(resolution.source, SourceKind::Placeholder);
    assert_eq!(resolution.quote.price, DEMO_PRICE);
    assert_eq!(resolution.quote.change, 0.0);
    assert_eq!(http.request_count(), 1);
}

// =============================================================================
// Fallback Resolver: Determinism
// =============================================================================

#[tokio::test]
async fn identical_upstream_state_resolves_to_identical_quotes() {
    // Given: Two resolvers scripted with byte-identical upstream payloads
    let request = ResolveRequest::new(symbol("GCUSD"), quote_chain()).expect("valid request");

    let first = resolver_with(ScriptedHttpClient::new().push_ok_json(quote_payload_body()))
        .resolve(&request)
        .await
        .expect("must resolve");
    let second = resolver_with(ScriptedHttpClient::new().push_ok_json(quote_payload_body()))
        .resolve(&request)
        .await
        .expect("must resolve");

    // Then: Everything except wall-clock latency is equal
    assert_eq!(first.quote, second.quote);
    assert_eq!(first.source, second.source);
    assert_eq!(first.attempted, second.attempted);
}

// =============================================================================
// Fallback Resolver: Historical Series
// =============================================================================

#[tokio::test]
async fn series_resolution_degrades_from_full_to_light() {
    // Given: A dead full-history endpoint and a healthy light one
    let http = ScriptedHttpClient::new()
        .push_status(500, "")
        .push_ok_json(light_payload_body());
    let resolver = resolver_with(http);
    let request = ResolveRequest::new(symbol("GCUSD"), series_chain()).expect("valid request");

    // When: The series is resolved
    let resolution = resolver
        .resolve_series(&request)
        .await
        .expect("must resolve");

    // Then: The light fallback produced an ascending series
    assert_eq!(resolution.source, SourceKind::HistoricalLight);
    assert_eq!(resolution.series.len(), 3);
    let points = resolution.series.points();
    assert!(points.windows(2).all(|w| w[0].date < w[1].date));
}

#[tokio::test]
async fn series_resolution_reads_the_nested_full_payload() {
    // Given: A healthy full-history endpoint
    let http = ScriptedHttpClient::new().push_ok_json(full_payload_body());
    let resolver = resolver_with(http);
    let request = ResolveRequest::new(symbol("GCUSD"), series_chain()).expect("valid request");

    // When: The series is resolved
    let resolution = resolver
        .resolve_series(&request)
        .await
        .expect("must resolve");

    // Then: Closes come from the nested historical rows
    assert_eq!(resolution.source, SourceKind::HistoricalFull);
    assert_eq!(
        resolution.series.latest().map(|point| point.close),
        Some(2385.4)
    );
}
