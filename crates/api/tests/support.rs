#![allow(dead_code)]

use applymate_domain::{ClientConfig, TokenPair};
use applymate_lib::AppContext;
use wiremock::MockServer;

/// Context talking to `server`, with an in-memory session
pub fn context_for(server: &MockServer) -> AppContext {
    let mut config = ClientConfig::default();
    config.api.base_url = format!("{}/api", server.uri());
    AppContext::new(config).expect("failed to build context")
}

/// Same as [`context_for`] but already signed in as `A1`/`R1`
pub fn signed_in_context(server: &MockServer) -> AppContext {
    let ctx = context_for(server);
    ctx.tokens.set_tokens(&TokenPair::new("A1", "R1")).expect("failed to seed session");
    ctx
}
