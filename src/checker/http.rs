// src/checker/http.rs
// =============================================================================
// This module checks if URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Bounds every request by a connect timeout and a read timeout
// - Detects various failure modes (timeout, DNS, refused connection, etc.)
//
// The client is blocking on purpose: each worker is an OS thread that waits
// on its own request, so there is no async runtime to hand work to.
//
// Rust concepts:
// - Result<T, E>: For error handling
// - Traits: HttpProbe implements the Probe trait from outcome.rs
// =============================================================================

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use url::Url;

use crate::checker::outcome::Probe;
use crate::config::CheckConfig;
use crate::error::ProbeError;

// Follow up to 5 redirects, then give up
const MAX_REDIRECTS: usize = 5;

const USER_AGENT: &str = concat!("url-sentinel/", env!("CARGO_PKG_VERSION"));

/// Probes URLs with real HEAD requests.
///
/// One client is built per run and shared by every worker (it pools
/// connections internally and is safe to use from many threads).
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(config: &CheckConfig) -> Result<Self, reqwest::Error> {
        // The blocking client has no per-read timeout, so the overall request
        // bound is connect + read
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout())
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

impl Probe for HttpProbe {
    fn probe(&self, url: &str) -> Result<u16, ProbeError> {
        // Reject anything that isn't an http(s) URL before touching the network
        let parsed = Url::parse(url).map_err(|source| ProbeError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(ProbeError::UnsupportedScheme(other.to_string())),
        }

        let response = self.client.head(parsed).send().map_err(categorize_error)?;
        Ok(response.status().as_u16())
    }
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - Too many redirects
// - etc.
//
// All of them end up as an Unknown outcome; the category only shows up in
// debug logs.
fn categorize_error(error: reqwest::Error) -> ProbeError {
    if error.is_timeout() {
        return ProbeError::Timeout;
    }
    if error.is_redirect() {
        return ProbeError::TooManyRedirects;
    }

    // The Display of a reqwest error hides the cause, so look at the whole chain
    let chain = error_chain(&error).to_lowercase();

    if error.is_connect() {
        if chain.contains("dns") || chain.contains("lookup") || chain.contains("resolve") {
            ProbeError::Dns
        } else {
            ProbeError::Connect
        }
    } else {
        ProbeError::Request(chain)
    }
}

fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
