use serde::de::DeserializeOwned;

use super::*;

/// Backoff doubling stops here (200ms << 5 = 6.4s).
const MAX_BACKOFF_SHIFT: usize = 5;

/// Delay before retry number `attempt + 1`: 200ms, 400ms, 800ms, ...
pub(super) fn backoff(attempt: usize) -> std::time::Duration {
    std::time::Duration::from_millis(200u64 << attempt.min(MAX_BACKOFF_SHIFT))
}

/// Retries transport failures (connect, timeout) with 200ms, 400ms, ...
/// backoff. HTTP status errors are returned immediately.
pub(super) fn with_retries<T>(
    label: &str,
    attempts: usize,
    mut f: impl FnMut() -> Result<T>,
) -> Result<T> {
    let attempts = attempts.max(1);
    let mut last: Option<anyhow::Error> = None;
    for i in 0..attempts {
        match f() {
            Ok(v) => return Ok(v),
            Err(err) if is_transport(&err) => {
                tracing::debug!(label, attempt = i + 1, error = %format!("{:#}", err), "request failed");
                last = Some(err);
                if i + 1 < attempts {
                    std::thread::sleep(backoff(i));
                }
            }
            Err(err) => return Err(err.context(label.to_string())),
        }
    }
    Err(last
        .unwrap_or_else(|| anyhow::anyhow!("unknown error"))
        .context(label.to_string()))
}

fn is_transport(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<reqwest::Error>()
            .is_some_and(|e| e.is_connect() || e.is_timeout() || (e.is_request() && e.status().is_none()))
    })
}

impl RemoteClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            anyhow::bail!("unauthorized (token missing or expired; pass --token or set RAPTURE_TOKEN)");
        }
        if resp.status() == reqwest::StatusCode::FORBIDDEN {
            anyhow::bail!("forbidden (the signed-in user may not read {})", label);
        }
        resp.error_for_status()
            .with_context(|| format!("{} status", label))
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.config.base_url.trim_end_matches('/'),
            API_PREFIX,
            path
        )
    }

    pub(super) fn get_json<T: DeserializeOwned>(&self, path: &str, label: &str) -> Result<T> {
        with_retries(label, self.config.retries, || {
            let mut req = self.client.get(self.url(path));
            if let Some(token) = self.config.token.as_deref() {
                req = req.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let resp = req.send().with_context(|| format!("GET {}", path))?;
            let out: T = self
                .ensure_ok(resp, label)?
                .json()
                .with_context(|| format!("parse {}", label))?;
            Ok(out)
        })
    }
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;
