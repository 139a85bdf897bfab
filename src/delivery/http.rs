use std::collections::BTreeMap;
use std::fs;

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::{Certificate, Proxy};
use tracing::{info, warn};

use crate::config::{PipelineConfig, ProxyConfig, HTTPS_PROXY, HTTP_PROXY, PROXY_CERT};
use crate::error::{PipelineError, PipelineResult};
use crate::models::ServiceRecord;

use super::{DeliveryResponse, RecordSink};

/// Longest body excerpt quoted in a delivery error.
const ERROR_BODY_LIMIT: usize = 512;

/// Posts the records as one JSON array to an HTTP endpoint.
///
/// When both proxies are configured the proxy is probed first. A reachable proxy carries the
/// request; an unreachable one is logged and the request goes out directly.
#[derive(Debug, Clone)]
pub struct HttpSink {
    url: String,
    proxy: ProxyConfig,
}

impl HttpSink {
    pub fn new(url: impl Into<String>, proxy: ProxyConfig) -> Self {
        Self {
            url: url.into(),
            proxy,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.api_url.clone(), config.proxy.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the proxy matching the target scheme answers at all.
    ///
    /// Any HTTP response counts as reachable. Returns `false` when no proxy is configured.
    pub fn probe_proxy(&self) -> bool {
        if !self.proxy.is_configured() {
            return false;
        }
        let target = if self.url.starts_with("https://") {
            self.proxy.https.as_deref()
        } else {
            self.proxy.http.as_deref()
        };
        let Some(proxy) = target else {
            return false;
        };

        let probe_url = if proxy.contains("://") {
            proxy.to_string()
        } else {
            format!("http://{proxy}")
        };
        let client = match Client::builder().no_proxy().build() {
            Ok(c) => c,
            Err(error) => {
                warn!(%error, "could not build probe client");
                return false;
            }
        };
        match client.get(&probe_url).send() {
            Ok(resp) => {
                info!(proxy = %probe_url, status = resp.status().as_u16(), "proxy reachable");
                true
            }
            Err(error) => {
                warn!(proxy = %probe_url, %error, "proxy unreachable, delivering directly");
                false
            }
        }
    }

    /// Proxy pair from the configuration, or `None` unless both are set.
    fn proxies(&self) -> PipelineResult<Option<(Proxy, Proxy)>> {
        let (Some(http_url), Some(https_url)) = (&self.proxy.http, &self.proxy.https) else {
            return Ok(None);
        };
        let http = Proxy::http(http_url.as_str())
            .map_err(|e| PipelineError::config(HTTP_PROXY, format!("'{http_url}': {e}")))?;
        let https = Proxy::https(https_url.as_str())
            .map_err(|e| PipelineError::config(HTTPS_PROXY, format!("'{https_url}': {e}")))?;
        Ok(Some((http, https)))
    }

    /// Certificates from the configured PEM file. The file must hold at least one.
    fn root_certificates(&self) -> PipelineResult<Vec<Certificate>> {
        let Some(path) = &self.proxy.ca_cert else {
            return Ok(Vec::new());
        };
        let pem = fs::read(path)
            .map_err(|e| PipelineError::config(PROXY_CERT, format!("{}: {e}", path.display())))?;
        let certs = Certificate::from_pem_bundle(&pem)
            .map_err(|e| PipelineError::config(PROXY_CERT, format!("{}: {e}", path.display())))?;
        if certs.is_empty() {
            return Err(PipelineError::config(
                PROXY_CERT,
                format!("{}: no PEM certificates found", path.display()),
            ));
        }
        Ok(certs)
    }

    fn client(&self, roots: Vec<Certificate>, proxies: Option<(Proxy, Proxy)>) -> PipelineResult<Client> {
        let mut builder: ClientBuilder =
            Client::builder().danger_accept_invalid_certs(self.proxy.accept_invalid_certs);
        for cert in roots {
            builder = builder.add_root_certificate(cert);
        }
        builder = match proxies {
            Some((http, https)) => builder.proxy(http).proxy(https),
            None => builder.no_proxy(),
        };
        Ok(builder.build()?)
    }
}

impl RecordSink for HttpSink {
    fn deliver(&self, records: &[ServiceRecord]) -> PipelineResult<DeliveryResponse> {
        // Configuration mistakes surface before any network traffic.
        let proxies = self.proxies()?;
        let roots = self.root_certificates()?;

        let proxies = match proxies {
            Some(pair) if self.probe_proxy() => Some(pair),
            _ => None,
        };
        let via_proxy = proxies.is_some();
        let client = self.client(roots, proxies)?;

        info!(url = %self.url, records = records.len(), via_proxy, "posting records");
        let resp = client.post(&self.url).json(records).send()?;

        let status = resp.status();
        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in resp.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            headers
                .entry(name.as_str().to_string())
                .and_modify(|v| {
                    v.push_str(", ");
                    v.push_str(&value);
                })
                .or_insert_with(|| value.clone());
        }
        let text = resp.text()?;

        if !status.is_success() {
            let excerpt: String = text.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(PipelineError::Delivery {
                status: Some(status.as_u16()),
                message: format!("{} answered {status}: {excerpt}", self.url),
            });
        }

        let body = match serde_json::from_str(&text) {
            Ok(json) => json,
            Err(_) => serde_json::Value::String(text),
        };
        info!(status = status.as_u16(), "delivery accepted");
        Ok(DeliveryResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}
