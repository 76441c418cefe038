//! HTTP client implementation and timing measurements

pub mod platform;
pub mod windows;
pub mod cert_validation;
pub mod timeouts;


use crate::{
    error::{AppError, Result},
    types::{DnsConfig, TestStatus},
    dns::DnsManager,
    models::metrics::TimingMetrics,
};
use std::{
    net::IpAddr,
    time::{Duration, Instant},
    sync::Arc,
};
use reqwest::{Client, Method, Url};
use tokio::time::timeout;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};

/// HTTP client trait for abstraction and testing
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request with timing measurements
    async fn execute_request(&self, request: HttpRequest) -> Result<HttpResponse>;
    
    /// Execute a HEAD request for latency testing
    async fn head(&self, url: &str, dns_config: &DnsConfig) -> Result<HttpResponse>;
    
    /// Execute a GET request
    async fn get(&self, url: &str, dns_config: &DnsConfig) -> Result<HttpResponse>;
    
    /// Test connectivity to a URL with specific DNS configuration
    async fn test_connectivity(&self, url: &str, dns_config: &DnsConfig) -> Result<ConnectivityTest>;
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: Method,
    pub timeout: Duration,
    pub dns_config: DnsConfig,
    pub follow_redirects: bool,
    pub max_redirects: usize,
    pub user_agent: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Create a new HTTP request
    pub fn new(url: String, method: Method, dns_config: DnsConfig) -> Self {
        Self {
            url,
            method,
            timeout: Duration::from_secs(10),
            dns_config,
            follow_redirects: true,
            max_redirects: 5,
            user_agent: Some("network-latency-tester/0.1.0".to_string()),
            headers: Vec::new(),
        }
    }
    
    /// Create a HEAD request for latency testing
    pub fn head(url: String, dns_config: DnsConfig) -> Self {
        Self::new(url, Method::HEAD, dns_config)
    }
    
    /// Create a GET request
    pub fn get(url: String, dns_config: DnsConfig) -> Self {
        Self::new(url, Method::GET, dns_config)
    }
    
    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    
    /// Set follow redirects behavior
    pub fn with_redirects(mut self, follow: bool, max_redirects: usize) -> Self {
        self.follow_redirects = follow;
        self.max_redirects = max_redirects;
        self
    }
    
    /// Add custom header
    pub fn with_header(mut self, name: String, value: String) -> Self {
        self.headers.push((name, value));
        self
    }
    
    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }
}

/// HTTP response with timing information
#[derive(Debug)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body_size: usize,
    pub timing: TimingMetrics,
    pub resolved_ip: Option<IpAddr>,
    pub dns_config_used: DnsConfig,
    pub final_url: String,
}

impl HttpResponse {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }
    
    /// Check if the response is a redirect
    pub fn is_redirect(&self) -> bool {
        self.status_code >= 300 && self.status_code < 400
    }
    
    /// Get the test status based on response
    pub fn test_status(&self) -> TestStatus {
        self.timing.status
    }
}

/// Connectivity test result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityTest {
    pub success: bool,
    pub status_code: Option<u16>,
    pub response_time: Duration,
    pub resolved_ip: Option<IpAddr>,
    pub dns_resolution_time: Duration,
    pub connection_time: Duration,
    pub error: Option<String>,
}

/// Network latency tester HTTP client implementation
pub struct NetworkClient {
    dns_manager: Arc<DnsManager>,
    #[allow(dead_code)]
    client: Client,
    default_timeout: Duration,
}

impl NetworkClient {
    /// Create a new network client
    pub fn new(dns_manager: Arc<DnsManager>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("network-latency-tester/0.1.0")
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;
        
        Ok(Self {
            dns_manager,
            client,
            default_timeout: Duration::from_secs(10),
        })
    }
    
    /// Create a new network client with custom timeout
    pub fn with_timeout(dns_manager: Arc<DnsManager>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("network-latency-tester/0.1.0")
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;
        
        Ok(Self {
            dns_manager,
            client,
            default_timeout: timeout,
        })
    }
    
    /// Resolve URL using specified DNS configuration
    async fn resolve_url(&self, url: &str, dns_config: &DnsConfig) -> Result<(Vec<IpAddr>, Duration)> {
        let start_time = Instant::now();
        
        let parsed_url = Url::parse(url)
            .map_err(|e| AppError::parse(format!("Invalid URL: {}", e)))?;
        
        let host = parsed_url.host_str()
            .ok_or_else(|| AppError::validation("URL must have a host"))?;
        
        // Skip DNS resolution for IP addresses
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok((vec![ip], Duration::from_nanos(0)));
        }
        
        let ips = self.dns_manager.resolve(host, dns_config).await?;
        let resolution_time = start_time.elapsed();
        
        Ok((ips, resolution_time))
    }
    
    /// Execute HTTP request with custom DNS resolver
    async fn execute_with_dns(&self, request: HttpRequest) -> Result<HttpResponse> {
        let overall_start = Instant::now();
        
        // Parse URL
        let url = Url::parse(&request.url)
            .map_err(|e| AppError::parse(format!("Invalid URL: {}", e)))?;
        
        // DNS resolution timing
        let (resolved_ips, dns_time) = self.resolve_url(&request.url, &request.dns_config).await?;
        
        if resolved_ips.is_empty() {
            return Err(AppError::dns_resolution("No IP addresses resolved"));
        }
        
        // Use first resolved IP for the request
        let target_ip = resolved_ips[0];
        
        // Create custom HTTP client for this specific IP
        let custom_client = self.create_custom_client(&request, target_ip)?;
        
        // Build request
        let mut req_builder = custom_client.request(request.method, url.clone());
        
        // Set timeout
        req_builder = req_builder.timeout(request.timeout);
        
        // Add headers
        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }
        
        // Add user agent
        if let Some(ref ua) = request.user_agent {
            req_builder = req_builder.header("User-Agent", ua);
        }
        
        // Execute request with timing
        let request_start = Instant::now();
        
        let response_result = if request.timeout > Duration::ZERO {
            timeout(request.timeout, req_builder.send()).await
                .map_err(|_| AppError::timeout("HTTP request timed out"))?
                .map_err(|e| AppError::http_request(e.to_string()))
        } else {
            req_builder.send().await
                .map_err(|e| AppError::http_request(e.to_string()))
        };
        
        let request_time = request_start.elapsed();
        let total_time = overall_start.elapsed();
        
        match response_result {
            Ok(response) => {
                let status_code = response.status().as_u16();
                let final_url = response.url().to_string();
                
                // Extract headers
                let headers: Vec<(String, String)> = response
                    .headers()
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
                    .collect();
                
                // Get body size (read body for size measurement)
                let body = response.bytes().await
                    .map_err(|e| AppError::http_request(format!("Failed to read response body: {}", e)))?;
                let body_size = body.len();
                
                // Create timing metrics
                let timing = TimingMetrics::success(
                    dns_time,
                    Duration::from_nanos(0), // Difficult to measure separately
                    if url.scheme() == "https" { Some(Duration::from_nanos(0)) } else { None },
                    request_time,
                    total_time,
                    status_code,
                );
                
                Ok(HttpResponse {
                    status_code,
                    headers,
                    body_size,
                    timing,
                    resolved_ip: Some(target_ip),
                    dns_config_used: request.dns_config,
                    final_url,
                })
            }
            Err(e) => {
                let _timing = if matches!(e, AppError::Timeout(_)) {
                    TimingMetrics::timeout(total_time)
                } else {
                    TimingMetrics::failed(e.to_string())
                };
                
                // Return error response with timing information
                Err(e)
            }
        }
    }
    
    /// Create a custom HTTP client that connects to a specific IP
    fn create_custom_client(&self, request: &HttpRequest, _target_ip: IpAddr) -> Result<Client> {
        let url = Url::parse(&request.url)
            .map_err(|e| AppError::parse(format!("Invalid URL: {}", e)))?;
        
        let _port = url.port().unwrap_or_else(|| {
            match url.scheme() {
                "https" => 443,
                "http" => 80,
                _ => 80,
            }
        });
        
        // Create client builder
        let client_builder = Client::builder()
            .timeout(request.timeout)
            .redirect(if request.follow_redirects {
                reqwest::redirect::Policy::limited(request.max_redirects)
            } else {
                reqwest::redirect::Policy::none()
            });
        
        // For system DNS or when we want to use the default behavior,
        // we don't need to override the resolver
        match &request.dns_config {
            DnsConfig::System => {
                // Use default system resolver
            }
            DnsConfig::Custom { .. } | DnsConfig::DoH { .. } => {
                // For custom DNS, we would ideally use a custom resolver
                // but reqwest doesn't easily support this, so we use the resolved IP directly
                // This is a limitation that could be improved in future versions
            }
        }
        
        client_builder.build()
            .map_err(|e| AppError::network(format!("Failed to create custom client: {}", e)))
    }
}

#[async_trait]
impl HttpClient for NetworkClient {
    async fn execute_request(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.execute_with_dns(request).await
    }
    
    async fn head(&self, url: &str, dns_config: &DnsConfig) -> Result<HttpResponse> {
        let request = HttpRequest::head(url.to_string(), dns_config.clone())
            .with_timeout(self.default_timeout);
        self.execute_request(request).await
    }
    
    async fn get(&self, url: &str, dns_config: &DnsConfig) -> Result<HttpResponse> {
        let request = HttpRequest::get(url.to_string(), dns_config.clone())
            .with_timeout(self.default_timeout);
        self.execute_request(request).await
    }
    
    async fn test_connectivity(&self, url: &str, dns_config: &DnsConfig) -> Result<ConnectivityTest> {
        let start_time = Instant::now();
        
        match self.head(url, dns_config).await {
            Ok(response) => {
                Ok(ConnectivityTest {
                    success: response.is_success(),
                    status_code: Some(response.status_code),
                    response_time: response.timing.total_duration,
                    resolved_ip: response.resolved_ip,
                    dns_resolution_time: response.timing.dns_resolution,
                    connection_time: response.timing.first_byte,
                    error: None,
                })
            }
            Err(e) => {
                Ok(ConnectivityTest {
                    success: false,
                    status_code: None,
                    response_time: start_time.elapsed(),
                    resolved_ip: None,
                    dns_resolution_time: Duration::from_nanos(0),
                    connection_time: Duration::from_nanos(0),
                    error: Some(e.to_string()),
                })
            }
        }
    }
}

/// HTTP client factory for different configurations
pub struct ClientFactory {
    dns_manager: Arc<DnsManager>,
}

impl ClientFactory {
    /// Create a new client factory
    pub fn new(dns_manager: Arc<DnsManager>) -> Self {
        Self { dns_manager }
    }
    
    /// Create a network client with default configuration
    pub fn create_network_client(&self) -> Result<NetworkClient> {
        NetworkClient::new(self.dns_manager.clone())
    }
    
    /// Create a network client with custom timeout
    pub fn create_network_client_with_timeout(&self, timeout: Duration) -> Result<NetworkClient> {
        NetworkClient::with_timeout(self.dns_manager.clone(), timeout)
    }
    
    /// Create a client optimized for latency testing
    pub fn create_latency_test_client(&self) -> Result<NetworkClient> {
        NetworkClient::with_timeout(self.dns_manager.clone(), Duration::from_secs(5))
    }
}

/// Utility functions for HTTP operations
pub struct HttpUtils;

impl HttpUtils {
    /// Validate URL format and accessibility
    pub fn validate_url(url: &str) -> Result<()> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::validation(format!("Invalid URL format: {}", e)))?;
        
        // Check scheme
        match parsed.scheme() {
            "http" | "https" => {},
            scheme => return Err(AppError::validation(format!("Unsupported URL scheme: {}", scheme))),
        }
        
        // Check host
        if parsed.host().is_none() {
            return Err(AppError::validation("URL must have a host"));
        }
        
        Ok(())
    }
    
    /// Extract domain from URL
    pub fn extract_domain(url: &str) -> Result<String> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::parse(format!("Invalid URL: {}", e)))?;
        
        parsed.host_str()
            .ok_or_else(|| AppError::validation("URL must have a host"))
            .map(|s| s.to_string())
    }
    
    /// Check if URL uses HTTPS
    pub fn is_https(url: &str) -> bool {
        url.starts_with("https://")
    }
    
    /// Normalize URL for testing (remove fragments, sort query parameters)
    pub fn normalize_url(url: &str) -> Result<String> {
        let mut parsed = Url::parse(url)
            .map_err(|e| AppError::parse(format!("Invalid URL: {}", e)))?;
        
        // Remove fragment
        parsed.set_fragment(None);
        
        // Sort query parameters for consistency
        let query_pairs: Vec<_> = parsed.query_pairs().collect();
        if !query_pairs.is_empty() {
            let mut sorted_pairs = query_pairs;
            sorted_pairs.sort_by(|a, b| a.0.cmp(&b.0));
            
            // Need to clone the key-value pairs to avoid borrowing issues
            let sorted_pairs_owned: Vec<(String, String)> = sorted_pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            
            parsed.set_query(None);
            for (key, value) in sorted_pairs_owned {
                parsed.query_pairs_mut().append_pair(&key, &value);
            }
        }
        
        Ok(parsed.to_string())
    }
    
    /// Get default port for URL scheme
    pub fn get_default_port(url: &str) -> Result<u16> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::parse(format!("Invalid URL: {}", e)))?;
        
        Ok(match parsed.scheme() {
            "http" => 80,
            "https" => 443,
            scheme => return Err(AppError::validation(format!("Unknown scheme for port: {}", scheme))),
        })
    }
}
