//! HTTP transport module
//!
//! The retrying, rate-limited client every GitLab API call goes through.
//! Transient failures are retried here so that the reconcilers above never
//! have to.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Not-found classification**: 404 responses become `Error::RemoteNotFound`
//! - **Multipart uploads**: Rebuilt per attempt so uploads survive retries

mod client;
mod rate_limit;

pub use client::{
    FilePart, HttpClient, HttpClientConfig, MultipartBody, RequestBody, RequestConfig,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
