//! Security middleware

pub mod headers;

pub use headers::security_headers_middleware;
