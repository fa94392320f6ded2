//! Derivation of client attributes from the incoming request.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;
use woothee::parser::Parser;

use crate::domain::entities::NewVisit;

/// Builds a visit event from request metadata.
///
/// Device, OS, and browser are classified from the raw User-Agent; a UA
/// that fails to parse is recorded as a desktop visit with empty attributes
/// rather than dropped.
pub fn build_visit(alias: &str, headers: &HeaderMap, ip: Option<IpAddr>) -> NewVisit {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let (device, os, browser) = match Parser::new().parse(&user_agent) {
        Some(parsed) => (
            device_class(parsed.category).to_string(),
            parsed.os.to_string(),
            parsed.name.to_string(),
        ),
        None => ("desktop".to_string(), String::new(), String::new()),
    };

    NewVisit {
        alias: alias.to_string(),
        user_agent,
        device,
        os,
        browser,
        ip: ip.map(|addr| addr.to_string()),
    }
}

fn device_class(category: &str) -> &'static str {
    match category {
        "smartphone" | "mobilephone" => "mobile",
        "crawler" => "bot",
        _ => "desktop",
    }
}
