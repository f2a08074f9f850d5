//! Cookie store implementations
//!
//! `CookieJarFile` reads the Netscape `cookies.txt` format that browser export
//! extensions and curl produce:
//!
//! ```text
//! # Netscape HTTP Cookie File
//! .acme.atlassian.net	TRUE	/	TRUE	1767225600	tenant.session.token	eyJ...
//! #HttpOnly_acme.atlassian.net	FALSE	/	TRUE	0	JSESSIONID	ABC123
//! ```

use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{PanelError, Result};
use crate::models::Cookie;
use crate::traits::CookieStore;

const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// Cookies held in memory, returned in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieStore {
    cookies: Vec<Cookie>,
}

impl MemoryCookieStore {
    pub fn new(cookies: Vec<Cookie>) -> Self {
        Self { cookies }
    }
}

impl CookieStore for MemoryCookieStore {
    fn query(&self, domain_suffix: &str) -> Result<Vec<Cookie>> {
        let now = Utc::now();
        Ok(self
            .cookies
            .iter()
            .filter(|c| c.matches_suffix(domain_suffix) && !c.is_expired(now))
            .cloned()
            .collect())
    }
}

/// Netscape-format cookie jar on disk, re-read on every query
#[derive(Debug, Clone)]
pub struct CookieJarFile {
    path: PathBuf,
}

impl CookieJarFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CookieStore for CookieJarFile {
    fn query(&self, domain_suffix: &str) -> Result<Vec<Cookie>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            PanelError::CookieStore(format!("{}: {}", self.path.display(), e))
        })?;
        let now = Utc::now();
        Ok(parse_netscape(&content)
            .into_iter()
            .filter(|c| c.matches_suffix(domain_suffix) && !c.is_expired(now))
            .collect())
    }
}

/// Parse a Netscape cookie file, skipping comments and malformed lines
pub fn parse_netscape(content: &str) -> Vec<Cookie> {
    let mut cookies = Vec::new();

    for (lineno, raw) in content.lines().enumerate() {
        let (line, http_only) = match raw.strip_prefix(HTTP_ONLY_PREFIX) {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 7 {
            debug!(line = lineno + 1, "skipping malformed cookie line");
            continue;
        }

        let expires = match fields[4].parse::<i64>() {
            Ok(0) => None,
            Ok(secs) => DateTime::<Utc>::from_timestamp(secs, 0),
            Err(_) => {
                debug!(line = lineno + 1, "skipping cookie with invalid expiry");
                continue;
            }
        };

        cookies.push(Cookie {
            domain: fields[0].to_string(),
            name: fields[5].to_string(),
            value: fields[6].to_string(),
            path: fields[2].to_string(),
            secure: fields[3].eq_ignore_ascii_case("TRUE"),
            http_only,
            expires,
        });
    }

    cookies
}

/// Build a `Cookie` request header value for `host` from the store's cookies
///
/// Returns None when no cookie applies.
pub fn cookie_header(
    store: &dyn CookieStore,
    domain_suffix: &str,
    host: &str,
) -> Result<Option<String>> {
    let pairs: Vec<String> = store
        .query(domain_suffix)?
        .into_iter()
        .filter(|c| c.applies_to(host))
        .map(|c| format!("{}={}", c.name, c.value))
        .collect();

    if pairs.is_empty() {
        Ok(None)
    } else {
        Ok(Some(pairs.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAR: &str = "# Netscape HTTP Cookie File\n\
        \n\
        .acme.atlassian.net\tTRUE\t/\tTRUE\t0\ttenant.session.token\tabc\n\
        #HttpOnly_acme.atlassian.net\tFALSE\t/\tTRUE\t0\tJSESSIONID\tdef\n\
        example.com\tFALSE\t/\tFALSE\t0\tother\tzzz\n\
        broken line without tabs\n\
        old.atlassian.net\tFALSE\t/\tFALSE\t1\texpired\tgone\n";

    #[test]
    fn parses_netscape_lines() {
        let cookies = parse_netscape(JAR);
        assert_eq!(cookies.len(), 4);
        assert_eq!(cookies[0].domain, ".acme.atlassian.net");
        assert_eq!(cookies[0].name, "tenant.session.token");
        assert!(cookies[0].secure);
        assert!(!cookies[0].http_only);
        assert!(cookies[1].http_only);
        assert_eq!(cookies[1].domain, "acme.atlassian.net");
        assert!(cookies[3].expires.is_some());
    }

    #[test]
    fn jar_file_query_filters_by_suffix_and_expiry() {
        let dir = std::env::temp_dir().join(format!("panel-core-jar-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cookies.txt");
        fs::write(&path, JAR).unwrap();

        let jar = CookieJarFile::new(&path);
        let cookies = jar.query(".atlassian.net").unwrap();
        let names: Vec<_> = cookies.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["tenant.session.token", "JSESSIONID"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_jar_file_is_a_cookie_store_error() {
        let jar = CookieJarFile::new("/nonexistent/cookies.txt");
        let err = jar.query(".atlassian.net").unwrap_err();
        assert!(matches!(err, PanelError::CookieStore(_)));
    }

    #[test]
    fn memory_store_keeps_insertion_order() {
        let store = MemoryCookieStore::new(vec![
            Cookie::new("b.atlassian.net", "x", "1"),
            Cookie::new("example.org", "y", "2"),
            Cookie::new("a.atlassian.net", "z", "3"),
        ]);
        let domains: Vec<_> = store
            .query(".atlassian.net")
            .unwrap()
            .into_iter()
            .map(|c| c.domain)
            .collect();
        assert_eq!(domains, vec!["b.atlassian.net", "a.atlassian.net"]);
    }

    #[test]
    fn cookie_header_joins_applicable_cookies() {
        let store = MemoryCookieStore::new(vec![
            Cookie::new(".atlassian.net", "cloud.session.token", "t1"),
            Cookie::new("acme.atlassian.net", "JSESSIONID", "s1"),
            Cookie::new("other.atlassian.net", "JSESSIONID", "s2"),
        ]);
        let header = cookie_header(&store, ".atlassian.net", "acme.atlassian.net").unwrap();
        assert_eq!(
            header.as_deref(),
            Some("cloud.session.token=t1; JSESSIONID=s1")
        );

        let none = cookie_header(&store, ".atlassian.net", "example.com").unwrap();
        assert!(none.is_none());
    }
}
