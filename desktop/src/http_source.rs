use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use catmatrix_core::source::{FetchError, ImageSource};
use log::debug;

/// Blocking HTTP GET against a dimension-templated endpoint.
///
/// Speaks HTTP/1.0 so the body simply runs to end-of-stream; plain
/// `http://` URLs only.
pub struct HttpSource {
    host: String,
    port: u16,
    path: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, &'static str> {
        let rest = url
            .strip_prefix("http://")
            .ok_or("only http:// URLs are supported")?;
        let (authority, path) = match rest.find('/') {
            Some(slash) => (&rest[..slash], &rest[slash..]),
            None => (rest, "/"),
        };
        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (host, port.parse().map_err(|_| "invalid port")?),
            None => (authority, 80),
        };
        if host.is_empty() {
            return Err("missing host");
        }
        Ok(HttpSource {
            host: host.to_owned(),
            port,
            path: path.to_owned(),
            timeout,
        })
    }
}

impl ImageSource for HttpSource {
    fn fetch(&mut self, width: usize, height: usize) -> Result<Vec<u8>, FetchError> {
        let stream = TcpStream::connect((self.host.as_str(), self.port));
        let mut stream = stream.map_err(|err| match err.kind() {
            ErrorKind::TimedOut | ErrorKind::WouldBlock => FetchError::Timeout,
            _ => FetchError::Connection,
        })?;
        stream.set_read_timeout(Some(self.timeout)).ok();
        stream.set_write_timeout(Some(self.timeout)).ok();

        let separator = if self.path.contains('?') { '&' } else { '?' };
        let request = format!(
            "GET {}{}width={}&height={} HTTP/1.0\r\nHost: {}\r\nAccept: image/jpeg\r\nConnection: close\r\n\r\n",
            self.path, separator, width, height, self.host
        );
        debug!("GET http://{}:{}{}", self.host, self.port, self.path);
        stream
            .write_all(request.as_bytes())
            .map_err(|_| FetchError::Connection)?;

        let mut response = Vec::new();
        if let Err(err) = stream.read_to_end(&mut response) {
            return Err(match err.kind() {
                ErrorKind::TimedOut | ErrorKind::WouldBlock => FetchError::Timeout,
                _ => FetchError::Connection,
            });
        }
        split_body(&response)
    }
}

/// Strip the status line and headers, checking for a 2xx status.
fn split_body(response: &[u8]) -> Result<Vec<u8>, FetchError> {
    let header_end = response
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .ok_or(FetchError::Connection)?;
    let head = &response[..header_end];
    let status_line = head.split(|&byte| byte == b'\r').next().unwrap_or(b"");
    let status: u16 = std::str::from_utf8(status_line)
        .ok()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
        .ok_or(FetchError::Connection)?;
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }
    Ok(response[header_end + 4..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_parts() {
        let source = HttpSource::new("http://cataas.com/cat", Duration::from_secs(5)).unwrap();
        assert_eq!(source.host, "cataas.com");
        assert_eq!(source.port, 80);
        assert_eq!(source.path, "/cat");

        let source = HttpSource::new("http://localhost:8080", Duration::from_secs(5)).unwrap();
        assert_eq!(source.port, 8080);
        assert_eq!(source.path, "/");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(HttpSource::new("https://cataas.com/cat", Duration::from_secs(5)).is_err());
        assert!(HttpSource::new("ftp://example.com", Duration::from_secs(5)).is_err());
    }

    #[test]
    fn splits_body_after_headers() {
        let response = b"HTTP/1.0 200 OK\r\nContent-Type: image/jpeg\r\n\r\n\xff\xd8\xff\xd9";
        assert_eq!(split_body(response).unwrap(), b"\xff\xd8\xff\xd9");
    }

    #[test]
    fn non_success_status_is_distinguished() {
        let response = b"HTTP/1.0 404 Not Found\r\n\r\n";
        assert_eq!(split_body(response), Err(FetchError::Status(404)));
    }

    #[test]
    fn garbage_response_is_a_connection_error() {
        assert_eq!(split_body(b"not http at all"), Err(FetchError::Connection));
    }
}
