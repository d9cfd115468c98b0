// Copyright (c) 2025 streameye developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! The HTTP streaming protocol as observed by clients: a fixed preamble followed by
//! one `multipart/x-mixed-replace` part per frame.

/// The multipart boundary token.
pub const BOUNDARY: &str = "jpgboundary";

/// The HTTP response preamble written once, immediately after accept, without reading
/// anything from the client's request.
#[must_use]
pub fn preamble() -> Vec<u8> {
    format!(
        "HTTP/1.0 200 OK\r\n\
         Server: streamEye\r\n\
         Connection: close\r\n\
         Max-Age: 0\r\n\
         Expires: 0\r\n\
         Cache-Control: no-cache, private\r\n\
         Pragma: no-cache\r\n\
         Content-Type: multipart/x-mixed-replace; boundary={BOUNDARY}\r\n\
         \r\n"
    )
    .into_bytes()
}

/// Render one multipart part carrying `frame`'s bytes.
#[must_use]
pub fn part(frame: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(frame.len() + 96);
    out.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    out.extend_from_slice(b"Content-Type: image/jpeg\r\n");
    out.extend_from_slice(format!("Content-Length: {}\r\n", frame.len()).as_bytes());
    out.extend_from_slice(b"\r\n");
    out.extend_from_slice(frame);
    out.extend_from_slice(b"\r\n");
    out
}
