//! JavaScript evaluated against the rendered page
//!
//! Scripts return plain JSON values so any `PageSession` can hand them back
//! as `serde_json::Value`.

/// Scroll the window to the current bottom of the document
pub const SCROLL_TO_BOTTOM_SCRIPT: &str = r"
    (() => {
        window.scrollTo(0, document.body.scrollHeight);
        return null;
    })()
";

/// Current content height of the document body, in CSS pixels
pub const CONTENT_HEIGHT_SCRIPT: &str = r"
    (() => document.body ? document.body.scrollHeight : 0)()
";

/// Every anchor element with its resolved href, title/alt metadata and visible text
///
/// `a.href` is the resolved absolute URL. SVG anchors expose an animated
/// string object there, so those fall back to the raw attribute.
pub const ANCHORS_SCRIPT: &str = r"
    (() => Array.from(document.getElementsByTagName('a')).map(a => ({
        href: (typeof a.href === 'string' && a.href) ? a.href : a.getAttribute('href'),
        title: a.getAttribute('title'),
        alt: a.getAttribute('alt'),
        text: a.innerText || ''
    })))()
";
