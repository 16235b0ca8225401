//! PROPFIND request body and multistatus response parsing.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::webdav::{RemoteEntry, WebDavError};

/// Body requesting the properties read into [`RemoteEntry`].
pub const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:">
  <D:prop>
    <D:creationdate/>
    <D:displayname/>
    <D:getcontentlength/>
    <D:getcontenttype/>
    <D:getetag/>
    <D:getlastmodified/>
    <D:resourcetype/>
  </D:prop>
</D:propfind>"#;

/// Parses a `207 Multi-Status` body into one entry per `response`.
pub fn parse_multistatus(xml: &str) -> Result<Vec<RemoteEntry>, WebDavError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<RemoteEntry> = None;
    let mut current_element = String::new();
    let mut in_resource_type = false;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local = String::from_utf8_lossy(e.local_name().into_inner()).to_string();
                match local.as_str() {
                    "response" => current = Some(RemoteEntry::default()),
                    "resourcetype" => in_resource_type = true,
                    "collection" if in_resource_type => mark_collection(current.as_mut()),
                    _ => {}
                }
                current_element = local;
            }
            Ok(Event::Empty(ref e)) => {
                if in_resource_type && e.local_name().into_inner() == b"collection" {
                    mark_collection(current.as_mut());
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                if let Some(entry) = current.as_mut() {
                    apply_property(entry, &current_element, text);
                }
            }
            Ok(Event::End(ref e)) => {
                match e.local_name().into_inner() {
                    b"response" => {
                        if let Some(entry) = current.take() {
                            entries.push(entry.finish());
                        }
                    }
                    b"resourcetype" => in_resource_type = false,
                    _ => {}
                }
                current_element.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(WebDavError::Parse {
                    reason: e.to_string(),
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

fn mark_collection(entry: Option<&mut RemoteEntry>) {
    if let Some(entry) = entry {
        entry.is_dir = true;
    }
}

fn apply_property(entry: &mut RemoteEntry, element: &str, text: String) {
    match element {
        "href" => entry.path = decode_href(&text),
        "displayname" => entry.name = text,
        "getcontentlength" => entry.size = text.trim().parse().ok(),
        "getlastmodified" => entry.modified = Some(text),
        "creationdate" => entry.created = Some(text),
        "getcontenttype" => entry.content_type = Some(text),
        "getetag" => entry.etag = Some(text),
        _ => {}
    }
}

/// Reduces an `href` to a decoded path, dropping any scheme and host.
fn decode_href(href: &str) -> String {
    let path = href
        .split_once("://")
        .map_or(href, |(_, rest)| rest.find('/').map_or("/", |i| &rest[i..]));
    urlencoding::decode(path).map_or_else(|_| path.to_string(), |decoded| decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<D:multistatus xmlns:D="DAV:">
  <D:response>
    <D:href>/on/demandware.servlet/webdav/Sites/Impex/src/</D:href>
    <D:propstat>
      <D:prop>
        <D:displayname>src</D:displayname>
        <D:resourcetype><D:collection/></D:resourcetype>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>https://dev01.example.com/on/demandware.servlet/webdav/Sites/Impex/src/catalog%20export.zip</D:href>
    <D:propstat>
      <D:prop>
        <D:getcontentlength>2048</D:getcontentlength>
        <D:getlastmodified>Mon, 12 Oct 2020 09:30:00 GMT</D:getlastmodified>
        <D:getcontenttype>application/zip</D:getcontenttype>
        <D:getetag>"abc123"</D:getetag>
        <D:resourcetype/>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    #[test]
    fn test_parses_collection_and_file() {
        let entries = parse_multistatus(LISTING).unwrap();
        assert_eq!(entries.len(), 2);

        let folder = &entries[0];
        assert!(folder.is_dir);
        assert_eq!(folder.name, "src");
        assert_eq!(folder.path, "/on/demandware.servlet/webdav/Sites/Impex/src/");

        let file = &entries[1];
        assert!(!file.is_dir);
        assert_eq!(
            file.path,
            "/on/demandware.servlet/webdav/Sites/Impex/src/catalog export.zip"
        );
        assert_eq!(file.name, "catalog export.zip");
        assert_eq!(file.size, Some(2048));
        assert_eq!(file.content_type.as_deref(), Some("application/zip"));
        assert_eq!(file.etag.as_deref(), Some("\"abc123\""));
    }

    #[test]
    fn test_empty_multistatus() {
        let entries =
            parse_multistatus(r#"<D:multistatus xmlns:D="DAV:"></D:multistatus>"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let result = parse_multistatus("<D:multistatus><D:response></D:multistatus>");
        assert!(matches!(result, Err(WebDavError::Parse { .. })));
    }
}
