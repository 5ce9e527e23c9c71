//! Namecheap XML 响应解析

use chrono::NaiveDate;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::types::{SslCertificate, SslListDocument};

/// 当前文本节点归属
enum TextTarget {
    None,
    Error(String),
    TotalItems,
}

/// 解析 `namecheap.ssl.getList` 响应
///
/// 命名空间前缀被忽略，只按本地名匹配元素。
pub(crate) fn parse_ssl_list(xml: &str) -> Result<SslListDocument, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut doc = SslListDocument::default();
    let mut target = TextTarget::None;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(element) => {
                target = handle_element(&element, &mut doc)?;
            }
            Event::Empty(element) => {
                handle_element(&element, &mut doc)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| e.to_string())?;
                match &target {
                    TextTarget::Error(number) => {
                        doc.errors.push((number.clone(), text.into_owned()));
                    }
                    TextTarget::TotalItems => {
                        doc.total_items = text.trim().parse().ok();
                    }
                    TextTarget::None => {}
                }
            }
            Event::End(_) => target = TextTarget::None,
            Event::Eof => break,
            _ => {}
        }
    }

    if doc.status.is_empty() {
        return Err("缺少 ApiResponse 元素".to_string());
    }

    Ok(doc)
}

fn handle_element(
    element: &BytesStart<'_>,
    doc: &mut SslListDocument,
) -> Result<TextTarget, String> {
    let target = match element.local_name().as_ref() {
        b"ApiResponse" => {
            doc.status = attribute(element, "Status")?.unwrap_or_default();
            TextTarget::None
        }
        b"Error" => TextTarget::Error(attribute(element, "Number")?.unwrap_or_default()),
        b"TotalItems" => TextTarget::TotalItems,
        b"SSL" => {
            doc.certificates.push(parse_certificate(element)?);
            TextTarget::None
        }
        _ => TextTarget::None,
    };
    Ok(target)
}

fn parse_certificate(element: &BytesStart<'_>) -> Result<SslCertificate, String> {
    let certificate_id =
        attribute(element, "CertificateID")?.ok_or("SSL 元素缺少 CertificateID")?;
    let host_name = attribute(element, "HostName")?.unwrap_or_default();

    let expire_date = attribute(element, "ExpireDate")?
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| match NaiveDate::parse_from_str(&raw, "%m/%d/%Y") {
            Ok(date) => Some(date),
            Err(e) => {
                log::warn!("Certificate {certificate_id}: invalid ExpireDate '{raw}': {e}");
                None
            }
        });

    Ok(SslCertificate {
        certificate_id,
        host_name,
        ssl_type: attribute(element, "SSLType")?,
        status: attribute(element, "Status")?,
        expire_date,
    })
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <RequestedCommand>namecheap.ssl.getList</RequestedCommand>
  <CommandResponse Type="namecheap.ssl.getList">
    <SSLListResult>
      <SSL CertificateID="52556" HostName="shop.example.com" SSLType="PositiveSSL" PurchaseDate="10/15/2023" ExpireDate="10/15/2024" Status="active" />
      <SSL CertificateID="52557" HostName="" SSLType="EssentialSSL" ExpireDate="" Status="newpurchase" />
    </SSLListResult>
    <Paging>
      <TotalItems>2</TotalItems>
      <CurrentPage>1</CurrentPage>
      <PageSize>100</PageSize>
    </Paging>
  </CommandResponse>
  <Server>SERVER-NAME</Server>
</ApiResponse>"#;

    const ERROR_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="ERROR" xmlns="http://api.namecheap.com/xml.response">
  <Errors>
    <Error Number="1011102">Parameter APIKey is invalid</Error>
  </Errors>
  <CommandResponse />
</ApiResponse>"#;

    #[test]
    fn test_parse_certificates() {
        let doc = parse_ssl_list(OK_RESPONSE).unwrap();

        assert_eq!(doc.status, "OK");
        assert!(doc.errors.is_empty());
        assert_eq!(doc.total_items, Some(2));
        assert_eq!(doc.certificates.len(), 2);

        let first = &doc.certificates[0];
        assert_eq!(first.certificate_id, "52556");
        assert_eq!(first.host_name, "shop.example.com");
        assert_eq!(first.ssl_type.as_deref(), Some("PositiveSSL"));
        assert_eq!(first.expire_date, NaiveDate::from_ymd_opt(2024, 10, 15));

        assert_eq!(doc.certificates[1].expire_date, None);
    }

    #[test]
    fn test_parse_error_response() {
        let doc = parse_ssl_list(ERROR_RESPONSE).unwrap();

        assert_eq!(doc.status, "ERROR");
        assert_eq!(
            doc.errors,
            vec![(
                "1011102".to_string(),
                "Parameter APIKey is invalid".to_string()
            )]
        );
    }

    #[test]
    fn test_rejects_non_api_document() {
        assert!(parse_ssl_list("<html><body>502</body></html>").is_err());
    }
}
