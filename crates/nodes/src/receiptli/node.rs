//! `ReceiptliNode` — forwards each item's file to the extraction service.

use async_trait::async_trait;
use tracing::{debug, info};

use super::client::{ExtractionClient, ExtractionRequest, FALLBACK_FILE_NAME, FALLBACK_MIME_TYPE};
use super::credentials::ReceiptliCredentials;
use super::description::{
    receiptli_description, BINARY_PROPERTY_NAME, CREDENTIAL_NAME, LANGUAGE, SCHEMA,
};
use crate::descriptor::NodeDescription;
use crate::params::get_node_parameter;
use crate::traits::{ExecutableNode, ExecuteFunctions, NodeExecutionData, NodeOutput};
use crate::NodeError;

/// Extraction node.
///
/// Items are processed strictly in order, one request at a time. The first
/// failure aborts the whole batch.
pub struct ReceiptliNode {
    description: NodeDescription,
    http: reqwest::Client,
}

impl ReceiptliNode {
    pub fn new() -> Self {
        Self::with_http_client(reqwest::Client::new())
    }

    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self {
            description: receiptli_description(),
            http,
        }
    }
}

impl Default for ReceiptliNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecutableNode for ReceiptliNode {
    fn description(&self) -> &NodeDescription {
        &self.description
    }

    async fn execute(&self, ctx: &dyn ExecuteFunctions) -> Result<NodeOutput, NodeError> {
        let items = ctx.input_data();
        let credentials = ReceiptliCredentials::from_data(&ctx.credentials(CREDENTIAL_NAME)?)?;
        let client = ExtractionClient::with_http_client(self.http.clone(), credentials);

        let mut results = Vec::with_capacity(items.len());

        for (i, item) in items.iter().enumerate() {
            let binary_property =
                get_node_parameter(ctx, &self.description, BINARY_PROPERTY_NAME, i)?;
            let schema = get_node_parameter(ctx, &self.description, SCHEMA, i)?;
            let language = get_node_parameter(ctx, &self.description, LANGUAGE, i)?;

            let binary = item
                .binary
                .get(&binary_property)
                .ok_or_else(|| NodeError::MissingBinaryData {
                    property: binary_property.clone(),
                })?;
            let file = ctx.binary_data_buffer(i, &binary_property)?;

            let request = ExtractionRequest {
                file,
                file_name: non_empty_or(binary.file_name.as_deref(), FALLBACK_FILE_NAME),
                mime_type: non_empty_or(binary.mime_type.as_deref(), FALLBACK_MIME_TYPE),
                schema,
                language,
            };
            debug!(
                item = i,
                file_name = %request.file_name,
                bytes = request.file.len(),
                language = %request.language,
                "extracting item"
            );

            let json = client
                .extract(request)
                .await
                .map_err(|e| NodeError::RequestFailure {
                    item_index: i,
                    message: e.to_string(),
                })?;

            info!(item = i, "extraction completed");
            results.push(NodeExecutionData::from_json(json));
        }

        Ok(vec![results])
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => fallback.to_owned(),
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHost;
    use crate::traits::BinaryData;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SCHEMA_TEXT: &str = r#"{"total": "number"}"#;

    fn invoice_item() -> NodeExecutionData {
        NodeExecutionData::from_json(json!({})).with_binary(
            "data",
            BinaryData::new(&b"%PDF-1.4 invoice"[..])
                .with_file_name("invoice.pdf")
                .with_mime_type("application/pdf"),
        )
    }

    fn host(items: Vec<NodeExecutionData>, base_url: &str) -> MockHost {
        MockHost::new(items)
            .with_parameter("schema", json!(SCHEMA_TEXT))
            .with_credentials(CREDENTIAL_NAME, [("apiKey", "k1"), ("baseUrl", base_url)])
    }

    #[tokio::test]
    async fn single_invoice_produces_one_request_and_one_output_item() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/extract-text"))
            .and(header("authorization", "Bearer k1"))
            .and(body_string_contains(SCHEMA_TEXT))
            .and(body_string_contains("eng"))
            .and(body_string_contains(r#"filename="invoice.pdf""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 99.0 })))
            .expect(1)
            .mount(&server)
            .await;

        let host = host(vec![invoice_item()], &server.uri());
        let output = ReceiptliNode::new().execute(&host).await.expect("should succeed");

        assert_eq!(output.len(), 1, "all results go to the first branch");
        assert_eq!(output[0].len(), 1);
        assert_eq!(output[0][0].json, json!({ "total": 99.0 }));
        assert!(output[0][0].binary.is_empty());
        assert_eq!(host.buffer_request_count(), 1);
    }

    #[tokio::test]
    async fn output_order_matches_input_order() {
        let server = MockServer::start().await;
        for n in 0..3 {
            Mock::given(method("POST"))
                .and(body_string_contains(format!("file-{n}.pdf")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "n": n })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let items = (0..3)
            .map(|n| {
                NodeExecutionData::default().with_binary(
                    "data",
                    BinaryData::new(format!("bytes {n}").into_bytes())
                        .with_file_name(format!("file-{n}.pdf")),
                )
            })
            .collect();
        let host = host(items, &server.uri());

        let output = ReceiptliNode::new().execute(&host).await.unwrap();
        let ns: Vec<_> = output[0].iter().map(|item| item.json["n"].clone()).collect();
        assert_eq!(ns, vec![json!(0), json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn missing_binary_property_fails_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let host = host(vec![NodeExecutionData::from_json(json!({ "x": 1 }))], &server.uri());
        let err = ReceiptliNode::new().execute(&host).await.unwrap_err();

        assert_eq!(
            err,
            NodeError::MissingBinaryData {
                property: "data".into()
            }
        );
        assert!(err.to_string().contains("\"data\""));
        assert_eq!(host.buffer_request_count(), 0);
    }

    #[tokio::test]
    async fn missing_binary_on_later_item_aborts_the_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let items = vec![invoice_item(), NodeExecutionData::default(), invoice_item()];
        let host = host(items, &server.uri());
        let err = ReceiptliNode::new().execute(&host).await.unwrap_err();
        assert!(matches!(err, NodeError::MissingBinaryData { .. }));
    }

    #[tokio::test]
    async fn custom_binary_property_and_language_are_used() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("name=\"language\"\r\n\r\nar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let item = NodeExecutionData::default()
            .with_binary("attachment", BinaryData::new(&b"scan"[..]).with_file_name("scan.png"));
        let host = host(vec![item], &server.uri())
            .with_parameter("binaryPropertyName", json!("attachment"))
            .with_parameter("language", json!("ar"));

        let output = ReceiptliNode::new().execute(&host).await.unwrap();
        assert_eq!(output[0][0].json, json!({ "ok": true }));
        assert_eq!(
            *host.buffer_requests.lock().unwrap(),
            vec![(0, "attachment".to_owned())]
        );
    }

    #[tokio::test]
    async fn attachment_without_metadata_uses_pdf_fallbacks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains(r#"filename="document.pdf""#))
            .and(body_string_contains("Content-Type: application/pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let item = NodeExecutionData::default().with_binary(
            "data",
            BinaryData::new(&b"raw"[..]).with_file_name(""),
        );
        let host = host(vec![item], &server.uri());
        ReceiptliNode::new().execute(&host).await.unwrap();
    }

    #[tokio::test]
    async fn unparsable_mime_type_still_sends_the_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains(r#"filename="invoice.pdf""#))
            .and(body_string_contains("Content-Type: application/pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 7 })))
            .expect(1)
            .mount(&server)
            .await;

        let item = NodeExecutionData::default().with_binary(
            "data",
            BinaryData::new(&b"%PDF-1.4"[..])
                .with_file_name("invoice.pdf")
                .with_mime_type("pdf"),
        );
        let host = host(vec![item], &server.uri());

        let output = ReceiptliNode::new().execute(&host).await.expect("should succeed");
        assert_eq!(output[0].len(), 1);
        assert_eq!(output[0][0].json, json!({ "total": 7 }));
    }

    #[tokio::test]
    async fn request_failure_stops_processing_remaining_items() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let host = host(vec![invoice_item(), invoice_item()], &server.uri());
        let err = ReceiptliNode::new().execute(&host).await.unwrap_err();

        match err {
            NodeError::RequestFailure { item_index, message } => {
                assert_eq!(item_index, 0);
                assert!(message.contains("500"), "message: {message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(host.buffer_request_count(), 1);
    }

    #[tokio::test]
    async fn invalid_language_is_rejected_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let host = host(vec![invoice_item()], &server.uri())
            .with_item_parameter(0, "language", json!("de"));
        let err = ReceiptliNode::new().execute(&host).await.unwrap_err();
        assert!(matches!(err, NodeError::InvalidParameter { ref name, .. } if name == "language"));
    }

    #[tokio::test]
    async fn missing_credentials_fail_the_execution() {
        let host = MockHost::new(vec![invoice_item()]).with_parameter("schema", json!(SCHEMA_TEXT));
        let err = ReceiptliNode::new().execute(&host).await.unwrap_err();
        assert!(matches!(err, NodeError::Credentials(_)));
        assert_eq!(host.buffer_request_count(), 0);
    }

    #[tokio::test]
    async fn empty_input_yields_one_empty_branch() {
        let host = host(Vec::new(), "http://localhost:3000");
        let output = ReceiptliNode::new().execute(&host).await.unwrap();
        assert_eq!(output, vec![Vec::<NodeExecutionData>::new()]);
    }

    #[test]
    fn fallback_applies_to_missing_and_empty_values() {
        assert_eq!(non_empty_or(None, "x"), "x");
        assert_eq!(non_empty_or(Some(""), "x"), "x");
        assert_eq!(non_empty_or(Some("a.png"), "x"), "a.png");
    }
}
