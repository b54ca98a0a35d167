use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use pdf_web_viewer::application::ports::PdfConverter;
use pdf_web_viewer::application::services::ConversionService;
use pdf_web_viewer::infrastructure::converter::{MockConversion, MockPdfConverter, PopplerConverter};
use pdf_web_viewer::infrastructure::observability::REQUEST_ID_HEADER;
use pdf_web_viewer::infrastructure::text_processing::HtmlNormalizer;
use pdf_web_viewer::presentation::config::ConversionSettings;
use pdf_web_viewer::presentation::handlers::{
    INVALID_FILE_TYPE_DETAIL, OUTPUT_NOT_FOUND_DETAIL, ROOT_MESSAGE,
};
use pdf_web_viewer::presentation::{AppState, Settings, create_router};

const BOUNDARY: &str = "pdf-web-viewer-test-boundary";
const ALLOWED_ORIGIN: &str = "http://localhost:3000";

const PDFTOHTML_OUTPUT: &str = r##"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">
<HTML>
<HEAD>
<TITLE>sample</TITLE>
<META http-equiv="Content-Type" content="text/html; charset=UTF-8">
<style type="text/css">p {margin: 0; padding: 0;}</style>
</HEAD>
<BODY bgcolor="#A0A0A0" vlink="blue" link="blue">
<a name=1></a><b>Quarterly Report</b><br/>
<br/>
Revenue grew in every region<br/>
during the third quarter.<br/>
<br/>
<img src="sample001.png"/>Costs were <i style="color:red">flat</i><br/>
<script>alert(1)</script>
<hr/>
<a name=2></a>Page two text<br/>
</BODY>
</HTML>
"##;

fn create_test_app<C>(converter: Arc<C>) -> axum::Router
where
    C: PdfConverter + 'static,
{
    let conversion_service = Arc::new(ConversionService::new(
        converter,
        Arc::new(HtmlNormalizer::new()),
    ));

    create_router(AppState {
        conversion_service,
        settings: Settings::default(),
    })
}

fn multipart_body(field_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; filename=\"sample.pdf\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(field_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field_name, content_type, data)))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_running_server_when_root_requested_then_returns_running_message() {
    let app = create_test_app(Arc::new(MockPdfConverter::new(MockConversion::NoOutput)));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["message"], ROOT_MESSAGE);
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let app = create_test_app(Arc::new(MockPdfConverter::new(MockConversion::NoOutput)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn given_pdf_upload_when_converted_then_returns_clean_html_content() {
    let converter = Arc::new(MockPdfConverter::new(MockConversion::Html(
        PDFTOHTML_OUTPUT.to_string(),
    )));
    let app = create_test_app(Arc::clone(&converter));

    let response = app
        .oneshot(upload_request("file", "application/pdf", b"%PDF-1.4 fake"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let html = json["html_content"].as_str().unwrap();

    assert_eq!(
        html,
        "<p><b>Quarterly Report</b></p> \
         <p>Revenue grew in every region during the third quarter.</p> \
         <p>Costs were <i>flat</i></p> \
         <p>Page two text</p>"
    );
    assert!(!html.contains("<script"));
    assert!(!html.contains("<style"));
    assert!(!html.contains("<img"));
    assert!(!html.contains("style="));
}

#[tokio::test]
async fn given_pdf_upload_when_request_finishes_then_temp_directory_is_removed() {
    let converter = Arc::new(MockPdfConverter::new(MockConversion::Html(
        "<p>done</p>".to_string(),
    )));
    let app = create_test_app(Arc::clone(&converter));

    let response = app
        .oneshot(upload_request("file", "application/pdf", b"%PDF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let dirs = converter.staged_dirs();
    assert_eq!(dirs.len(), 1);
    assert!(!dirs[0].exists());
}

#[tokio::test]
async fn given_non_pdf_content_type_when_uploading_then_returns_bad_request() {
    let converter = Arc::new(MockPdfConverter::new(MockConversion::Html(
        "<p>never</p>".to_string(),
    )));
    let app = create_test_app(Arc::clone(&converter));

    let response = app
        .oneshot(upload_request("file", "text/plain", b"%PDF-1.4 looks like a pdf"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["detail"], INVALID_FILE_TYPE_DETAIL);
    assert!(converter.staged_dirs().is_empty());
}

#[tokio::test]
async fn given_request_without_file_field_when_uploading_then_returns_bad_request() {
    let app = create_test_app(Arc::new(MockPdfConverter::new(MockConversion::NoOutput)));

    let response = app
        .oneshot(upload_request("attachment", "application/pdf", b"%PDF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["detail"], "No file uploaded");
}

#[tokio::test]
async fn given_missing_converter_tool_when_uploading_then_returns_server_error_and_cleans_up() {
    let converter = Arc::new(MockPdfConverter::new(MockConversion::ToolMissing));
    let app = create_test_app(Arc::clone(&converter));

    let response = app
        .oneshot(upload_request("file", "application/pdf", b"%PDF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    let detail = json["detail"].as_str().unwrap();
    assert!(detail.starts_with("An error occurred:"));
    assert!(detail.contains("pdftohtml"));

    let dirs = converter.staged_dirs();
    assert_eq!(dirs.len(), 1);
    assert!(!dirs[0].exists());
}

#[tokio::test]
async fn given_absent_pdftohtml_binary_when_uploading_then_returns_server_error() {
    let settings = ConversionSettings {
        pdftohtml_path: "/nonexistent/bin/pdftohtml".to_string(),
        ..ConversionSettings::default()
    };
    let app = create_test_app(Arc::new(PopplerConverter::new(&settings)));

    let response = app
        .oneshot(upload_request("file", "application/pdf", b"%PDF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert!(json["detail"].as_str().unwrap().contains("is not available"));
}

#[tokio::test]
async fn given_converter_without_output_when_uploading_then_returns_not_found_detail() {
    let app = create_test_app(Arc::new(MockPdfConverter::new(MockConversion::NoOutput)));

    let response = app
        .oneshot(upload_request("file", "application/pdf", b"%PDF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["detail"], OUTPUT_NOT_FOUND_DETAIL);
}

#[tokio::test]
async fn given_failing_converter_when_uploading_then_detail_carries_message() {
    let app = create_test_app(Arc::new(MockPdfConverter::new(MockConversion::Fails(
        "Syntax Error: Couldn't find trailer dictionary".to_string(),
    ))));

    let response = app
        .oneshot(upload_request("file", "application/pdf", b"not a pdf"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(
        json["detail"],
        "An error occurred: Syntax Error: Couldn't find trailer dictionary"
    );
}

#[tokio::test]
async fn given_allowed_origin_when_preflight_then_allows_credentials() {
    let app = create_test_app(Arc::new(MockPdfConverter::new(MockConversion::NoOutput)));

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/upload")
                .header("origin", ALLOWED_ORIGIN)
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        ALLOWED_ORIGIN
    );
    assert_eq!(
        headers.get("access-control-allow-credentials").unwrap(),
        "true"
    );
    assert_eq!(headers.get("access-control-allow-methods").unwrap(), "POST");
}

#[tokio::test]
async fn given_unknown_origin_when_preflight_then_origin_is_not_allowed() {
    let app = create_test_app(Arc::new(MockPdfConverter::new(MockConversion::NoOutput)));

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/upload")
                .header("origin", "http://evil.example")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}

#[tokio::test]
async fn given_request_id_header_when_requesting_then_echoes_it() {
    let app = create_test_app(Arc::new(MockPdfConverter::new(MockConversion::NoOutput)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-42");
}

#[tokio::test]
async fn given_no_request_id_header_when_requesting_then_generates_one() {
    let app = create_test_app(Arc::new(MockPdfConverter::new(MockConversion::NoOutput)));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let id = response.headers().get(REQUEST_ID_HEADER).unwrap();
    assert!(!id.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn given_malformed_request_id_header_when_requesting_then_replaces_it() {
    let app = create_test_app(Arc::new(MockPdfConverter::new(MockConversion::NoOutput)));
    let oversized = "r".repeat(200);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, oversized.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let id = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
    assert_ne!(id, oversized);
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn given_rejected_upload_with_request_id_when_uploading_then_echoes_id_on_error() {
    let app = create_test_app(Arc::new(MockPdfConverter::new(MockConversion::NoOutput)));
    let mut request = upload_request("file", "application/pdf", b"%PDF-1.4");
    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, "upload-7".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "upload-7");
    let json = json_body(response).await;
    assert_eq!(json["detail"], OUTPUT_NOT_FOUND_DETAIL);
}
