use mf_client::{dummy::DummyTransport, MfClientConfig, MfError, MfResult, Reader};
use reqwest::{Method, StatusCode};
use serde_json::json;

const ROOT: &str = "http://localhost:3030/v1/dreamcloud/mf";

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn reader(transport: &DummyTransport) -> MfResult<Reader<&DummyTransport>> {
    let config = MfClientConfig::default().base_url("http://localhost:3030");
    Reader::with_transport(&config, transport)
}

#[test]
fn test_read_paths() -> MfResult<()> {
    init();
    let transport = DummyTransport::new();
    let reader = reader(&transport)?;

    reader.get_workflows(false)?;
    reader.get_workflows(true)?;
    reader.get_workflow("rm_stream")?;
    reader.get_profiles("rm_stream", None)?;
    reader.get_profiles("rm_stream", Some("task1"))?;
    reader.get_progress("rm_stream", "task1", "Exp1")?;
    reader.get_profile("rm_stream", "task1", "Exp1")?;
    reader.get_runtime("rm_stream", "task1", "Exp1")?;
    reader.get_total_runtime("rm_stream", "Exp1")?;
    reader.get_statistics("rm_stream", "energy")?;

    let requests = transport.requests();
    assert!(requests.iter().all(|r| r.method == Method::GET && r.body.is_none()));

    let urls = requests.into_iter().skip(1).map(|r| r.url).collect::<Vec<_>>();
    let expected = [
        "/workflows",
        "/workflows?details",
        "/workflows/rm_stream",
        "/profiles/rm_stream",
        "/profiles/rm_stream/task1",
        "/progress/rm_stream/task1/Exp1",
        "/profiles/rm_stream/task1/Exp1",
        "/runtime/rm_stream/task1/Exp1",
        "/runtime/rm_stream/Exp1",
        "/statistics/rm_stream?metric=energy",
    ]
    .iter()
    .map(|p| format!("{}{}", ROOT, p))
    .collect::<Vec<_>>();
    assert_eq!(urls, expected);
    Ok(())
}

#[test]
fn test_read_paths_encode_ids() -> MfResult<()> {
    init();
    let transport = DummyTransport::new();
    let reader = reader(&transport)?;

    reader.get_statistics("wf", "cpu&task=x#frag")?;
    reader.get_profiles("wf", Some("a/b"))?;
    reader.get_total_runtime("my wf", "e?1")?;

    let urls = transport
        .requests()
        .into_iter()
        .skip(1)
        .map(|r| r.url)
        .collect::<Vec<_>>();
    assert_eq!(
        urls,
        vec![
            format!("{}/statistics/wf?metric=cpu%26task%3Dx%23frag", ROOT),
            format!("{}/profiles/wf/a%2Fb", ROOT),
            format!("{}/runtime/my%20wf/e%3F1", ROOT),
        ]
    );

    let url = reqwest::Url::parse(&urls[0]).unwrap();
    assert_eq!(
        url.query_pairs().into_owned().collect::<Vec<_>>(),
        vec![("metric".to_string(), "cpu&task=x#frag".to_string())]
    );
    assert_eq!(url.fragment(), None);
    Ok(())
}

#[test]
fn test_returns_parsed_body() -> MfResult<()> {
    init();
    let body = json!({"rm_stream": {"href": "/v1/dreamcloud/mf/workflows/rm_stream"}});
    let transport = DummyTransport::new()
        .respond(200, json!({}))
        .respond(200, body.clone());
    let reader = reader(&transport)?;

    assert_eq!(reader.get_workflows(false)?, body);
    Ok(())
}

#[test]
fn test_error_is_recoverable() -> MfResult<()> {
    init();
    let transport = DummyTransport::new()
        .respond(200, json!({}))
        .respond(404, json!({"error": "No such workflow"}))
        .respond(200, json!({"total": 3}));
    let reader = reader(&transport)?;

    match reader.get_workflow("unknown") {
        Err(MfError::Remote { status, body }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, json!({"error": "No such workflow"}));
        }
        r => panic!("unexpected result: {:?}", r),
    }

    // The reader stays usable after an error
    assert_eq!(reader.get_total_runtime("wf", "e")?, json!({"total": 3}));
    Ok(())
}

#[test]
fn test_unreachable_service() {
    init();
    let transport = DummyTransport::new().fail();
    match reader(&transport) {
        Err(e @ MfError::Unreachable { .. }) => {
            assert_eq!(e.to_string(), format!("[ error: {} not accessible ]", ROOT))
        }
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("connecting should fail"),
    }
}
