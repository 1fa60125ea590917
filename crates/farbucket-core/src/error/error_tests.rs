#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn PipelineError___configuration___displays_message() {
    let err = PipelineError::Configuration("--upload requires --engine-version".to_string());

    assert_eq!(
        err.to_string(),
        "configuration error: --upload requires --engine-version"
    );
}

#[test]
fn PipelineError___external_tool___displays_tool_and_status() {
    let err = PipelineError::tool("pm", ToolStatus::Exited(2));

    assert_eq!(err.to_string(), "pm failed: exit status 2");
}

#[test]
fn PipelineError___missing_output___displays_path() {
    let err = PipelineError::tool(
        "gn",
        ToolStatus::MissingOutput(PathBuf::from("out/fuchsia_debug_x64")),
    );

    assert!(err.to_string().contains("out/fuchsia_debug_x64"));
}

#[test]
fn PipelineError___file_system___displays_path_and_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
    let err = PipelineError::fs("/bucket/flutter", io_err);

    let msg = err.to_string();
    assert!(msg.contains("/bucket/flutter"));
    assert!(msg.contains("access denied"));
}

#[test_case(PipelineError::Configuration("x".into()), 1)]
#[test_case(PipelineError::tool("ninja", ToolStatus::Exited(3)), 3)]
#[test_case(PipelineError::tool("ninja", ToolStatus::Terminated), 1)]
#[test_case(PipelineError::tool("ninja", ToolStatus::Spawn("not found".into())), 1)]
fn PipelineError___exit_code___maps_variants(err: PipelineError, expected: i32) {
    assert_eq!(err.exit_code(), expected);
}

#[test]
fn PipelineError___from_json_error___converts() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: PipelineError = json_err.into();

    assert!(matches!(err, PipelineError::Serialization(_)));
}
