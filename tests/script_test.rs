/// Replays the bundled demo script the way the binary does
mod common;

use common::*;
use snip_ocr::capture::{CaptureOrchestrator, CaptureSettings};
use snip_ocr::script::{Script, ScriptStep};
use snip_ocr::selection::{SelectionController, Transition};
use snip_ocr::{Presentation, Rectangle, Session};
use std::sync::Arc;

const DEMO: &str = include_str!("../demos/select_heading.json");

#[tokio::test]
async fn test_demo_script_replays_to_one_capture() {
    let script = Script::from_json(DEMO).unwrap();
    let ocr = Arc::new(ScriptedOcr::new(vec![Reply::text("Selecione uma área")]));
    let orchestrator = CaptureOrchestrator::new(
        Arc::new(BlankRasterizer::default()),
        ocr.clone(),
        CaptureSettings::default(),
    );
    let mut session = Session::new(SelectionController::default(), Arc::new(orchestrator));

    let mut finalized = Vec::new();
    let mut cancelled = 0;
    for step in script.steps {
        match step {
            ScriptStep::Wait { .. } => {
                if let Some(duration) = step.wait() {
                    tokio::time::sleep(duration).await;
                }
            }
            ScriptStep::Input(event) => match session.dispatch(event) {
                Transition::Finalized(selection) => finalized.push(selection.rect),
                Transition::Cancelled => cancelled += 1,
                _ => {}
            },
        }
    }

    // The unmodified drag is ignored and the second one is cancelled
    assert_eq!(finalized, vec![Rectangle::new(40.0, 20.0, 360.0, 40.0)]);
    assert_eq!(cancelled, 1);

    match session.settle().await {
        Presentation::Ready { result, .. } => assert_eq!(result.text, "Selecione uma área"),
        other => panic!("Expected a ready presentation, got {:?}", other),
    }
    assert_eq!(ocr.calls(), 1);
}
