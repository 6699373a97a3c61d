/// Integration tests for the capture orchestrator
///
/// These drive the orchestrator with fake collaborators to check failure
/// handling, translation fallback, timeouts and superseded captures.
mod common;

use common::*;
use snip_ocr::capture::{CaptureOrchestrator, CaptureSettings};
use snip_ocr::selection::FinalizedSelection;
use snip_ocr::{CaptureError, ErrorKind, Presentation, Rectangle, ScrollOffset};
use std::sync::Arc;
use std::time::Duration;

fn orchestrator(rasterizer: Arc<BlankRasterizer>, ocr: Arc<ScriptedOcr>) -> CaptureOrchestrator {
    CaptureOrchestrator::new(rasterizer, ocr, CaptureSettings::default())
}

fn translating(
    rasterizer: Arc<BlankRasterizer>,
    ocr: Arc<ScriptedOcr>,
    translator: Arc<FakeTranslator>,
) -> CaptureOrchestrator {
    let settings = CaptureSettings {
        target_locale: Some("pt".to_string()),
        ..CaptureSettings::default()
    };
    CaptureOrchestrator::new(rasterizer, ocr, settings).with_translator(translator)
}

#[tokio::test]
async fn test_nothing_presented_initially() {
    let orchestrator = orchestrator(
        Arc::new(BlankRasterizer::default()),
        Arc::new(ScriptedOcr::new(vec![])),
    );
    assert_eq!(orchestrator.current(), Presentation::Empty);
    assert_eq!(orchestrator.latest_token(), 0);
}

#[tokio::test]
async fn test_successful_capture_is_presented() {
    let ocr = Arc::new(ScriptedOcr::new(vec![Reply::text("  Hello world \n")]));
    let orchestrator = orchestrator(Arc::new(BlankRasterizer::default()), ocr.clone());

    let result = orchestrator
        .process(selection(100.0, 100.0, 200.0, 150.0))
        .await
        .unwrap();

    assert_eq!(result.token, 1);
    assert_eq!(result.text, "Hello world");
    assert_eq!(result.language, "eng");
    assert_eq!(result.words.len(), 2);
    assert_eq!(ocr.languages.lock().unwrap().as_slice(), ["eng"]);

    match orchestrator.current() {
        Presentation::Ready {
            token,
            selection,
            result,
            popover,
        } => {
            assert_eq!(token, 1);
            assert_eq!(selection, Rectangle::new(100.0, 100.0, 200.0, 150.0));
            assert_eq!(result.display_text(), "Hello world");
            // 24px glyph boxes
            assert_eq!(popover.font_size, 18.0);
        }
        other => panic!("Expected a ready presentation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_degenerate_selection_is_suppressed() {
    let rasterizer = Arc::new(BlankRasterizer::default());
    let orchestrator = orchestrator(rasterizer.clone(), Arc::new(ScriptedOcr::new(vec![])));

    let err = orchestrator
        .process(selection(10.0, 10.0, 0.0, 30.0))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidSelection);
    assert_eq!(rasterizer.calls(), 0);
    assert_eq!(orchestrator.latest_token(), 0);
    assert_eq!(orchestrator.current(), Presentation::Empty);
}

#[tokio::test]
async fn test_empty_capture_skips_ocr() {
    let ocr = Arc::new(ScriptedOcr::new(vec![]));
    let orchestrator = orchestrator(Arc::new(BlankRasterizer::sized(0, 40)), ocr.clone());

    let err = orchestrator
        .process(selection(0.0, 0.0, 50.0, 40.0))
        .await
        .unwrap_err();

    assert_eq!(err, CaptureError::CaptureEmpty { width: 0, height: 40 });
    assert_eq!(ocr.calls(), 0);
    assert!(matches!(
        orchestrator.current(),
        Presentation::Failed { kind: ErrorKind::CaptureEmpty, .. }
    ));
}

#[tokio::test]
async fn test_recognition_failure_is_presented_inline() {
    let ocr = Arc::new(ScriptedOcr::new(vec![Reply::error("engine crashed")]));
    let orchestrator = orchestrator(Arc::new(BlankRasterizer::default()), ocr);

    let err = orchestrator
        .process(selection(0.0, 0.0, 50.0, 40.0))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RecognitionFailed);
    match orchestrator.current() {
        Presentation::Failed { kind, message, popover, .. } => {
            assert_eq!(kind, ErrorKind::RecognitionFailed);
            assert!(message.contains("engine crashed"));
            // Positioned under the collapsed selection
            assert_eq!(popover.top, 48.0);
        }
        other => panic!("Expected a failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_blank_text_is_recognition_failure() {
    let ocr = Arc::new(ScriptedOcr::new(vec![Reply::text(" \n\t ")]));
    let orchestrator = orchestrator(Arc::new(BlankRasterizer::default()), ocr);

    let err = orchestrator
        .process(selection(0.0, 0.0, 50.0, 40.0))
        .await
        .unwrap_err();
    assert_eq!(err, CaptureError::RecognitionFailed("no usable text".to_string()));
}

#[tokio::test]
async fn test_failure_does_not_block_next_capture() {
    let ocr = Arc::new(ScriptedOcr::new(vec![Reply::error("bad"), Reply::text("good")]));
    let orchestrator = orchestrator(Arc::new(BlankRasterizer::default()), ocr);

    assert!(orchestrator.process(selection(0.0, 0.0, 10.0, 10.0)).await.is_err());
    let result = orchestrator
        .process(selection(0.0, 0.0, 10.0, 10.0))
        .await
        .unwrap();
    assert_eq!(result.text, "good");
    assert_eq!(orchestrator.current().token(), Some(2));
}

#[tokio::test]
async fn test_translation_is_applied() {
    let translator = Arc::new(FakeTranslator::ok("Olá mundo"));
    let orchestrator = translating(
        Arc::new(BlankRasterizer::default()),
        Arc::new(ScriptedOcr::new(vec![Reply::text("Hello world")])),
        translator.clone(),
    );

    let result = orchestrator
        .process(selection(0.0, 0.0, 10.0, 10.0))
        .await
        .unwrap();

    assert_eq!(result.text, "Hello world");
    assert_eq!(result.translated.as_deref(), Some("Olá mundo"));
    assert_eq!(result.target_locale.as_deref(), Some("pt"));
    assert_eq!(result.display_text(), "Olá mundo");
}

#[tokio::test]
async fn test_translation_failure_falls_back_to_recognized_text() {
    let translator = Arc::new(FakeTranslator::failing());
    let orchestrator = translating(
        Arc::new(BlankRasterizer::default()),
        Arc::new(ScriptedOcr::new(vec![Reply::text("Hello world")])),
        translator.clone(),
    );

    let result = orchestrator
        .process(selection(0.0, 0.0, 10.0, 10.0))
        .await
        .unwrap();

    assert_eq!(translator.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(result.translated, None);
    assert_eq!(result.target_locale, None);
    assert_eq!(result.display_text(), "Hello world");
    assert!(matches!(orchestrator.current(), Presentation::Ready { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_stalled_translation_times_out_to_recognized_text() {
    let orchestrator = translating(
        Arc::new(BlankRasterizer::default()),
        Arc::new(ScriptedOcr::new(vec![Reply::text("Hello")])),
        Arc::new(FakeTranslator::stalled()),
    );

    let result = orchestrator
        .process(selection(0.0, 0.0, 10.0, 10.0))
        .await
        .unwrap();

    assert_eq!(result.display_text(), "Hello");
}

#[tokio::test(start_paused = true)]
async fn test_stalled_recognition_times_out() {
    let ocr = Arc::new(ScriptedOcr::new(vec![
        Reply::text("too late").after(Duration::from_secs(120)),
    ]));
    let settings = CaptureSettings {
        recognition_timeout: Duration::from_secs(5),
        ..CaptureSettings::default()
    };
    let orchestrator = CaptureOrchestrator::new(Arc::new(BlankRasterizer::default()), ocr, settings);

    let err = orchestrator
        .process(selection(0.0, 0.0, 10.0, 10.0))
        .await
        .unwrap_err();

    assert_eq!(err, CaptureError::Timeout { stage: "Recognition", seconds: 5 });
    assert!(matches!(
        orchestrator.current(),
        Presentation::Failed { kind: ErrorKind::RecognitionFailed, .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_budget_covers_capture_and_recognition() {
    // 3s rasterizing + 3s recognizing overruns a 5s budget
    let ocr = Arc::new(ScriptedOcr::new(vec![Reply::text("late").after(Duration::from_secs(3))]));
    let settings = CaptureSettings {
        recognition_timeout: Duration::from_secs(5),
        ..CaptureSettings::default()
    };
    let orchestrator = CaptureOrchestrator::new(
        Arc::new(BlankRasterizer::slow(Duration::from_secs(3))),
        ocr,
        settings,
    );

    let err = orchestrator
        .process(selection(0.0, 0.0, 10.0, 10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, CaptureError::Timeout { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_only_newest_selection_is_presented() {
    let ocr = Arc::new(ScriptedOcr::new(vec![
        Reply::text("first").after(Duration::from_secs(2)),
        Reply::text("second").after(Duration::from_millis(100)),
    ]));
    let orchestrator = orchestrator(Arc::new(BlankRasterizer::default()), ocr);
    let mut presentation = orchestrator.subscribe();

    let first = orchestrator.begin(&selection(0.0, 0.0, 10.0, 10.0));
    let first_run = orchestrator.run(first, selection(0.0, 0.0, 10.0, 10.0));

    let second_run = async {
        // Second gesture finalizes while the first is still recognizing
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = orchestrator.begin(&selection(50.0, 50.0, 20.0, 20.0));
        orchestrator.run(second, selection(50.0, 50.0, 20.0, 20.0)).await
    };

    let (first_result, second_result) = tokio::join!(first_run, second_run);

    assert_eq!(first_result.unwrap_err(), CaptureError::Superseded { token: 1 });
    assert_eq!(second_result.unwrap().text, "second");

    match &*presentation.borrow_and_update() {
        Presentation::Ready { token, result, .. } => {
            assert_eq!(*token, 2);
            assert_eq!(result.text, "second");
        }
        other => panic!("Expected the second result, got {:?}", other),
    };
}

#[tokio::test(start_paused = true)]
async fn test_superseded_failure_is_not_presented() {
    let ocr = Arc::new(ScriptedOcr::new(vec![
        Reply::error("stale failure").after(Duration::from_secs(1)),
        Reply::text("fresh").after(Duration::from_secs(5)),
    ]));
    let orchestrator = orchestrator(Arc::new(BlankRasterizer::default()), ocr);

    let first = orchestrator.begin(&selection(0.0, 0.0, 10.0, 10.0));
    let first_run = orchestrator.run(first, selection(0.0, 0.0, 10.0, 10.0));
    let next_gesture = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        orchestrator.begin(&selection(0.0, 0.0, 10.0, 10.0))
    };

    // The stale run fails after the newer selection began; it must leave
    // "processing #2" in place
    let (first_result, second) = tokio::join!(first_run, next_gesture);
    assert_eq!(first_result.unwrap_err(), CaptureError::Superseded { token: 1 });
    assert_eq!(orchestrator.current().token(), Some(second));
    assert!(orchestrator.current().is_processing());

    orchestrator
        .run(second, selection(0.0, 0.0, 10.0, 10.0))
        .await
        .unwrap();
    assert!(matches!(orchestrator.current(), Presentation::Ready { token: 2, .. }));
}

#[tokio::test]
async fn test_scroll_offset_reaches_rasterizer() {
    let rasterizer = Arc::new(BlankRasterizer::default());
    let orchestrator = orchestrator(rasterizer.clone(), Arc::new(ScriptedOcr::new(vec![])));

    let scrolled = FinalizedSelection {
        rect: Rectangle::new(10.0, 10.0, 40.0, 40.0),
        scroll: ScrollOffset::new(15.0, 700.0),
    };
    orchestrator.process(scrolled).await.unwrap();

    let options = rasterizer.last_options.lock().unwrap().unwrap();
    assert_eq!(options.scroll_offset_x, 15.0);
    assert_eq!(options.scroll_offset_y, 700.0);
    assert!(options.allow_cross_origin);
}

#[tokio::test]
async fn test_viewer_sees_capture_even_when_ocr_fails() {
    let viewer = Arc::new(RecordingViewer::default());
    let orchestrator = orchestrator(
        Arc::new(BlankRasterizer::default()),
        Arc::new(ScriptedOcr::new(vec![Reply::error("nope")])),
    )
    .with_viewer(viewer.clone());

    assert!(orchestrator.process(selection(0.0, 0.0, 30.0, 20.0)).await.is_err());
    assert_eq!(viewer.shown.lock().unwrap().as_slice(), [(1, 30, 20)]);
}

#[tokio::test]
async fn test_viewer_failure_is_ignored() {
    let viewer = Arc::new(RecordingViewer {
        fail: true,
        ..RecordingViewer::default()
    });
    let orchestrator = orchestrator(
        Arc::new(BlankRasterizer::default()),
        Arc::new(ScriptedOcr::new(vec![Reply::text("still fine")])),
    )
    .with_viewer(viewer);

    let result = orchestrator
        .process(selection(0.0, 0.0, 30.0, 20.0))
        .await
        .unwrap();
    assert_eq!(result.text, "still fine");
}
