use babyland_api::scanner::{Decoder, Frame, FrameSource, PollingScanner, ScanError};

/// Frame source backed by a fixed list of frames.
struct StubSource {
    frames: Vec<Frame>,
    cursor: usize,
    fail_at: Option<usize>,
}

impl StubSource {
    fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            cursor: 0,
            fail_at: None,
        }
    }
}

impl FrameSource for StubSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, ScanError> {
        if self.fail_at == Some(self.cursor) {
            return Err(ScanError::Source("camera disconnected".into()));
        }
        let frame = self.frames.get(self.cursor).cloned();
        self.cursor += 1;
        Ok(frame)
    }
}

/// Decoder that reads a payload out of frames whose first pixel is set.
struct StubDecoder;

impl Decoder for StubDecoder {
    fn decode(&self, frame: &Frame) -> Result<Option<String>, ScanError> {
        match frame.pixels.first() {
            Some(1) => Ok(Some("BL-0001".to_string())),
            Some(255) => Err(ScanError::Decode("garbled frame".into())),
            _ => Ok(None),
        }
    }
}

fn frame(marker: u8) -> Frame {
    Frame {
        width: 1,
        height: 1,
        pixels: vec![marker],
    }
}

#[test]
fn poll_yields_nothing_for_a_codeless_frame() {
    let source = StubSource::new(vec![frame(0)]);
    let mut scanner = PollingScanner::new(Box::new(source), Box::new(StubDecoder));

    assert_eq!(scanner.poll().unwrap(), None);
    assert!(!scanner.exhausted());
}

#[test]
fn next_code_skips_codeless_frames() {
    let source = StubSource::new(vec![frame(0), frame(0), frame(1)]);
    let mut scanner = PollingScanner::new(Box::new(source), Box::new(StubDecoder));

    let code = scanner.next_code(10).unwrap();
    assert_eq!(code.as_deref(), Some("BL-0001"));
}

#[test]
fn next_code_stops_when_the_source_ends() {
    let source = StubSource::new(vec![frame(0), frame(0)]);
    let mut scanner = PollingScanner::new(Box::new(source), Box::new(StubDecoder));

    assert_eq!(scanner.next_code(10).unwrap(), None);
    assert!(scanner.exhausted());

    // Further polls stay quiet instead of hitting the dead source again.
    assert_eq!(scanner.poll().unwrap(), None);
}

#[test]
fn next_code_respects_the_poll_budget() {
    let frames = vec![frame(0), frame(0), frame(0), frame(1)];
    let source = StubSource::new(frames);
    let mut scanner = PollingScanner::new(Box::new(source), Box::new(StubDecoder));

    assert_eq!(scanner.next_code(3).unwrap(), None);
    assert!(!scanner.exhausted());

    // The code is still there for the next round of polling.
    assert_eq!(scanner.next_code(1).unwrap().as_deref(), Some("BL-0001"));
}

#[test]
fn source_errors_surface_to_the_caller() {
    let mut source = StubSource::new(vec![frame(0), frame(0)]);
    source.fail_at = Some(1);
    let mut scanner = PollingScanner::new(Box::new(source), Box::new(StubDecoder));

    assert_eq!(scanner.poll().unwrap(), None);
    assert!(matches!(scanner.poll(), Err(ScanError::Source(_))));
}

#[test]
fn decoder_errors_surface_to_the_caller() {
    let source = StubSource::new(vec![frame(255)]);
    let mut scanner = PollingScanner::new(Box::new(source), Box::new(StubDecoder));

    assert!(matches!(scanner.next_code(5), Err(ScanError::Decode(_))));
}
