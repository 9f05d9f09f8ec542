use super::*;
use crate::foundation::core::Fps;
use std::io::Read as _;

#[test]
fn transparent_pixels_become_background() {
    let mut dst = vec![0u8; 4];
    flatten_over_bg(&mut dst, &[0, 0, 0, 0], true, Rgba8::opaque(10, 20, 30));
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn opaque_pixels_pass_through() {
    let mut dst = vec![0u8; 4];
    flatten_over_bg(&mut dst, &[1, 2, 3, 255], false, Rgba8::opaque(10, 20, 30));
    assert_eq!(dst, vec![1, 2, 3, 255]);
}

#[test]
fn straight_alpha_is_weighted_before_blending() {
    let mut straight = vec![0u8; 4];
    let mut premul = vec![0u8; 4];
    flatten_over_bg(&mut straight, &[255, 0, 0, 128], false, Rgba8::opaque(0, 0, 0));
    flatten_over_bg(&mut premul, &[128, 0, 0, 128], true, Rgba8::opaque(0, 0, 0));
    assert_eq!(straight, premul);
    assert_eq!(straight, vec![128, 0, 0, 255]);
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_odd/out.mp4"));
    let err = sink
        .begin(SinkConfig {
            width: 3,
            height: 2,
            fps: Fps::new(30, 1).unwrap(),
        })
        .unwrap_err();
    assert!(matches!(err, PocketError::Validation(_)));
}

#[test]
fn pushing_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_unstarted/out.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: false,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn existing_output_is_rejected_without_overwrite() {
    let out = std::path::PathBuf::from("target/ffmpeg_no_overwrite/out.mp4");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();
    std::fs::write(&out, b"keep me").unwrap();

    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        overwrite: false,
        ..FfmpegSinkOpts::new(&out)
    });
    let err = sink
        .begin(SinkConfig {
            width: 2,
            height: 2,
            fps: Fps::new(30, 1).unwrap(),
        })
        .unwrap_err();
    assert!(matches!(err, PocketError::Validation(_)));
    assert_eq!(std::fs::read(&out).unwrap(), b"keep me");
}

/// Attach a child that stands in for an encoder rejecting its input.
#[cfg(unix)]
fn sink_with_exited_encoder(script: &str, width: u32, height: u32) -> FfmpegSink {
    let mut child = Command::new("sh")
        .args(["-c", script])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let stdin = child.stdin.take().unwrap();
    let mut stderr = child.stderr.take().unwrap();
    let drain = std::thread::spawn(move || {
        let mut bytes = Vec::new();
        stderr.read_to_end(&mut bytes)?;
        Ok(bytes)
    });

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_exited/out.mp4"));
    sink.scratch = vec![0u8; (width as usize) * (height as usize) * 4];
    sink.child = Some(child);
    sink.stdin = Some(stdin);
    sink.stderr_drain = Some(drain);
    sink.cfg = Some(SinkConfig {
        width,
        height,
        fps: Fps::new(30, 1).unwrap(),
    });
    sink
}

#[cfg(unix)]
#[test]
fn write_failure_reaps_the_encoder_and_reports_its_stderr() {
    let mut sink = sink_with_exited_encoder("echo unknown encoder libx264 >&2; exit 1", 2, 2);
    let err = sink.write_failed(std::io::Error::from(std::io::ErrorKind::BrokenPipe));

    let PocketError::Encode(msg) = err else {
        panic!("expected an encode error, got {err:?}");
    };
    assert!(msg.contains("unknown encoder libx264"), "{msg}");
    assert!(sink.child.is_none());
    assert!(sink.stdin.is_none());
    assert!(sink.stderr_drain.is_none());
    assert!(sink.push_frame(FrameIndex(0), &FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: false,
    })
    .is_err());
}

#[cfg(unix)]
#[test]
fn pushing_into_an_exited_encoder_returns_its_stderr() {
    // Large enough to overflow the pipe buffer once the reader is gone.
    let (w, h) = (512u32, 512u32);
    let mut sink = sink_with_exited_encoder("exec 0<&-; echo codec not available >&2; exit 1", w, h);
    let frame = FrameRGBA {
        width: w,
        height: h,
        data: vec![255; (w * h * 4) as usize],
        premultiplied: false,
    };

    let mut result = Ok(());
    for i in 0..8 {
        result = sink.push_frame(FrameIndex(i), &frame);
        if result.is_err() {
            break;
        }
    }
    let err = result.unwrap_err();
    assert!(err.to_string().contains("codec not available"), "{err}");
    assert!(sink.child.is_none());
}

#[cfg(unix)]
#[test]
fn dropping_a_started_sink_reaps_the_encoder() {
    let sink = sink_with_exited_encoder("cat >/dev/null", 2, 2);
    drop(sink);
}
