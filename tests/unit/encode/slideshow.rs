use std::path::PathBuf;

use super::*;
use crate::encode::sink::InMemorySink;

fn write_solid(path: &Path, w: u32, h: u32, rgba: [u8; 4]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbaImage::from_pixel(w, h, image::Rgba(rgba)).save(path).unwrap();
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    frame.data[i..i + 4].try_into().unwrap()
}

fn job(name: &str) -> RenderQueueJob {
    let folder = PathBuf::from("target").join("slideshow").join(name);
    let _ = std::fs::remove_dir_all(&folder);
    write_solid(&folder.join("1.png"), 2, 1, [255, 0, 0, 255]);
    write_solid(&folder.join("2.png"), 8, 2, [0, 0, 255, 255]);
    write_solid(&folder.join("logo.png"), 2, 2, [255, 255, 255, 255]);
    RenderQueueJob {
        number: 1,
        screens: vec![folder.join("1.png"), folder.join("2.png")],
        logo: folder.join("logo.png"),
        out_path: folder.join("1.mp4"),
        folder,
    }
}

fn tiny_opts() -> SlideshowOpts {
    SlideshowOpts {
        canvas: Canvas {
            width: 4,
            height: 2,
        },
        fps: Fps::new(2, 1).unwrap(),
        hold_secs: 1.0,
        logo_secs: 1.5,
        overwrite: true,
    }
}

/// Accepts `fail_at` frames, then rejects the next one.
#[derive(Default)]
struct FailingSink {
    fail_at: u64,
    pushed: u64,
    ended: bool,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> PocketResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> PocketResult<()> {
        if self.pushed == self.fail_at {
            return Err(PocketError::encode("encoder went away"));
        }
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> PocketResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[test]
fn screens_are_held_then_the_logo_is_revealed() {
    let job = job("sequence");
    let mut sink = InMemorySink::new();
    let frames = FfmpegSlideshow::new(tiny_opts())
        .render_into(&job, &mut sink)
        .unwrap();

    assert_eq!(frames, 7);
    assert!(sink.is_finished());
    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 4,
            height: 2,
            fps: Fps::new(2, 1).unwrap(),
        })
    );

    let captured = sink.frames();
    let indexes: Vec<u64> = captured.iter().map(|(i, _)| i.0).collect();
    assert_eq!(indexes, (0..7).collect::<Vec<_>>());

    assert_eq!(pixel(&captured[0].1, 0, 0), [255, 0, 0, 255]);
    assert_eq!(pixel(&captured[1].1, 3, 1), [255, 0, 0, 255]);
    assert_eq!(pixel(&captured[2].1, 0, 0), [0, 0, 255, 255]);

    let last = &captured[6].1;
    assert_eq!(pixel(last, 1, 0), [255, 255, 255, 255]);
    assert_eq!(pixel(last, 0, 0), [0, 0, 255, 255]);
    assert_eq!(pixel(last, 3, 1), [0, 0, 255, 255]);
}

#[test]
fn cover_scaling_fills_the_canvas() {
    let folder = PathBuf::from("target").join("slideshow").join("cover");
    write_solid(&folder.join("tall.png"), 1, 5, [9, 9, 9, 255]);
    let frame = load_cover(&folder.join("tall.png"), Canvas { width: 4, height: 2 }).unwrap();
    assert_eq!((frame.width, frame.height), (4, 2));
    assert!(frame.data.chunks_exact(4).all(|px| px == [9, 9, 9, 255]));
}

#[test]
fn undecodable_slot_fails_before_begin() {
    let job = job("broken");
    std::fs::write(&job.screens[1], b"not an image").unwrap();

    let mut sink = InMemorySink::new();
    assert!(FfmpegSlideshow::new(tiny_opts())
        .render_into(&job, &mut sink)
        .is_err());
    assert!(sink.config().is_none());
}

#[test]
fn zero_hold_still_shows_each_screen_once() {
    let job = job("zero_hold");
    let mut sink = InMemorySink::new();
    let opts = SlideshowOpts {
        hold_secs: 0.0,
        logo_secs: 0.0,
        ..tiny_opts()
    };
    let frames = FfmpegSlideshow::new(opts).render_into(&job, &mut sink).unwrap();
    assert_eq!(frames, 3);
}


#[test]
fn failed_push_ends_the_sink_and_keeps_the_error() {
    let job = job("failing_sink");
    let mut sink = FailingSink {
        fail_at: 3,
        ..FailingSink::default()
    };
    let err = FfmpegSlideshow::new(tiny_opts())
        .render_into(&job, &mut sink)
        .unwrap_err();

    assert!(matches!(err, PocketError::Encode(ref msg) if msg == "encoder went away"));
    assert_eq!(sink.pushed, 3);
    assert!(sink.ended);
}

#[test]
fn existing_video_is_kept_without_overwrite() {
    let job = job("no_overwrite");
    std::fs::write(&job.out_path, b"previous render").unwrap();

    let opts = SlideshowOpts {
        overwrite: false,
        ..tiny_opts()
    };
    let err = FfmpegSlideshow::new(opts).render(&job).unwrap_err();
    assert!(matches!(err, PocketError::Validation(_)));
    assert_eq!(std::fs::read(&job.out_path).unwrap(), b"previous render");
}
