use super::*;

#[derive(Default)]
struct RecordingRenderer {
    jobs: Vec<RenderQueueJob>,
}

impl CompositionRenderer for RecordingRenderer {
    fn render(&mut self, job: &RenderQueueJob) -> PocketResult<()> {
        self.jobs.push(job.clone());
        Ok(())
    }
}

fn fixture(name: &str, folders: &[u32]) -> PathBuf {
    let root = PathBuf::from("target").join("render_queue").join(name);
    let _ = std::fs::remove_dir_all(&root);
    let slots = SlotSet::default();
    for n in folders {
        let dir = root.join("Source").join(n.to_string());
        std::fs::create_dir_all(&dir).unwrap();
        for slot in slots.names() {
            std::fs::write(dir.join(slot), b"x").unwrap();
        }
    }
    root
}

fn opts(root: &Path, start: u32, amount: u32) -> RenderQueueOpts {
    RenderQueueOpts {
        source_root: root.join("Source"),
        export_root: root.join("Rendered"),
        start,
        amount,
        slots: SlotSet::default(),
    }
}

#[test]
fn default_slots_are_six_screens_and_a_logo() {
    let slots = SlotSet::default();
    let names: Vec<&str> = slots.names().collect();
    assert_eq!(
        names,
        vec!["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg", "logo.png"]
    );
}

#[test]
fn plan_resolves_every_slot() {
    let root = fixture("plan", &[4]);
    let job = plan_job(
        &root.join("Source"),
        &root.join("Rendered"),
        4,
        &SlotSet::default(),
    )
    .unwrap();
    assert_eq!(job.screens.len(), 6);
    assert_eq!(job.screens[0], root.join("Source/4/1.jpg"));
    assert_eq!(job.logo, root.join("Source/4/logo.png"));
    assert_eq!(job.out_path, root.join("Rendered/4.mp4"));
}

#[test]
fn missing_slot_file_is_a_template_error() {
    let root = fixture("missing_slot", &[1]);
    std::fs::remove_file(root.join("Source/1/5.jpg")).unwrap();
    let err = plan_job(
        &root.join("Source"),
        &root.join("Rendered"),
        1,
        &SlotSet::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PocketError::Template(ref m) if m.contains("5.jpg")));
}

#[test]
fn queue_renders_consecutive_numbers() {
    let root = fixture("consecutive", &[2, 3, 4]);
    let mut renderer = RecordingRenderer::default();
    let written = run_render_queue(&opts(&root, 2, 3), &mut renderer).unwrap();
    assert_eq!(
        written,
        vec![
            root.join("Rendered/2.mp4"),
            root.join("Rendered/3.mp4"),
            root.join("Rendered/4.mp4"),
        ]
    );
    let numbers: Vec<u32> = renderer.jobs.iter().map(|j| j.number).collect();
    assert_eq!(numbers, vec![2, 3, 4]);
}

#[test]
fn start_zero_is_rejected() {
    let root = fixture("start_zero", &[1]);
    let mut renderer = RecordingRenderer::default();
    let err = run_render_queue(&opts(&root, 0, 1), &mut renderer).unwrap_err();
    assert!(matches!(err, PocketError::Validation(_)));
    assert!(renderer.jobs.is_empty());
}

#[test]
fn queue_halts_at_the_first_missing_folder() {
    let root = fixture("halts", &[1, 3]);
    let mut renderer = RecordingRenderer::default();
    let err = run_render_queue(&opts(&root, 1, 3), &mut renderer).unwrap_err();
    assert!(matches!(err, PocketError::Template(_)));
    let numbers: Vec<u32> = renderer.jobs.iter().map(|j| j.number).collect();
    assert_eq!(numbers, vec![1]);
}

#[test]
fn zero_amount_renders_nothing() {
    let root = fixture("zero_amount", &[]);
    let mut renderer = RecordingRenderer::default();
    assert!(run_render_queue(&opts(&root, 1, 0), &mut renderer)
        .unwrap()
        .is_empty());
}
