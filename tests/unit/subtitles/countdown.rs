use super::*;

fn cues(srt: &str) -> Vec<Vec<&str>> {
    srt.split("\n\n")
        .filter(|c| !c.is_empty())
        .map(|c| c.lines().collect())
        .collect()
}

#[test]
fn timestamps_roll_over_into_hours() {
    assert_eq!(timestamp(0), "00:00:00,000");
    assert_eq!(timestamp(61), "00:01:01,000");
    assert_eq!(timestamp(3600 + 59 * 60 + 5), "01:59:05,000");
}

#[test]
fn one_cue_per_second_plus_the_final_minute() {
    let srt = countdown_srt(2);
    let cues = cues(&srt);
    assert_eq!(cues.len(), 121);

    assert_eq!(cues[0], vec!["1", "00:00:00,000 --> 00:00:01,000", "02:00"]);
    assert_eq!(cues[59], vec!["60", "00:00:59,000 --> 00:01:00,000", "01:01"]);
    assert_eq!(cues[119], vec!["120", "00:01:59,000 --> 00:02:00,000", "00:01"]);
    assert_eq!(cues[120], vec!["121", "00:02:00,000 --> 00:03:00,000", "00:00"]);
}

#[test]
fn long_countdowns_use_real_hours() {
    let srt = countdown_srt(90);
    let cues = cues(&srt);
    assert_eq!(cues.len(), 5401);
    assert_eq!(cues[3600][1], "01:00:00,000 --> 01:00:01,000");
    assert_eq!(cues[3600][2], "30:00");
    assert_eq!(cues[5400][1], "01:30:00,000 --> 01:31:00,000");
}

#[test]
fn zero_minutes_is_just_the_final_cue() {
    assert_eq!(
        countdown_srt(0),
        "1\n00:00:00,000 --> 00:01:00,000\n00:00\n\n"
    );
}

#[test]
fn srt_is_written_under_missing_directories() {
    let dir = std::path::PathBuf::from("target").join("countdown_write");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("nested").join("countdown.srt");

    let srt = countdown_srt(1);
    write_srt(&path, &srt).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), srt);
}
