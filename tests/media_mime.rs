use tunebox::media::mime::{essence, is_mp3};

#[test]
fn test_audio_mpeg_is_mp3() {
    assert!(is_mp3("audio/mpeg"));
}

#[test]
fn test_aliases_are_mp3() {
    for alias in ["audio/mp3", "audio/mpeg3", "audio/x-mpeg-3", "audio/x-mp3"] {
        assert!(is_mp3(alias), "expected {alias} to be accepted");
    }
}

#[test]
fn test_case_and_parameters_ignored() {
    assert!(is_mp3("Audio/MPEG; charset=binary"));
    assert_eq!(essence(" audio/MPEG ;foo=bar"), "audio/mpeg");
}

#[test]
fn test_other_audio_rejected() {
    assert!(!is_mp3("audio/flac"));
    assert!(!is_mp3("audio/wav"));
}

#[test]
fn test_non_audio_rejected() {
    assert!(!is_mp3("text/plain"));
    assert!(!is_mp3("application/octet-stream"));
    assert!(!is_mp3(""));
}
