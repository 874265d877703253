/// Declared media types the upload gate accepts. Clients disagree on how to
/// spell MP3, so the common aliases are all allowed.
pub const MP3_MEDIA_TYPES: &[&str] = &[
    "audio/mpeg",
    "audio/mp3",
    "audio/mpeg3",
    "audio/x-mpeg",
    "audio/x-mpeg-3",
    "audio/x-mp3",
];

/// Reduce a declared media type to its lowercase `type/subtype` essence,
/// dropping parameters such as `; charset=binary`.
pub fn essence(declared: &str) -> String {
    declared
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// True when the declared media type names MP3 audio.
/// Only the declaration is checked; the bytes are never inspected.
pub fn is_mp3(declared: &str) -> bool {
    let essence = essence(declared);
    MP3_MEDIA_TYPES.contains(&essence.as_str())
}
