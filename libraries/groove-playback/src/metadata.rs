//! Display metadata derived from file names
//!
//! Convention: `Artist Name - Song Title.mp3`. Underscores read as spaces.

/// Title and artist derived from a file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    /// Track title
    pub title: String,

    /// Track artist
    pub artist: String,
}

const ARTIST_SEPARATOR: &str = " - ";

/// Derive metadata from `file_name`, using `unknown_artist` when none is encoded
pub fn parse_file_name_with(file_name: &str, unknown_artist: &str) -> TrackMetadata {
    let cleaned = strip_extension(file_name).replace('_', " ");

    match cleaned.split_once(ARTIST_SEPARATOR) {
        Some((artist, title)) => TrackMetadata {
            title: title.trim().to_string(),
            artist: artist.trim().to_string(),
        },
        None => TrackMetadata {
            title: cleaned,
            artist: unknown_artist.to_string(),
        },
    }
}

/// Derive metadata from `file_name` with the default "Unknown Artist"
pub fn parse_file_name(file_name: &str) -> TrackMetadata {
    parse_file_name_with(file_name, "Unknown Artist")
}

/// Whether a MIME type names audio content
pub fn is_audio_mime(mime_type: &str) -> bool {
    mime_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("audio/"))
}

// Drops a trailing `.ext`; the extension must be non-empty and free of `.`/`/`
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) => {
            let ext = &file_name[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                file_name
            } else {
                &file_name[..dot]
            }
        }
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_and_title() {
        let meta = parse_file_name("Artist Name - Song Title.mp3");
        assert_eq!(meta.artist, "Artist Name");
        assert_eq!(meta.title, "Song Title");
    }

    #[test]
    fn underscores_without_artist() {
        let meta = parse_file_name("just_a_title.mp3");
        assert_eq!(meta.artist, "Unknown Artist");
        assert_eq!(meta.title, "just a title");
    }

    #[test]
    fn splits_on_first_separator_only() {
        let meta = parse_file_name("Band - Live - Encore.flac");
        assert_eq!(meta.artist, "Band");
        assert_eq!(meta.title, "Live - Encore");
    }

    #[test]
    fn underscore_separator_counts() {
        let meta = parse_file_name("Some_Band_-_Some_Song.ogg");
        assert_eq!(meta.artist, "Some Band");
        assert_eq!(meta.title, "Some Song");
    }

    #[test]
    fn only_last_extension_is_removed() {
        assert_eq!(parse_file_name("mix.2024.wav").title, "mix.2024");
        assert_eq!(parse_file_name("no_extension").title, "no extension");
        assert_eq!(parse_file_name("trailing.").title, "trailing.");
    }

    #[test]
    fn hyphen_without_spaces_is_not_a_separator() {
        let meta = parse_file_name("Jay-Z.mp3");
        assert_eq!(meta.artist, "Unknown Artist");
        assert_eq!(meta.title, "Jay-Z");
    }

    #[test]
    fn custom_unknown_artist() {
        let meta = parse_file_name_with("demo.mp3", "Anonymous");
        assert_eq!(meta.artist, "Anonymous");
    }

    #[test]
    fn audio_mime_detection() {
        assert!(is_audio_mime("audio/mpeg"));
        assert!(is_audio_mime("Audio/FLAC"));
        assert!(!is_audio_mime("video/mp4"));
        assert!(!is_audio_mime("image/png"));
        assert!(!is_audio_mime(""));
        assert!(!is_audio_mime("audio"));
    }
}
