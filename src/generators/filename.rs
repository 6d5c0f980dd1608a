//! Filename generator.

/// Replacement for `:`, which many filesystems forbid (U+A789 MODIFIER LETTER COLON).
pub const COLON_SUBSTITUTE: char = '\u{A789}';

const FORBIDDEN_CHARS: &[char] = &['*', '?', '<', '>', '"', '|', '\\', '/'];

/// Generate movie filename.
///
/// Format: `${title} (${year})${extension}`
pub fn movie_filename(title: &str, year: &str, extension: &str) -> String {
    format!("{} ({}){}", title, year, extension)
}

/// Generate TV episode filename.
///
/// Format: `${showTitle} - S${season2}E${episode2} - ${episodeTitle}${extension}`
pub fn episode_filename(
    show_title: &str,
    season: u32,
    episode: i32,
    episode_title: &str,
    extension: &str,
) -> String {
    format!(
        "{} - S{:02}E{:02} - {}{}",
        show_title, season, episode, episode_title, extension
    )
}

/// Make a name safe for the filesystem.
///
/// Removes `* ? < > " | \ /` and replaces every colon with a look-alike.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c == ':' { COLON_SUBSTITUTE } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_filename() {
        assert_eq!(movie_filename("The Matrix", "1999", ".mkv"), "The Matrix (1999).mkv");
    }

    #[test]
    fn test_episode_filename() {
        assert_eq!(
            episode_filename("Breaking Bad", 1, 5, "Gray Matter", ".mp4"),
            "Breaking Bad - S01E05 - Gray Matter.mp4"
        );
        assert_eq!(
            episode_filename("Show", 12, 110, "Long Run", ".mkv"),
            "Show - S12E110 - Long Run.mkv"
        );
    }

    #[test]
    fn test_sanitize_removes_forbidden() {
        assert_eq!(
            sanitize_filename(r#"What? <Really> "Now" | A\B / C*.mkv"#),
            "What Really Now  AB  C.mkv"
        );
    }

    #[test]
    fn test_sanitize_replaces_colon() {
        assert_eq!(
            sanitize_filename("Star Wars: Episode IV (1977).mkv"),
            "Star Wars\u{A789} Episode IV (1977).mkv"
        );
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for name in [
            "Star Wars: Episode IV (1977).mkv",
            r#"Who? "Me" <you> a/b\c|d*e:f"#,
            "Plain Name (2001).avi",
        ] {
            let once = sanitize_filename(name);
            assert_eq!(sanitize_filename(&once), once);
        }
    }
}
