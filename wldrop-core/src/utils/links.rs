/// Turn whatever the creator typed as a discord link into a usable URL.
///
/// `discord.gg/x` and `www.…` get a scheme; a bare invite code becomes a
/// `discord.gg` link; full URLs and blanks pass through.
pub fn normalize_discord_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Some(trimmed.to_string());
    }
    if trimmed.starts_with("discord") || trimmed.starts_with("www") {
        return Some(format!("https://{trimmed}"));
    }
    Some(format!("https://discord.gg/{trimmed}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_discord_url() {
        assert_eq!(normalize_discord_url("  "), None);
        assert_eq!(
            normalize_discord_url("discord.gg/abc").as_deref(),
            Some("https://discord.gg/abc")
        );
        assert_eq!(
            normalize_discord_url("www.discord.com/invite/abc").as_deref(),
            Some("https://www.discord.com/invite/abc")
        );
        assert_eq!(
            normalize_discord_url("abc123").as_deref(),
            Some("https://discord.gg/abc123")
        );
        assert_eq!(
            normalize_discord_url("https://discord.gg/abc").as_deref(),
            Some("https://discord.gg/abc")
        );
    }
}
